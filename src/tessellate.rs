// Procedural tessellation of surface primitives into explicit meshes.
//
// Converts the implicit quad/sphere description on a Surface into an
// indexed mesh stored as its display mesh. Resolution doubles per level;
// the normal estimator (faceted or smooth, per the surface flag) runs as
// the final step, so the output is immediately renderable.

use std::f32::consts::PI;

use glam::Vec3;

use crate::mesh::{Mesh, Surface, SurfaceShape};
use crate::normals::{facet_normals, smooth_normals};

/// Tessellate the surface and store the result as its display mesh,
/// discarding any previous one. The display mesh inherits the surface
/// frame; geometry is generated in the surface's local space.
pub fn tessellate_surface(surface: &mut Surface) {
    let mut mesh = Mesh::new();
    mesh.frame = surface.frame;

    match surface.shape {
        SurfaceShape::Quad => tessellate_quad(&mut mesh, surface.radius, surface.level),
        SurfaceShape::Sphere => tessellate_sphere(&mut mesh, surface.radius, surface.level),
    }

    log::debug!(
        "tessellated {:?} level {}: {} verts, {} tris, {} quads",
        surface.shape,
        surface.level,
        mesh.pos.len(),
        mesh.triangle.len(),
        mesh.quad.len(),
    );

    if surface.smooth {
        smooth_normals(&mut mesh);
    } else {
        facet_normals(&mut mesh);
    }

    surface.display_mesh = Some(mesh);
}

// ============================================================================
// QUAD PATCH
// ============================================================================

/// Bilinear grid over the quad with corners at radius * (±1, ±1, 0):
/// (c+1)² vertices and c² quads, c = 2^level. Normals are pre-seeded to
/// local +z; the estimator pass overwrites them.
fn tessellate_quad(mesh: &mut Mesh, radius: f32, level: u32) {
    let c = 1usize << level;

    let p00 = Vec3::new(-1.0, -1.0, 0.0) * radius;
    let p01 = Vec3::new(-1.0, 1.0, 0.0) * radius;
    let p10 = Vec3::new(1.0, -1.0, 0.0) * radius;
    let p11 = Vec3::new(1.0, 1.0, 0.0) * radius;

    // Row-major vertex grid: (i, j) lives at i * (c + 1) + j.
    let idx = |i: usize, j: usize| i * (c + 1) + j;

    for i in 0..=c {
        for j in 0..=c {
            let u = i as f32 / c as f32;
            let v = j as f32 / c as f32;
            let p = p00 * (u * v)
                + p01 * (u * (1.0 - v))
                + p10 * ((1.0 - u) * v)
                + p11 * ((1.0 - u) * (1.0 - v));
            mesh.pos.push(p);
            mesh.norm.push(Vec3::Z);
        }
    }

    for i in 0..c {
        for j in 0..c {
            mesh.quad.push([idx(i, j), idx(i + 1, j), idx(i + 1, j + 1), idx(i, j + 1)]);
        }
    }
}

// ============================================================================
// SPHERE
// ============================================================================

/// Latitude/longitude sphere: row = 2^(level+1) latitude bands, column =
/// 2 * row longitude steps. One pole vertex at (0,0,+r), row-1 interior
/// rings of `column` vertices, one pole at (0,0,-r). Triangle fans touch
/// the poles; interior rings are stitched with quad bands that wrap at the
/// phi = 0 seam.
///
/// Ring vertex (i, j) lives at 1 + (i-1) * column + j, so the index
/// arithmetic below (including the i % column == 0 seam cases) addresses
/// ring neighbours directly.
fn tessellate_sphere(mesh: &mut Mesh, radius: f32, level: u32) {
    let row = 1usize << (level + 1);
    let column = row * 2;

    mesh.pos.push(Vec3::new(0.0, 0.0, radius));
    for i in 1..row {
        for j in 0..column {
            let theta = PI * i as f32 / row as f32;
            let phi = 2.0 * PI * j as f32 / column as f32;
            mesh.pos.push(Vec3::new(
                radius * phi.cos() * theta.sin(),
                radius * phi.sin() * theta.sin(),
                radius * theta.cos(),
            ));
        }
    }
    mesh.pos.push(Vec3::new(0.0, 0.0, -radius));

    // Top fan: pole 0 against the first ring, wrapping back to vertex 1.
    for i in 1..=column {
        mesh.triangle.push([0, i, if i == column { 1 } else { i + 1 }]);
    }

    // Bottom fan: last ring against the bottom pole.
    let last = 1 + (row - 1) * column;
    for i in (last - column)..last {
        mesh.triangle.push([i, last, if i == last - 1 { last - column } else { i + 1 }]);
    }

    // Quad bands between adjacent interior rings; the i % column == 0 case
    // is the seam quad that wraps longitude back to the ring start.
    for i in 1..(last - column) {
        mesh.quad.push([
            i,
            i + column,
            if i % column == 0 { i + 1 } else { i + column + 1 },
            if i % column == 0 { i - column + 1 } else { i + 1 },
        ]);
    }
}

// ============================================================================
// TESTS
// ============================================================================
