// Catmull-Clark style subdivision of triangle/quad meshes.
//
// Each level runs four passes over a working copy of the mesh:
//   1. linear subdivision — new vertices (originals, edge midpoints,
//      triangle centroids, quad centers)
//   2. face rebuild       — 3 quads per triangle, 4 per quad
//   3. averaging          — per-vertex mean of incident new-quad centers
//   4. correction         — p + (avg - p) * (4 / touch_count)
//
// The correction formula is a deliberate approximation of the Catmull-Clark
// vertex mask; it is the authoritative target behavior here, so keep it
// even though the textbook rule also weights by valence.
//
// After one level the mesh is all-quad, so subsequent levels only see the
// quad path. Vertex count for a closed all-quad mesh: V' = V + E + F.
// Cube verification:
//   Level 0:  8 verts,  6 faces,  12 edges
//   Level 1: 26 verts, 24 faces,  48 edges
//   Level 2: 98 verts, 96 faces, 192 edges

use glam::Vec3;

use crate::edge_map::EdgeMap;
use crate::mesh::Mesh;
use crate::normals::{facet_normals, smooth_normals};

/// Apply `catmull_clark_level` subdivision iterations in place, then derive
/// normals (smooth or faceted per `catmull_clark_smooth`) and reset the
/// level to 0. No-op when the level is 0.
///
/// Line, spline and point data are ignored; texcoords are not subdivided
/// and are dropped from the result.
pub fn subdivide_catmull_clark(subdiv: &mut Mesh) {
    if subdiv.catmull_clark_level == 0 {
        return;
    }

    let mut mesh = subdiv.clone();
    mesh.texcoord.clear();

    for level in 0..subdiv.catmull_clark_level {
        let edge_map = EdgeMap::build(&mesh.triangle, &mesh.quad);

        // ---- Pass 1: linear subdivision — create vertices ----------------
        // Layout: originals | edge midpoints | triangle centroids | quad centers
        let mut pos = Vec::with_capacity(
            mesh.pos.len() + edge_map.len() + mesh.triangle.len() + mesh.quad.len(),
        );
        pos.extend_from_slice(&mesh.pos);
        let edge_base = pos.len();
        for &[a, b] in edge_map.edges() {
            pos.push((mesh.pos[a] + mesh.pos[b]) / 2.0);
        }
        let tri_base = pos.len();
        for f in &mesh.triangle {
            pos.push((mesh.pos[f[0]] + mesh.pos[f[1]] + mesh.pos[f[2]]) / 3.0);
        }
        let quad_base = pos.len();
        for f in &mesh.quad {
            pos.push((mesh.pos[f[0]] + mesh.pos[f[1]] + mesh.pos[f[2]] + mesh.pos[f[3]]) / 4.0);
        }

        // ---- Pass 2: rebuild faces as quads ------------------------------
        let mut quad = Vec::with_capacity(mesh.triangle.len() * 3 + mesh.quad.len() * 4);
        for (fi, f) in mesh.triangle.iter().enumerate() {
            let e01 = edge_base + edge_map.edge_index(f[0], f[1]);
            let e12 = edge_base + edge_map.edge_index(f[1], f[2]);
            let e20 = edge_base + edge_map.edge_index(f[2], f[0]);
            let center = tri_base + fi;
            quad.push([f[0], e01, center, e20]);
            quad.push([f[1], e12, center, e01]);
            quad.push([f[2], e20, center, e12]);
        }
        for (fi, f) in mesh.quad.iter().enumerate() {
            let e01 = edge_base + edge_map.edge_index(f[0], f[1]);
            let e12 = edge_base + edge_map.edge_index(f[1], f[2]);
            let e23 = edge_base + edge_map.edge_index(f[2], f[3]);
            let e30 = edge_base + edge_map.edge_index(f[3], f[0]);
            let center = quad_base + fi;
            quad.push([f[0], e01, center, e30]);
            quad.push([f[1], e12, center, e01]);
            quad.push([f[2], e23, center, e12]);
            quad.push([f[3], e30, center, e23]);
        }

        // ---- Pass 3: averaging -------------------------------------------
        // Every vertex in `pos` is a corner of at least one new quad, so
        // the touch counts below are never zero.
        let mut avg = vec![Vec3::ZERO; pos.len()];
        let mut count = vec![0u32; pos.len()];
        for f in &quad {
            let center = (pos[f[0]] + pos[f[1]] + pos[f[2]] + pos[f[3]]) / 4.0;
            for &v in f {
                avg[v] += center;
                count[v] += 1;
            }
        }
        for (a, &c) in avg.iter_mut().zip(&count) {
            *a /= c as f32;
        }

        // ---- Pass 4: correction ------------------------------------------
        for ((p, a), &c) in pos.iter_mut().zip(&avg).zip(&count) {
            *p += (*a - *p) * (4.0 / c as f32);
        }

        log::debug!(
            "catmull-clark level {}: {} verts, {} quads",
            level + 1,
            pos.len(),
            quad.len(),
        );

        mesh.pos = pos;
        mesh.triangle = Vec::new();
        mesh.quad = quad;
    }

    mesh.catmull_clark_level = 0;

    if subdiv.catmull_clark_smooth {
        smooth_normals(&mut mesh);
    } else {
        facet_normals(&mut mesh);
    }

    *subdiv = mesh;
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn unit_square() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.pos = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        mesh.quad = vec![[0, 1, 2, 3]];
        mesh
    }

    fn cube() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.pos = vec![
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
        ];
        mesh.quad = vec![
            [0, 1, 2, 3],
            [4, 5, 6, 7],
            [5, 0, 3, 6],
            [1, 4, 7, 2],
            [3, 2, 7, 6],
            [5, 4, 1, 0],
        ];
        mesh
    }

    #[test]
    fn level_zero_is_a_no_op() {
        let mut mesh = unit_square();
        let before = mesh.clone();
        subdivide_catmull_clark(&mut mesh);
        assert_eq!(mesh.pos, before.pos);
        assert_eq!(mesh.quad, before.quad);
        assert!(mesh.norm.is_empty());
        assert_eq!(mesh.catmull_clark_level, 0);
    }

    #[test]
    fn single_quad_level_one_gives_four_quads() {
        let mut mesh = unit_square();
        mesh.catmull_clark_level = 1;
        mesh.catmull_clark_smooth = true;
        subdivide_catmull_clark(&mut mesh);
        assert_eq!(mesh.quad.len(), 4);
        assert!(mesh.triangle.is_empty());
        assert_eq!(mesh.catmull_clark_level, 0);
        // 4 originals + 4 edge midpoints + 1 center.
        assert_eq!(mesh.pos.len(), 9);
        assert_eq!(mesh.norm.len(), mesh.pos.len());
    }

    #[test]
    fn triangle_becomes_three_quads() {
        let mut mesh = Mesh::new();
        mesh.pos = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        mesh.triangle = vec![[0, 1, 2]];
        mesh.catmull_clark_level = 1;
        mesh.catmull_clark_smooth = true;
        subdivide_catmull_clark(&mut mesh);
        assert_eq!(mesh.quad.len(), 3);
        assert!(mesh.triangle.is_empty());
        // 3 originals + 3 edge midpoints + 1 centroid.
        assert_eq!(mesh.pos.len(), 7);
    }

    #[test]
    fn cube_counts_follow_linear_subdivision_formula() {
        // V + E + F per level: 8+12+6 = 26, then 26+48+24 = 98.
        let mut mesh = cube();
        mesh.catmull_clark_level = 2;
        mesh.catmull_clark_smooth = true;
        subdivide_catmull_clark(&mut mesh);
        assert_eq!(mesh.quad.len(), 6 * 4 * 4);
        assert_eq!(mesh.pos.len(), 98);
        assert_eq!(mesh.norm.len(), 98);
    }

    #[test]
    fn cube_subdivision_is_symmetric() {
        // A symmetric input must stay centered and shrink toward a sphere.
        let mut mesh = cube();
        mesh.catmull_clark_level = 1;
        mesh.catmull_clark_smooth = true;
        subdivide_catmull_clark(&mut mesh);
        let centroid: Vec3 = mesh.pos.iter().sum::<Vec3>() / mesh.pos.len() as f32;
        assert!(centroid.abs_diff_eq(Vec3::ZERO, EPS));
        for p in &mesh.pos {
            assert!(p.length() < 3.0_f32.sqrt());
        }
    }

    #[test]
    fn faceted_output_duplicates_corners() {
        let mut mesh = cube();
        mesh.catmull_clark_level = 1;
        mesh.catmull_clark_smooth = false;
        subdivide_catmull_clark(&mut mesh);
        assert_eq!(mesh.quad.len(), 24);
        // Faceted estimator rebuilds vertices at corner granularity.
        assert_eq!(mesh.pos.len(), 24 * 4);
        assert_eq!(mesh.norm.len(), 24 * 4);
    }
}
