// Per-vertex normal and tangent estimation.
//
// Two shading styles over the same face lists:
//   facet_normals  → one normal per face, vertices duplicated per corner
//   smooth_normals → one normal per vertex, faces share vertices
// plus smooth_tangents for polylines (tangents ride in the `norm` channel).
//
// Accumulation is unweighted: every incident face contributes its unit
// normal once, regardless of area or corner angle.

use glam::Vec3;

use crate::mesh::Mesh;

/// Unit normal of the triangle (p0, p1, p2), zero if degenerate.
fn triangle_normal(p0: Vec3, p1: Vec3, p2: Vec3) -> Vec3 {
    (p1 - p0).cross(p2 - p0).normalize_or_zero()
}

/// Quad normal as the renormalized sum of the two diagonal-split triangle
/// normals (p0,p1,p2) and (p0,p2,p3).
fn quad_normal(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Vec3 {
    (triangle_normal(p0, p1, p2) + triangle_normal(p0, p2, p3)).normalize_or_zero()
}

// ============================================================================
// FACETED NORMALS
// ============================================================================

/// Rebuild the mesh for flat shading: every face gets its own run of
/// vertices (3 per triangle, 4 per quad) all carrying the face normal.
///
/// `pos`, `norm`, `texcoord` and both face lists are replaced; no vertex is
/// shared across faces afterwards. `texcoord` is only emitted if the input
/// had it. Points, lines and splines are untouched (their indices still
/// refer to the old vertex order, so faceting a mesh that mixes faces with
/// line data is a caller error).
pub fn facet_normals(mesh: &mut Mesh) {
    let corner_count = mesh.triangle.len() * 3 + mesh.quad.len() * 4;
    let mut pos = Vec::with_capacity(corner_count);
    let mut norm = Vec::with_capacity(corner_count);
    let mut texcoord = Vec::new();
    let mut triangle = Vec::with_capacity(mesh.triangle.len());
    let mut quad = Vec::with_capacity(mesh.quad.len());
    let has_texcoord = !mesh.texcoord.is_empty();

    for f in &mesh.triangle {
        let nv = pos.len();
        let face_n = triangle_normal(mesh.pos[f[0]], mesh.pos[f[1]], mesh.pos[f[2]]);
        triangle.push([nv, nv + 1, nv + 2]);
        for &v in f {
            pos.push(mesh.pos[v]);
            norm.push(face_n);
            if has_texcoord {
                texcoord.push(mesh.texcoord[v]);
            }
        }
    }

    for f in &mesh.quad {
        let nv = pos.len();
        let face_n = quad_normal(mesh.pos[f[0]], mesh.pos[f[1]], mesh.pos[f[2]], mesh.pos[f[3]]);
        quad.push([nv, nv + 1, nv + 2, nv + 3]);
        for &v in f {
            pos.push(mesh.pos[v]);
            norm.push(face_n);
            if has_texcoord {
                texcoord.push(mesh.texcoord[v]);
            }
        }
    }

    mesh.pos = pos;
    mesh.norm = norm;
    mesh.texcoord = texcoord;
    mesh.triangle = triangle;
    mesh.quad = quad;
}

// ============================================================================
// SMOOTH NORMALS
// ============================================================================

/// Compute shared-vertex normals in place: accumulate each face's unit
/// normal onto its corner vertices, then normalize the sums.
///
/// Quads contribute a single diagonal-derived normal (from the (p0,p1,p2)
/// triangle) to all four corners. A vertex touched by no face keeps the
/// zero vector; downstream consumers must tolerate that.
pub fn smooth_normals(mesh: &mut Mesh) {
    let mut norm = vec![Vec3::ZERO; mesh.pos.len()];

    for f in &mesh.triangle {
        let face_n = triangle_normal(mesh.pos[f[0]], mesh.pos[f[1]], mesh.pos[f[2]]);
        for &v in f {
            norm[v] += face_n;
        }
    }
    for f in &mesh.quad {
        let face_n = triangle_normal(mesh.pos[f[0]], mesh.pos[f[1]], mesh.pos[f[2]]);
        for &v in f {
            norm[v] += face_n;
        }
    }
    for n in &mut norm {
        *n = n.normalize_or_zero();
    }

    mesh.norm = norm;
}

// ============================================================================
// SMOOTH TANGENTS
// ============================================================================

/// Compute shared-vertex tangents for a line-segment mesh, stored in the
/// `norm` channel: each segment adds its unit direction to both endpoint
/// accumulators, then every accumulator is normalized.
pub fn smooth_tangents(polyline: &mut Mesh) {
    let mut norm = vec![Vec3::ZERO; polyline.pos.len()];

    for l in &polyline.line {
        let lt = (polyline.pos[l[1]] - polyline.pos[l[0]]).normalize_or_zero();
        norm[l[0]] += lt;
        norm[l[1]] += lt;
    }
    for t in &mut norm {
        *t = t.normalize_or_zero();
    }

    polyline.norm = norm;
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const EPS: f32 = 1e-5;

    fn unit_quad() -> Mesh {
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

    #[test]
    fn facet_duplicates_every_corner() {
        let mut mesh = unit_quad();
        mesh.triangle = vec![[0, 1, 2]];
        facet_normals(&mut mesh);
        assert_eq!(mesh.pos.len(), 3 + 4);
        assert_eq!(mesh.norm.len(), mesh.pos.len());
        assert_eq!(mesh.triangle, vec![[0, 1, 2]]);
        assert_eq!(mesh.quad, vec![[3, 4, 5, 6]]);
        for n in &mesh.norm {
            assert!(n.abs_diff_eq(Vec3::Z, EPS));
        }
    }

    #[test]
    fn facet_carries_texcoord_only_when_present() {
        let mut mesh = unit_quad();
        facet_normals(&mut mesh);
        assert!(mesh.texcoord.is_empty());

        let mut mesh = unit_quad();
        mesh.texcoord = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        facet_normals(&mut mesh);
        assert_eq!(mesh.texcoord.len(), 4);
        assert!(mesh.texcoord[2].abs_diff_eq(Vec2::new(1.0, 1.0), EPS));
    }

    #[test]
    fn smooth_keeps_vertex_count_and_normalizes() {
        // Roof shape: two triangles meeting along the ridge (1,2).
        let mut mesh = Mesh::new();
        mesh.pos = vec![
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
        ];
        mesh.triangle = vec![[0, 1, 2], [1, 3, 2]];
        smooth_normals(&mut mesh);
        assert_eq!(mesh.norm.len(), 4);
        for n in &mesh.norm {
            assert!((n.length() - 1.0).abs() < EPS);
        }
        // Ridge vertices average both face normals: the sum is symmetric
        // about the z axis, so x cancels.
        assert!(mesh.norm[1].x.abs() < EPS);
        assert!(mesh.norm[2].x.abs() < EPS);
    }

    #[test]
    fn smooth_is_traversal_order_invariant() {
        let mut a = unit_quad();
        a.triangle = vec![[0, 1, 2], [0, 2, 3]];
        a.quad.clear();
        let mut b = a.clone();
        b.triangle.reverse();
        smooth_normals(&mut a);
        smooth_normals(&mut b);
        for (na, nb) in a.norm.iter().zip(&b.norm) {
            assert!(na.abs_diff_eq(*nb, EPS));
        }
    }

    #[test]
    fn untouched_vertex_keeps_zero_normal() {
        let mut mesh = unit_quad();
        mesh.pos.push(Vec3::new(5.0, 5.0, 5.0));
        smooth_normals(&mut mesh);
        assert_eq!(mesh.norm[4], Vec3::ZERO);
    }

    #[test]
    fn tangents_average_at_corners() {
        let mut polyline = Mesh::new();
        polyline.pos = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ];
        polyline.line = vec![[0, 1], [1, 2]];
        smooth_tangents(&mut polyline);
        assert!(polyline.norm[0].abs_diff_eq(Vec3::X, EPS));
        assert!(polyline.norm[2].abs_diff_eq(Vec3::Y, EPS));
        // Corner vertex: normalize(x̂ + ŷ).
        let diag = (Vec3::X + Vec3::Y).normalize();
        assert!(polyline.norm[1].abs_diff_eq(diag, EPS));
    }
}
