// Cubic bezier spline subdivision into line segments.
//
// Two interchangeable algorithms selected by `Mesh::bezier_algorithm`:
//   Uniform     → evaluate the Bernstein form at 2^level + 1 parameters
//   DeCasteljau → split every segment at t = 0.5, repeated `level` times
//
// Both replace `spline` with `line` data, reset the level to 0 and finish
// with a tangent pass, so the output is a renderable polyline. The mesh is
// assumed to carry no pre-existing `line` data.

use glam::Vec3;

use crate::mesh::{BezierAlgorithm, Mesh};
use crate::normals::smooth_tangents;

/// Subdivide all bezier segments into line segments. No-op at level 0.
pub fn subdivide_bezier(bezier: &mut Mesh) {
    if bezier.bezier_level == 0 {
        return;
    }
    log::debug!(
        "bezier subdivision: {} segments, level {}, {:?}",
        bezier.spline.len(),
        bezier.bezier_level,
        bezier.bezier_algorithm,
    );
    match bezier.bezier_algorithm {
        BezierAlgorithm::Uniform => subdivide_bezier_uniform(bezier),
        BezierAlgorithm::DeCasteljau => subdivide_bezier_decasteljau(bezier),
    }
}

// ============================================================================
// UNIFORM SAMPLING
// ============================================================================

/// Cubic Bernstein blend of the four control points at parameter t.
fn bernstein3(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * t * u * u) + p2 * (3.0 * t * t * u) + p3 * (t * t * t)
}

/// Sample every segment at 2^level + 1 uniformly spaced parameters and
/// connect consecutive samples. Segments are fully independent: shared
/// control points between adjacent splines are re-emitted per segment.
fn subdivide_bezier_uniform(bezier: &mut Mesh) {
    let steps = 1usize << bezier.bezier_level;
    let mut pos = Vec::with_capacity(bezier.spline.len() * (steps + 1));
    let mut line = Vec::with_capacity(bezier.spline.len() * steps);

    for s in &bezier.spline {
        let (p0, p1, p2, p3) = (
            bezier.pos[s[0]],
            bezier.pos[s[1]],
            bezier.pos[s[2]],
            bezier.pos[s[3]],
        );
        let first = pos.len();
        for j in 0..=steps {
            let t = j as f32 / steps as f32;
            pos.push(bernstein3(p0, p1, p2, p3, t));
        }
        for j in 0..steps {
            line.push([first + j, first + j + 1]);
        }
    }

    bezier.pos = pos;
    bezier.line = line;
    bezier.spline.clear();
    bezier.bezier_level = 0;
    smooth_tangents(bezier);
}

// ============================================================================
// DE CASTELJAU SPLITTING
// ============================================================================

/// Split every segment at its parametric midpoint, once per level, then
/// connect each leaf segment's endpoints.
///
/// Iterative, not recursive: every level rebuilds fresh pos/spline arrays
/// from the previous generation (double buffering). The midpoint
/// construction per segment (p0,p1,p2,p3):
///
///   m01 m12 m23 = edge midpoints
///   m012 = (m01+m12)/2, m123 = (m12+m23)/2, m = (m012+m123)/2
///   children: (p0, m01, m012, m) and (m, m123, m23, p3)
///
/// When a segment starts exactly where the previous one ended, the shared
/// point is emitted once, keeping adjoining splines welded for the tangent
/// pass. The interior control points exist only to drive the next level;
/// the final line output uses each leaf's endpoints.
fn subdivide_bezier_decasteljau(bezier: &mut Mesh) {
    let mut pos = bezier.pos.clone();
    let mut splines = bezier.spline.clone();

    for _ in 0..bezier.bezier_level {
        let mut next_pos: Vec<Vec3> = Vec::with_capacity(pos.len() * 2);
        let mut next_splines: Vec<[usize; 4]> = Vec::with_capacity(splines.len() * 2);

        for s in &splines {
            let (p0, p1, p2, p3) = (pos[s[0]], pos[s[1]], pos[s[2]], pos[s[3]]);
            let m01 = (p0 + p1) / 2.0;
            let m12 = (p1 + p2) / 2.0;
            let m23 = (p2 + p3) / 2.0;
            let m012 = (m01 + m12) / 2.0;
            let m123 = (m12 + m23) / 2.0;
            let m = (m012 + m123) / 2.0;

            // Reuse the previous segment's end point when this segment
            // continues from it exactly.
            let start = match next_pos.last() {
                Some(&last) if last == p0 => next_pos.len() - 1,
                _ => {
                    next_pos.push(p0);
                    next_pos.len() - 1
                }
            };
            let base = next_pos.len();
            next_pos.extend([m01, m012, m, m123, m23, p3]);
            next_splines.push([start, base, base + 1, base + 2]);
            next_splines.push([base + 2, base + 3, base + 4, base + 5]);
        }

        pos = next_pos;
        splines = next_splines;
    }

    bezier.pos = pos;
    bezier.line = splines.iter().map(|s| [s[0], s[3]]).collect();
    bezier.spline.clear();
    bezier.bezier_level = 0;
    smooth_tangents(bezier);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn control_points() -> [Vec3; 4] {
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 1.0, 0.0),
            Vec3::new(3.0, 1.0, 0.0),
        ]
    }

    fn single_spline(level: u32, algorithm: BezierAlgorithm) -> Mesh {
        let mut mesh = Mesh::new();
        mesh.pos = control_points().to_vec();
        mesh.spline = vec![[0, 1, 2, 3]];
        mesh.bezier_level = level;
        mesh.bezier_algorithm = algorithm;
        mesh
    }

    #[test]
    fn level_zero_is_a_no_op() {
        let mut mesh = single_spline(0, BezierAlgorithm::Uniform);
        subdivide_bezier(&mut mesh);
        assert_eq!(mesh.spline.len(), 1);
        assert!(mesh.line.is_empty());
    }

    #[test]
    fn uniform_sample_counts_and_endpoints() {
        let mut mesh = single_spline(3, BezierAlgorithm::Uniform);
        subdivide_bezier(&mut mesh);
        // steps + 1 samples, steps segments.
        assert_eq!(mesh.pos.len(), 9);
        assert_eq!(mesh.line.len(), 8);
        assert!(mesh.spline.is_empty());
        assert_eq!(mesh.bezier_level, 0);
        // t = 0 and t = 1 reproduce the end control points exactly.
        let [p0, _, _, p3] = control_points();
        assert_eq!(mesh.pos[0], p0);
        assert_eq!(mesh.pos[8], p3);
        // Tangent pass ran.
        assert_eq!(mesh.norm.len(), mesh.pos.len());
    }

    #[test]
    fn uniform_interior_samples_match_bernstein() {
        let mut mesh = single_spline(2, BezierAlgorithm::Uniform);
        subdivide_bezier(&mut mesh);
        let [p0, p1, p2, p3] = control_points();
        for (j, p) in mesh.pos.iter().enumerate() {
            let t = j as f32 / 4.0;
            assert!(p.abs_diff_eq(bernstein3(p0, p1, p2, p3, t), EPS));
        }
    }

    #[test]
    fn decasteljau_split_matches_analytic_midpoint() {
        let mut mesh = single_spline(1, BezierAlgorithm::DeCasteljau);
        subdivide_bezier(&mut mesh);
        // One split: two leaf segments, each contributing one line.
        assert_eq!(mesh.line.len(), 2);
        let [p0, p1, p2, p3] = control_points();
        assert_eq!(mesh.pos[mesh.line[0][0]], p0);
        assert_eq!(mesh.pos[mesh.line[1][1]], p3);
        // Shared midpoint equals the curve at t = 0.5.
        assert_eq!(mesh.line[0][1], mesh.line[1][0]);
        let mid = mesh.pos[mesh.line[0][1]];
        assert!(mid.abs_diff_eq(bernstein3(p0, p1, p2, p3, 0.5), EPS));
    }

    #[test]
    fn decasteljau_leaf_count_doubles_per_level() {
        let mut mesh = single_spline(4, BezierAlgorithm::DeCasteljau);
        subdivide_bezier(&mut mesh);
        assert_eq!(mesh.line.len(), 16);
        assert!(mesh.spline.is_empty());
        assert_eq!(mesh.bezier_level, 0);
    }

    #[test]
    fn adjoining_splines_share_their_joint() {
        // Two segments sharing control point 3; the weld must survive the
        // split so the joint vertex accumulates both tangents.
        let mut mesh = Mesh::new();
        mesh.pos = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(2.0, 1.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(4.0, -1.0, 0.0),
            Vec3::new(5.0, -1.0, 0.0),
            Vec3::new(6.0, 0.0, 0.0),
        ];
        mesh.spline = vec![[0, 1, 2, 3], [3, 4, 5, 6]];
        mesh.bezier_level = 1;
        mesh.bezier_algorithm = BezierAlgorithm::DeCasteljau;
        subdivide_bezier(&mut mesh);
        assert_eq!(mesh.line.len(), 4);
        // End of segment 1 and start of segment 2 are the same vertex.
        assert_eq!(mesh.line[1][1], mesh.line[2][0]);
    }
}
