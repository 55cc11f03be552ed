// Core mesh and surface data model.
//
// A Mesh is an indexed soup: flat position/normal/texcoord arrays plus
// separate index lists per primitive kind (triangle, quad, point, line,
// cubic bezier spline). Triangles and quads are kept in separate typed
// arrays rather than a tagged face list because Catmull-Clark treats them
// differently in every pass.
//
// Subdivision control fields live on the mesh itself; each subdivider
// resets its own level to 0 after applying, so running a transform twice
// is a no-op the second time.

use glam::{Affine3A, Vec2, Vec3};
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

/// Validation failures for a mesh handed in from outside (scene loading,
/// procedural generation). The transforms themselves assume a valid mesh
/// and index straight into `pos`.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("{kind} {face} references vertex {index} but mesh has {vertex_count} vertices")]
    IndexOutOfBounds {
        kind: &'static str,
        face: usize,
        index: usize,
        vertex_count: usize,
    },
    #[error("norm has {norm_len} entries but pos has {pos_len}")]
    NormalCountMismatch { norm_len: usize, pos_len: usize },
    #[error("texcoord has {texcoord_len} entries but pos has {pos_len}")]
    TexcoordCountMismatch { texcoord_len: usize, pos_len: usize },
}

// ============================================================================
// MESH
// ============================================================================

/// Bezier subdivision algorithm selector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BezierAlgorithm {
    /// Uniform parametric sampling at t = j / 2^level.
    #[default]
    Uniform,
    /// Iterative midpoint splitting, one generation per level.
    DeCasteljau,
}

/// Indexed mesh with vertex positions, normals and texture coordinates,
/// plus index lists for triangle/quad faces, points, line segments and
/// cubic bezier segments.
///
/// `norm` doubles as the tangent channel for polylines. It is either empty
/// or (for smooth output) exactly as long as `pos`; faceted output rebuilds
/// both arrays at face-corner granularity.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// Placement frame. Carried through every transform untouched; geometry
    /// stays in local coordinates.
    pub frame:    Affine3A,
    pub pos:      Vec<Vec3>,
    pub norm:     Vec<Vec3>,
    pub texcoord: Vec<Vec2>,
    pub triangle: Vec<[usize; 3]>,
    pub quad:     Vec<[usize; 4]>,
    /// Isolated points; never touched by any subdivider.
    pub point:    Vec<usize>,
    pub line:     Vec<[usize; 2]>,
    /// Cubic bezier segments as (p0, p1, p2, p3) control-point indices.
    pub spline:   Vec<[usize; 4]>,

    /// Catmull-Clark iterations to apply; 0 = disabled.
    pub catmull_clark_level:  u32,
    /// Smooth (shared-vertex) vs faceted (duplicated-corner) normals after
    /// Catmull-Clark.
    pub catmull_clark_smooth: bool,
    /// Bezier subdivision level; 0 = disabled.
    pub bezier_level:     u32,
    pub bezier_algorithm: BezierAlgorithm,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.pos.len()
    }

    /// Check the index invariant: every index referenced by a face, point,
    /// line or spline must address an existing vertex, and the optional
    /// attribute arrays must match `pos` in length when present.
    ///
    /// Call this once on data crossing the crate boundary; the transforms
    /// do not re-validate.
    pub fn validate(&self) -> Result<(), MeshError> {
        let n = self.pos.len();
        let check = |kind: &'static str, face: usize, index: usize| {
            if index < n {
                Ok(())
            } else {
                Err(MeshError::IndexOutOfBounds { kind, face, index, vertex_count: n })
            }
        };
        for (fi, f) in self.triangle.iter().enumerate() {
            for &v in f { check("triangle", fi, v)?; }
        }
        for (fi, f) in self.quad.iter().enumerate() {
            for &v in f { check("quad", fi, v)?; }
        }
        for (fi, f) in self.line.iter().enumerate() {
            for &v in f { check("line", fi, v)?; }
        }
        for (fi, f) in self.spline.iter().enumerate() {
            for &v in f { check("spline", fi, v)?; }
        }
        for (fi, &v) in self.point.iter().enumerate() {
            check("point", fi, v)?;
        }
        if !self.norm.is_empty() && self.norm.len() != n {
            return Err(MeshError::NormalCountMismatch { norm_len: self.norm.len(), pos_len: n });
        }
        if !self.texcoord.is_empty() && self.texcoord.len() != n {
            return Err(MeshError::TexcoordCountMismatch {
                texcoord_len: self.texcoord.len(),
                pos_len: n,
            });
        }
        Ok(())
    }
}

// ============================================================================
// SURFACE
// ============================================================================

/// Shape of a procedural surface primitive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SurfaceShape {
    /// Planar quad at frame origin, normal along frame z, side = 2 * radius.
    Quad,
    /// Sphere centered at frame origin with the given radius.
    Sphere,
}

/// Procedural surface primitive. The tessellator turns it into an explicit
/// `display_mesh`; the old display mesh (if any) is discarded each run.
#[derive(Clone, Debug)]
pub struct Surface {
    pub frame:  Affine3A,
    pub radius: f32,
    pub shape:  SurfaceShape,
    /// Tessellation level; grid/ring resolution grows as 2^level.
    pub level:  u32,
    /// Smooth vs faceted normals on the tessellated mesh.
    pub smooth: bool,
    /// Tessellated output, lazily produced. None until the first
    /// tessellation pass.
    pub display_mesh: Option<Mesh>,
}

impl Surface {
    pub fn new(shape: SurfaceShape, radius: f32, level: u32, smooth: bool) -> Self {
        Self {
            frame: Affine3A::IDENTITY,
            radius,
            shape,
            level,
            smooth,
            display_mesh: None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
