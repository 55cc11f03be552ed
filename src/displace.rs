// Height-field displacement of a tessellated surface.
//
// Each display-mesh vertex is pushed along its normal by 0.3 times the
// height-field sample under it. Vertices are mapped into pixel space by
// stretching the mesh's XY bounding box over the image, clamped one pixel
// in from the border to avoid edge sampling. Image decode is the caller's
// problem; the field arrives here as raw per-pixel vectors.

use glam::Vec3;

use crate::mesh::Surface;
use crate::normals::{facet_normals, smooth_normals};

/// Displacement strength applied to every sample.
const DISPLACE_SCALE: f32 = 0.3;

// ============================================================================
// HEIGHT FIELD
// ============================================================================

/// Decoded height-field image: row-major per-pixel vector samples.
/// Scalar height maps use equal components, which displaces straight along
/// the normal; unequal components scale the normal per axis.
pub struct HeightField {
    width:  usize,
    height: usize,
    data:   Vec<Vec3>,
}

impl HeightField {
    /// Wrap decoded pixel data. `data` must hold exactly width * height
    /// samples, and both dimensions must be nonzero.
    pub fn new(width: usize, height: usize, data: Vec<Vec3>) -> Self {
        assert!(width > 0 && height > 0, "field must have at least one pixel");
        assert_eq!(data.len(), width * height, "pixel count must match dimensions");
        Self { width, height, data }
    }

    /// Constant-valued field, mostly useful for tests and calibration.
    pub fn constant(width: usize, height: usize, value: Vec3) -> Self {
        Self::new(width, height, vec![value; width * height])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at integer pixel coordinates. Panics out of bounds; callers
    /// clamp before truncating.
    pub fn at(&self, x: usize, y: usize) -> Vec3 {
        self.data[y * self.width + x]
    }
}

// ============================================================================
// DISPLACEMENT
// ============================================================================

/// Highest pixel coordinate sampling may reach along one dimension: dim-2
/// (one in from the border), capped at the last valid index for fields
/// with no interior.
fn sample_hi(dim: usize) -> f32 {
    dim.saturating_sub(2).max(1).min(dim - 1) as f32
}

/// Displace the surface's display mesh along its vertex normals by the
/// height field, then recompute normals per the surface's smooth flag.
///
/// No-op if the surface has not been tessellated or its mesh is empty.
/// A degenerate bounding box (all x or all y equal) is widened by 1 unit
/// so the pixel mapping stays finite.
pub fn displace_surface(surface: &mut Surface, field: &HeightField) {
    let Some(mesh) = surface.display_mesh.as_mut() else {
        return;
    };
    if mesh.pos.is_empty() {
        return;
    }

    let (mut x_min, mut x_max) = (mesh.pos[0].x, mesh.pos[0].x);
    let (mut y_min, mut y_max) = (mesh.pos[0].y, mesh.pos[0].y);
    for p in &mesh.pos {
        x_min = x_min.min(p.x);
        x_max = x_max.max(p.x);
        y_min = y_min.min(p.y);
        y_max = y_max.max(p.y);
    }
    if x_min == x_max {
        x_max = x_min + 1.0;
    }
    if y_min == y_max {
        y_max = y_min + 1.0;
    }

    // Truncated samples stay inside [1, dim-2] so the image border is
    // never read. Fields narrower than 3 pixels have no interior; their
    // range collapses to the last valid column/row (pixel 0 for a 1-wide
    // field, pixel 1 for a 2-wide one).
    let x_hi = sample_hi(field.width());
    let y_hi = sample_hi(field.height());
    let x_lo = 1.0_f32.min(x_hi);
    let y_lo = 1.0_f32.min(y_hi);

    for (p, n) in mesh.pos.iter_mut().zip(&mesh.norm) {
        let px = ((p.x - x_min) / (x_max - x_min) * field.width() as f32).clamp(x_lo, x_hi);
        let py = ((p.y - y_min) / (y_max - y_min) * field.height() as f32).clamp(y_lo, y_hi);
        let sample = field.at(px as usize, py as usize);
        *p += DISPLACE_SCALE * sample * *n;
    }

    log::debug!(
        "displaced {} verts over a {}x{} field",
        mesh.pos.len(),
        field.width(),
        field.height(),
    );

    if surface.smooth {
        smooth_normals(mesh);
    } else {
        facet_normals(mesh);
    }
}

// ============================================================================
// TESTS
// ============================================================================
