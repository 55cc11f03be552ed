// Per-object refinement drivers.
//
// The scene walk stays with the caller; these apply every transform an
// individual mesh or surface has requested, in the order the subdivision
// flags imply. Each transform resets its own flag, so driving the same
// object twice is harmless.

use crate::bezier::subdivide_bezier;
use crate::catmull_clark::subdivide_catmull_clark;
use crate::displace::{HeightField, displace_surface};
use crate::mesh::{Mesh, Surface};
use crate::tessellate::tessellate_surface;

/// Apply the mesh's requested subdivisions: Catmull-Clark first (faces),
/// then bezier (splines). The two operate on disjoint primitive lists, so
/// a mesh can legally request both.
pub fn refine_mesh(mesh: &mut Mesh) {
    if mesh.catmull_clark_level > 0 {
        subdivide_catmull_clark(mesh);
    }
    if mesh.bezier_level > 0 {
        subdivide_bezier(mesh);
    }
}

/// Tessellate the surface and optionally displace it by a height field.
pub fn refine_surface(surface: &mut Surface, field: Option<&HeightField>) {
    tessellate_surface(surface);
    if let Some(field) = field {
        displace_surface(surface, field);
    }
}

// ============================================================================
// TESTS
// ============================================================================
