// subsurf — mesh-geometry processing: subdivision, tessellation and
// displacement over a shared indexed-mesh data model.
//
// Pipeline per mesh:    Catmull-Clark → bezier subdivision (as requested)
// Pipeline per surface: tessellation → optional height-field displacement
//
// Every transform is a deterministic, single-threaded, in-place batch
// operation; scene loading, image decode and rendering live with callers.

pub mod bezier;
pub mod catmull_clark;
pub mod displace;
pub mod edge_map;
pub mod mesh;
pub mod normals;
pub mod refine;
pub mod render;
pub mod tessellate;

// Re-export the working vocabulary
pub use bezier::subdivide_bezier;
pub use catmull_clark::subdivide_catmull_clark;
pub use displace::{HeightField, displace_surface};
pub use edge_map::EdgeMap;
pub use mesh::{BezierAlgorithm, Mesh, MeshError, Surface, SurfaceShape};
pub use normals::{facet_normals, smooth_normals, smooth_tangents};
pub use refine::{refine_mesh, refine_surface};
pub use render::{GpuVertex, RenderBuffers, wireframe_indices};
pub use tessellate::tessellate_surface;
