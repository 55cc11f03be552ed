// GPU hand-off buffers.
//
// The crate never issues draw calls; this module flattens a processed mesh
// into the interleaved vertex / index form renderers consume, plus a
// wireframe index list extracted through EdgeMap. Byte views are provided
// via bytemuck so the arrays can be uploaded as-is.

use crate::edge_map::EdgeMap;
use crate::mesh::Mesh;

// ============================================================================
// GPU VERTEX
// ============================================================================

/// Interleaved position + normal vertex.
/// Byte layout:
///   @location(0) position: vec3<f32>
///   @location(1) normal:   vec3<f32>
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal:   [f32; 3],
}

// ============================================================================
// RENDER BUFFERS
// ============================================================================

/// Triangulated, upload-ready view of a mesh. Vertices are shared exactly
/// as in the source mesh; quads are fan-split into two triangles each.
pub struct RenderBuffers {
    pub vertices: Vec<GpuVertex>,
    pub indices:  Vec<u32>,
}

impl RenderBuffers {
    /// Flatten the mesh's vertex attributes and face lists. A mesh without
    /// normals (e.g. one that skipped the estimator) gets zero normals.
    pub fn build(mesh: &Mesh) -> Self {
        let vertices = mesh
            .pos
            .iter()
            .enumerate()
            .map(|(i, p)| GpuVertex {
                position: p.to_array(),
                normal:   mesh.norm.get(i).copied().unwrap_or_default().to_array(),
            })
            .collect();

        let mut indices = Vec::with_capacity(mesh.triangle.len() * 3 + mesh.quad.len() * 6);
        for f in &mesh.triangle {
            indices.extend(f.map(|v| v as u32));
        }
        for f in &mesh.quad {
            indices.extend([f[0], f[1], f[2], f[0], f[2], f[3]].map(|v| v as u32));
        }

        Self { vertices, indices }
    }

    /// Cast vertex slice to raw bytes for buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Cast index slice to raw bytes for buffer upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

// ============================================================================
// WIREFRAME EXTRACTION
// ============================================================================

/// Index pairs for line rendering: every distinct undirected face edge
/// once (via EdgeMap), followed by the mesh's explicit line segments.
pub fn wireframe_indices(mesh: &Mesh) -> Vec<[u32; 2]> {
    let edge_map = EdgeMap::build(&mesh.triangle, &mesh.quad);
    let mut out: Vec<[u32; 2]> = edge_map
        .edges()
        .iter()
        .map(|&[a, b]| [a as u32, b as u32])
        .collect();
    out.extend(mesh.line.iter().map(|&[a, b]| [a as u32, b as u32]));
    out
}

// ============================================================================
// TESTS
// ============================================================================
