//! Surface lattice mesh: one vertex per height sample.

use bytemuck::{Pod, Zeroable};

/// Vertex data for the ocean mesh (rest position + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Flat N×N lattice in the XY plane (Z up), displaced by dz in the vertex stage.
///
/// Vertex `y*N + x` sits over height sample `y*N + x`, so the vertex index is
/// the height-buffer index.
pub struct SurfaceMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    /// Build the lattice for `grid_size` samples per side across `size_m` meters.
    pub fn new(grid_size: usize, size_m: f32) -> Self {
        let n = grid_size;
        let origin = -(n as f32) / 2.0;

        let mut vertices = Vec::with_capacity(n * n);
        for y in 0..n {
            for x in 0..n {
                // Cell centers, so the patch spans [-size/2, size/2]
                let px = (origin + x as f32 + 0.5) / n as f32 * size_m;
                let py = (origin + y as f32 + 0.5) / n as f32 * size_m;
                vertices.push(Vertex {
                    position: [px, py, 0.0],
                    uv: [x as f32 / n as f32, y as f32 / n as f32],
                });
            }
        }

        // Two triangles per quad (counter-clockwise seen from +Z)
        let mut indices = Vec::with_capacity(n.saturating_sub(1).pow(2) * 6);
        for y in 0..n.saturating_sub(1) {
            for x in 0..n - 1 {
                let bottom_left = (y * n + x) as u32;
                let bottom_right = bottom_left + 1;
                let top_left = ((y + 1) * n + x) as u32;
                let top_right = top_left + 1;

                indices.extend_from_slice(&[
                    bottom_left,
                    bottom_right,
                    top_right,
                    bottom_left,
                    top_right,
                    top_left,
                ]);
            }
        }

        Self { vertices, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_creation() {
        let mesh = SurfaceMesh::new(8, 20.0);

        // One vertex per height sample
        assert_eq!(mesh.vertices.len(), 64);

        // (N-1)^2 quads * 2 triangles * 3 indices
        assert_eq!(mesh.indices.len(), 7 * 7 * 6);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_mesh_centered() {
        let mesh = SurfaceMesh::new(4, 8.0);
        let first = mesh.vertices[0].position;
        let last = mesh.vertices[15].position;
        assert_eq!(first, [-3.0, -3.0, 0.0]);
        assert_eq!(last, [3.0, 3.0, 0.0]);
    }
}
