// Vertex structure for the fullscreen present quad

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Vertex of the quad the display canvas is drawn onto
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    /// Position in clip space
    pub position: [f32; 2],
    /// Texture coordinates (UV)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: Vec2, tex_coords: Vec2) -> Self {
        Self {
            position: position.to_array(),
            tex_coords: tex_coords.to_array(),
        }
    }

    /// Get the vertex buffer layout descriptor
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // Tex Coords
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Two triangles covering clip space, UV origin at the top-left
pub fn fullscreen_quad() -> ([Vertex; 4], [u16; 6]) {
    let vertices = [
        Vertex::new(Vec2::new(-1.0, -1.0), Vec2::new(0.0, 1.0)),
        Vertex::new(Vec2::new(1.0, -1.0), Vec2::new(1.0, 1.0)),
        Vertex::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0)),
        Vertex::new(Vec2::new(-1.0, 1.0), Vec2::new(0.0, 0.0)),
    ];
    (vertices, [0, 1, 2, 0, 2, 3])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_stride() {
        assert_eq!(Vertex::desc().array_stride, 16);
    }

    #[test]
    fn test_quad_top_left_uv() {
        let (vertices, indices) = fullscreen_quad();
        let top_left = vertices.iter().find(|v| v.position == [-1.0, 1.0]).unwrap();
        assert_eq!(top_left.tex_coords, [0.0, 0.0]);
        assert_eq!(indices.len(), 6);
    }
}
