//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
///
/// Scene code emits positions in viewport pixels (y down); the vertex shader
/// maps them to clip space.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const PLATFORM: [f32; 4] = [0.29, 0.74, 0.29, 0.8];
    pub const PLAYER: [f32; 4] = [0.13, 0.59, 0.95, 1.0];
    pub const PLAYER_GLOW: [f32; 4] = [1.0, 1.0, 1.0, 0.1];
    pub const STREAK_HEAD: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const STREAK_TAIL: [f32; 4] = [0.7, 0.8, 1.0, 0.0];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.7];
}
