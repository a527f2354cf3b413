//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
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
    pub const PLATFORM: [f32; 4] = [0.396, 0.263, 0.129, 1.0];
    pub const PLATFORM_LIP: [f32; 4] = [0.545, 0.412, 0.078, 1.0];
    pub const COIN: [f32; 4] = [0.0, 1.0, 1.0, 0.9];
    pub const COIN_RIM: [f32; 4] = [0.0, 1.0, 0.95, 0.9];
    pub const PLAYER_GREEN: [f32; 4] = [0.0, 0.5, 0.0, 1.0];
    pub const PLAYER_RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const PLAYER_BORDER: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.7];
    pub const BACKGROUND: [f32; 4] = [0.53, 0.75, 0.92, 1.0];
}
