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
    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> [f32; 4] {
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    pub const BACKGROUND: [f32; 4] = rgba(0, 117, 44, 255);
    pub const PATH: [f32; 4] = rgba(127, 106, 79, 255);
    pub const RANGE_RING: [f32; 4] = rgba(200, 200, 200, 255);
    pub const PREVIEW: [f32; 4] = rgba(0, 0, 255, 80);
    pub const HEALTH_REMAINING: [f32; 4] = rgba(0, 228, 48, 255);
    pub const HEALTH_LOST: [f32; 4] = rgba(230, 41, 55, 255);
    pub const PROJECTILE: [f32; 4] = rgba(253, 249, 0, 255);
}
