//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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

/// Convert a 0xRRGGBB colour to linear-ish floats
pub const fn rgb(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Colors for machine elements
pub mod colors {
    use super::rgb;

    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const REEL_WINDOW: [f32; 4] = [0.08, 0.08, 0.12, 1.0];
    pub const PAY_LINE: [f32; 4] = rgb(0xffa500, 1.0);
    pub const BUTTON_FILL: [f32; 4] = rgb(0x333333, 1.0);
    pub const BUTTON_OUTLINE: [f32; 4] = rgb(0xffffff, 1.0);
    pub const BUTTON_DISABLED: [f32; 4] = rgb(0x1e1e1e, 1.0);
    pub const GLYPH: [f32; 4] = rgb(0xffffff, 1.0);
    pub const WIN_BURST: [f32; 4] = [1.0, 0.84, 0.2, 1.0];
    pub const WIN_OVERLAY: [f32; 4] = [1.0, 0.95, 0.6, 0.25];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb() {
        assert_eq!(rgb(0xff0000, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgb(0x00ff00, 0.5)[1], 1.0);
        assert_eq!(rgb(0x00ff00, 0.5)[3], 0.5);
    }
}
