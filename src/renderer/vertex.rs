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

/// `0xRRGGBB` plus alpha to a normalized color
pub const fn hex(rgb: u32, alpha: f32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Linear blend between two colors
pub fn mix(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::hex;

    pub const SKY_TOP: [f32; 4] = hex(0xbfe3f2, 1.0);
    pub const SKY_MID: [f32; 4] = hex(0x8fc4db, 1.0);
    pub const SKY_BOTTOM: [f32; 4] = hex(0xf3d97b, 1.0);
    /// Obstacles; alpha comes from the shape
    pub const SHAPE: [f32; 4] = hex(0x050505, 1.0);
    pub const GOLDEN: [f32; 4] = hex(0xf6c640, 0.9);
    pub const TRAIL: [f32; 4] = hex(0x2b9bd6, 0.65);
    pub const DROPLET_HIGHLIGHT: [f32; 4] = hex(0xffffff, 1.0);
    pub const DROPLET_BODY: [f32; 4] = hex(0x7fd3f4, 1.0);
    pub const DROPLET_EDGE: [f32; 4] = hex(0x1a7db5, 1.0);
    pub const CLEAR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(hex(0xff0000, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(hex(0x00ff00, 0.5), [0.0, 1.0, 0.0, 0.5]);
        let c = hex(0x2b9bd6, 0.65);
        assert!((c[0] - 43.0 / 255.0).abs() < 1e-6);
        assert!((c[1] - 155.0 / 255.0).abs() < 1e-6);
        assert!((c[2] - 214.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_mix() {
        let m = mix([0.0, 0.0, 0.0, 0.0], [1.0, 0.5, 0.0, 1.0], 0.5);
        assert_eq!(m, [0.5, 0.25, 0.0, 0.5]);
    }

    #[test]
    fn test_vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::desc().array_stride, 24);
    }
}
