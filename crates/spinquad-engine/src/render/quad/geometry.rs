//! Static vertex data for the quad.
//!
//! Vertices are ordered for a triangle strip: top-left, top-right,
//! bottom-left, bottom-right.

use wgpu::util::DeviceExt;

use crate::paint::Color;

pub const VERTEX_COUNT: u32 = 4;

/// 2D positions of a unit quad spanning [-1, 1]².
pub const QUAD_POSITIONS: [[f32; 2]; VERTEX_COUNT as usize] = [
    [-1.0, 1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, -1.0],
];

/// One color per vertex.
pub const QUAD_COLORS: [Color; VERTEX_COUNT as usize] =
    [Color::WHITE, Color::RED, Color::GREEN, Color::BLUE];

const POSITION_STRIDE: u64 = std::mem::size_of::<[f32; 2]>() as u64;
const COLOR_STRIDE: u64 = std::mem::size_of::<Color>() as u64;

/// Layout for the position buffer: `Float32x2`, tightly packed, offset 0.
pub fn position_layout(attrs: &[wgpu::VertexAttribute; 1]) -> wgpu::VertexBufferLayout<'_> {
    wgpu::VertexBufferLayout {
        array_stride: POSITION_STRIDE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: attrs,
    }
}

/// Layout for the color buffer: `Float32x4`, tightly packed, offset 0.
pub fn color_layout(attrs: &[wgpu::VertexAttribute; 1]) -> wgpu::VertexBufferLayout<'_> {
    wgpu::VertexBufferLayout {
        array_stride: COLOR_STRIDE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: attrs,
    }
}

/// Attribute description for the position buffer at `location`.
pub fn position_attribute(location: u32) -> [wgpu::VertexAttribute; 1] {
    [wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 0,
        shader_location: location,
    }]
}

/// Attribute description for the color buffer at `location`.
pub fn color_attribute(location: u32) -> [wgpu::VertexAttribute; 1] {
    [wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: 0,
        shader_location: location,
    }]
}

/// The two immutable vertex buffers.
pub struct GeometryBuffers {
    pub position: wgpu::Buffer,
    pub color: wgpu::Buffer,
}

impl GeometryBuffers {
    /// Uploads [`QUAD_POSITIONS`] and [`QUAD_COLORS`].
    pub fn new(device: &wgpu::Device) -> Self {
        let position = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("spinquad position vbo"),
            contents: bytemuck::cast_slice(&QUAD_POSITIONS),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let color = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("spinquad color vbo"),
            contents: bytemuck::cast_slice(&QUAD_COLORS),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self { position, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_form_a_unit_quad() {
        for [x, y] in QUAD_POSITIONS {
            assert_eq!(x.abs(), 1.0);
            assert_eq!(y.abs(), 1.0);
        }

        // Four distinct corners.
        for (i, a) in QUAD_POSITIONS.iter().enumerate() {
            for b in &QUAD_POSITIONS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn strip_order_covers_the_quad() {
        // Triangles (0,1,2) and (1,2,3) share the diagonal 1-2.
        let [tl, tr, bl, br] = QUAD_POSITIONS;
        assert_eq!(tl, [-1.0, 1.0]);
        assert_eq!(tr, [1.0, 1.0]);
        assert_eq!(bl, [-1.0, -1.0]);
        assert_eq!(br, [1.0, -1.0]);
    }

    #[test]
    fn colors_by_vertex_index() {
        assert_eq!(QUAD_COLORS[0].to_array(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(QUAD_COLORS[1].to_array(), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(QUAD_COLORS[2].to_array(), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(QUAD_COLORS[3].to_array(), [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn buffers_are_tightly_packed() {
        assert_eq!(bytemuck::cast_slice::<_, u8>(&QUAD_POSITIONS).len(), 4 * 2 * 4);
        assert_eq!(bytemuck::cast_slice::<_, u8>(&QUAD_COLORS).len(), 4 * 4 * 4);

        let pos_attrs = position_attribute(3);
        let layout = position_layout(&pos_attrs);
        assert_eq!(layout.array_stride, 8);
        assert_eq!(layout.attributes[0].shader_location, 3);
        assert_eq!(layout.attributes[0].offset, 0);

        let color_attrs = color_attribute(5);
        let layout = color_layout(&color_attrs);
        assert_eq!(layout.array_stride, 16);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x4);
    }
}
