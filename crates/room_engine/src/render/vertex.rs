//! Vertex formats and static geometry
//!
//! Vertex structs are `#[repr(C)]` + `Pod` so they can be uploaded with
//! `bytemuck::cast_slice`. Each format describes its attribute layout with a
//! [`VertexLayout`], which the GL backend turns into vertex array state.

use bytemuck::{Pod, Zeroable};
use std::mem::{offset_of, size_of};

/// One float vertex attribute: shader location, component count, byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// `layout(location = N)` in the vertex shader
    pub location: u32,
    /// Number of `f32` components
    pub components: i32,
    /// Byte offset inside one vertex
    pub offset: usize,
}

/// Interleaved attribute layout of a vertex format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    /// Size of one vertex in bytes
    pub stride: usize,
    /// Attributes in location order
    pub attributes: &'static [VertexAttribute],
}

/// Format with a fixed attribute layout
pub trait VertexFormat: Pod {
    /// Attribute layout for vertex array setup
    const LAYOUT: VertexLayout;
}

/// Position, normal, tangent and texture coordinate
///
/// Used by the wall/floor quad and by loaded models, so every lit shader
/// reads the same attribute locations 0..=3.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VertexNormTanTex {
    /// Position in object space
    pub position: [f32; 3],
    /// Unit normal
    pub normal: [f32; 3],
    /// Unit tangent along +U
    pub tangent: [f32; 3],
    /// Texture coordinate
    pub tex_coord: [f32; 2],
}

impl VertexFormat for VertexNormTanTex {
    const LAYOUT: VertexLayout = VertexLayout {
        stride: size_of::<Self>(),
        attributes: &[
            VertexAttribute { location: 0, components: 3, offset: offset_of!(Self, position) },
            VertexAttribute { location: 1, components: 3, offset: offset_of!(Self, normal) },
            VertexAttribute { location: 2, components: 3, offset: offset_of!(Self, tangent) },
            VertexAttribute { location: 3, components: 2, offset: offset_of!(Self, tex_coord) },
        ],
    };
}

/// Position and colour, for debug lines
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VertexColor {
    /// Position
    pub position: [f32; 3],
    /// RGB colour
    pub color: [f32; 3],
}

impl VertexFormat for VertexColor {
    const LAYOUT: VertexLayout = VertexLayout {
        stride: size_of::<Self>(),
        attributes: &[
            VertexAttribute { location: 0, components: 3, offset: offset_of!(Self, position) },
            VertexAttribute { location: 1, components: 3, offset: offset_of!(Self, color) },
        ],
    };
}

const QUAD_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];
const QUAD_TANGENT: [f32; 3] = [1.0, 0.0, 0.0];

/// Unit-half-extent quad in the XY plane facing +Z, drawn as a 4-vertex
/// triangle strip
pub const QUAD_VERTICES: [VertexNormTanTex; 4] = [
    VertexNormTanTex { position: [-1.0, -1.0, 0.0], normal: QUAD_NORMAL, tangent: QUAD_TANGENT, tex_coord: [0.0, 0.0] },
    VertexNormTanTex { position: [1.0, -1.0, 0.0], normal: QUAD_NORMAL, tangent: QUAD_TANGENT, tex_coord: [1.0, 0.0] },
    VertexNormTanTex { position: [-1.0, 1.0, 0.0], normal: QUAD_NORMAL, tangent: QUAD_TANGENT, tex_coord: [0.0, 1.0] },
    VertexNormTanTex { position: [1.0, 1.0, 0.0], normal: QUAD_NORMAL, tangent: QUAD_TANGENT, tex_coord: [1.0, 1.0] },
];

/// Width of the space the divider lines are authored in
pub const DIVIDER_SPACE_WIDTH: f32 = 1600.0;

/// Height of the space the divider lines are authored in
pub const DIVIDER_SPACE_HEIGHT: f32 = 1200.0;

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// Horizontal and vertical divider through the centre of a
/// 1600x1200 orthographic space, as a line list
pub const DIVIDER_LINE_VERTICES: [VertexColor; 4] = [
    VertexColor { position: [0.0, 600.0, 0.0], color: WHITE },
    VertexColor { position: [1600.0, 600.0, 0.0], color: WHITE },
    VertexColor { position: [800.0, 0.0, 0.0], color: WHITE },
    VertexColor { position: [800.0, 1200.0, 0.0], color: WHITE },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_tan_tex_layout() {
        let layout = VertexNormTanTex::LAYOUT;
        assert_eq!(layout.stride, 44);
        let offsets: Vec<_> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24, 36]);
        let locations: Vec<_> = layout.attributes.iter().map(|a| a.location).collect();
        assert_eq!(locations, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_color_layout() {
        let layout = VertexColor::LAYOUT;
        assert_eq!(layout.stride, 24);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[1].components, 3);
    }

    #[test]
    fn test_quad_bytes_match_stride() {
        let bytes: &[u8] = bytemuck::cast_slice(&QUAD_VERTICES);
        assert_eq!(bytes.len(), 4 * VertexNormTanTex::LAYOUT.stride);
    }

    #[test]
    fn test_dividers_cross_at_centre() {
        assert_eq!(DIVIDER_LINE_VERTICES[0].position[1], DIVIDER_SPACE_HEIGHT / 2.0);
        assert_eq!(DIVIDER_LINE_VERTICES[2].position[0], DIVIDER_SPACE_WIDTH / 2.0);
    }
}
