//! Render ops and frame plans
//!
//! A frame is planned as an ordered list of [`RenderOp`]s before any GL call
//! is made. The scene decides what to draw and in which order; the GL
//! executor only replays the list. This keeps pass ordering, uniform values
//! and texture unit assignment testable without a GPU context.

use crate::foundation::math::{Mat3, Mat4, Vec3};

/// Shader programs owned by the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramId {
    /// Demo program, compiled and inspected at startup only
    BasicUniform,
    /// Normal-mapped Phong lighting, walls and floor
    NormalMap,
    /// Per-fragment Phong lighting, the crate
    BasicLighting,
    /// Directional light blended with an environment cubemap, the torus
    Cubemap,
    /// Flat vertex colour through an MVP matrix, divider lines
    Color,
}

/// Geometry the executor knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshId {
    /// Wall/floor quad, 4-vertex triangle strip
    Quad,
    /// View divider line list
    DividerLines,
    /// Torus model
    Torus,
    /// Cube model
    Cube,
}

/// Value for a named uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// `int` or sampler unit
    Int(i32),
    /// `float`
    Float(f32),
    /// `vec3`
    Vec3(Vec3),
    /// `mat3`
    Mat3(Mat3),
    /// `mat4`
    Mat4(Mat4),
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        Self::Vec3(value)
    }
}

impl From<Mat3> for UniformValue {
    fn from(value: Mat3) -> Self {
        Self::Mat3(value)
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        Self::Mat4(value)
    }
}

/// Pixel rectangle, origin at the bottom-left like `glViewport`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Left edge
    pub x: i32,
    /// Bottom edge
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Viewport {
    /// Viewport covering a whole framebuffer
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width: width as i32,
            height: height as i32,
        }
    }

    /// Width over height, 1.0 for degenerate rectangles
    pub fn aspect(&self) -> f32 {
        if self.width > 0 && self.height > 0 {
            self.width as f32 / self.height as f32
        } else {
            1.0
        }
    }
}

/// One step of a frame
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    /// Clear colour, depth and stencil
    Clear,
    /// Set the viewport rectangle
    Viewport(Viewport),
    /// Make a program current; later uniforms target it
    UseProgram(ProgramId),
    /// Set a uniform on the current program
    SetUniform {
        /// GLSL name, e.g. `uLight.pos`
        name: &'static str,
        /// Value to upload
        value: UniformValue,
    },
    /// Bind a named texture to a texture unit
    BindTexture {
        /// Texture unit index (0 = `GL_TEXTURE0`)
        unit: u32,
        /// Key into the scene's texture table
        texture: &'static str,
    },
    /// Issue the draw call(s) for a mesh
    Draw(MeshId),
    /// Flush the pipeline; always the last op of a frame
    Flush,
}

/// Ordered list of render ops for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FramePlan {
    ops: Vec<RenderOp>,
}

impl FramePlan {
    /// Create a new empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a plan with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ops: Vec::with_capacity(capacity),
        }
    }

    /// Append an op
    pub fn push(&mut self, op: RenderOp) {
        self.ops.push(op);
    }

    /// Append a uniform assignment
    pub fn uniform(&mut self, name: &'static str, value: impl Into<UniformValue>) {
        self.ops.push(RenderOp::SetUniform {
            name,
            value: value.into(),
        });
    }

    /// Ops in submission order
    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    /// Number of ops
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the plan is empty
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Meshes drawn, in order
    pub fn draws(&self) -> impl Iterator<Item = MeshId> + '_ {
        self.ops.iter().filter_map(|op| match op {
            RenderOp::Draw(mesh) => Some(*mesh),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_viewport_aspect() {
        assert_eq!(Viewport::full(800, 400).aspect(), 2.0);
        assert_eq!(Viewport::full(0, 600).aspect(), 1.0);
        assert_eq!(Viewport::full(800, 0).aspect(), 1.0);
    }

    #[test]
    fn test_uniform_conversion() {
        let mut plan = FramePlan::new();
        plan.uniform("uNormalSampler", 1);
        plan.uniform("cubemapBlendFactor", 0.5_f32);
        assert_eq!(
            plan.ops(),
            &[
                RenderOp::SetUniform { name: "uNormalSampler", value: UniformValue::Int(1) },
                RenderOp::SetUniform { name: "cubemapBlendFactor", value: UniformValue::Float(0.5) },
            ]
        );
    }

    #[test]
    fn test_draws_filters_draw_ops() {
        let mut plan = FramePlan::with_capacity(4);
        plan.push(RenderOp::UseProgram(ProgramId::NormalMap));
        plan.push(RenderOp::Draw(MeshId::Quad));
        plan.push(RenderOp::Draw(MeshId::Torus));
        plan.push(RenderOp::Flush);
        assert_eq!(plan.draws().collect::<Vec<_>>(), vec![MeshId::Quad, MeshId::Torus]);
        assert_eq!(plan.len(), 4);
    }

    #[test]
    fn test_viewport_aspect() {
        assert_eq!(Viewport::full(800, 600).aspect(), 800.0 / 600.0);
        assert_eq!(Viewport::full(800, 0).aspect(), 1.0);
    }
}
