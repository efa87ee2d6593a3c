//! # Rendering
//!
//! - **Camera**: yaw/pitch fly camera
//! - **Commands**: render ops and per-frame plans, no GL calls
//! - **Lighting / Material**: Phong parameters shared by the lit passes
//! - **Vertex**: `Pod` vertex formats, static quad and divider geometry
//! - **Window**: GLFW window behind the [`window::WindowBackend`] trait
//! - **GL**: RAII OpenGL objects and the frame plan executor
//!
//! Scene code only builds [`commands::FramePlan`]s; the [`gl`] module is the
//! only place that touches the GL context.

pub mod camera;
pub mod commands;
pub mod gl;
pub mod lighting;
pub mod material;
pub mod vertex;
pub mod window;

pub use camera::{Camera, CameraMovement};
pub use commands::{FramePlan, MeshId, ProgramId, RenderOp, UniformValue, Viewport};
pub use lighting::Light;
pub use material::Material;
