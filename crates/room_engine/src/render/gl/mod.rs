//! OpenGL backend
//!
//! RAII wrappers over GL objects plus the executor that turns a
//! [`FramePlan`](crate::render::commands::FramePlan) into GL calls. Every
//! function here needs the window's context current on the calling thread.

pub mod buffer;
pub mod executor;
pub mod model;
pub mod resources;
pub mod shader;
pub mod texture;

pub use buffer::{Geometry, IndexBuffer, Primitive, VertexArray, VertexBuffer};
pub use executor::GlExecutor;
pub use model::Model;
pub use resources::GpuResources;
pub use shader::{ShaderError, ShaderProgram, ShaderResult, ShaderStage};
pub use texture::{CubemapFaces, Texture, TextureError, TextureKind, TextureResult};
