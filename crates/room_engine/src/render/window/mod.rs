//! Window management subsystem
//!
//! - **`backend`**: the [`WindowBackend`] trait the scene talks to
//! - **`glfw_window`**: the GLFW implementation with a current GL context
//!
//! Tests use an in-memory implementation instead of a real window.

pub mod backend;
pub mod glfw_window;

#[cfg(test)]
pub(crate) mod mock;

pub use backend::WindowBackend;
pub use glfw_window::{GlWindow, WindowError, WindowResult, GL_VERSION};
