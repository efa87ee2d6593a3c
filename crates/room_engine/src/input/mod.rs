//! Window input handling
//!
//! Translates GLFW window events into camera look and close requests. Held
//! movement keys are polled in the scene update instead.

pub mod dispatcher;

pub use dispatcher::InputDispatcher;
