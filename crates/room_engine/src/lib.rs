//! # Room Engine
//!
//! A small OpenGL renderer for a single lit room: normal-mapped walls and
//! floor, a Phong-lit crate and an environment-mapped spinning torus, seen
//! through a yaw/pitch fly camera.
//!
//! ## Layout
//!
//! - **`foundation`**: math aliases, frame timing, logging setup
//! - **`config`**: TOML/RON configuration
//! - **`assets`**: asset paths, image decoding, OBJ loading
//! - **`render`**: camera, frame plans, window, OpenGL backend
//! - **`input`**: window event dispatch
//! - **`scene`**: room layout, per-frame state and pass planning
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use room_engine::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     let config = RoomConfig::default();
//!     let mut window = GlWindow::new(&config.window)?;
//!     let mut scene = Scene::init(&config, &AssetPaths::default(), &window)?;
//!     let mut timer = Timer::new();
//!
//!     while !window.should_close() {
//!         window.poll_events();
//!         for event in window.drain_events() {
//!             scene.handle_event(&event, &mut window);
//!         }
//!         let dt = timer.tick(window.elapsed_time());
//!         scene.update(&window, dt);
//!         scene.render()?;
//!         window.swap_buffers();
//!     }
//!     drop(scene);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod input;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::AssetPaths,
        config::{Config, RoomConfig},
        foundation::{
            math::{Mat4, Mat4Ext, Vec3},
            time::{FrameStats, Timer},
        },
        input::InputDispatcher,
        render::{
            camera::{Camera, CameraMovement},
            commands::{FramePlan, RenderOp},
            window::{GlWindow, WindowBackend},
        },
        scene::{Scene, SceneError, SceneResult, SceneState},
    };
}
