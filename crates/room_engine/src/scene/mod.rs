//! The lit room scene
//!
//! [`Scene`] owns the scene state, the static layout and the GPU resources.
//! The app drives it with [`handle_event`](Scene::handle_event),
//! [`update`](Scene::update) and [`render`](Scene::render) each frame.
//!
//! ```text
//! window events ──► InputDispatcher ──► main camera
//! update(dt)    ──► SceneState (keys, torus spin, light, view)
//! render()      ──► build_frame ──► FramePlan ──► GlExecutor
//! ```

pub mod layout;
pub mod passes;
pub mod resources;
pub mod state;

pub use layout::RoomLayout;
pub use passes::build_frame;
pub use state::SceneState;

use glfw::WindowEvent;
use thiserror::Error;

use crate::assets::{AssetError, AssetPaths};
use crate::config::{ConfigError, RoomConfig};
use crate::input::InputDispatcher;
use crate::render::gl::{GlExecutor, GpuResources, ShaderError, TextureError};
use crate::render::window::{WindowBackend, WindowError};

/// Errors surfaced by scene setup and rendering
#[derive(Error, Debug)]
pub enum SceneError {
    /// Shader compile, link or use failed
    #[error(transparent)]
    Shader(#[from] ShaderError),

    /// Texture could not be created
    #[error(transparent)]
    Texture(#[from] TextureError),

    /// Model or image file could not be loaded
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Window or context creation failed
    #[error(transparent)]
    Window(#[from] WindowError),

    /// Configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias for scene operations
pub type SceneResult<T> = Result<T, SceneError>;

/// Scene with its GPU resources
///
/// Must be dropped before the window whose context created it.
pub struct Scene {
    state: SceneState,
    layout: RoomLayout,
    input: InputDispatcher,
    resources: GpuResources,
    executor: GlExecutor,
}

impl Scene {
    /// Set GL state, load every asset and build the initial state
    ///
    /// The window's context must be current.
    pub fn init(config: &RoomConfig, paths: &AssetPaths, window: &impl WindowBackend) -> SceneResult<Self> {
        let executor = GlExecutor::new();
        executor.init_state(config.scene.wireframe);

        let resources = resources::load(paths)?;
        let (width, height) = window.framebuffer_size();

        log::info!("Scene initialized at {width}x{height}");
        Ok(Self {
            state: SceneState::new(config, width, height),
            layout: RoomLayout::new(),
            input: InputDispatcher::from_window(window),
            resources,
            executor,
        })
    }

    /// Route a window event to input handling or resize
    pub fn handle_event(&mut self, event: &WindowEvent, window: &mut impl WindowBackend) {
        if let WindowEvent::FramebufferSize(width, height) = *event {
            self.resize(width.max(0) as u32, height.max(0) as u32);
            return;
        }
        self.input.dispatch(event, &mut self.state.main_camera, window);
    }

    /// Advance by `delta_time` seconds
    pub fn update(&mut self, window: &impl WindowBackend, delta_time: f32) {
        self.state.update(window, delta_time);
    }

    /// Plan and submit one frame
    pub fn render(&mut self) -> SceneResult<()> {
        let plan = build_frame(&self.state, &self.layout);
        self.executor.submit(&plan, &mut self.resources)?;
        Ok(())
    }

    /// Follow a framebuffer size change
    pub fn resize(&mut self, width: u32, height: u32) {
        self.state.resize(width, height);
    }

    /// Current scene state
    pub fn state(&self) -> &SceneState {
        &self.state
    }

    /// Room layout table
    pub fn layout(&self) -> &RoomLayout {
        &self.layout
    }
}
