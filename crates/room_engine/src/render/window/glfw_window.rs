//! GLFW window with a current OpenGL context

use glfw::{Context, Key, WindowEvent};
use thiserror::Error;

use super::backend::WindowBackend;
use crate::config::WindowSettings;

/// OpenGL context version requested from GLFW
pub const GL_VERSION: (u32, u32) = (4, 3);

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not start
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// The window or its GL context could not be created
    #[error("Window creation failed ({width}x{height}, OpenGL {major}.{minor} core)")]
    CreationFailed {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Requested GL major version
        major: u32,
        /// Requested GL minor version
        minor: u32,
    },
}

/// Result alias for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// GLFW window wrapper owning the GL context
///
/// Creating a `GlWindow` makes its context current on the calling thread and
/// loads the `gl` function pointers. GPU objects must be dropped before the
/// window, since their `Drop` impls call into this context.
pub struct GlWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
}

impl GlWindow {
    /// Open a window, create a core-profile context and load GL
    pub fn new(settings: &WindowSettings) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;

        let (major, minor) = GL_VERSION;
        glfw.window_hint(glfw::WindowHint::ContextVersion(major, minor));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::Resizable(true));

        let (mut window, events) = glfw
            .create_window(settings.width, settings.height, &settings.title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed {
                width: settings.width,
                height: settings.height,
                major,
                minor,
            })?;

        window.make_current();
        gl::load_with(|symbol| window.get_proc_address(symbol) as *const _);

        let interval = if settings.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        };
        glfw.set_swap_interval(interval);

        window.set_key_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_mouse_button_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_close_polling(true);

        log::info!(
            "Created {}x{} window \"{}\" with OpenGL {}.{} core context",
            settings.width, settings.height, settings.title, major, minor
        );

        Ok(Self { glfw, window, events })
    }

    /// Process pending window system events
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    /// Take the events queued by the last poll
    pub fn drain_events(&self) -> Vec<WindowEvent> {
        glfw::flush_messages(&self.events)
            .map(|(_, event)| event)
            .collect()
    }

    /// Present the back buffer
    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }
}

impl WindowBackend for GlWindow {
    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.window.get_key(key) == glfw::Action::Press
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    fn elapsed_time(&self) -> f64 {
        self.glfw.get_time()
    }

    fn cursor_position(&self) -> (f64, f64) {
        self.window.get_cursor_pos()
    }
}
