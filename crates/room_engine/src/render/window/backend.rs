//! Backend-agnostic window trait
//!
//! The scene only needs a handful of window operations: keyboard polling,
//! the close flag, the framebuffer size, the cursor and the window clock. Keeping them
//! behind a trait lets update and input logic run against a mock window in
//! tests, without a display or GL context.

use glfw::Key;

/// Window operations the scene and input dispatcher depend on
///
/// # Thread Safety
/// Not `Send`: GLFW windows must stay on the main thread, and so does
/// everything that holds one.
pub trait WindowBackend {
    /// Check if the window should close
    ///
    /// True once the user closed the window or someone called
    /// [`set_should_close`](Self::set_should_close) with `true`.
    fn should_close(&self) -> bool;

    /// Set whether the window should close
    fn set_should_close(&mut self, should_close: bool);

    /// Whether `key` is currently held down
    ///
    /// Polled state, not events, so holding a key produces smooth movement
    /// independent of the OS key-repeat rate.
    fn is_key_down(&self, key: Key) -> bool;

    /// Drawable size in pixels
    fn framebuffer_size(&self) -> (u32, u32);

    /// Seconds since the window system was initialized
    fn elapsed_time(&self) -> f64;

    /// Cursor position in screen coordinates
    fn cursor_position(&self) -> (f64, f64);
}
