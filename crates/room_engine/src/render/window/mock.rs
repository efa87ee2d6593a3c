//! In-memory window for tests

use std::collections::HashSet;

use glfw::Key;

use super::backend::WindowBackend;

/// Scriptable [`WindowBackend`] with no display behind it
#[derive(Debug, Default)]
pub struct MockWindow {
    /// Close flag
    pub should_close: bool,
    /// Keys reported as held
    pub keys_down: HashSet<Key>,
    /// Reported framebuffer size
    pub size: (u32, u32),
    /// Reported clock
    pub time: f64,
    /// Reported cursor position
    pub cursor: (f64, f64),
}

impl MockWindow {
    /// 800x600 window with nothing pressed
    pub fn new() -> Self {
        Self {
            size: (800, 600),
            ..Self::default()
        }
    }

    /// Mark `key` as held
    pub fn press(&mut self, key: Key) {
        self.keys_down.insert(key);
    }
}

impl WindowBackend for MockWindow {
    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.should_close = should_close;
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        self.size
    }

    fn elapsed_time(&self) -> f64 {
        self.time
    }

    fn cursor_position(&self) -> (f64, f64) {
        self.cursor
    }
}
