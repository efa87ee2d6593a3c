//! Event dispatch for the room camera

use glfw::{Action, Key, MouseButton, WindowEvent};

use crate::foundation::math::Vec2;
use crate::render::camera::Camera;
use crate::render::window::WindowBackend;

/// Button that enables mouse look while held
pub const LOOK_BUTTON: MouseButton = MouseButton::Button2;

/// Tracks cursor and look-button state between events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputDispatcher {
    last_mouse_position: Vec2,
    right_button_down: bool,
}

impl InputDispatcher {
    /// Dispatcher with the cursor at the origin and no button held
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher that starts from the window's current cursor position
    pub fn from_window(window: &impl WindowBackend) -> Self {
        let (x, y) = window.cursor_position();
        Self {
            last_mouse_position: Vec2::new(x as f32, y as f32),
            right_button_down: false,
        }
    }

    /// Route one window event
    ///
    /// Events other than key, cursor and mouse button are ignored.
    pub fn dispatch(&mut self, event: &WindowEvent, camera: &mut Camera, window: &mut impl WindowBackend) {
        match *event {
            WindowEvent::Key(key, _, action, _) => self.on_key(key, action, window),
            WindowEvent::CursorPos(x, y) => self.on_cursor_pos(camera, x, y),
            WindowEvent::MouseButton(button, action, _) => self.on_mouse_button(button, action),
            _ => {}
        }
    }

    /// Escape pressed closes the window
    pub fn on_key(&mut self, key: Key, action: Action, window: &mut impl WindowBackend) {
        if key == Key::Escape && action == Action::Press {
            log::info!("Escape pressed, closing window");
            window.set_should_close(true);
        }
    }

    /// Turn the camera by the cursor delta while the look button is held
    ///
    /// Screen Y grows downwards, so the vertical offset is inverted before it
    /// reaches the camera. The last position is updated either way, so
    /// pressing the button never produces a jump.
    pub fn on_cursor_pos(&mut self, camera: &mut Camera, x: f64, y: f64) {
        let position = Vec2::new(x as f32, y as f32);
        let x_offset = position.x - self.last_mouse_position.x;
        let y_offset = self.last_mouse_position.y - position.y;

        if self.right_button_down {
            camera.process_mouse_movement(x_offset, y_offset);
        }
        self.last_mouse_position = position;
    }

    /// Track the look button
    pub fn on_mouse_button(&mut self, button: MouseButton, action: Action) {
        if button != LOOK_BUTTON {
            return;
        }
        match action {
            Action::Press => self.right_button_down = true,
            Action::Release => self.right_button_down = false,
            Action::Repeat => {}
        }
    }

    /// Cursor position seen by the last cursor event
    pub fn last_mouse_position(&self) -> Vec2 {
        self.last_mouse_position
    }

    /// Whether the look button is held
    pub fn right_button_down(&self) -> bool {
        self.right_button_down
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::window::mock::MockWindow;
    use approx::assert_relative_eq;
    use glfw::Modifiers;

    fn press_look(input: &mut InputDispatcher) {
        input.on_mouse_button(LOOK_BUTTON, Action::Press);
    }

    #[test]
    fn test_cursor_delta_turns_camera_with_button_held() {
        let mut input = InputDispatcher::new();
        let mut camera = Camera::default();
        input.on_cursor_pos(&mut camera, 100.0, 100.0);
        press_look(&mut input);

        let (yaw, pitch) = (camera.yaw(), camera.pitch());
        input.on_cursor_pos(&mut camera, 110.0, 95.0);

        // (10, 5) scaled by sensitivity 0.1
        assert_relative_eq!(camera.yaw(), yaw + 1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.pitch(), pitch + 0.5, epsilon = 1e-5);
        assert_eq!(input.last_mouse_position(), Vec2::new(110.0, 95.0));
    }

    #[test]
    fn test_first_look_starts_from_window_cursor() {
        let mut window = MockWindow::new();
        window.cursor = (400.0, 300.0);
        let mut input = InputDispatcher::from_window(&window);
        assert_eq!(input.last_mouse_position(), Vec2::new(400.0, 300.0));

        let mut camera = Camera::default();
        let (yaw, pitch) = (camera.yaw(), camera.pitch());
        press_look(&mut input);
        input.on_cursor_pos(&mut camera, 402.0, 300.0);

        assert_relative_eq!(camera.yaw(), yaw + 0.2, epsilon = 1e-5);
        assert_relative_eq!(camera.pitch(), pitch, epsilon = 1e-5);
    }

    #[test]
    fn test_cursor_without_button_only_tracks_position() {
        let mut input = InputDispatcher::new();
        let mut camera = Camera::default();
        let before = camera.clone();

        input.on_cursor_pos(&mut camera, 100.0, 100.0);
        input.on_cursor_pos(&mut camera, 140.0, 20.0);

        assert_eq!(camera, before);
        assert_eq!(input.last_mouse_position(), Vec2::new(140.0, 20.0));
    }

    #[test]
    fn test_release_stops_look() {
        let mut input = InputDispatcher::new();
        let mut camera = Camera::default();
        press_look(&mut input);
        assert!(input.right_button_down());

        input.on_mouse_button(LOOK_BUTTON, Action::Release);
        assert!(!input.right_button_down());

        let before = camera.clone();
        input.on_cursor_pos(&mut camera, 50.0, 50.0);
        assert_eq!(camera, before);
    }

    #[test]
    fn test_other_buttons_are_ignored() {
        let mut input = InputDispatcher::new();
        input.on_mouse_button(MouseButton::Button1, Action::Press);
        assert!(!input.right_button_down());
    }

    #[test]
    fn test_escape_closes_window() {
        let mut input = InputDispatcher::new();
        let mut camera = Camera::default();
        let mut window = MockWindow::new();

        let other = WindowEvent::Key(Key::W, 0, Action::Press, Modifiers::empty());
        input.dispatch(&other, &mut camera, &mut window);
        assert!(!window.should_close);

        let released = WindowEvent::Key(Key::Escape, 0, Action::Release, Modifiers::empty());
        input.dispatch(&released, &mut camera, &mut window);
        assert!(!window.should_close);

        let escape = WindowEvent::Key(Key::Escape, 0, Action::Press, Modifiers::empty());
        input.dispatch(&escape, &mut camera, &mut window);
        assert!(window.should_close);
    }

    #[test]
    fn test_dispatch_routes_mouse_events() {
        let mut input = InputDispatcher::new();
        let mut camera = Camera::default();
        let mut window = MockWindow::new();

        input.dispatch(&WindowEvent::CursorPos(10.0, 10.0), &mut camera, &mut window);
        input.dispatch(
            &WindowEvent::MouseButton(LOOK_BUTTON, Action::Press, Modifiers::empty()),
            &mut camera,
            &mut window,
        );
        input.dispatch(&WindowEvent::CursorPos(20.0, 10.0), &mut camera, &mut window);

        assert_relative_eq!(camera.yaw(), -89.0, epsilon = 1e-5);
    }
}
