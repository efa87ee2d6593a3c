//! Per-frame scene state
//!
//! Cameras, light, material and the cached matrices every pass reads. No GL
//! types here, so update logic runs in tests against a mock window.

use glfw::Key;

use super::layout::{RoomLayout, CUBE, TORUS};
use crate::config::{RoomConfig, SceneSettings};
use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::render::camera::{Camera, CameraMovement, DEFAULT_PITCH, DEFAULT_YAW};
use crate::render::commands::Viewport;
use crate::render::lighting::Light;
use crate::render::material::Material;
use crate::render::vertex::{DIVIDER_SPACE_HEIGHT, DIVIDER_SPACE_WIDTH};
use crate::render::window::WindowBackend;

/// Vertical field of view in degrees
pub const FOV_Y_DEGREES: f32 = 45.0;
/// Near clip distance
pub const NEAR_PLANE: f32 = 0.1;
/// Far clip distance
pub const FAR_PLANE: f32 = 100.0;

/// Held key → camera movement, polled every update
pub const MOVEMENT_KEYS: [(Key, CameraMovement); 6] = [
    (Key::W, CameraMovement::Forward),
    (Key::S, CameraMovement::Backward),
    (Key::A, CameraMovement::Left),
    (Key::D, CameraMovement::Right),
    (Key::Q, CameraMovement::Down),
    (Key::E, CameraMovement::Up),
];

/// Mutable scene data
#[derive(Debug, Clone)]
pub struct SceneState {
    /// User-controlled camera
    pub main_camera: Camera,
    /// Looks straight down from above the room, multi-view only
    pub top_camera: Camera,
    /// Looks along -Z from near the front wall, multi-view only
    pub side_camera: Camera,
    /// Scene light
    pub light: Light,
    /// Material shared by all lit draws
    pub material: Material,
    /// Animation and display options
    pub settings: SceneSettings,

    view: Mat4,
    projection: Mat4,
    ortho: Mat4,
    framebuffer_size: (u32, u32),
    rotate_angle: f32,
    light_angle: f32,
}

impl SceneState {
    /// Initial state for a framebuffer of `width` × `height` pixels
    pub fn new(config: &RoomConfig, width: u32, height: u32) -> Self {
        let up = Vec3::y();
        let main_camera = Camera::with_settings(Vec3::new(0.0, 5.0, 4.0), up, -90.0, -45.0, &config.camera);
        let top_camera = Camera::with_settings(Vec3::new(0.0, 10.0, 0.0), up, -90.0, -90.0, &config.camera);
        let side_camera =
            Camera::with_settings(Vec3::new(-0.5, 1.5, 2.5), up, DEFAULT_YAW, DEFAULT_PITCH, &config.camera);

        let mut state = Self {
            view: main_camera.view_matrix(),
            main_camera,
            top_camera,
            side_camera,
            light: Light::room_default(),
            material: Material::default(),
            settings: config.scene.clone(),
            projection: Mat4::identity(),
            ortho: Mat4::orthographic(0.0, DIVIDER_SPACE_WIDTH, 0.0, DIVIDER_SPACE_HEIGHT, 0.1, 10.0),
            framebuffer_size: (width, height),
            rotate_angle: 0.0,
            light_angle: 0.0,
        };
        state.resize(width, height);
        state
    }

    /// Advance one frame of `delta_time` seconds
    ///
    /// Polls the movement keys, spins the torus, moves the light when its
    /// animation is on, and refreshes the cached view matrix.
    pub fn update(&mut self, window: &impl WindowBackend, delta_time: f32) {
        for (key, movement) in MOVEMENT_KEYS {
            if window.is_key_down(key) {
                self.main_camera.process_keyboard(movement, delta_time);
            }
        }

        self.rotate_angle = (self.rotate_angle + self.settings.rotate_speed * delta_time) % 360.0;

        if self.settings.animate_light {
            self.light_angle = (self.light_angle + self.settings.light_orbit_speed * delta_time) % 360.0;
            self.light.orbit(self.settings.light_orbit_radius, self.light_angle);
        }

        self.view = self.main_camera.view_matrix();
    }

    /// Track a new framebuffer size; zero-area sizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring resize to {width}x{height}");
            return;
        }
        self.framebuffer_size = (width, height);
        self.projection = Self::perspective(Viewport::full(width, height));
        log::debug!("Projection updated for {width}x{height}");
    }

    /// Perspective projection for a viewport's aspect ratio
    pub fn perspective(viewport: Viewport) -> Mat4 {
        Mat4::perspective_deg(FOV_Y_DEGREES, viewport.aspect(), NEAR_PLANE, FAR_PLANE)
    }

    /// Cached main camera view
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Full-window perspective projection
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Orthographic projection over the divider line space
    pub fn ortho(&self) -> Mat4 {
        self.ortho
    }

    /// Last accepted framebuffer size
    pub fn framebuffer_size(&self) -> (u32, u32) {
        self.framebuffer_size
    }

    /// Accumulated torus spin in degrees
    pub fn rotate_angle(&self) -> f32 {
        self.rotate_angle
    }

    /// Eye position for specular terms
    ///
    /// This is the main camera's position, so highlights follow the viewer
    /// rather than a fixed point at (0, 0, 4).
    pub fn viewpoint(&self) -> Vec3 {
        self.main_camera.position
    }

    /// Torus model matrix: lifted one unit above its anchor, scaled, spun about X
    pub fn torus_model_matrix(&self, layout: &RoomLayout) -> Mat4 {
        layout.transform(TORUS)
            * Mat4::translation(0.0, 1.0, 0.0)
            * Mat4::scaling(0.8, 0.8, 0.8)
            * Mat4::rotation_x_deg(self.rotate_angle)
    }

    /// Crate model matrix: lifted one unit above its anchor at half size
    pub fn cube_model_matrix(&self, layout: &RoomLayout) -> Mat4 {
        layout.transform(CUBE) * Mat4::translation(0.0, 1.0, 0.0) * Mat4::scaling(0.5, 0.5, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::window::mock::MockWindow;
    use approx::assert_relative_eq;

    fn state() -> SceneState {
        SceneState::new(&RoomConfig::default(), 800, 600)
    }

    #[test]
    fn test_viewpoint_follows_main_camera() {
        let mut state = state();
        let mut window = MockWindow::new();
        window.press(Key::W);
        state.update(&window, 1.0);

        assert_eq!(state.viewpoint(), state.main_camera.position);
        assert_ne!(state.viewpoint(), Vec3::new(0.0, 0.0, 4.0));
    }

    #[test]
    fn test_torus_angle_wraps() {
        let mut state = state();
        state.update(&MockWindow::new(), 5.0);
        assert_relative_eq!(state.rotate_angle(), 90.0);
    }

    #[test]
    fn test_update_spins_torus() {
        let mut state = state();
        let layout = RoomLayout::new();
        state.update(&MockWindow::new(), 1.0);

        assert_relative_eq!(state.rotate_angle(), 90.0);
        let expected = Mat4::translation(-1.0, 1.0, -1.0) * Mat4::scaling(0.8, 0.8, 0.8) * Mat4::rotation_x_deg(90.0);
        assert_relative_eq!(state.torus_model_matrix(&layout), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_cube_sits_at_one_one_one() {
        let state = state();
        let expected = Mat4::translation(1.0, 1.0, 1.0) * Mat4::scaling(0.5, 0.5, 0.5);
        assert_relative_eq!(state.cube_model_matrix(&RoomLayout::new()), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_held_keys_move_main_camera() {
        let mut state = state();
        let mut window = MockWindow::new();
        window.press(Key::W);
        window.press(Key::E);

        let start = state.main_camera.position;
        let expected = start + (state.main_camera.front() + state.main_camera.up()) * 2.5 * 0.5;
        state.update(&window, 0.5);

        assert_relative_eq!(state.main_camera.position, expected, epsilon = 1e-5);
        assert_relative_eq!(state.view_matrix(), state.main_camera.view_matrix());
    }

    #[test]
    fn test_no_keys_keeps_position() {
        let mut state = state();
        let start = state.main_camera.position;
        state.update(&MockWindow::new(), 0.016);
        assert_eq!(state.main_camera.position, start);
    }

    #[test]
    fn test_light_orbits_only_when_enabled() {
        let mut state = state();
        state.update(&MockWindow::new(), 1.0);
        assert_eq!(state.light.position, Light::room_default().position);

        state.settings.animate_light = true;
        state.update(&MockWindow::new(), 2.0);
        assert_relative_eq!(state.light.position, Vec3::new(0.0, 3.0, 2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_resize_updates_aspect_and_ignores_zero() {
        let mut state = state();
        state.resize(1200, 600);
        let wide = state.projection();
        assert_relative_eq!(wide, SceneState::perspective(Viewport::full(1200, 600)));

        state.resize(1200, 0);
        assert_eq!(state.projection(), wide);
        assert_eq!(state.framebuffer_size(), (1200, 600));
    }

    #[test]
    fn test_top_camera_pitch_is_clamped() {
        let state = state();
        assert_relative_eq!(state.top_camera.pitch(), -89.0);
        assert!(state.top_camera.front().y < -0.99);
    }
}
