//! # Fly Camera
//!
//! Yaw/pitch driven camera for walking around the room. Position moves along
//! the camera's own axes; orientation comes from mouse deltas.
//!
//! ## Coordinate System
//! Right-handed, Y-up world. View space looks down -Z, matching the OpenGL
//! projection built in [`crate::foundation::math::Mat4Ext::perspective_deg`].
//! Yaw is measured in degrees around +Y starting from +X, so a yaw of -90°
//! faces -Z.

use crate::config::CameraSettings;
use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

/// Default yaw, facing -Z
pub const DEFAULT_YAW: f32 = -90.0;

/// Default pitch, level with the horizon
pub const DEFAULT_PITCH: f32 = 0.0;

/// Direction of a single keyboard movement step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    /// Along the front vector
    Forward,
    /// Against the front vector
    Backward,
    /// Against the right vector
    Left,
    /// Along the right vector
    Right,
    /// Along the camera up vector
    Up,
    /// Against the camera up vector
    Down,
}

/// Yaw/pitch fly camera
///
/// `front`, `right` and `up` are derived from `yaw`/`pitch` and the world up
/// vector. They are recomputed after every orientation change, so reading
/// them is always consistent with the current angles.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,

    yaw: f32,
    pitch: f32,

    /// Movement speed in world units per second
    pub movement_speed: f32,

    /// Degrees of rotation per unit of mouse delta
    pub mouse_sensitivity: f32,

    pitch_limit: f32,
}

impl Camera {
    /// Create a camera at `position` with the given world up and angles (degrees)
    ///
    /// Speed, sensitivity and pitch limit come from [`CameraSettings::default`].
    /// The initial pitch is clamped like any later mouse input.
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        Self::with_settings(position, world_up, yaw, pitch, &CameraSettings::default())
    }

    /// Create a camera with explicit movement/look settings
    pub fn with_settings(
        position: Vec3,
        world_up: Vec3,
        yaw: f32,
        pitch: f32,
        settings: &CameraSettings,
    ) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::new(0.0, 0.0, -1.0),
            up: world_up,
            right: Vec3::x(),
            world_up,
            yaw,
            pitch,
            movement_speed: settings.speed,
            mouse_sensitivity: settings.sensitivity,
            pitch_limit: settings.pitch_limit,
        };
        camera.constrain_pitch();
        camera.update_camera_vectors();
        camera
    }

    /// Generate the world-to-view matrix
    ///
    /// Right-handed look-at from `position` toward `position + front`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.front, self.up)
    }

    /// Move one step in `direction`, scaled by `delta_time` seconds
    ///
    /// The displacement length is exactly `movement_speed * delta_time`
    /// because the axis vectors are unit length.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        let axis = match direction {
            CameraMovement::Forward => self.front,
            CameraMovement::Backward => -self.front,
            CameraMovement::Left => -self.right,
            CameraMovement::Right => self.right,
            CameraMovement::Up => self.up,
            CameraMovement::Down => -self.up,
        };
        self.position += axis * velocity;
    }

    /// Turn the camera by a mouse delta
    ///
    /// Positive `x_offset` turns right, positive `y_offset` looks up. Pitch is
    /// clamped to `±pitch_limit` so the front vector never reaches world up,
    /// where the right vector would degenerate and the view would flip.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;

        self.constrain_pitch();
        self.update_camera_vectors();
        log::trace!("Camera yaw {:.2}, pitch {:.2}", self.yaw, self.pitch);
    }

    /// Yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees, always within the pitch limit
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Unit view direction
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit right vector
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit camera up vector
    pub fn up(&self) -> Vec3 {
        self.up
    }

    fn constrain_pitch(&mut self) {
        self.pitch = self.pitch.clamp(-self.pitch_limit, self.pitch_limit);
    }

    fn update_camera_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front).normalize();
    }
}

impl Default for Camera {
    /// Camera at the origin facing -Z with +Y up
    fn default() -> Self {
        Self::new(Vec3::zeros(), Vec3::y(), DEFAULT_YAW, DEFAULT_PITCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec4;
    use approx::assert_relative_eq;

    fn room_camera() -> Camera {
        Camera::new(Vec3::new(0.0, 5.0, 4.0), Vec3::y(), -90.0, -45.0)
    }

    #[test]
    fn test_default_faces_negative_z() {
        let camera = Camera::default();
        assert_relative_eq!(camera.front(), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
        assert_relative_eq!(camera.right(), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(camera.up(), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_keyboard_displacement_is_speed_times_delta() {
        let cases = [
            (CameraMovement::Forward, 1.0),
            (CameraMovement::Backward, -1.0),
        ];
        for (direction, sign) in cases {
            let mut camera = room_camera();
            let start = camera.position;
            camera.process_keyboard(direction, 0.4);

            let moved = camera.position - start;
            assert_relative_eq!(moved.magnitude(), 2.5 * 0.4, epsilon = 1e-5);
            assert_relative_eq!(moved.normalize(), camera.front() * sign, epsilon = 1e-5);
        }

        let mut camera = room_camera();
        let start = camera.position;
        camera.process_keyboard(CameraMovement::Right, 2.0);
        assert_relative_eq!(camera.position - start, camera.right() * 5.0, epsilon = 1e-5);

        let mut camera = room_camera();
        let start = camera.position;
        camera.process_keyboard(CameraMovement::Down, 0.5);
        assert_relative_eq!(camera.position - start, -camera.up() * 1.25, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_delta_does_not_move() {
        let mut camera = room_camera();
        let start = camera.position;
        camera.process_keyboard(CameraMovement::Left, 0.0);
        assert_eq!(camera.position, start);
    }

    #[test]
    fn test_view_matrix_maps_front_to_negative_z() {
        let camera = room_camera();
        let view = camera.view_matrix();

        let eye = view * Vec4::new(camera.position.x, camera.position.y, camera.position.z, 1.0);
        assert_relative_eq!(eye.xyz(), Vec3::zeros(), epsilon = 1e-5);

        let ahead = camera.position + camera.front();
        let ahead_view = view * Vec4::new(ahead.x, ahead.y, ahead.z, 1.0);
        assert_relative_eq!(ahead_view.xyz(), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_mouse_movement_scales_by_sensitivity() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(10.0, 5.0);
        assert_relative_eq!(camera.yaw(), -89.0, epsilon = 1e-5);
        assert_relative_eq!(camera.pitch(), 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(0.0, 5000.0);
        assert_relative_eq!(camera.pitch(), 89.0);
        assert!(camera.front().y < 1.0);
        assert!(camera.right().magnitude() > 0.99);

        camera.process_mouse_movement(0.0, -10000.0);
        assert_relative_eq!(camera.pitch(), -89.0);
    }

    #[test]
    fn test_vectors_stay_orthonormal() {
        let mut camera = room_camera();
        camera.process_mouse_movement(123.0, -37.0);
        assert_relative_eq!(camera.front().dot(&camera.right()), 0.0, epsilon = 1e-5);
        assert_relative_eq!(camera.front().dot(&camera.up()), 0.0, epsilon = 1e-5);
        assert_relative_eq!(camera.up().magnitude(), 1.0, epsilon = 1e-5);
    }
}
