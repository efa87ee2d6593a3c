//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the handful of matrix builders the room
//! renderer needs. All matrices follow the OpenGL convention: right-handed
//! view space looking down -Z and clip-space depth in [-1, 1].

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}

/// Extension trait for Mat4 with the builders used by scene layout and passes
pub trait Mat4Ext {
    /// Translation matrix
    fn translation(x: f32, y: f32, z: f32) -> Mat4;

    /// Non-uniform scale matrix
    fn scaling(x: f32, y: f32, z: f32) -> Mat4;

    /// Rotation about the X axis, angle in degrees
    fn rotation_x_deg(degrees: f32) -> Mat4;

    /// Rotation about the Y axis, angle in degrees
    fn rotation_y_deg(degrees: f32) -> Mat4;

    /// Right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// OpenGL perspective projection, vertical field of view in degrees
    fn perspective_deg(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// OpenGL orthographic projection
    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4;

    /// Inverse-transpose of the upper 3x3, used to carry normals through
    /// non-uniform scale. Falls back to identity for singular matrices.
    fn normal_matrix(&self) -> Mat3;
}

impl Mat4Ext for Mat4 {
    fn translation(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::new_translation(&Vec3::new(x, y, z))
    }

    fn scaling(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::new_nonuniform_scaling(&Vec3::new(x, y, z))
    }

    fn rotation_x_deg(degrees: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), utils::deg_to_rad(degrees))
    }

    fn rotation_y_deg(degrees: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(degrees))
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }

    fn perspective_deg(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, utils::deg_to_rad(fov_y_degrees), near, far)
    }

    fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_orthographic(left, right, bottom, top, near, far)
    }

    fn normal_matrix(&self) -> Mat3 {
        let upper: Mat3 = self.fixed_view::<3, 3>(0, 0).into_owned();
        upper
            .try_inverse()
            .map_or_else(Mat3::identity, |inverse| inverse.transpose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotation_x_quarter_turn() {
        let m = Mat4::rotation_x_deg(90.0);
        let v = m.transform_vector(&Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(v, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_normal_matrix_undoes_non_uniform_scale() {
        let model = Mat4::scaling(2.0, 1.0, 1.0);
        let n = model.normal_matrix();
        assert_relative_eq!(n[(0, 0)], 0.5, epsilon = 1e-6);
        assert_relative_eq!(n[(1, 1)], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_normal_matrix_of_rotation_is_rotation() {
        let model = Mat4::translation(3.0, 0.0, 2.0) * Mat4::rotation_y_deg(-90.0);
        let expected: Mat3 = model.fixed_view::<3, 3>(0, 0).into_owned();
        assert_relative_eq!(model.normal_matrix(), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_singular_normal_matrix_is_identity() {
        let model = Mat4::scaling(0.0, 1.0, 1.0);
        assert_eq!(model.normal_matrix(), Mat3::identity());
    }
}
