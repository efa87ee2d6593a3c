//! Material system for rendering

use crate::foundation::math::Vec3;

/// Phong material shared by every lit draw
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Ambient reflectance
    pub ambient: Vec3,
    /// Diffuse reflectance
    pub diffuse: Vec3,
    /// Specular reflectance
    pub specular: Vec3,
    /// Specular exponent
    pub shininess: f32,
}

impl Material {
    /// Create a new material
    pub fn new(ambient: Vec3, diffuse: Vec3, specular: Vec3, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(
            Vec3::repeat(0.2),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(0.2, 0.7, 1.0),
            40.0,
        )
    }
}
