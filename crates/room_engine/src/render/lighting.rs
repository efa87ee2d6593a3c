//! Lighting system

use crate::foundation::math::{Vec3, utils};

/// Point/directional light shared by every lit pass
///
/// The normal-map and basic-lighting shaders use `position`; the cubemap
/// shader uses `direction`. Colour terms follow the classic ambient/diffuse/
/// specular split.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Light position in world space
    pub position: Vec3,
    /// Direction the light travels, for the directional term
    pub direction: Vec3,
    /// Ambient colour
    pub ambient: Vec3,
    /// Diffuse colour
    pub diffuse: Vec3,
    /// Specular colour
    pub specular: Vec3,
    /// Constant, linear and quadratic attenuation coefficients
    pub attenuation: Vec3,
}

impl Light {
    /// The room's ceiling light
    pub fn room_default() -> Self {
        Self {
            position: Vec3::new(0.0, 3.0, 0.0),
            direction: Vec3::new(0.3, -0.7, -0.5),
            ambient: Vec3::repeat(0.3),
            diffuse: Vec3::repeat(1.0),
            specular: Vec3::repeat(1.0),
            attenuation: Vec3::new(1.0, 0.0, 0.0),
        }
    }

    /// Place the light on a horizontal circle around the Y axis
    ///
    /// Height is kept; `angle_degrees` 0 puts the light on +X.
    pub fn orbit(&mut self, radius: f32, angle_degrees: f32) {
        let angle = utils::deg_to_rad(angle_degrees);
        self.position.x = radius * angle.cos();
        self.position.z = radius * angle.sin();
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::room_default()
    }
}
