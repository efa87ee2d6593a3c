//! Renderer configuration

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};

/// Top-level renderer configuration
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Window creation parameters
    pub window: WindowSettings,
    /// Camera movement and look tuning
    pub camera: CameraSettings,
    /// Scene animation and display options
    pub scene: SceneSettings,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            window: WindowSettings::default(),
            camera: CameraSettings::default(),
            scene: SceneSettings::default(),
        }
    }
}

impl Config for RoomConfig {}

impl RoomConfig {
    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }

        if !(self.camera.pitch_limit > 0.0 && self.camera.pitch_limit < 90.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.pitch_limit must be in (0, 90), got {}",
                self.camera.pitch_limit
            )));
        }

        if !(self.camera.speed >= 0.0 && self.camera.sensitivity >= 0.0) {
            return Err(ConfigError::Invalid(
                "camera speed and sensitivity must be non-negative numbers".to_string(),
            ));
        }

        Ok(())
    }
}

/// Window creation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Initial width in screen coordinates
    pub width: u32,
    /// Initial height in screen coordinates
    pub height: u32,
    /// Title bar text
    pub title: String,
    /// Wait for vertical blank on buffer swap
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Lit Room".to_string(),
            vsync: true,
        }
    }
}

/// Camera movement and look tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Movement speed in world units per second
    pub speed: f32,
    /// Degrees of yaw/pitch per pixel of mouse travel
    pub sensitivity: f32,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]` degrees
    pub pitch_limit: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            speed: 2.5,
            sensitivity: 0.1,
            pitch_limit: 89.0,
        }
    }
}

/// Scene animation and display options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Torus spin in degrees per second
    pub rotate_speed: f32,
    /// Environment map contribution on the torus, 0..=1
    pub cubemap_blend_factor: f32,
    /// Orbit the light around the room
    pub animate_light: bool,
    /// Light orbit speed in degrees per second
    pub light_orbit_speed: f32,
    /// Light orbit radius in world units
    pub light_orbit_radius: f32,
    /// Split the window into main, top-down and side views
    pub multiple_views: bool,
    /// Rasterize polygons as lines
    pub wireframe: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            rotate_speed: 90.0,
            cubemap_blend_factor: 1.0,
            animate_light: false,
            light_orbit_speed: 45.0,
            light_orbit_radius: 2.0,
            multiple_views: false,
            wireframe: false,
        }
    }
}
