//! Engine-wide tolerances, loadable from TOML.
//!
//! ```toml
//! pixels_per_meter = 50.0
//! epsilon_ray_angle_degrees = 0.01
//!
//! [debug]
//! draw_triangle_edges = true
//! ```

use std::f32::consts::PI;
use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::debug_lines::DebugDrawFlags;
use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisibilityConfig {
    /// Physics works in meters, requests and results in pixels.
    pub pixels_per_meter: f32,
    /// Angular offset of each of the two rays cast around a vertex.
    pub epsilon_ray_angle_degrees: f32,
    /// Pixels. Two ray hits closer than this are the same vertex.
    pub epsilon_vertex_hit_distance: f32,
    /// Pixels. A vertex is hidden when both ray hits satisfy `|hit|² + threshold² < |vertex|²`.
    pub epsilon_obstacle_hit_threshold: f32,
    /// Meters added to both ends of each side of the vision square.
    pub boundary_edge_extension: f32,
    /// Multiplier on the half diagonal of the vision square when sizing rays.
    pub ray_length_overshoot: f32,
    pub debug: DebugDrawFlags,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        VisibilityConfig {
            pixels_per_meter: 50.0,
            epsilon_ray_angle_degrees: 0.01,
            epsilon_vertex_hit_distance: 1.0,
            epsilon_obstacle_hit_threshold: 10.0,
            boundary_edge_extension: 1.0,
            ray_length_overshoot: 1.001,
            debug: DebugDrawFlags::default(),
        }
    }
}

impl VisibilityConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: VisibilityConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!("loaded visibility config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let must_be_positive = [
            ("pixels_per_meter", self.pixels_per_meter),
            ("epsilon_ray_angle_degrees", self.epsilon_ray_angle_degrees),
            ("epsilon_vertex_hit_distance", self.epsilon_vertex_hit_distance),
            (
                "epsilon_obstacle_hit_threshold",
                self.epsilon_obstacle_hit_threshold,
            ),
            ("boundary_edge_extension", self.boundary_edge_extension),
        ];
        if let Some(&(field, value)) = must_be_positive
            .iter()
            .find(|(_, value)| !(value.is_finite() && *value > 0.0))
        {
            return Err(ConfigError::NotPositive { field, value });
        }
        if !(self.ray_length_overshoot.is_finite() && self.ray_length_overshoot >= 1.0) {
            return Err(ConfigError::RaysTooShort(self.ray_length_overshoot));
        }
        Ok(())
    }

    pub fn epsilon_ray_angle_radians(&self) -> f32 {
        self.epsilon_ray_angle_degrees * PI / 180.0
    }

    pub fn vertex_hit_distance_meters(&self) -> f32 {
        self.epsilon_vertex_hit_distance / self.pixels_per_meter
    }

    pub fn obstacle_hit_threshold_meters(&self) -> f32 {
        self.epsilon_obstacle_hit_threshold / self.pixels_per_meter
    }
}
