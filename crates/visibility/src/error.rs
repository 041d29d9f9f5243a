use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum VisibilityError {
    #[error("vision square side must be positive and finite, got {0} px")]
    InvalidSquareSide(f32),
    #[error("discontinuity gap threshold must be finite, got {0} px")]
    InvalidGapThreshold(f32),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read visibility config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse visibility config")]
    Parse(#[from] toml::de::Error),
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("ray_length_overshoot must be at least 1.0 so rays leave the vision square, got {0}")]
    RaysTooShort(f32),
}
