//! Load-time error types
//!
//! Runtime commands never fail; only loading a catalog or settings can.

/// Level catalog could not be loaded or failed validation
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid level catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("level catalog is empty")]
    Empty,

    #[error("level {level} ({name}): non-finite coordinate in {field}")]
    NonFinite {
        level: usize,
        name: String,
        field: &'static str,
    },

    #[error("level {level} ({name}): obstacle {obstacle} has non-positive radius {radius}")]
    BadObstacleRadius {
        level: usize,
        name: String,
        obstacle: usize,
        radius: f64,
    },

    #[error("level {level} ({name}): no available vectors")]
    NoVectors { level: usize, name: String },

    #[error("level {level} ({name}): duplicate vector id {id:?}")]
    DuplicateVectorId {
        level: usize,
        name: String,
        id: String,
    },

    #[error("level {level} ({name}): tutorial step {step} highlights unknown vector {id:?}")]
    UnknownHighlight {
        level: usize,
        name: String,
        step: usize,
        id: String,
    },
}

/// Settings file could not be loaded or holds out-of-range values
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("animation speed {0} out of range [{min}, {max}]", min = crate::consts::MIN_ANIMATION_SPEED, max = crate::consts::MAX_ANIMATION_SPEED)]
    AnimationSpeed(u8),

    #[error("simulation rate {0} Hz is below the {min} Hz collision sampling floor", min = crate::consts::MIN_SIM_HZ)]
    SimRate(u32),

    #[error("max substeps must be at least 1")]
    Substeps,
}
