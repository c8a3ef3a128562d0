//! Vector Navigator - a vector-composition flight puzzle
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flight plan, segment animation, collisions, mission state)
//! - `geometry`: Vector math shared by everything else
//! - `catalog`: The read-only level catalog and its loader
//! - `snapshot`: Per-tick output consumed by renderers
//! - `settings`: Runtime configuration

pub mod catalog;
pub mod error;
pub mod geometry;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use catalog::LevelCatalog;
pub use error::{CatalogError, SettingsError};
pub use geometry::{add, distance, heading_for_displacement, magnitude, normalize_angle_delta};
pub use settings::Settings;
pub use snapshot::Snapshot;

/// Game configuration constants
pub mod consts {
    /// Default fixed simulation rate (Hz)
    pub const SIM_HZ: u32 = 120;
    /// Lowest simulation rate that still samples collisions finely enough
    pub const MIN_SIM_HZ: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta (seconds) fed into the accumulator
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Longest gap (ms) between two motion samples inside the animator
    pub const MAX_SAMPLE_INTERVAL_MS: f64 = 1000.0 / 120.0;

    /// Ship sprite size in world units; collisions use half of it
    pub const SHIP_SIZE: f64 = 20.0;
    pub const SHIP_RADIUS: f64 = SHIP_SIZE / 2.0;
    /// Ship counts as arrived when strictly closer than this to the target
    pub const CAPTURE_RADIUS: f64 = 10.0;
    /// Heading on level load (degrees, pointing along +x)
    pub const START_HEADING: f64 = 90.0;

    /// Lead-in before the ship moves: per staged vector, plus a fixed tail (ms)
    pub const REVEAL_PER_VECTOR_MS: f64 = 500.0;
    pub const REVEAL_TAIL_MS: f64 = 500.0;

    /// Pure-rotation segments always take this long (ms)
    pub const ROTATION_SEGMENT_MS: f64 = 500.0;
    /// Shortest movement segment (ms)
    pub const MIN_SEGMENT_MS: f64 = 50.0;
    /// Heading catches up with the travel direction within this time (ms)
    pub const MAX_TURN_MS: f64 = 400.0;

    /// Animation speed slider range; duration multiplier is `9 - speed`
    pub const MIN_ANIMATION_SPEED: u8 = 1;
    pub const MAX_ANIMATION_SPEED: u8 = 8;
    pub const DEFAULT_ANIMATION_SPEED: u8 = 5;
}
