//! Deterministic simulation module
//!
//! All flight logic lives here. This module must be pure and deterministic:
//! - Time only enters through explicit `tick(now_ms)` calls
//! - Stable iteration order (plan order, level obstacle order)
//! - No rendering or platform dependencies

pub mod animator;
pub mod collision;
pub mod mission;
pub mod plan;
pub mod segment;
pub mod state;
pub mod tick;
pub mod tutorial;

#[cfg(test)]
mod proptest_sim;

pub use animator::{Animator, AnimatorStatus, SegmentRecord};
pub use collision::{CollisionResult, ship_collision, ship_obstacle_collision};
pub use mission::Mission;
pub use plan::FlightPlan;
pub use segment::{Segment, SegmentMotion, plan_segments, travel_duration_ms};
pub use state::{Level, MissionPhase, Obstacle, Point, ShipState, TutorialStep, Vector};
pub use tick::FixedStepRunner;
pub use tutorial::TutorialProgress;
