//! Per-tick output consumed by renderers
//!
//! A plain serializable copy of everything a frontend draws: ship pose,
//! trail, flight plan with its resultant and projection, phase, and the
//! current level passed through unchanged.

use serde::Serialize;

use crate::sim::mission::Mission;
use crate::sim::state::{Level, MissionPhase, Point, Vector};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipDto {
    pub position: Point,
    pub heading: f64,
}

/// One staged flight-plan entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanEntryDto {
    #[serde(flatten)]
    pub vector: Vector,
    /// `(x, y)` or `Rotate {deg}°`
    pub description: String,
}

impl From<&Vector> for PlanEntryDto {
    fn from(vector: &Vector) -> Self {
        Self {
            vector: vector.clone(),
            description: vector.describe(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TutorialDto {
    pub step: usize,
    pub title: String,
    pub text: String,
    pub highlight_ids: Vec<String>,
    pub is_last_step: bool,
}

/// State of a mission at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub level_index: usize,
    pub level_count: usize,
    pub level_name: String,
    pub phase: MissionPhase,
    pub ship: ShipDto,
    pub path: Vec<Point>,
    pub plan: Vec<PlanEntryDto>,
    pub resultant: Point,
    pub projected_position: Point,
    pub required_displacement: Point,
    /// Staged vectors drawn so far during the lead-in
    pub revealed_vectors: usize,
    /// Segment being flown, while moving
    pub active_segment: Option<usize>,
    pub animation_speed: u8,
    /// Open tutorial page, if any
    pub tutorial: Option<TutorialDto>,
    pub level: Level,
}

impl Snapshot {
    pub fn capture(mission: &Mission) -> Self {
        let ship = mission.ship();
        let tutorial = mission.tutorial();

        Self {
            level_index: mission.level_index(),
            level_count: mission.catalog().len(),
            level_name: mission.level().display_name(),
            phase: mission.phase(),
            ship: ShipDto {
                position: ship.position.into(),
                heading: ship.heading,
            },
            path: mission.path().iter().copied().map(Point::from).collect(),
            plan: mission.plan().entries().iter().map(PlanEntryDto::from).collect(),
            resultant: mission.resultant().into(),
            projected_position: mission.projected_position().into(),
            required_displacement: mission.required_displacement().into(),
            revealed_vectors: mission.revealed_vectors(),
            active_segment: mission.active_segment(),
            animation_speed: mission.animation_speed(),
            tutorial: tutorial.current().map(|step| TutorialDto {
                step: tutorial.step_index(),
                title: step.title.clone(),
                text: step.text.clone(),
                highlight_ids: tutorial.highlighted_ids().to_vec(),
                is_last_step: tutorial.is_last_step(),
            }),
            level: mission.level().clone(),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
