//! Level data and core simulation types
//!
//! Levels, vectors and obstacles are immutable once loaded. The ship pose
//! and mission phase are the only state the simulation mutates.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::START_HEADING;

/// Plain `{x, y}` pair for serialized output
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        DVec2::new(p.x, p.y)
    }
}

/// Serde adapter storing a `DVec2` as `{x, y}` (the catalog's on-disk shape)
pub(crate) mod xy {
    use glam::DVec2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Point;

    pub fn serialize<S: Serializer>(v: &DVec2, s: S) -> Result<S::Ok, S::Error> {
        Point::from(*v).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DVec2, D::Error> {
        Point::deserialize(d).map(DVec2::from)
    }
}

/// A player-selectable vector card (or a staged copy of one)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    /// Unique within a level's available set; staged copies get a fresh id
    pub id: String,
    pub x: f64,
    pub y: f64,
    /// Display tag only
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Heading change in degrees; only meaningful on a zero-displacement vector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl Vector {
    pub fn movement(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            color: String::new(),
            label: None,
            rotation: None,
        }
    }

    pub fn turn(id: impl Into<String>, degrees: f64) -> Self {
        Self {
            id: id.into(),
            x: 0.0,
            y: 0.0,
            color: String::new(),
            label: None,
            rotation: Some(degrees),
        }
    }

    #[inline]
    pub fn displacement(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Displacement and rotation are both finite
    pub fn is_finite(&self) -> bool {
        self.displacement().is_finite() && self.rotation.is_none_or(f64::is_finite)
    }

    /// Rotation is set and there is no displacement
    #[inline]
    pub fn is_pure_rotation(&self) -> bool {
        self.rotation.is_some() && self.x == 0.0 && self.y == 0.0
    }

    /// Heading change, ignoring any `rotation` set on a movement vector
    pub fn turn_degrees(&self) -> Option<f64> {
        if self.is_pure_rotation() {
            self.rotation
        } else {
            None
        }
    }

    /// Short flight-plan line, e.g. `(200, 0)` or `Rotate 90°`
    pub fn describe(&self) -> String {
        match self.turn_degrees() {
            Some(deg) => format!("Rotate {deg}°"),
            None => format!("({}, {})", self.x, self.y),
        }
    }
}

/// Static circular exclusion zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Obstacle {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// One page of a level's tutorial overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialStep {
    pub title: String,
    pub text: String,
    /// Available-vector ids to highlight while this step is shown
    #[serde(default)]
    pub highlight_ids: Vec<String>,
}

/// A hand-authored level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub name: String,
    #[serde(with = "xy")]
    pub start: DVec2,
    #[serde(with = "xy")]
    pub target: DVec2,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    pub available_vectors: Vec<Vector>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tutorial: Vec<TutorialStep>,
}

impl Level {
    pub fn find_vector(&self, id: &str) -> Option<&Vector> {
        self.available_vectors.iter().find(|v| v.id == id)
    }

    pub fn is_tutorial(&self) -> bool {
        self.name.to_lowercase().contains("tutorial")
    }

    /// Title shown in the sidebar
    ///
    /// Tutorial names are kept; `Phase 4 (Beginner): Wide Detour` becomes
    /// `Level 4: Wide Detour`.
    pub fn display_name(&self) -> String {
        if self.is_tutorial() {
            return self.name.clone();
        }
        let number: String = self
            .name
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        match self.name.split_once(": ") {
            Some((_, title)) if !number.is_empty() && !title.is_empty() => {
                format!("Level {number}: {title}")
            }
            _ => self.name.clone(),
        }
    }
}

/// Ship pose
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipState {
    #[serde(with = "xy")]
    pub position: DVec2,
    /// Degrees; accumulates without wrapping so turns interpolate smoothly
    pub heading: f64,
}

impl ShipState {
    pub fn at_start(level: &Level) -> Self {
        Self {
            position: level.start,
            heading: START_HEADING,
        }
    }
}

/// Mission lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionPhase {
    /// Player is staging vectors
    Planning,
    /// Plan committed; staged vectors are being revealed before flight
    AnimatingVectors,
    /// Segment animation in progress
    Moving,
    /// Ship reached the target
    Success,
    /// Ship hit an obstacle
    Fail,
}

impl MissionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissionPhase::Planning => "planning",
            MissionPhase::AnimatingVectors => "animating_vectors",
            MissionPhase::Moving => "moving",
            MissionPhase::Success => "success",
            MissionPhase::Fail => "fail",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, MissionPhase::Success | MissionPhase::Fail)
    }

    /// A committed plan is in flight
    pub fn is_running(&self) -> bool {
        matches!(self, MissionPhase::AnimatingVectors | MissionPhase::Moving)
    }
}
