//! Mission state machine
//!
//! Owns everything that lives for one level: ship pose, trail, flight plan,
//! phase and the in-flight run. Phases move
//! `Planning -> AnimatingVectors -> Moving -> {Success | Fail}`, and back to
//! `Planning` on retry, advance, level select, or a flight that ends short
//! of the target.
//!
//! Commands that don't fit the current phase are ignored, never errors.

use std::sync::Arc;

use glam::DVec2;

use super::animator::{Animator, AnimatorStatus};
use super::collision::CollisionResult;
use super::plan::FlightPlan;
use super::segment::plan_segments;
use super::state::{Level, MissionPhase, ShipState, Vector};
use super::tutorial::TutorialProgress;
use crate::catalog::LevelCatalog;
use crate::consts::*;
use crate::geometry::distance;
use crate::settings::Settings;
use crate::snapshot::Snapshot;

/// A committed plan between launch and outcome
#[derive(Debug, Clone)]
struct FlightRun {
    /// Reveal lead-in before the ship moves
    lead_in_ms: f64,
    /// Latched on the first tick after commit
    lead_in_start: Option<f64>,
    /// Present once the lead-in has elapsed
    animator: Option<Animator>,
    animation_speed: u8,
}

/// One player's session over the level catalog
#[derive(Debug, Clone)]
pub struct Mission {
    catalog: Arc<LevelCatalog>,
    level_index: usize,
    level: Level,
    ship: ShipState,
    /// Trail samples, starting at the level start
    path: Vec<DVec2>,
    plan: FlightPlan,
    phase: MissionPhase,
    animation_speed: u8,
    /// Bumped on every reset and launch; stale continuations are dropped
    generation: u64,
    run: Option<FlightRun>,
    /// Timestamp of the most recent tick
    clock_ms: Option<f64>,
    tutorial: TutorialProgress,
}

impl Mission {
    /// Start at the first level
    pub fn new(catalog: Arc<LevelCatalog>) -> Self {
        let level = catalog.first().clone();
        let mut mission = Self {
            catalog,
            level_index: 0,
            ship: ShipState::at_start(&level),
            path: Vec::new(),
            level,
            plan: FlightPlan::new(),
            phase: MissionPhase::Planning,
            animation_speed: DEFAULT_ANIMATION_SPEED,
            generation: 0,
            run: None,
            clock_ms: None,
            tutorial: TutorialProgress::default(),
        };
        mission.load_level(0);
        mission
    }

    /// Start at `settings.start_level` with the configured animation speed
    pub fn with_settings(catalog: Arc<LevelCatalog>, settings: &Settings) -> Self {
        let mut mission = Self::new(catalog);
        mission.set_animation_speed(settings.animation_speed);
        if settings.start_level != 0 {
            mission.select_level(settings.start_level);
        }
        mission
    }

    // === Input ===

    /// Stage a copy of `vector` (planning only)
    ///
    /// Vectors with a non-finite displacement or rotation are ignored.
    pub fn drop_vector(&mut self, vector: &Vector) {
        if self.phase != MissionPhase::Planning {
            log::debug!("Ignoring drop of {} while {}", vector.id, self.phase.as_str());
            return;
        }
        if !vector.is_finite() {
            log::warn!("Ignoring drop of non-finite vector {}", vector.id);
            return;
        }
        let staged = self.plan.stage(vector);
        log::debug!("Staged {} {}", staged.id, staged.describe());
    }

    /// Stage an available vector of the current level by id
    ///
    /// Returns false if the level has no such vector.
    pub fn drop_available(&mut self, id: &str) -> bool {
        match self.level.find_vector(id).cloned() {
            Some(vector) => {
                self.drop_vector(&vector);
                true
            }
            None => {
                log::warn!("Level {:?} has no vector {id:?}", self.level.name);
                false
            }
        }
    }

    /// Remove the last staged vector (planning only)
    pub fn undo(&mut self) {
        if self.phase != MissionPhase::Planning {
            log::debug!("Ignoring undo while {}", self.phase.as_str());
            return;
        }
        self.plan.undo();
    }

    /// Clear the flight plan (planning only)
    pub fn reset_turn(&mut self) {
        if self.phase != MissionPhase::Planning {
            log::debug!("Ignoring reset while {}", self.phase.as_str());
            return;
        }
        self.plan.clear();
    }

    /// Launch the staged plan
    ///
    /// Ignored unless planning with at least one staged vector. Once launched
    /// the flight can't be cancelled except by a level reset.
    pub fn commit_plan(&mut self) {
        if self.phase != MissionPhase::Planning || self.plan.is_empty() {
            log::debug!(
                "Ignoring launch while {} with {} staged",
                self.phase.as_str(),
                self.plan.len()
            );
            return;
        }

        self.generation += 1;
        let count = self.plan.len();
        self.run = Some(FlightRun {
            lead_in_ms: REVEAL_PER_VECTOR_MS * count as f64 + REVEAL_TAIL_MS,
            lead_in_start: None,
            animator: None,
            animation_speed: self.animation_speed,
        });
        self.phase = MissionPhase::AnimatingVectors;
        log::info!(
            "Launch: {} vectors, resultant ({}, {})",
            count,
            self.resultant().x,
            self.resultant().y
        );
    }

    /// Restart the current level
    ///
    /// Tutorial progress is kept; only the flight state resets.
    pub fn retry_level(&mut self) {
        self.reset_flight();
        log::info!("Retrying level {}", self.level_index + 1);
    }

    /// Move to the next level, looping back to the first after the last
    pub fn advance_level(&mut self) {
        let next = self.level_index + 1;
        if next >= self.catalog.len() {
            log::info!("All missions complete, starting over");
            self.load_level(0);
        } else {
            self.load_level(next);
        }
    }

    /// Jump to a level (out-of-range indices are ignored)
    pub fn select_level(&mut self, index: usize) {
        if index >= self.catalog.len() {
            log::warn!(
                "Ignoring select of level {index}, catalog has {}",
                self.catalog.len()
            );
            return;
        }
        self.load_level(index);
    }

    /// Set the speed slider (planning only), clamped to [1, 8]
    pub fn set_animation_speed(&mut self, speed: u8) {
        if self.phase != MissionPhase::Planning {
            log::debug!("Ignoring speed change while {}", self.phase.as_str());
            return;
        }
        let clamped = speed.clamp(MIN_ANIMATION_SPEED, MAX_ANIMATION_SPEED);
        if clamped != speed {
            log::warn!("Animation speed {speed} clamped to {clamped}");
        }
        self.animation_speed = clamped;
    }

    /// Advance or close the tutorial overlay
    pub fn dismiss_tutorial(&mut self) {
        self.tutorial.dismiss();
    }

    // === Scheduling ===

    /// Token a scheduler should capture alongside any deferred continuation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance the in-flight run to `now_ms`
    pub fn tick(&mut self, now_ms: f64) {
        self.tick_as(self.generation, now_ms);
    }

    /// Advance on behalf of a continuation scheduled under `generation`
    ///
    /// Returns false (and changes nothing) if the level was reset or a new
    /// flight launched since.
    pub fn tick_as(&mut self, generation: u64, now_ms: f64) -> bool {
        if generation != self.generation {
            log::debug!(
                "Dropping stale continuation (generation {generation}, current {})",
                self.generation
            );
            return false;
        }
        self.clock_ms = Some(now_ms);

        let Some(run) = self.run.as_mut() else {
            return true;
        };

        if self.phase == MissionPhase::AnimatingVectors {
            let started = *run.lead_in_start.get_or_insert(now_ms);
            if now_ms - started < run.lead_in_ms {
                return true;
            }
            let segments = plan_segments(self.ship.position, self.plan.entries());
            run.animator = Some(Animator::new(
                segments,
                self.ship.heading,
                run.animation_speed,
            ));
            self.phase = MissionPhase::Moving;
            log::debug!("Lead-in done after {:.0}ms, moving", now_ms - started);
        }

        let Some(animator) = run.animator.as_mut() else {
            return true;
        };
        let status = animator.tick(now_ms, &mut self.ship, &mut self.path, &self.level.obstacles);

        match status {
            AnimatorStatus::Running => {}
            AnimatorStatus::Completed { position } => self.land(position),
            AnimatorStatus::Collided(hit) => self.crash(&hit),
        }
        true
    }

    fn land(&mut self, position: DVec2) {
        self.run = None;
        self.ship.position = position;
        let miss = distance(position, self.level.target);
        if miss < CAPTURE_RADIUS {
            self.phase = MissionPhase::Success;
            log::info!("Mission {} complete: {}", self.level_index + 1, self.level.name);
        } else {
            // Ship keeps its new position; only the plan is spent
            self.phase = MissionPhase::Planning;
            self.plan.clear();
            log::info!(
                "Arrived at ({:.1}, {:.1}), {:.1} from target",
                position.x,
                position.y,
                miss
            );
        }
    }

    fn crash(&mut self, hit: &CollisionResult) {
        self.run = None;
        self.phase = MissionPhase::Fail;
        log::info!(
            "Mission {} failed: hit obstacle {} at ({:.1}, {:.1})",
            self.level_index + 1,
            hit.obstacle,
            hit.point.x,
            hit.point.y
        );
    }

    /// Reset all per-level state for `index` (caller checks bounds)
    fn load_level(&mut self, index: usize) {
        self.level_index = index;
        self.level = self.catalog.levels()[index].clone();
        self.tutorial = TutorialProgress::new(&self.level.tutorial);
        self.reset_flight();
        log::info!("Level {}: {}", index + 1, self.level.display_name());
    }

    /// Ship back to the start with an empty plan; any run in flight is dropped
    fn reset_flight(&mut self) {
        self.generation += 1;
        self.ship = ShipState::at_start(&self.level);
        self.path = vec![self.level.start];
        self.plan.clear();
        self.phase = MissionPhase::Planning;
        self.run = None;
    }

    // === Output ===

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn ship(&self) -> &ShipState {
        &self.ship
    }

    pub fn path(&self) -> &[DVec2] {
        &self.path
    }

    pub fn plan(&self) -> &FlightPlan {
        &self.plan
    }

    pub fn phase(&self) -> MissionPhase {
        self.phase
    }

    pub fn animation_speed(&self) -> u8 {
        self.animation_speed
    }

    pub fn tutorial(&self) -> &TutorialProgress {
        &self.tutorial
    }

    pub fn is_last_level(&self) -> bool {
        self.level_index + 1 == self.catalog.len()
    }

    pub fn resultant(&self) -> DVec2 {
        self.plan.resultant()
    }

    pub fn projected_position(&self) -> DVec2 {
        self.plan.projected_position(self.ship.position)
    }

    /// Displacement still needed, against the rounded ship position
    pub fn required_displacement(&self) -> DVec2 {
        self.level.target - self.ship.position.round()
    }

    /// Staged vectors the renderer should currently draw
    ///
    /// During the lead-in they appear one per `REVEAL_PER_VECTOR_MS`.
    pub fn revealed_vectors(&self) -> usize {
        let count = self.plan.len();
        if self.phase != MissionPhase::AnimatingVectors {
            return count;
        }
        let Some(started) = self.run.as_ref().and_then(|run| run.lead_in_start) else {
            return 0;
        };
        let elapsed = self.clock_ms.unwrap_or(started) - started;
        let shown = (elapsed / REVEAL_PER_VECTOR_MS).floor() as usize + 1;
        shown.min(count)
    }

    /// Segments of the flight in progress, with the index being flown
    pub fn active_segment(&self) -> Option<usize> {
        self.run
            .as_ref()
            .and_then(|run| run.animator.as_ref())
            .map(|animator| animator.segment_index())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
