//! Segment animator: flies a committed plan one segment at a time
//!
//! Explicit state machine advanced by `tick(now_ms)`. Between the previous
//! sample and `now_ms` the motion is re-sampled at least every
//! `MAX_SAMPLE_INTERVAL_MS`, so a coarse caller cannot tunnel the ship
//! through a thin obstacle.

use glam::DVec2;

use super::collision::{CollisionResult, ship_collision};
use super::segment::{Segment, SegmentMotion};
use super::state::{Obstacle, ShipState};
use crate::consts::{MAX_SAMPLE_INTERVAL_MS, SHIP_RADIUS};

/// Outcome of an animator step
#[derive(Debug, Clone, PartialEq)]
pub enum AnimatorStatus {
    /// Still flying
    Running,
    /// Every segment finished without contact
    Completed { position: DVec2 },
    /// Halted on contact; no further segments run
    Collided(CollisionResult),
}

impl AnimatorStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, AnimatorStatus::Running)
    }
}

/// Record of a finished segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentRecord {
    pub start_heading: f64,
    pub end_heading: f64,
    pub end_position: DVec2,
    pub rotation: bool,
}

/// Per-flight animation state
#[derive(Debug, Clone)]
pub struct Animator {
    segments: Vec<Segment>,
    segment_index: usize,
    /// Start time of the current segment (latched on first tick)
    segment_start_ms: Option<f64>,
    /// Elapsed time of the last sample taken in the current segment
    sampled_ms: Option<f64>,
    /// Heading the current segment starts from
    start_heading: f64,
    motion: Option<SegmentMotion>,
    /// Latched at launch; later slider changes don't affect this flight
    animation_speed: u8,
    trace: Vec<SegmentRecord>,
    outcome: Option<AnimatorStatus>,
}

impl Animator {
    pub fn new(segments: Vec<Segment>, start_heading: f64, animation_speed: u8) -> Self {
        Self {
            segments,
            segment_index: 0,
            segment_start_ms: None,
            sampled_ms: None,
            start_heading,
            motion: None,
            animation_speed,
            trace: Vec::new(),
            outcome: None,
        }
    }

    /// Index of the segment being flown (equals segment count once done)
    pub fn segment_index(&self) -> usize {
        self.segment_index
    }

    /// Finished segments in order
    pub fn trace(&self) -> &[SegmentRecord] {
        &self.trace
    }

    /// Advance to `now_ms`, updating the ship and appending to `path`
    pub fn tick(
        &mut self,
        now_ms: f64,
        ship: &mut ShipState,
        path: &mut Vec<DVec2>,
        obstacles: &[Obstacle],
    ) -> AnimatorStatus {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }

        loop {
            let Some(segment) = self.segments.get(self.segment_index).copied() else {
                let status = AnimatorStatus::Completed {
                    position: ship.position,
                };
                self.outcome = Some(status.clone());
                return status;
            };

            let started = *self.segment_start_ms.get_or_insert(now_ms);
            let (start_heading, speed) = (self.start_heading, self.animation_speed);
            let motion = *self
                .motion
                .get_or_insert_with(|| SegmentMotion::new(&segment, start_heading, speed));
            let target = (now_ms - started).clamp(0.0, motion.duration_ms);

            loop {
                let elapsed = match self.sampled_ms {
                    None => 0.0,
                    Some(prev) if prev >= target => break,
                    Some(prev) => (prev + MAX_SAMPLE_INTERVAL_MS).min(target),
                };
                self.sampled_ms = Some(elapsed);

                if let Some(hit) = Self::sample(&motion, elapsed, ship, path, obstacles) {
                    log::info!(
                        "Collision with obstacle {} at ({:.1}, {:.1}) in segment {}",
                        hit.obstacle,
                        hit.point.x,
                        hit.point.y,
                        self.segment_index
                    );
                    let status = AnimatorStatus::Collided(hit);
                    self.outcome = Some(status.clone());
                    return status;
                }
            }

            if !motion.is_complete(target) {
                return AnimatorStatus::Running;
            }

            self.trace.push(SegmentRecord {
                start_heading: motion.start_heading,
                end_heading: motion.target_heading,
                end_position: motion.to,
                rotation: segment.is_rotation(),
            });

            // Next segment starts exactly where and when this one ended
            ship.position = motion.to;
            ship.heading = motion.target_heading;
            self.start_heading = motion.target_heading;
            self.segment_start_ms = Some(started + motion.duration_ms);
            self.sampled_ms = None;
            self.motion = None;
            self.segment_index += 1;
        }
    }

    /// Apply one motion sample; returns the collision if the ship made contact
    fn sample(
        motion: &SegmentMotion,
        elapsed: f64,
        ship: &mut ShipState,
        path: &mut Vec<DVec2>,
        obstacles: &[Obstacle],
    ) -> Option<CollisionResult> {
        if motion.translates {
            let pos = motion.position_at(elapsed);
            ship.position = pos;
            path.push(pos);

            let hit = ship_collision(pos, SHIP_RADIUS, obstacles);
            if hit.hit {
                return Some(hit);
            }
        }
        ship.heading = motion.heading_at(elapsed);
        None
    }
}
