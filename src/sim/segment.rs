//! Flight segments and their motion profiles
//!
//! A committed plan becomes one segment per staged vector, in plan order.
//! Movement segments translate the ship and turn it toward the direction of
//! travel; rotation segments only turn it.

use glam::DVec2;

use super::state::Vector;
use crate::consts::*;
use crate::geometry::{add, heading_for_displacement, magnitude, normalize_angle_delta};

/// One animated step of a flight
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Straight-line travel between two waypoints
    Translate { from: DVec2, to: DVec2 },
    /// Turn in place
    Rotate { at: DVec2, degrees: f64 },
}

impl Segment {
    pub fn start(&self) -> DVec2 {
        match *self {
            Segment::Translate { from, .. } => from,
            Segment::Rotate { at, .. } => at,
        }
    }

    pub fn end(&self) -> DVec2 {
        match *self {
            Segment::Translate { to, .. } => to,
            Segment::Rotate { at, .. } => at,
        }
    }

    pub fn is_rotation(&self) -> bool {
        matches!(self, Segment::Rotate { .. })
    }
}

/// Build segments for `plan` flown from `start`, indexed in lock-step with the plan
pub fn plan_segments(start: DVec2, plan: &[Vector]) -> Vec<Segment> {
    let mut cursor = start;
    plan.iter()
        .map(|vector| match vector.turn_degrees() {
            Some(degrees) => Segment::Rotate { at: cursor, degrees },
            None => {
                let from = cursor;
                cursor = add(cursor, vector.displacement());
                Segment::Translate { from, to: cursor }
            }
        })
        .collect()
}

/// Duration of a movement segment of length `magnitude` at `animation_speed`
pub fn travel_duration_ms(magnitude: f64, animation_speed: u8) -> f64 {
    let speed = animation_speed.clamp(MIN_ANIMATION_SPEED, MAX_ANIMATION_SPEED);
    let multiplier = f64::from(MAX_ANIMATION_SPEED + 1 - speed);
    (magnitude * multiplier).max(MIN_SEGMENT_MS)
}

/// Timing and endpoints of a segment once its start heading is known
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentMotion {
    pub from: DVec2,
    pub to: DVec2,
    pub start_heading: f64,
    /// Reached by shortest-path turn from `start_heading`
    pub target_heading: f64,
    /// Time for the position to reach `to`
    pub duration_ms: f64,
    /// Time for the heading to reach `target_heading` (never longer than `duration_ms`)
    pub turn_ms: f64,
    pub translates: bool,
}

impl SegmentMotion {
    pub fn new(segment: &Segment, start_heading: f64, animation_speed: u8) -> Self {
        match *segment {
            Segment::Rotate { at, degrees } => Self {
                from: at,
                to: at,
                start_heading,
                target_heading: start_heading + normalize_angle_delta(degrees),
                duration_ms: ROTATION_SEGMENT_MS,
                turn_ms: ROTATION_SEGMENT_MS,
                translates: false,
            },
            Segment::Translate { from, to } => {
                let displacement = to - from;
                let raw_heading = heading_for_displacement(displacement);
                let duration_ms = travel_duration_ms(magnitude(displacement), animation_speed);
                Self {
                    from,
                    to,
                    start_heading,
                    target_heading: start_heading
                        + normalize_angle_delta(raw_heading - start_heading),
                    duration_ms,
                    turn_ms: duration_ms.min(MAX_TURN_MS),
                    translates: true,
                }
            }
        }
    }

    /// Position progress in [0, 1]
    #[inline]
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms
    }

    pub fn position_at(&self, elapsed_ms: f64) -> DVec2 {
        let t = self.progress(elapsed_ms);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * t
    }

    pub fn heading_at(&self, elapsed_ms: f64) -> f64 {
        let t = (elapsed_ms / self.turn_ms).clamp(0.0, 1.0);
        if t >= 1.0 {
            return self.target_heading;
        }
        self.start_heading + (self.target_heading - self.start_heading) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_segments_lock_step() {
        let plan = [
            Vector::movement("v1", 100.0, 0.0),
            Vector::turn("r", 90.0),
            Vector::movement("v2", 0.0, 50.0),
        ];
        let segments = plan_segments(DVec2::new(-100.0, 0.0), &plan);

        assert_eq!(segments.len(), 3);
        assert_eq!(
            segments[0],
            Segment::Translate {
                from: DVec2::new(-100.0, 0.0),
                to: DVec2::new(0.0, 0.0)
            }
        );
        assert_eq!(
            segments[1],
            Segment::Rotate {
                at: DVec2::new(0.0, 0.0),
                degrees: 90.0
            }
        );
        assert_eq!(segments[2].start(), DVec2::new(0.0, 0.0));
        assert_eq!(segments[2].end(), DVec2::new(0.0, 50.0));
    }

    #[test]
    fn test_travel_duration() {
        // default speed 5 => multiplier 4
        assert_eq!(travel_duration_ms(200.0, 5), 800.0);
        // fastest speed 8 => multiplier 1
        assert_eq!(travel_duration_ms(200.0, 8), 200.0);
        // slowest speed 1 => multiplier 8
        assert_eq!(travel_duration_ms(200.0, 1), 1600.0);
        // short hops are floored
        assert_eq!(travel_duration_ms(10.0, 8), MIN_SEGMENT_MS);
        // out-of-range speeds are clamped
        assert_eq!(travel_duration_ms(200.0, 0), 1600.0);
        assert_eq!(travel_duration_ms(200.0, 12), 200.0);
    }

    #[test]
    fn test_movement_motion_turns_then_cruises() {
        let segment = Segment::Translate {
            from: DVec2::ZERO,
            to: DVec2::new(0.0, 200.0),
        };
        let motion = SegmentMotion::new(&segment, 90.0, 5);

        assert_eq!(motion.target_heading, 0.0);
        assert_eq!(motion.duration_ms, 800.0);
        assert_eq!(motion.turn_ms, MAX_TURN_MS);

        assert_eq!(motion.heading_at(200.0), 45.0);
        assert_eq!(motion.heading_at(400.0), 0.0);
        assert_eq!(motion.position_at(400.0), DVec2::new(0.0, 100.0));
        assert_eq!(motion.position_at(5000.0), DVec2::new(0.0, 200.0));
        assert!(motion.is_complete(800.0));
    }

    #[test]
    fn test_movement_turn_takes_shortest_path() {
        // heading 90 (+x), travel -x: raw target 270, delta 180 (not -180)
        let segment = Segment::Translate {
            from: DVec2::ZERO,
            to: DVec2::new(-50.0, 0.0),
        };
        let motion = SegmentMotion::new(&segment, 90.0, 5);
        assert_eq!(motion.target_heading, 270.0);

        // heading 350 travelling +y (raw 0): turn +10, not -350
        let segment = Segment::Translate {
            from: DVec2::ZERO,
            to: DVec2::new(0.0, 100.0),
        };
        let motion = SegmentMotion::new(&segment, 350.0, 5);
        assert!((motion.target_heading - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_motion_holds_position() {
        let segment = Segment::Rotate {
            at: DVec2::new(10.0, 20.0),
            degrees: 270.0,
        };
        let motion = SegmentMotion::new(&segment, 90.0, 5);

        assert!(!motion.translates);
        assert_eq!(motion.duration_ms, ROTATION_SEGMENT_MS);
        assert_eq!(motion.target_heading, 0.0);
        assert_eq!(motion.heading_at(250.0), 45.0);
        assert_eq!(motion.position_at(250.0), DVec2::new(10.0, 20.0));
    }

    #[test]
    fn test_short_segment_turns_within_its_duration() {
        let segment = Segment::Translate {
            from: DVec2::ZERO,
            to: DVec2::new(20.0, 0.0),
        };
        let motion = SegmentMotion::new(&segment, 0.0, 8);
        assert_eq!(motion.duration_ms, MIN_SEGMENT_MS);
        assert_eq!(motion.turn_ms, MIN_SEGMENT_MS);
    }
}
