//! Property-based tests for the flight simulation using proptest.

use glam::DVec2;
use proptest::prelude::*;

use super::animator::{Animator, AnimatorStatus};
use super::plan::FlightPlan;
use super::segment::plan_segments;
use super::state::{ShipState, Vector};
use crate::geometry::normalize_angle_delta;

/// Movement vectors on the catalog's grid, or quarter/half turns
fn any_vector() -> impl Strategy<Value = Vector> {
    prop_oneof![
        3 => (-300i32..=300, -300i32..=300)
            .prop_map(|(x, y)| Vector::movement("m", f64::from(x), f64::from(y))),
        1 => prop_oneof![Just(90.0), Just(-90.0), Just(180.0), Just(270.0)]
            .prop_map(|deg| Vector::turn("r", deg)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Wrapped deltas land in (-180, 180] and differ by whole turns.
    #[test]
    fn prop_normalize_angle_delta_range(delta in -10_000.0f64..10_000.0) {
        let wrapped = normalize_angle_delta(delta);
        prop_assert!(wrapped > -180.0 && wrapped <= 180.0, "{} -> {}", delta, wrapped);

        let turns = (delta - wrapped) / 360.0;
        prop_assert!((turns - turns.round()).abs() < 1e-9);
    }

    /// Resultant is the componentwise sum, rotations contributing zero.
    #[test]
    fn prop_resultant_is_componentwise_sum(vectors in prop::collection::vec(any_vector(), 0..12)) {
        let mut plan = FlightPlan::new();
        for v in &vectors {
            plan.stage(v);
        }

        let (mut x, mut y) = (0.0, 0.0);
        for v in &vectors {
            if !v.is_pure_rotation() {
                x += v.x;
                y += v.y;
            }
        }
        prop_assert_eq!(plan.resultant(), DVec2::new(x, y));
        prop_assert_eq!(plan.len(), vectors.len());
    }

    /// Each segment starts exactly at the heading the previous one ended on,
    /// and an unobstructed flight ends at the projected position.
    #[test]
    fn prop_heading_continuity(
        vectors in prop::collection::vec(any_vector(), 1..8),
        speed in 1u8..=8,
        frame_ms in 4.0f64..50.0,
    ) {
        let start = DVec2::new(-50.0, 25.0);
        let mut plan = FlightPlan::new();
        for v in &vectors {
            plan.stage(v);
        }

        let mut animator = Animator::new(plan_segments(start, plan.entries()), 90.0, speed);
        let mut ship = ShipState { position: start, heading: 90.0 };
        let mut path = vec![start];
        let mut now = 0.0;
        let status = loop {
            let status = animator.tick(now, &mut ship, &mut path, &[]);
            if status.is_finished() {
                break status;
            }
            now += frame_ms;
        };

        let AnimatorStatus::Completed { position } = status else {
            return Err(TestCaseError::fail("flight without obstacles collided"));
        };
        prop_assert_eq!(position, plan.projected_position(start));

        let trace = animator.trace();
        prop_assert_eq!(trace.len(), vectors.len());
        prop_assert_eq!(trace[0].start_heading, 90.0);
        for pair in trace.windows(2) {
            prop_assert_eq!(pair[1].start_heading, pair[0].end_heading);
        }
        for record in trace {
            let turn = record.end_heading - record.start_heading;
            prop_assert!(turn > -180.0 - 1e-9 && turn <= 180.0 + 1e-9);
        }
    }
}
