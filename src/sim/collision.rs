//! Ship versus obstacle collision detection
//!
//! The ship is a circle of `SHIP_RADIUS` and obstacles are static circles.
//! Contact is strict: touching exactly at `radius + SHIP_RADIUS` is clear.

use glam::DVec2;

use super::state::Obstacle;
use crate::geometry::distance;

/// Result of a collision check
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Index of the obstacle hit (first in level order)
    pub obstacle: usize,
    /// Ship center at the moment of contact
    pub point: DVec2,
    /// How far inside the clearance radius the ship center is
    pub penetration: f64,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            obstacle: 0,
            point: DVec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check a single obstacle
#[inline]
pub fn ship_obstacle_collision(ship_pos: DVec2, ship_radius: f64, obstacle: &Obstacle) -> bool {
    distance(ship_pos, obstacle.center()) < obstacle.radius + ship_radius
}

/// Check every obstacle in order, reporting the first hit
pub fn ship_collision(ship_pos: DVec2, ship_radius: f64, obstacles: &[Obstacle]) -> CollisionResult {
    for (i, obstacle) in obstacles.iter().enumerate() {
        let clearance = obstacle.radius + ship_radius;
        let dist = distance(ship_pos, obstacle.center());
        if dist < clearance {
            return CollisionResult {
                hit: true,
                obstacle: i,
                point: ship_pos,
                penetration: clearance - dist,
            };
        }
    }
    CollisionResult::miss()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SHIP_RADIUS;

    #[test]
    fn test_collision_boundary_is_strict() {
        let obstacle = Obstacle::new(0.0, 0.0, 50.0);

        // exactly at clearance: no hit
        assert!(!ship_obstacle_collision(DVec2::new(60.0, 0.0), SHIP_RADIUS, &obstacle));
        // just inside: hit
        assert!(ship_obstacle_collision(DVec2::new(59.999, 0.0), SHIP_RADIUS, &obstacle));
        assert!(ship_obstacle_collision(DVec2::ZERO, SHIP_RADIUS, &obstacle));
    }

    #[test]
    fn test_ship_collision_reports_first_obstacle() {
        let obstacles = [
            Obstacle::new(0.0, 60.0, 40.0),
            Obstacle::new(0.0, -60.0, 40.0),
        ];

        // through the gap
        let result = ship_collision(DVec2::new(0.0, 0.0), SHIP_RADIUS, &obstacles);
        assert!(!result.hit);

        let result = ship_collision(DVec2::new(0.0, -15.0), SHIP_RADIUS, &obstacles);
        assert!(result.hit);
        assert_eq!(result.obstacle, 1);
        assert!((result.penetration - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_obstacles_never_hit() {
        assert_eq!(ship_collision(DVec2::ZERO, SHIP_RADIUS, &[]), CollisionResult::miss());
    }
}
