//! Vector math for the flight planner
//!
//! World frame is centered at the origin with +y up. Headings are in degrees
//! in the display convention: 90° points along +x, and the y axis is flipped
//! because the renderer draws into a y-down surface.

use glam::DVec2;

/// Componentwise sum
#[inline]
pub fn add(a: DVec2, b: DVec2) -> DVec2 {
    a + b
}

/// Euclidean norm
#[inline]
pub fn magnitude(v: DVec2) -> f64 {
    v.length()
}

/// Euclidean distance between two points
#[inline]
pub fn distance(p: DVec2, q: DVec2) -> f64 {
    p.distance(q)
}

/// Heading (degrees) a ship faces while travelling along `v`
///
/// This is the only place the y axis gets flipped.
#[inline]
pub fn heading_for_displacement(v: DVec2) -> f64 {
    (-v.y).atan2(v.x).to_degrees() + 90.0
}

/// Wrap an angle difference into (-180, 180] for shortest-path turns
pub fn normalize_angle_delta(mut delta: f64) -> f64 {
    if !delta.is_finite() {
        return delta;
    }
    while delta > 180.0 {
        delta -= 360.0;
    }
    while delta <= -180.0 {
        delta += 360.0;
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_magnitude() {
        let sum = add(DVec2::new(3.0, 1.0), DVec2::new(0.0, 3.0));
        assert_eq!(sum, DVec2::new(3.0, 4.0));
        assert!((magnitude(sum) - 5.0).abs() < 1e-12);
        assert!((distance(DVec2::new(-1.0, 0.0), DVec2::new(2.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_heading_for_displacement() {
        // +x keeps the default heading
        assert!((heading_for_displacement(DVec2::new(200.0, 0.0)) - 90.0).abs() < 1e-9);
        // +y (world up) is a quarter turn counter-clockwise on screen
        assert!(heading_for_displacement(DVec2::new(0.0, 100.0)).abs() < 1e-9);
        // -y (world down)
        assert!((heading_for_displacement(DVec2::new(0.0, -100.0)) - 180.0).abs() < 1e-9);
        // -x: the flipped zero is negative, so atan2 lands on -180
        assert!((heading_for_displacement(DVec2::new(-50.0, 0.0)) + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_angle_delta() {
        assert_eq!(normalize_angle_delta(270.0), -90.0);
        assert_eq!(normalize_angle_delta(-270.0), 90.0);
        assert_eq!(normalize_angle_delta(0.0), 0.0);
        assert_eq!(normalize_angle_delta(180.0), 180.0);
        assert_eq!(normalize_angle_delta(-180.0), 180.0);
        assert_eq!(normalize_angle_delta(720.0 + 45.0), 45.0);
        assert_eq!(normalize_angle_delta(-540.0), 180.0);
    }

    #[test]
    fn test_normalize_angle_delta_non_finite() {
        assert!(normalize_angle_delta(f64::NAN).is_nan());
        assert_eq!(normalize_angle_delta(f64::INFINITY), f64::INFINITY);
    }
}
