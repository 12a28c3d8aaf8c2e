//! 2D points and the pure transforms drafting math is written in.
//!
//! Coordinate convention, applied uniformly across the kernel: x grows to
//! the right, y grows DOWNWARD (paper coordinates, matching how a drafter
//! reads a pattern sheet). Angles are degrees; 0 points along +x and
//! positive angles turn counter-clockwise on paper, so `shift(90.0, d)`
//! moves a point up (towards -y).
//!
//! Every transform returns a new `Point`. Updating a named point in a part
//! means reassigning the slot, never mutating through it.

use serde::{Deserialize, Serialize};

/// Represents a 2D point with X and Y coordinates in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn dist(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Angle from this point to another, in degrees in `[0, 360)`.
    ///
    /// Coincident points have no direction; the sentinel 0.0 is returned so
    /// downstream math keeps going instead of aborting a draft.
    pub fn angle(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = self.y - other.y;
        if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
            return 0.0;
        }
        let deg = dy.atan2(dx).to_degrees();
        if deg < 0.0 {
            deg + 360.0
        } else {
            deg
        }
    }

    /// Translate by a polar offset: `distance` along `angle_deg`.
    pub fn shift(&self, angle_deg: f64, distance: f64) -> Point {
        let rad = angle_deg.to_radians();
        Point::new(self.x + distance * rad.cos(), self.y - distance * rad.sin())
    }

    /// Move a fixed distance along the ray towards `other`.
    ///
    /// Coincident points yield no ray; the point is returned unchanged.
    pub fn shift_towards(&self, other: &Point, distance: f64) -> Point {
        if self.sits_on(other, f64::EPSILON) {
            return *self;
        }
        self.shift(self.angle(other), distance)
    }

    /// Linear interpolation towards `other`.
    ///
    /// `fraction` is deliberately unclamped: 0 returns self, 1 returns
    /// `other`, and values outside `[0, 1]` extrapolate along the same line.
    pub fn shift_fraction_towards(&self, other: &Point, fraction: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * fraction,
            self.y + (other.y - self.y) * fraction,
        )
    }

    /// Continue `distance` beyond `other`, away from this point.
    pub fn shift_outwards(&self, other: &Point, distance: f64) -> Point {
        if self.sits_on(other, f64::EPSILON) {
            return *self;
        }
        other.shift(self.angle(other), distance)
    }

    /// Rotate around another point, angle in degrees (counter-clockwise on
    /// paper, consistent with [`Point::shift`]).
    pub fn rotate(&self, angle_deg: f64, around: &Point) -> Point {
        let rad = angle_deg.to_radians();
        let (sin_a, cos_a) = rad.sin_cos();
        let dx = self.x - around.x;
        let dy = self.y - around.y;
        Point::new(
            around.x + dx * cos_a + dy * sin_a,
            around.y - dx * sin_a + dy * cos_a,
        )
    }

    /// Mirror across the vertical axis `x = around_x`.
    pub fn flip_x(&self, around_x: f64) -> Point {
        Point::new(2.0 * around_x - self.x, self.y)
    }

    /// Mirror across the horizontal axis `y = around_y`.
    pub fn flip_y(&self, around_y: f64) -> Point {
        Point::new(self.x, 2.0 * around_y - self.y)
    }

    /// Translate by a cartesian offset.
    pub fn translate(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Whether this point coincides with another within `tolerance`.
    pub fn sits_on(&self, other: &Point, tolerance: f64) -> bool {
        self.dist(other) <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_shift_east_and_up() {
        let p = Point::new(10.0, 10.0);
        let east = p.shift(0.0, 5.0);
        assert!((east.x - 15.0).abs() < TOL);
        assert!((east.y - 10.0).abs() < TOL);
        // 90 degrees is up: y decreases
        let up = p.shift(90.0, 5.0);
        assert!((up.x - 10.0).abs() < TOL);
        assert!((up.y - 5.0).abs() < TOL);
    }

    #[test]
    fn test_shift_distance_roundtrip() {
        let p = Point::new(3.0, -7.0);
        for angle in [0.0, 17.5, 90.0, 133.0, 270.0, 359.0] {
            assert!((p.shift(angle, 12.5).dist(&p) - 12.5).abs() < 1e-9);
        }
        assert_eq!(p.shift(42.0, 0.0), p);
    }

    #[test]
    fn test_angle_convention() {
        let origin = Point::new(0.0, 0.0);
        assert!((origin.angle(&Point::new(10.0, 0.0)) - 0.0).abs() < TOL);
        // up on paper (-y) is 90 degrees
        assert!((origin.angle(&Point::new(0.0, -10.0)) - 90.0).abs() < TOL);
        assert!((origin.angle(&Point::new(-10.0, 0.0)) - 180.0).abs() < TOL);
        assert!((origin.angle(&Point::new(0.0, 10.0)) - 270.0).abs() < TOL);
    }

    #[test]
    fn test_angle_of_coincident_points_is_sentinel_zero() {
        let p = Point::new(4.0, 4.0);
        assert_eq!(p.angle(&p), 0.0);
        assert_eq!(p.shift_towards(&p, 10.0), p);
        assert_eq!(p.shift_outwards(&p, 10.0), p);
    }

    #[test]
    fn test_shift_fraction_towards() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 20.0);
        assert_eq!(a.shift_fraction_towards(&b, 0.0), a);
        assert_eq!(a.shift_fraction_towards(&b, 1.0), b);
        let mid = a.shift_fraction_towards(&b, 0.5);
        assert!((mid.x - 5.0).abs() < TOL && (mid.y - 10.0).abs() < TOL);
        // extrapolation is legal
        let beyond = a.shift_fraction_towards(&b, 1.5);
        assert!((beyond.x - 15.0).abs() < TOL && (beyond.y - 30.0).abs() < TOL);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let center = Point::new(0.0, 0.0);
        let p = Point::new(1.0, 0.0);
        let r = p.rotate(90.0, &center);
        // counter-clockwise on paper: east rotates to up
        assert!((r.x - 0.0).abs() < TOL);
        assert!((r.y - -1.0).abs() < TOL);
    }

    #[test]
    fn test_flips() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(p.flip_x(0.0), Point::new(-3.0, 4.0));
        assert_eq!(p.flip_y(0.0), Point::new(3.0, -4.0));
        assert_eq!(p.flip_x(3.0), p);
    }
}
