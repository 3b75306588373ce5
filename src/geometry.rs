//! Polar/Cartesian conversions and point arithmetic.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Cartesian point in chart data coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `other`, `t` clamped to [0, 1].
    pub fn lerp(self, other: Point, t: f64) -> Point {
        if t <= 0.0 {
            return self;
        }
        if t >= 1.0 {
            return other;
        }
        let d = other - self;
        Point::new(self.x + d.x * t, self.y + d.y * t)
    }

    pub fn distance(self, other: Point) -> f64 {
        let d = other - self;
        d.x.hypot(d.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A vector given by magnitude and angle in degrees.
///
/// Magnitude is kept non-negative by convention only; a negative magnitude
/// simply produces the mirrored point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub magnitude: f64,
    pub angle: f64,
}

impl Vector {
    pub const fn new(magnitude: f64, angle: f64) -> Self {
        Self { magnitude, angle }
    }

    /// Cartesian component of this vector.
    pub fn component(&self) -> Point {
        polar_to_cartesian(self.magnitude, self.angle)
    }

    /// Vector pointing from the origin to `p`. Used when a tip is dragged.
    pub fn from_point(p: Point) -> Self {
        let polar = resultant_magnitude_angle(p);
        Self {
            magnitude: polar.magnitude,
            angle: polar.angle,
        }
    }
}

/// Magnitude and angle (degrees, in (-180, 180]) of a Cartesian point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    pub magnitude: f64,
    pub angle: f64,
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

pub fn polar_to_cartesian(magnitude: f64, angle_deg: f64) -> Point {
    let r = deg_to_rad(angle_deg);
    Point {
        x: magnitude * r.cos(),
        y: magnitude * r.sin(),
    }
}

pub fn resultant_magnitude_angle(p: Point) -> Polar {
    let mut angle = p.y.atan2(p.x) * 180.0 / std::f64::consts::PI;
    // atan2(-0.0, negative) lands on -180
    if angle <= -180.0 {
        angle = 180.0;
    }
    Polar {
        magnitude: p.x.hypot(p.y),
        angle,
    }
}

#[cfg(test)]
pub(crate) fn assert_close(a: Point, b: Point) {
    assert!(
        a.distance(b) < 1e-9,
        "points differ: ({}, {}) vs ({}, {})",
        a.x,
        a.y,
        b.x,
        b.y
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_degrees_lies_on_x_axis() {
        assert_close(polar_to_cartesian(80.0, 0.0), Point::new(80.0, 0.0));
    }

    #[test]
    fn ninety_degrees_lies_on_y_axis() {
        assert_close(polar_to_cartesian(70.0, 90.0), Point::new(0.0, 70.0));
    }

    #[test]
    fn angles_wrap_through_trig() {
        assert_close(polar_to_cartesian(10.0, 370.0), polar_to_cartesian(10.0, 10.0));
        assert_close(polar_to_cartesian(10.0, -90.0), Point::new(0.0, -10.0));
    }

    #[test]
    fn negative_magnitude_mirrors() {
        assert_close(polar_to_cartesian(-5.0, 0.0), Point::new(-5.0, 0.0));
    }

    #[test]
    fn magnitude_and_angle_of_point() {
        let polar = resultant_magnitude_angle(Point::new(3.0, 4.0));
        assert!((polar.magnitude - 5.0).abs() < 1e-12);
        assert!((polar.angle - 53.130_102_354).abs() < 1e-6);
    }

    #[test]
    fn angle_never_reports_minus_180() {
        let polar = resultant_magnitude_angle(Point::new(-4.0, -0.0));
        assert_eq!(polar.angle, 180.0);
    }

    #[test]
    fn from_point_inverts_component() {
        let v = Vector::new(60.0, -45.0);
        let back = Vector::from_point(v.component());
        assert!((back.magnitude - 60.0).abs() < 1e-9);
        assert!((back.angle + 45.0).abs() < 1e-9);
    }
}
