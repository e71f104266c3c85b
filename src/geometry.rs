//! Polar/cartesian helpers for radial color pickers.
//!
//! Angles are in degrees with 0° at twelve o'clock, increasing clockwise
//! in screen coordinates (y grows downward).

use crate::color::Hsv;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    pub radius: f64,
    /// Degrees in [0, 360).
    pub angle: f64,
}

pub fn polar_to_cartesian(center: Point, radius: f64, angle_deg: f64) -> Point {
    let rad = (angle_deg - 90.0).to_radians();
    Point {
        x: center.x + radius * rad.cos(),
        y: center.y + radius * rad.sin(),
    }
}

pub fn cartesian_to_polar(center: Point, point: Point) -> Polar {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    let angle = (dy.atan2(dx).to_degrees() + 90.0).rem_euclid(360.0);
    // rem_euclid of a tiny negative rounds up to exactly 360
    let angle = if angle >= 360.0 { 0.0 } else { angle };
    Polar {
        radius: dx.hypot(dy),
        angle,
    }
}

/// Where the marker for `hsv` sits on a wheel of `radius` around `center`.
/// Hue is the angle; saturation is the distance from the center.
pub fn wheel_position(hsv: Hsv, center: Point, radius: f64) -> Point {
    let distance = hsv.s.clamp(0.0, 100.0) / 100.0 * radius;
    polar_to_cartesian(center, distance, hsv.h)
}

/// Map a click at `point` to a color on the wheel, keeping brightness `v`.
/// Clicks outside the wheel map to `None`.
pub fn wheel_pick(center: Point, radius: f64, point: Point, v: f64) -> Option<Hsv> {
    if radius <= 0.0 {
        return None;
    }
    let polar = cartesian_to_polar(center, point);
    if polar.radius > radius {
        return None;
    }
    Some(Hsv {
        h: polar.angle,
        s: (polar.radius / radius * 100.0).min(100.0),
        v: v.clamp(0.0, 100.0),
    })
}
