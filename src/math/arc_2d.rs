/// 2D arc/bulge math utilities.
///
/// Bulge convention: `bulge = tan(sweep_angle / 4)`.
/// - `bulge = 0`: straight line
/// - `bulge > 0`: counter-clockwise arc
/// - `bulge < 0`: clockwise arc
/// - `|bulge| = 1`: semicircle
use std::f64::consts::{FRAC_PI_2, TAU};

use super::{Point2, Vector2, TOLERANCE};

/// Center-radius-angle form of a circular arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub center: Point2,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

/// Converts a bulge-defined arc segment to center-radius-angle form.
///
/// Returns `None` for zero-length chords or a zero bulge.
#[must_use]
pub fn arc_from_bulge(p0: &Point2, p1: &Point2, bulge: f64) -> Option<ArcParams> {
    let chord = p1 - p0;
    let chord_len = chord.norm();
    if chord_len < 1e-12 || bulge.abs() < 1e-12 {
        return None;
    }

    // Distance from chord midpoint to center, in half-chord units.
    let sagitta_ratio = (1.0 - bulge * bulge) / (2.0 * bulge);
    let mid = nalgebra::center(p0, p1);

    // Normal to chord pointing toward center (for positive bulge, center is left of chord).
    let normal = Vector2::new(-chord.y, chord.x) / chord_len;
    let center = mid + normal * (sagitta_ratio * chord_len * 0.5);

    // r = d*(1+b²)/(4*|b|) derived from r = d/(2*sin(θ/2)) with θ=4*atan(b)
    let radius = (chord_len * 0.5) * (1.0 + bulge * bulge) / (2.0 * bulge.abs());
    let start_angle = (p0.y - center.y).atan2(p0.x - center.x);

    Some(ArcParams {
        center,
        radius,
        start_angle,
        sweep: 4.0 * bulge.atan(),
    })
}

/// Returns the bulge of an arc with the given sweep.
#[must_use]
pub fn bulge_from_sweep(sweep: f64) -> f64 {
    (sweep / 4.0).tan()
}

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(center: &Point2, radius: f64, start_angle: f64, sweep: f64, t: f64) -> Point2 {
    let angle = start_angle + sweep * t;
    Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Computes the unit tangent direction on an arc at parameter `t` in `[0, 1]`.
///
/// The tangent points in the direction of increasing `t`.
#[must_use]
pub fn arc_tangent_at(start_angle: f64, sweep: f64, t: f64) -> Vector2 {
    let angle = start_angle + sweep * t;
    let sign = if sweep >= 0.0 { 1.0 } else { -1.0 };
    // Tangent to circle at angle θ is (-sin θ, cos θ) for CCW; negate for CW.
    Vector2::new(-sign * angle.sin(), sign * angle.cos())
}

/// Converts an absolute angle to an arc parameter `t` in `[0, 1]`.
///
/// Returns `None` if the angle is not within the arc's angular range
/// (widened by `eps` radians on both ends).
#[must_use]
pub fn angle_to_arc_param(angle: f64, start_angle: f64, sweep: f64, eps: f64) -> Option<f64> {
    if sweep.abs() < TOLERANCE {
        return None;
    }

    let mut delta = angle - start_angle;

    // Normalize delta to match the sweep direction.
    if sweep > 0.0 {
        while delta < -eps {
            delta += TAU;
        }
        while delta > TAU + eps {
            delta -= TAU;
        }
    } else {
        while delta > eps {
            delta -= TAU;
        }
        while delta < -TAU - eps {
            delta += TAU;
        }
    }

    let t = delta / sweep;
    let t_eps = eps / sweep.abs();
    if t >= -t_eps && t <= 1.0 + t_eps {
        Some(t.clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Normalizes an angle to [0, 2pi).
#[must_use]
pub fn normalize_angle(a: f64) -> f64 {
    let mut r = a % TAU;
    if r < 0.0 {
        r += TAU;
    }
    r
}

/// Returns the axis-aligned extreme points of an arc: its endpoints plus
/// every quadrant point (0, π/2, π, 3π/2) the sweep passes through.
#[must_use]
pub fn arc_extreme_points(center: &Point2, radius: f64, start_angle: f64, sweep: f64) -> Vec<Point2> {
    let mut points = vec![
        arc_point_at(center, radius, start_angle, sweep, 0.0),
        arc_point_at(center, radius, start_angle, sweep, 1.0),
    ];
    for quadrant in 0..4 {
        let angle = f64::from(quadrant) * FRAC_PI_2;
        if angle_to_arc_param(angle, start_angle, sweep, 0.0).is_some() {
            points.push(Point2::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            ));
        }
    }
    points
}

/// Returns the signed area enclosed between an arc and its chord.
///
/// Positive for counter-clockwise sweeps.
#[must_use]
pub fn arc_segment_area(radius: f64, sweep: f64) -> f64 {
    0.5 * radius * radius * (sweep - sweep.sin())
}
