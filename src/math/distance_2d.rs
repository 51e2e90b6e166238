use super::arc_2d::{angle_to_arc_param, arc_point_at, ArcParams};
use super::Point2;

/// Returns the minimum distance from `p` to the line segment `a`→`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return (p - a).norm();
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    (p - (a + d * t)).norm()
}

/// Returns the minimum distance from `p` to a circular arc.
///
/// If the point's angle (relative to center) falls within the arc range,
/// the distance is `||point - center| - radius|`.
/// Otherwise, the distance is the minimum of the distances to the two arc endpoints.
#[must_use]
pub fn point_to_arc_dist(p: &Point2, arc: &ArcParams) -> f64 {
    let offset = p - arc.center;
    let dist_to_center = offset.norm();

    let angle = offset.y.atan2(offset.x);
    if angle_to_arc_param(angle, arc.start_angle, arc.sweep, 1e-10).is_some() {
        return (dist_to_center - arc.radius).abs();
    }

    // Point is outside the arc's angular range. Check distance to endpoints.
    let ep0 = arc_point_at(&arc.center, arc.radius, arc.start_angle, arc.sweep, 0.0);
    let ep1 = arc_point_at(&arc.center, arc.radius, arc.start_angle, arc.sweep, 1.0);
    (p - ep0).norm().min((p - ep1).norm())
}
