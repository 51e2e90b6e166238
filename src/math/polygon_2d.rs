use std::f64::consts::TAU;

use super::{Point2, TOLERANCE};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns the index of the leftmost vertex (smallest x), breaking ties by
/// smallest y. Used to give traced loops a deterministic start.
#[must_use]
pub fn leftmost_bottom_index(points: &[Point2]) -> usize {
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if pt.x < b.x - TOLERANCE || (pt.x - b.x).abs() < TOLERANCE && pt.y < b.y {
            best = i;
        }
    }
    best
}

/// Signed angle subtended at `p` by the segment `a`→`b`, in `(-π, π]`.
#[must_use]
pub fn subtended_angle(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let va = a - p;
    let vb = b - p;
    va.perp(&vb).atan2(va.dot(&vb))
}

/// Vertices of a regular polygon, counter-clockwise, first vertex at angle 0.
#[must_use]
pub fn regular_polygon_points(center: &Point2, radius: f64, sides: usize) -> Vec<Point2> {
    #[allow(clippy::cast_precision_loss)]
    let step = TAU / sides as f64;
    (0..sides)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let angle = step * i as f64;
            Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

/// Vertices of a star with `tips` outer points, alternating outer and inner
/// radius, counter-clockwise, first (outer) vertex at angle 0.
#[must_use]
pub fn star_points(center: &Point2, outer_radius: f64, inner_radius: f64, tips: usize) -> Vec<Point2> {
    let n = tips * 2;
    #[allow(clippy::cast_precision_loss)]
    let step = TAU / n as f64;
    (0..n)
        .map(|i| {
            let r = if i % 2 == 0 { outer_radius } else { inner_radius };
            #[allow(clippy::cast_precision_loss)]
            let angle = step * i as f64;
            Point2::new(center.x + r * angle.cos(), center.y + r * angle.sin())
        })
        .collect()
}
