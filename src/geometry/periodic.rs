use std::f64::consts::TAU;
use std::ops::Range;

use crate::error::Result;
use crate::math::arc_2d::arc_segment_area;
use crate::math::distance_2d::{point_to_arc_dist, point_to_segment_dist};
use crate::math::polygon_2d::subtended_angle;
use crate::math::{Point2, TOLERANCE};

use super::aabb::Aabb;
use super::contour::Contour;
use super::simplex::{ranges_overlap, Simplex};

/// A closed 2D shape expressed as an ordered, cyclic sequence of simplexes
/// whose period ranges tile `[start_period, end_period)`.
///
/// Implementors provide the period range and the simplexes; every query
/// below derives from those two.
pub trait PeriodicGeometry {
    /// Half-open period interval covered by the boundary.
    fn period_range(&self) -> Range<f64>;

    /// All simplexes, ordered by period.
    fn all_simplexes(&self) -> Vec<Simplex>;

    fn start_period(&self) -> f64 {
        self.period_range().start
    }

    fn end_period(&self) -> f64 {
        self.period_range().end
    }

    /// Simplexes whose period range overlaps `range` (half-open semantics).
    fn all_simplexes_overlapping(&self, range: &Range<f64>) -> Vec<Simplex> {
        self.all_simplexes()
            .into_iter()
            .filter(|s| ranges_overlap(&s.period_range(), range))
            .collect()
    }

    /// Simplexes narrowed to `range`, dropping those outside it.
    ///
    /// An empty `range` yields at most one zero-width simplex, from the
    /// simplex whose half-open range holds that period.
    fn clamped_simplexes(&self, range: &Range<f64>) -> Vec<Simplex> {
        self.all_simplexes()
            .iter()
            .filter(|s| !range.is_empty() || s.period_range().contains(&range.start))
            .filter_map(|s| s.clamped(range))
            .collect()
    }

    /// Wraps a period into `[start_period, end_period)`.
    fn normalize_period(&self, period: f64) -> f64 {
        let range = self.period_range();
        let width = range.end - range.start;
        let wrapped = range.start + (period - range.start).rem_euclid(width);
        // rem_euclid can round up to exactly `width`.
        if wrapped >= range.end {
            range.start
        } else {
            wrapped
        }
    }

    /// The simplex whose half-open range contains `period` after wrapping.
    fn simplex_at(&self, period: f64) -> Option<Simplex> {
        let period = self.normalize_period(period);
        self.all_simplexes()
            .into_iter()
            .find(|s| s.start_period() <= period && period < s.end_period())
    }

    /// Boundary point at `period` after wrapping.
    fn point_at(&self, period: f64) -> Option<Point2> {
        let period = self.normalize_period(period);
        self.simplex_at(period).map(|s| s.compute(period))
    }

    /// Number of times the boundary winds around `point`, counter-clockwise
    /// positive. Meaningless for points on the boundary.
    fn winding_number(&self, point: &Point2) -> i32 {
        winding_number(&self.all_simplexes(), point)
    }

    /// Returns whether `point` is inside the shape (nonzero winding).
    fn contains(&self, point: &Point2) -> bool {
        self.winding_number(point) != 0
    }

    /// Returns whether `point` lies within `tolerance` of the boundary.
    fn is_on_surface(&self, point: &Point2, tolerance: f64) -> bool {
        self.all_simplexes()
            .iter()
            .any(|s| distance_to_simplex(point, s) <= tolerance)
    }

    /// Union of the simplex bounding boxes.
    fn bounding_box(&self) -> Option<Aabb> {
        self.all_simplexes()
            .iter()
            .map(Simplex::bounding_box)
            .reduce(|a, b| a.union(&b))
    }

    /// Signed enclosed area; positive for counter-clockwise boundaries.
    fn signed_area(&self) -> f64 {
        self.all_simplexes()
            .iter()
            .map(|s| {
                let (a, b) = (s.start(), s.end());
                let chord = 0.5 * (a.x * b.y - b.x * a.y);
                match s {
                    Simplex::Line(_) => chord,
                    Simplex::Arc(arc) => {
                        chord + arc_segment_area(arc.radius(), arc.sweep())
                    }
                }
            })
            .sum()
    }

    /// Copies the boundary into a standalone [`Contour`].
    ///
    /// # Errors
    ///
    /// Returns an error if the simplexes do not form a closed chain.
    fn to_contour(&self) -> Result<Contour> {
        Contour::new(self.all_simplexes())
    }
}

/// Distance from `point` to the nearest point of a simplex.
#[must_use]
pub fn distance_to_simplex(point: &Point2, simplex: &Simplex) -> f64 {
    match simplex {
        Simplex::Line(_) => point_to_segment_dist(point, &simplex.start(), &simplex.end()),
        Simplex::Arc(arc) => point_to_arc_dist(point, &arc.params()),
    }
}

/// Winding number of a closed simplex chain around `point`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn winding_number(simplexes: &[Simplex], point: &Point2) -> i32 {
    let total: f64 = simplexes.iter().map(|s| winding_angle(s, point)).sum();
    (total / TAU).round() as i32
}

/// Angle swept around `point` while travelling along one simplex.
///
/// For an arc this is the chord's subtended angle, plus a full signed turn
/// when the point sits in the circular segment between chord and arc.
fn winding_angle(simplex: &Simplex, point: &Point2) -> f64 {
    let (a, b) = (simplex.start(), simplex.end());
    match simplex {
        Simplex::Line(_) => subtended_angle(point, &a, &b),
        Simplex::Arc(arc) => {
            let chord = b - a;
            let degenerate_chord = chord.norm() < TOLERANCE;
            let chord_angle = if degenerate_chord {
                0.0
            } else {
                subtended_angle(point, &a, &b)
            };

            if (point - arc.center()).norm() >= arc.radius() {
                return chord_angle;
            }
            let in_segment = degenerate_chord || {
                let mid_side = chord.perp(&(simplex.midpoint() - a));
                let point_side = chord.perp(&(point - a));
                mid_side * point_side > 0.0
            };
            if in_segment {
                chord_angle + TAU * arc.sweep().signum()
            } else {
                chord_angle
            }
        }
    }
}
