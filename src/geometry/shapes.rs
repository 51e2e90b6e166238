use std::f64::consts::TAU;
use std::ops::Range;

use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::{regular_polygon_points, signed_area_2d, star_points};
use crate::math::{Point2, TOLERANCE};

use super::periodic::PeriodicGeometry;
use super::simplex::{CircularArcSimplex, LineSegmentSimplex, Simplex};

/// A closed polygon; vertex `i` of `n` sits at period `i / n` on `[0, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point2>,
}

impl Polygon {
    /// Creates a polygon from its vertices (the closing edge is implicit).
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for fewer than 3 vertices or for
    /// consecutive coincident vertices.
    pub fn new(points: Vec<Point2>) -> Result<Self> {
        if points.len() < 3 {
            return Err(GeometryError::Degenerate(format!(
                "polygon needs at least 3 vertices, got {}",
                points.len()
            ))
            .into());
        }
        let n = points.len();
        for i in 0..n {
            if (points[(i + 1) % n] - points[i]).norm() < TOLERANCE {
                return Err(GeometryError::Degenerate(format!("zero-length edge at vertex {i}")).into());
            }
        }
        Ok(Self { points })
    }

    /// A regular polygon, counter-clockwise, first vertex at angle 0.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for fewer than 3 sides or a
    /// non-positive radius.
    pub fn regular(center: Point2, radius: f64, sides: usize) -> Result<Self> {
        check_radius(radius)?;
        Self::new(regular_polygon_points(&center, radius, sides))
    }

    /// A star with `tips` outer points (so `2 * tips` vertices),
    /// counter-clockwise, starting at the outer vertex on angle 0.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for fewer than 2 tips or
    /// non-positive radii.
    pub fn star(center: Point2, outer_radius: f64, inner_radius: f64, tips: usize) -> Result<Self> {
        check_radius(outer_radius)?;
        check_radius(inner_radius)?;
        Self::new(star_points(&center, outer_radius, inner_radius, tips))
    }

    /// Vertices in boundary order.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }
}

impl PeriodicGeometry for Polygon {
    fn period_range(&self) -> Range<f64> {
        0.0..1.0
    }

    fn all_simplexes(&self) -> Vec<Simplex> {
        let n = self.points.len();
        #[allow(clippy::cast_precision_loss)]
        let count = n as f64;
        self.points
            .iter()
            .enumerate()
            .filter_map(|(i, start)| {
                #[allow(clippy::cast_precision_loss)]
                let i_f = i as f64;
                let end = self.points[(i + 1) % n];
                LineSegmentSimplex::new(*start, end, i_f / count..(i_f + 1.0) / count)
                    .ok()
                    .map(Simplex::from)
            })
            .collect()
    }

    fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }
}

/// A full circle traversed counter-clockwise from angle 0 over `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point2,
    radius: f64,
}

impl Circle {
    /// Creates a circle.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for a non-positive radius.
    pub fn new(center: Point2, radius: f64) -> Result<Self> {
        check_radius(radius)?;
        Ok(Self { center, radius })
    }

    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl PeriodicGeometry for Circle {
    fn period_range(&self) -> Range<f64> {
        0.0..1.0
    }

    fn all_simplexes(&self) -> Vec<Simplex> {
        let seam = Point2::new(self.center.x + self.radius, self.center.y);
        CircularArcSimplex::new(self.center, self.radius, 0.0, TAU, 0.0..1.0)
            .map(|arc| vec![arc.with_endpoints(seam, seam).into()])
            .unwrap_or_default()
    }
}

fn check_radius(radius: f64) -> Result<()> {
    if radius.is_nan() || radius <= TOLERANCE {
        return Err(GeometryError::Degenerate(format!("radius must be positive, got {radius}")).into());
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_abs_diff_eq;

    use super::*;

    fn assert_tiles(simplexes: &[Simplex], range: &Range<f64>) {
        assert_eq!(simplexes.first().unwrap().start_period(), range.start);
        assert_eq!(simplexes.last().unwrap().end_period(), range.end);
        for pair in simplexes.windows(2) {
            assert_eq!(pair[0].end_period(), pair[1].start_period());
            assert_eq!(pair[0].end(), pair[1].start());
        }
    }

    fn ten_point_star() -> Polygon {
        Polygon::star(Point2::origin(), 100.0, 40.0, 5).unwrap()
    }

    #[test]
    fn polygon_simplexes_tile_unit_period() {
        let hexagon = Polygon::regular(Point2::origin(), 100.0, 6).unwrap();
        let simplexes = hexagon.all_simplexes();
        assert_eq!(simplexes.len(), 6);
        assert_tiles(&simplexes, &(0.0..1.0));
        assert_eq!(simplexes[5].end(), simplexes[0].start());
    }

    #[test]
    fn circle_is_one_closed_arc() {
        let circle = Circle::new(Point2::new(2.0, 3.0), 5.0).unwrap();
        let simplexes = circle.all_simplexes();
        assert_eq!(simplexes.len(), 1);
        assert_tiles(&simplexes, &(0.0..1.0));
        assert_eq!(simplexes[0].start(), simplexes[0].end());
        let quarter = circle.point_at(0.25).unwrap();
        assert_abs_diff_eq!(quarter.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(quarter.y, 8.0, epsilon = 1e-12);
    }

    #[test]
    fn star_clamped_range_scenario() {
        let star = ten_point_star();
        let range = 0.3..0.73;
        let clamped = star.clamped_simplexes(&range);
        assert_eq!(clamped.len(), 5);
        assert!(clamped.iter().all(|s| matches!(s, Simplex::Line(_))));
        assert_tiles(&clamped, &range);

        // Whole edges start and end on star vertices 3..=7.
        for (k, s) in clamped.iter().take(4).enumerate() {
            assert_eq!(s.start(), star.points()[3 + k]);
            assert_eq!(s.end(), star.points()[4 + k]);
        }
        let last = clamped[4];
        assert_eq!(last.start(), star.points()[7]);
        let expected = star.point_at(0.73).unwrap();
        assert_abs_diff_eq!(last.end().x, expected.x, epsilon = 1e-12);
        assert_abs_diff_eq!(last.end().y, expected.y, epsilon = 1e-12);
    }

    #[test]
    fn empty_range_clamps_to_one_point() {
        let star = ten_point_star();

        let at_vertex = star.clamped_simplexes(&(0.3..0.3));
        assert_eq!(at_vertex.len(), 1);
        assert!(at_vertex[0].is_degenerate());
        assert_eq!(at_vertex[0].period_range(), 0.3..0.3);
        assert_eq!(at_vertex[0].start(), star.points()[3]);

        let inside_edge = star.clamped_simplexes(&(0.35..0.35));
        assert_eq!(inside_edge.len(), 1);
        assert_eq!(inside_edge[0].period_range(), 0.35..0.35);

        assert!(star.clamped_simplexes(&(1.0..1.0)).is_empty());
    }

    #[test]
    fn overlapping_filter_excludes_touching_simplexes() {
        let star = ten_point_star();
        let overlapping = star.all_simplexes_overlapping(&(0.3..0.73));
        assert_eq!(overlapping.len(), 5);
        assert_abs_diff_eq!(overlapping[0].start_period(), 0.3);
        assert!(star.all_simplexes_overlapping(&(0.3..0.3)).is_empty());
    }

    #[test]
    fn polygon_rejects_too_few_points() {
        assert!(Polygon::new(vec![Point2::origin(), Point2::new(1.0, 0.0)]).is_err());
        assert!(Polygon::new(vec![Point2::origin(), Point2::origin(), Point2::new(1.0, 0.0)]).is_err());
        assert!(Circle::new(Point2::origin(), 0.0).is_err());
    }

    #[test]
    fn star_contains_center_but_not_notch() {
        let star = ten_point_star();
        assert!(star.contains(&Point2::origin()));
        // Between two tips, outside the inner radius.
        let notch = Point2::new(70.0 * (PI / 5.0).cos(), 70.0 * (PI / 5.0).sin());
        assert!(!star.contains(&notch));
        assert!(star.is_on_surface(&star.points()[2], 1e-9));
    }

    #[test]
    fn circle_containment_and_area() {
        let circle = Circle::new(Point2::origin(), 2.0).unwrap();
        assert!(circle.contains(&Point2::new(1.9, 0.0)));
        assert!(circle.contains(&Point2::new(-1.0, -1.0)));
        assert!(!circle.contains(&Point2::new(2.1, 0.0)));
        assert!(circle.is_on_surface(&Point2::new(0.0, -2.0), 1e-9));
        assert_abs_diff_eq!(circle.signed_area(), 4.0 * PI, epsilon = 1e-9);
    }

    #[test]
    fn simplex_at_wraps_periods() {
        let hexagon = Polygon::regular(Point2::origin(), 1.0, 6).unwrap();
        let s = hexagon.simplex_at(1.1).unwrap();
        assert_eq!(s.start(), hexagon.points()[0]);
        assert_eq!(hexagon.normalize_period(1.0), 0.0);
        assert_abs_diff_eq!(hexagon.normalize_period(-0.25), 0.75);
    }

    #[test]
    fn bounding_box_of_circle() {
        let aabb = Circle::new(Point2::new(1.0, 1.0), 1.0).unwrap().bounding_box().unwrap();
        assert_abs_diff_eq!(aabb.min.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(aabb.max.y, 2.0, epsilon = 1e-12);
    }
}
