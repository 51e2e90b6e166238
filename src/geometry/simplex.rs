use std::ops::Range;

use crate::error::{GeometryError, Result};
use crate::math::arc_2d::{arc_extreme_points, arc_point_at, arc_tangent_at, ArcParams};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::aabb::Aabb;

/// Returns whether two half-open ranges share at least one value.
///
/// Empty ranges overlap nothing, and ranges that only touch at a bound do
/// not overlap.
#[must_use]
pub fn ranges_overlap(a: &Range<f64>, b: &Range<f64>) -> bool {
    let disjoint = b.end <= a.start || a.end <= b.start || a.is_empty() || b.is_empty();
    !disjoint
}

/// Validates a period range for a freshly constructed simplex.
fn check_period_range(start: f64, end: f64) -> Result<()> {
    if !start.is_finite() || !end.is_finite() || end <= start {
        return Err(GeometryError::InvalidPeriodRange { start, end }.into());
    }
    Ok(())
}

/// Narrowed bounds of `own` against `requested`, or `None` if they do not
/// overlap. An empty `requested` range inside `own` yields a zero-width
/// range at that period.
fn clamp_range(own: &Range<f64>, requested: &Range<f64>) -> Option<(f64, f64)> {
    if requested.start == requested.end {
        let p = requested.start;
        return (p >= own.start && p <= own.end).then_some((p, p));
    }
    if !ranges_overlap(own, requested) {
        return None;
    }
    Some((requested.start.max(own.start), requested.end.min(own.end)))
}

/// Fraction of `range` at which `period` lies; zero for zero-width ranges.
fn fraction(range: &Range<f64>, period: f64) -> f64 {
    let width = range.end - range.start;
    if width <= 0.0 {
        0.0
    } else {
        (period - range.start) / width
    }
}

/// A straight boundary fragment addressed by a period range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegmentSimplex {
    start: Point2,
    end: Point2,
    start_period: f64,
    end_period: f64,
}

impl LineSegmentSimplex {
    /// Creates a line segment spanning `period`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidPeriodRange` if the range is empty,
    /// reversed or not finite.
    pub fn new(start: Point2, end: Point2, period: Range<f64>) -> Result<Self> {
        check_period_range(period.start, period.end)?;
        Ok(Self {
            start,
            end,
            start_period: period.start,
            end_period: period.end,
        })
    }

    fn compute(&self, period: f64) -> Point2 {
        if period <= self.start_period {
            return self.start;
        }
        if period >= self.end_period {
            return self.end;
        }
        let t = fraction(&(self.start_period..self.end_period), period);
        self.start + (self.end - self.start) * t
    }

    fn clamped(&self, range: &Range<f64>) -> Option<Self> {
        let (lo, hi) = clamp_range(&(self.start_period..self.end_period), range)?;
        Some(Self {
            start: self.compute(lo),
            end: self.compute(hi),
            start_period: lo,
            end_period: hi,
        })
    }
}

/// A circular boundary fragment addressed by a period range.
///
/// The arc starts at `start_angle` and turns by the signed `sweep`
/// (counter-clockwise when positive) over the period range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularArcSimplex {
    center: Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
    start: Point2,
    end: Point2,
    start_period: f64,
    end_period: f64,
}

impl CircularArcSimplex {
    /// Creates an arc spanning `period`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for a non-positive radius or a
    /// zero sweep, and `GeometryError::InvalidPeriodRange` for a malformed
    /// period range.
    pub fn new(
        center: Point2,
        radius: f64,
        start_angle: f64,
        sweep: f64,
        period: Range<f64>,
    ) -> Result<Self> {
        if radius.is_nan() || radius <= TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        if sweep.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate("arc sweep must be non-zero".into()).into());
        }
        check_period_range(period.start, period.end)?;
        Ok(Self {
            center,
            radius,
            start_angle,
            sweep,
            start: arc_point_at(&center, radius, start_angle, sweep, 0.0),
            end: arc_point_at(&center, radius, start_angle, sweep, 1.0),
            start_period: period.start,
            end_period: period.end,
        })
    }

    /// Replaces the computed endpoints with exact ones, so chained
    /// fragments share bit-identical vertices.
    #[must_use]
    pub(crate) fn with_endpoints(mut self, start: Point2, end: Point2) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Returns the center of the arc circle.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the signed sweep angle in radians.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// Returns the center-radius-angle form of this arc.
    #[must_use]
    pub fn params(&self) -> ArcParams {
        ArcParams {
            center: self.center,
            radius: self.radius,
            start_angle: self.start_angle,
            sweep: self.sweep,
        }
    }

    fn compute(&self, period: f64) -> Point2 {
        if period <= self.start_period {
            return self.start;
        }
        if period >= self.end_period {
            return self.end;
        }
        let t = fraction(&(self.start_period..self.end_period), period);
        arc_point_at(&self.center, self.radius, self.start_angle, self.sweep, t)
    }

    fn clamped(&self, range: &Range<f64>) -> Option<Self> {
        let own = self.start_period..self.end_period;
        let (lo, hi) = clamp_range(&own, range)?;
        let f0 = fraction(&own, lo);
        let f1 = fraction(&own, hi);
        Some(Self {
            center: self.center,
            radius: self.radius,
            start_angle: self.start_angle + self.sweep * f0,
            sweep: self.sweep * (f1 - f0),
            start: self.compute(lo),
            end: self.compute(hi),
            start_period: lo,
            end_period: hi,
        })
    }
}

/// Tag describing how an edge between two points is drawn; enough to
/// rebuild the simplex from its endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeKind {
    Line,
    CircleArc { center: Point2, sweep: f64 },
}

impl EdgeKind {
    /// Returns whether two kinds describe the same curve within `tolerance`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        match (self, other) {
            (Self::Line, Self::Line) => true,
            (
                Self::CircleArc { center: c1, sweep: s1 },
                Self::CircleArc { center: c2, sweep: s2 },
            ) => (c1 - c2).norm() <= tolerance && (s1 - s2).abs() <= TOLERANCE.max(tolerance),
            _ => false,
        }
    }
}

/// An atomic boundary fragment of a periodic geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Simplex {
    Line(LineSegmentSimplex),
    Arc(CircularArcSimplex),
}

impl From<LineSegmentSimplex> for Simplex {
    fn from(value: LineSegmentSimplex) -> Self {
        Self::Line(value)
    }
}

impl From<CircularArcSimplex> for Simplex {
    fn from(value: CircularArcSimplex) -> Self {
        Self::Arc(value)
    }
}

impl Simplex {
    /// Rebuilds a simplex from its endpoints and edge kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the period range is malformed or the arc is
    /// degenerate.
    pub fn from_edge_kind(start: Point2, end: Point2, kind: EdgeKind, period: Range<f64>) -> Result<Self> {
        match kind {
            EdgeKind::Line => Ok(LineSegmentSimplex::new(start, end, period)?.into()),
            EdgeKind::CircleArc { center, sweep } => {
                let radius = (start - center).norm();
                let start_angle = (start.y - center.y).atan2(start.x - center.x);
                let arc = CircularArcSimplex::new(center, radius, start_angle, sweep, period)?;
                Ok(arc.with_endpoints(start, end).into())
            }
        }
    }

    /// Start point.
    #[must_use]
    pub fn start(&self) -> Point2 {
        match self {
            Self::Line(line) => line.start,
            Self::Arc(arc) => arc.start,
        }
    }

    /// End point.
    #[must_use]
    pub fn end(&self) -> Point2 {
        match self {
            Self::Line(line) => line.end,
            Self::Arc(arc) => arc.end,
        }
    }

    #[must_use]
    pub fn start_period(&self) -> f64 {
        match self {
            Self::Line(line) => line.start_period,
            Self::Arc(arc) => arc.start_period,
        }
    }

    #[must_use]
    pub fn end_period(&self) -> f64 {
        match self {
            Self::Line(line) => line.end_period,
            Self::Arc(arc) => arc.end_period,
        }
    }

    /// Half-open period range `[start_period, end_period)`.
    #[must_use]
    pub fn period_range(&self) -> Range<f64> {
        self.start_period()..self.end_period()
    }

    /// Returns whether the simplex spans a zero-width period range.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.end_period() <= self.start_period()
    }

    /// Computes the boundary point at `period`.
    ///
    /// Periods outside the range are clamped to the nearest endpoint.
    #[must_use]
    pub fn compute(&self, period: f64) -> Point2 {
        match self {
            Self::Line(line) => line.compute(period),
            Self::Arc(arc) => arc.compute(period),
        }
    }

    /// Returns the part of this simplex over `range`, or `None` if the
    /// ranges do not overlap.
    ///
    /// The narrowed simplex computes the same points as this one over the
    /// shared periods. An empty `range` inside this simplex gives a
    /// zero-width simplex at that point.
    #[must_use]
    pub fn clamped(&self, range: &Range<f64>) -> Option<Self> {
        match self {
            Self::Line(line) => line.clamped(range).map(Self::Line),
            Self::Arc(arc) => arc.clamped(range).map(Self::Arc),
        }
    }

    /// Same geometry re-addressed onto another period range.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidPeriodRange` for a malformed range.
    pub fn with_period_range(&self, period: Range<f64>) -> Result<Self> {
        check_period_range(period.start, period.end)?;
        let mut copy = *self;
        match &mut copy {
            Self::Line(line) => {
                line.start_period = period.start;
                line.end_period = period.end;
            }
            Self::Arc(arc) => {
                arc.start_period = period.start;
                arc.end_period = period.end;
            }
        }
        Ok(copy)
    }

    /// Same points traversed in the opposite direction over the same
    /// period range.
    #[must_use]
    pub fn reversed(&self) -> Self {
        match self {
            Self::Line(line) => Self::Line(LineSegmentSimplex {
                start: line.end,
                end: line.start,
                ..*line
            }),
            Self::Arc(arc) => Self::Arc(CircularArcSimplex {
                start_angle: arc.start_angle + arc.sweep,
                sweep: -arc.sweep,
                start: arc.end,
                end: arc.start,
                ..*arc
            }),
        }
    }

    /// Squared length of the traversed curve.
    #[must_use]
    pub fn length_squared(&self) -> f64 {
        match self {
            Self::Line(line) => (line.end - line.start).norm_squared(),
            Self::Arc(arc) => {
                let length = arc.radius * arc.sweep;
                length * length
            }
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Point at the middle period.
    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        self.compute(0.5 * (self.start_period() + self.end_period()))
    }

    /// Unit direction of travel leaving the start point.
    #[must_use]
    pub fn tangent_at_start(&self) -> Vector2 {
        match self {
            Self::Line(line) => unit_or_zero(line.end - line.start),
            Self::Arc(arc) => arc_tangent_at(arc.start_angle, arc.sweep, 0.0),
        }
    }

    /// Unit direction of travel arriving at the end point.
    #[must_use]
    pub fn tangent_at_end(&self) -> Vector2 {
        match self {
            Self::Line(line) => unit_or_zero(line.end - line.start),
            Self::Arc(arc) => arc_tangent_at(arc.start_angle, arc.sweep, 1.0),
        }
    }

    /// Tight bounding box, including arc extreme points.
    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        let points = match self {
            Self::Line(line) => vec![line.start, line.end],
            Self::Arc(arc) => arc_extreme_points(&arc.center, arc.radius, arc.start_angle, arc.sweep),
        };
        Aabb::from_points(&points).unwrap_or(Aabb {
            min: self.start(),
            max: self.start(),
        })
    }

    /// Tag sufficient to rebuild this simplex from its endpoints.
    #[must_use]
    pub fn edge_kind(&self) -> EdgeKind {
        match self {
            Self::Line(_) => EdgeKind::Line,
            Self::Arc(arc) => EdgeKind::CircleArc {
                center: arc.center,
                sweep: arc.sweep,
            },
        }
    }

    /// Converts a local parameter in `[0, 1]` to a period on this simplex.
    ///
    /// The bounds map exactly onto `start_period` and `end_period`.
    #[must_use]
    pub fn period_at(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return self.start_period();
        }
        if t >= 1.0 {
            return self.end_period();
        }
        self.start_period() + (self.end_period() - self.start_period()) * t
    }
}

fn unit_or_zero(v: Vector2) -> Vector2 {
    let len = v.norm();
    if len < TOLERANCE {
        Vector2::zeros()
    } else {
        v / len
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_abs_diff_eq;

    use super::*;

    fn line() -> Simplex {
        LineSegmentSimplex::new(Point2::new(0.0, 0.0), Point2::new(10.0, 5.0), 0.2..0.6)
            .unwrap()
            .into()
    }

    fn quarter_arc() -> Simplex {
        CircularArcSimplex::new(Point2::new(1.0, 1.0), 2.0, 0.0, PI / 2.0, 1.0..3.0)
            .unwrap()
            .into()
    }

    #[test]
    fn endpoints_match_period_bounds() {
        for s in [line(), quarter_arc()] {
            assert_eq!(s.compute(s.start_period()), s.start());
            assert_eq!(s.compute(s.end_period()), s.end());
        }
    }

    #[test]
    fn arc_traverses_in_sweep_direction() {
        let s = quarter_arc();
        let mid = s.compute(2.0);
        let expected = Point2::new(1.0 + 2.0 * (PI / 4.0).cos(), 1.0 + 2.0 * (PI / 4.0).sin());
        assert_abs_diff_eq!(mid.x, expected.x, epsilon = 1e-12);
        assert_abs_diff_eq!(mid.y, expected.y, epsilon = 1e-12);
    }

    #[test]
    fn clamped_reproduces_original_points() {
        for s in [line(), quarter_arc()] {
            let (p0, p1) = (s.period_at(0.25), s.period_at(0.8));
            let c = s.clamped(&(p0..p1)).unwrap();
            assert_abs_diff_eq!(c.start_period(), p0);
            assert_abs_diff_eq!(c.end_period(), p1);
            for i in 0..=10 {
                let t = p0 + (p1 - p0) * f64::from(i) / 10.0;
                let (a, b) = (c.compute(t), s.compute(t));
                assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-9);
                assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn clamped_to_wider_range_keeps_bounds() {
        let s = line();
        let c = s.clamped(&(0.0..1.0)).unwrap();
        assert_eq!(c, s);
    }

    #[test]
    fn clamped_outside_is_none() {
        let s = line();
        assert!(s.clamped(&(0.7..0.9)).is_none());
        // Touching at a bound is not an overlap.
        assert!(s.clamped(&(0.6..0.9)).is_none());
        assert!(s.clamped(&(0.0..0.2)).is_none());
    }

    #[test]
    fn empty_range_collapses_to_point() {
        let s = quarter_arc();
        let c = s.clamped(&(1.0..1.0)).unwrap();
        assert!(c.is_degenerate());
        assert_eq!(c.start(), s.start());
        assert_eq!(c.end(), s.start());
        assert!(s.clamped(&(5.0..5.0)).is_none());
    }

    #[test]
    fn ranges_overlap_half_open() {
        assert!(ranges_overlap(&(0.0..1.0), &(0.5..2.0)));
        assert!(!ranges_overlap(&(0.0..1.0), &(1.0..2.0)));
        assert!(!ranges_overlap(&(0.0..1.0), &(0.5..0.5)));
    }

    #[test]
    fn malformed_period_range_is_rejected() {
        let err = LineSegmentSimplex::new(Point2::origin(), Point2::new(1.0, 0.0), 0.5..0.5);
        assert!(err.is_err());
        let err = CircularArcSimplex::new(Point2::origin(), 1.0, 0.0, PI, 1.0..0.0);
        assert!(err.is_err());
    }

    #[test]
    fn reversed_swaps_direction() {
        let s = quarter_arc();
        let r = s.reversed();
        assert_eq!(r.start(), s.end());
        assert_eq!(r.end(), s.start());
        let mid = r.midpoint();
        let orig_mid = s.midpoint();
        assert_abs_diff_eq!(mid.x, orig_mid.x, epsilon = 1e-12);
        assert_abs_diff_eq!(mid.y, orig_mid.y, epsilon = 1e-12);
        assert_abs_diff_eq!(r.tangent_at_start().x, -s.tangent_at_end().x, epsilon = 1e-12);
    }

    #[test]
    fn length_squared_of_arc() {
        let s = quarter_arc();
        assert_abs_diff_eq!(s.length(), 2.0 * PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn rebuild_from_edge_kind() {
        let s = quarter_arc();
        let rebuilt = Simplex::from_edge_kind(s.start(), s.end(), s.edge_kind(), 0.0..1.0).unwrap();
        let (a, b) = (rebuilt.midpoint(), s.midpoint());
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-12);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-12);
    }

    #[test]
    fn arc_bounding_box_includes_quadrant_point() {
        // Quarter arc from angle 0 to π/2 around (1, 1) with radius 2.
        let aabb = quarter_arc().bounding_box();
        assert_abs_diff_eq!(aabb.max.x, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(aabb.max.y, 3.0, epsilon = 1e-12);
    }
}
