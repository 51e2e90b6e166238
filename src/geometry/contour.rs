use std::ops::Range;

use crate::error::{GeometryError, Result};

use super::periodic::PeriodicGeometry;
use super::simplex::Simplex;

/// Largest gap tolerated between the end of one simplex and the start of
/// the next.
const CHAIN_TOLERANCE: f64 = 1e-7;

/// A closed boundary made of an arbitrary sequence of simplexes.
///
/// Boolean results are returned as contours; any periodic geometry can be
/// copied into one with [`PeriodicGeometry::to_contour`].
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    simplexes: Vec<Simplex>,
}

impl Contour {
    /// Creates a contour from simplexes that already tile a period range
    /// and chain end-to-start.
    ///
    /// # Errors
    ///
    /// - `GeometryError::Empty` for an empty list
    /// - `GeometryError::NotChained` when endpoints do not meet, including
    ///   the closing step back to the first simplex
    /// - `GeometryError::InvalidPeriodRange` when period ranges leave gaps
    ///   or overlap
    pub fn new(simplexes: Vec<Simplex>) -> Result<Self> {
        validate_chain(&simplexes)?;
        for pair in simplexes.windows(2) {
            if pair[0].end_period() != pair[1].start_period() {
                return Err(GeometryError::InvalidPeriodRange {
                    start: pair[0].end_period(),
                    end: pair[1].start_period(),
                }
                .into());
            }
        }
        Ok(Self { simplexes })
    }

    /// Creates a contour from chained simplexes, re-addressing them so
    /// simplex `i` of `n` spans `[i / n, (i + 1) / n)`.
    ///
    /// # Errors
    ///
    /// Same chaining errors as [`Contour::new`].
    pub fn from_simplexes(simplexes: Vec<Simplex>) -> Result<Self> {
        validate_chain(&simplexes)?;
        #[allow(clippy::cast_precision_loss)]
        let n = simplexes.len() as f64;
        let simplexes = simplexes
            .iter()
            .enumerate()
            .map(|(i, s)| {
                #[allow(clippy::cast_precision_loss)]
                let i = i as f64;
                s.with_period_range(i / n..(i + 1.0) / n)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { simplexes })
    }

    /// Number of simplexes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.simplexes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.simplexes.is_empty()
    }

    /// Borrowed view of the simplexes in period order.
    #[must_use]
    pub fn simplexes(&self) -> &[Simplex] {
        &self.simplexes
    }

    /// Same boundary traversed in the opposite direction, re-addressed
    /// onto `[0, 1)`.
    ///
    /// # Errors
    ///
    /// Propagates re-addressing errors (none for a valid contour).
    pub fn reversed(&self) -> Result<Self> {
        let simplexes = self.simplexes.iter().rev().map(Simplex::reversed).collect();
        Self::from_simplexes(simplexes)
    }

    /// Same boundary starting at simplex `index`, re-addressed onto `[0, 1)`.
    ///
    /// # Errors
    ///
    /// Propagates re-addressing errors (none for a valid contour).
    pub fn rotated(&self, index: usize) -> Result<Self> {
        let mut simplexes = self.simplexes.clone();
        simplexes.rotate_left(index % self.simplexes.len().max(1));
        Self::from_simplexes(simplexes)
    }
}

impl PeriodicGeometry for Contour {
    fn period_range(&self) -> Range<f64> {
        let start = self.simplexes.first().map_or(0.0, Simplex::start_period);
        let end = self.simplexes.last().map_or(0.0, Simplex::end_period);
        start..end
    }

    fn all_simplexes(&self) -> Vec<Simplex> {
        self.simplexes.clone()
    }
}

fn validate_chain(simplexes: &[Simplex]) -> Result<()> {
    if simplexes.is_empty() {
        return Err(GeometryError::Empty.into());
    }
    let n = simplexes.len();
    for (index, s) in simplexes.iter().enumerate() {
        let next = &simplexes[(index + 1) % n];
        if (s.end() - next.start()).norm() > CHAIN_TOLERANCE {
            return Err(GeometryError::NotChained { index }.into());
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::geometry::simplex::{CircularArcSimplex, LineSegmentSimplex};
    use crate::math::Point2;

    /// Upper half disc: CCW semicircle from (1,0) to (-1,0), closed by the diameter.
    fn d_shape() -> Vec<Simplex> {
        let arc = CircularArcSimplex::new(Point2::origin(), 1.0, 0.0, PI, 0.0..0.5).unwrap();
        let (a0, a1) = (Point2::new(1.0, 0.0), Point2::new(-1.0, 0.0));
        vec![
            arc.with_endpoints(a0, a1).into(),
            LineSegmentSimplex::new(a1, a0, 0.5..1.0).unwrap().into(),
        ]
    }

    #[test]
    fn new_accepts_tiled_chain() {
        let contour = Contour::new(d_shape()).unwrap();
        assert_eq!(contour.len(), 2);
        assert_eq!(contour.period_range(), 0.0..1.0);
    }

    #[test]
    fn empty_contour_is_rejected() {
        assert!(Contour::new(Vec::new()).is_err());
    }

    #[test]
    fn broken_chain_is_rejected() {
        let mut simplexes = d_shape();
        simplexes[1] = LineSegmentSimplex::new(Point2::new(-1.0, 0.0), Point2::new(0.0, -3.0), 0.5..1.0)
            .unwrap()
            .into();
        assert!(Contour::new(simplexes).is_err());
    }

    #[test]
    fn period_gap_is_rejected() {
        let mut simplexes = d_shape();
        simplexes[1] = simplexes[1].with_period_range(0.6..1.0).unwrap();
        assert!(Contour::new(simplexes).is_err());
        assert!(Contour::from_simplexes(d_shape()).is_ok());
    }

    #[test]
    fn area_and_containment_of_half_disc() {
        let contour = Contour::new(d_shape()).unwrap();
        assert_abs_diff_eq!(contour.signed_area(), PI / 2.0, epsilon = 1e-12);
        assert!(contour.contains(&Point2::new(0.0, 0.5)));
        assert!(contour.contains(&Point2::new(0.9, 0.1)));
        assert!(!contour.contains(&Point2::new(0.0, -0.5)));
        assert!(!contour.contains(&Point2::new(0.0, 1.5)));
        assert!(contour.is_on_surface(&Point2::new(0.0, 1.0), 1e-9));
        assert!(contour.is_on_surface(&Point2::new(0.3, 0.0), 1e-9));
    }

    #[test]
    fn reversed_flips_orientation() {
        let contour = Contour::new(d_shape()).unwrap();
        let reversed = contour.reversed().unwrap();
        assert_abs_diff_eq!(reversed.signed_area(), -PI / 2.0, epsilon = 1e-12);
        assert!(reversed.contains(&Point2::new(0.0, 0.5)));
        assert_eq!(reversed.winding_number(&Point2::new(0.0, 0.5)), -1);
    }

    #[test]
    fn rotation_keeps_tiling() {
        let contour = Contour::new(d_shape()).unwrap().rotated(1).unwrap();
        assert!(matches!(contour.simplexes()[0], Simplex::Line(_)));
        assert_eq!(contour.period_range(), 0.0..1.0);
    }
}
