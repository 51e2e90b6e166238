use crate::error::{OperationError, PericlipError, Result};
use crate::math::arc_2d::{arc_from_bulge, bulge_from_sweep};
use crate::math::Point2;

use super::contour::Contour;
use super::simplex::{CircularArcSimplex, LineSegmentSimplex, Simplex};

/// Bulge-encoded polyline vertex for mixed line/arc segments.
///
/// `bulge = tan(sweep_angle / 4)`:
/// - `0` = straight line to next vertex
/// - `> 0` = counter-clockwise arc to next vertex
/// - `< 0` = clockwise arc to next vertex
/// - `|bulge| = 1` = semicircle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlineVertex {
    pub x: f64,
    pub y: f64,
    pub bulge: f64,
}

impl PlineVertex {
    /// Creates a new vertex with the given coordinates and bulge.
    #[must_use]
    pub fn new(x: f64, y: f64, bulge: f64) -> Self {
        Self { x, y, bulge }
    }

    /// Creates a line vertex (bulge = 0).
    #[must_use]
    pub fn line(x: f64, y: f64) -> Self {
        Self { x, y, bulge: 0.0 }
    }

    #[must_use]
    pub fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// A polyline with mixed straight-line and circular-arc segments.
///
/// Each segment between consecutive vertices is either a line (bulge=0)
/// or a circular arc (bulge≠0). For closed polylines, the last vertex
/// connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Pline {
    pub vertices: Vec<PlineVertex>,
    pub closed: bool,
}

impl TryFrom<&Pline> for Contour {
    type Error = PericlipError;

    /// Converts a closed polyline to a contour, segment `i` of `n` spanning
    /// periods `[i / n, (i + 1) / n)`.
    fn try_from(pline: &Pline) -> Result<Self> {
        if !pline.closed {
            return Err(OperationError::InvalidInput("only closed plines form a contour".to_owned()).into());
        }
        let seg_count = pline.vertices.len();
        if seg_count < 2 {
            return Err(OperationError::InvalidInput(format!(
                "a closed pline needs at least 2 vertices, got {seg_count}"
            ))
            .into());
        }

        #[allow(clippy::cast_precision_loss)]
        let count = seg_count as f64;
        let mut simplexes = Vec::with_capacity(seg_count);
        for i in 0..seg_count {
            let v0 = &pline.vertices[i];
            let v1 = &pline.vertices[(i + 1) % seg_count];
            let (p0, p1) = (v0.point(), v1.point());
            #[allow(clippy::cast_precision_loss)]
            let i_f = i as f64;
            let period = i_f / count..(i_f + 1.0) / count;

            let simplex: Simplex = match arc_from_bulge(&p0, &p1, v0.bulge) {
                Some(arc) => CircularArcSimplex::new(arc.center, arc.radius, arc.start_angle, arc.sweep, period)?
                    .with_endpoints(p0, p1)
                    .into(),
                None => LineSegmentSimplex::new(p0, p1, period)?.into(),
            };
            simplexes.push(simplex);
        }
        Contour::new(simplexes)
    }
}

impl From<&Contour> for Pline {
    /// Encodes a contour as a closed polyline, one vertex per simplex start.
    fn from(contour: &Contour) -> Self {
        let vertices = contour
            .simplexes()
            .iter()
            .map(|s| {
                let p = s.start();
                let bulge = match s {
                    Simplex::Line(_) => 0.0,
                    Simplex::Arc(arc) => bulge_from_sweep(arc.sweep()),
                };
                PlineVertex::new(p.x, p.y, bulge)
            })
            .collect();
        Self {
            vertices,
            closed: true,
        }
    }
}
