use crate::geometry::periodic::PeriodicGeometry;
use crate::math::{Point2, Tolerance};

use super::graph::{EdgeId, EdgeSource, SimplexGraph};

/// Classification of a point relative to a closed shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClassification {
    Inside,
    Outside,
    OnBoundary,
}

/// Classifies a point as inside, outside, or on the boundary of a shape.
///
/// Boundary proximity wins over the winding test, which is meaningless on
/// the boundary itself.
pub fn classify_point<G>(point: &Point2, shape: &G, tolerance: &Tolerance) -> PointClassification
where
    G: PeriodicGeometry + ?Sized,
{
    if shape.is_on_surface(point, tolerance.distance) {
        PointClassification::OnBoundary
    } else if shape.contains(point) {
        PointClassification::Inside
    } else {
        PointClassification::Outside
    }
}

/// How a graph edge relates to the shape it does not come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeClassification {
    /// Midpoint classification against the other shape.
    Point(PointClassification),
    /// Both shapes run along this edge in the same direction.
    Coincident,
    /// The other shape runs along this edge in the opposite direction.
    OppositeCoincident,
}

/// Classifies an edge of `graph` against the other shape.
///
/// Lhs edges are tested against `rhs` and rhs edges against `lhs`, using
/// the midpoint of the fragment.
pub fn classify_edge<A, B>(
    graph: &SimplexGraph,
    id: EdgeId,
    lhs: &A,
    rhs: &B,
    tolerance: &Tolerance,
) -> Option<EdgeClassification>
where
    A: PeriodicGeometry + ?Sized,
    B: PeriodicGeometry + ?Sized,
{
    let edge = graph.edge(id)?;
    let source = edge.membership.source();
    if source == EdgeSource::Both {
        return Some(EdgeClassification::Coincident);
    }
    if graph.opposite_edge(id, tolerance).is_some() {
        return Some(EdgeClassification::OppositeCoincident);
    }

    let midpoint = graph.edge_simplex(id)?.midpoint();
    let classification = match source {
        EdgeSource::Rhs => classify_point(&midpoint, lhs, tolerance),
        _ => classify_point(&midpoint, rhs, tolerance),
    };
    Some(EdgeClassification::Point(classification))
}
