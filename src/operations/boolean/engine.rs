use crate::error::Result;
use crate::geometry::contour::Contour;
use crate::geometry::periodic::PeriodicGeometry;
use crate::math::Tolerance;

use super::classify::classify_edge;
use super::graph::SimplexGraph;
use super::intersect::{compute_intersections, PeriodPair};
use super::select::{should_keep_edge, BooleanOp, KeepDecision};
use super::trace::{trace_contours, TracedEdge};

/// A boolean operation between two closed shapes.
///
/// Both inputs are copied into counter-clockwise contours on construction;
/// the pipeline (intersection, graph, classification, selection and
/// tracing) runs on demand.
#[derive(Debug, Clone)]
pub struct BooleanCombination {
    lhs: Contour,
    rhs: Contour,
    op: BooleanOp,
    tolerance: Tolerance,
}

impl BooleanCombination {
    /// Prepares `lhs op rhs`.
    ///
    /// # Errors
    ///
    /// Returns an error if either shape's simplexes do not form a closed
    /// contour.
    pub fn new<A, B>(lhs: &A, rhs: &B, op: BooleanOp) -> Result<Self>
    where
        A: PeriodicGeometry + ?Sized,
        B: PeriodicGeometry + ?Sized,
    {
        Ok(Self {
            lhs: counter_clockwise(lhs.to_contour()?)?,
            rhs: counter_clockwise(rhs.to_contour()?)?,
            op,
            tolerance: Tolerance::default(),
        })
    }

    /// Sets the tolerances used by every stage.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn op(&self) -> BooleanOp {
        self.op
    }

    /// The left operand, oriented counter-clockwise.
    #[must_use]
    pub fn lhs(&self) -> &Contour {
        &self.lhs
    }

    /// The right operand, oriented counter-clockwise.
    #[must_use]
    pub fn rhs(&self) -> &Contour {
        &self.rhs
    }

    #[must_use]
    pub fn intersections(&self) -> Vec<PeriodPair> {
        compute_intersections(&self.lhs, &self.rhs, &self.tolerance)
    }

    /// Boundary graph of both operands, split at their intersections.
    #[must_use]
    pub fn graph(&self) -> SimplexGraph {
        SimplexGraph::build(&self.lhs, &self.rhs, &self.intersections(), &self.tolerance)
    }

    /// Contours bounding the result. Holes run clockwise.
    ///
    /// An empty result gives no contours; disjoint pieces give one
    /// contour each.
    #[must_use]
    pub fn all_contours(&self) -> Vec<Contour> {
        let graph = self.graph();
        let classified: Vec<_> = graph
            .edges()
            .filter_map(|(id, edge)| {
                let classification = classify_edge(&graph, id, &self.lhs, &self.rhs, &self.tolerance)?;
                Some((id, edge, classification))
            })
            .collect();

        let mut contours = Vec::new();
        for &pass in self.op.passes() {
            let selected: Vec<TracedEdge> = classified
                .iter()
                .filter_map(|&(id, edge, classification)| {
                    let simplex = graph.edge_simplex(id)?;
                    match should_keep_edge(edge.membership.source(), classification, pass) {
                        KeepDecision::Keep => Some(TracedEdge {
                            start: edge.start,
                            end: edge.end,
                            simplex,
                        }),
                        KeepDecision::KeepFlipped => Some(TracedEdge {
                            start: edge.end,
                            end: edge.start,
                            simplex: simplex.reversed(),
                        }),
                        KeepDecision::Discard => None,
                    }
                })
                .collect();
            tracing::debug!(?pass, selected = selected.len(), "selected graph edges");
            contours.extend(trace_contours(&selected, &self.tolerance));
        }
        contours
    }
}

/// Returns the contour, reversed if it runs clockwise.
fn counter_clockwise(contour: Contour) -> Result<Contour> {
    if contour.signed_area() < 0.0 {
        contour.reversed()
    } else {
        Ok(contour)
    }
}
