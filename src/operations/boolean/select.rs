use super::classify::{EdgeClassification, PointClassification};
use super::graph::EdgeSource;

/// The type of boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Intersection,
    /// Left shape minus the right shape.
    Difference,
    /// Points in exactly one of the two shapes.
    SymmetricDifference,
}

/// One edge-selection pass over the graph. Symmetric difference runs the
/// two difference passes and concatenates their contours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPass {
    Union,
    Intersection,
    LhsMinusRhs,
    RhsMinusLhs,
}

impl BooleanOp {
    #[must_use]
    pub fn passes(self) -> &'static [SelectionPass] {
        match self {
            Self::Union => &[SelectionPass::Union],
            Self::Intersection => &[SelectionPass::Intersection],
            Self::Difference => &[SelectionPass::LhsMinusRhs],
            Self::SymmetricDifference => &[SelectionPass::LhsMinusRhs, SelectionPass::RhsMinusLhs],
        }
    }
}

/// Decision about whether to keep an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepDecision {
    Keep,
    KeepFlipped,
    Discard,
}

/// Side an edge plays in one pass: the shape being kept, the other shape,
/// or both at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Primary,
    Secondary,
    Shared,
}

fn role(source: EdgeSource, pass: SelectionPass) -> Role {
    let primary = if pass == SelectionPass::RhsMinusLhs {
        EdgeSource::Rhs
    } else {
        EdgeSource::Lhs
    };
    if source == EdgeSource::Both {
        Role::Shared
    } else if source == primary {
        Role::Primary
    } else {
        Role::Secondary
    }
}

/// Determines whether an edge should be kept based on its classification
/// relative to the other shape and the selection pass.
///
/// | Edge       | vs other shape | Union   | Intersection | Lhs - Rhs    |
/// |------------|----------------|---------|--------------|--------------|
/// | from lhs   | OUTSIDE        | keep    | discard      | keep         |
/// | from lhs   | INSIDE         | discard | keep         | discard      |
/// | from rhs   | OUTSIDE        | keep    | discard      | discard      |
/// | from rhs   | INSIDE         | discard | keep         | keep (flip)  |
/// | shared     | same direction | keep    | keep         | discard      |
/// | from lhs   | opposite twin  | discard | discard      | keep         |
/// | from rhs   | opposite twin  | discard | discard      | discard      |
///
/// `Rhs - Lhs` is the last column with the sides swapped.
#[allow(clippy::match_same_arms)]
#[must_use]
pub fn should_keep_edge(
    source: EdgeSource,
    classification: EdgeClassification,
    pass: SelectionPass,
) -> KeepDecision {
    use EdgeClassification::{Coincident, OppositeCoincident, Point};
    use PointClassification::{Inside, OnBoundary, Outside};
    use SelectionPass::{Intersection, LhsMinusRhs, RhsMinusLhs, Union};

    match (role(source, pass), classification, pass) {
        // Shared in the same direction: one copy or none
        (Role::Shared, _, Union | Intersection) | (_, Coincident, Union | Intersection) => KeepDecision::Keep,
        (Role::Shared, _, LhsMinusRhs | RhsMinusLhs) | (_, Coincident, _) => KeepDecision::Discard,

        // Shared in opposite directions
        (_, OppositeCoincident, Union | Intersection) => KeepDecision::Discard,
        (Role::Primary, OppositeCoincident, _) => KeepDecision::Keep,
        (Role::Secondary, OppositeCoincident, _) => KeepDecision::Discard,

        // OnBoundary: keep from the primary side to avoid duplicates
        (Role::Primary, Point(OnBoundary), _) => KeepDecision::Keep,
        (Role::Secondary, Point(OnBoundary), _) => KeepDecision::Discard,

        (_, Point(Outside), Union) => KeepDecision::Keep,
        (_, Point(Inside), Union) => KeepDecision::Discard,

        (_, Point(Outside), Intersection) => KeepDecision::Discard,
        (_, Point(Inside), Intersection) => KeepDecision::Keep,

        (Role::Primary, Point(Outside), _) => KeepDecision::Keep,
        (Role::Primary, Point(Inside), _) => KeepDecision::Discard,
        (Role::Secondary, Point(Outside), _) => KeepDecision::Discard,
        (Role::Secondary, Point(Inside), _) => KeepDecision::KeepFlipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSIDE: EdgeClassification = EdgeClassification::Point(PointClassification::Inside);
    const OUTSIDE: EdgeClassification = EdgeClassification::Point(PointClassification::Outside);
    const ON_BOUNDARY: EdgeClassification = EdgeClassification::Point(PointClassification::OnBoundary);

    #[test]
    fn union_keeps_outside_edges() {
        for source in [EdgeSource::Lhs, EdgeSource::Rhs] {
            assert_eq!(should_keep_edge(source, OUTSIDE, SelectionPass::Union), KeepDecision::Keep);
            assert_eq!(should_keep_edge(source, INSIDE, SelectionPass::Union), KeepDecision::Discard);
        }
    }

    #[test]
    fn intersection_keeps_inside_edges() {
        for source in [EdgeSource::Lhs, EdgeSource::Rhs] {
            assert_eq!(should_keep_edge(source, INSIDE, SelectionPass::Intersection), KeepDecision::Keep);
            assert_eq!(
                should_keep_edge(source, OUTSIDE, SelectionPass::Intersection),
                KeepDecision::Discard
            );
        }
    }

    #[test]
    fn difference_flips_subtrahend_inside() {
        let pass = SelectionPass::LhsMinusRhs;
        assert_eq!(should_keep_edge(EdgeSource::Lhs, OUTSIDE, pass), KeepDecision::Keep);
        assert_eq!(should_keep_edge(EdgeSource::Lhs, INSIDE, pass), KeepDecision::Discard);
        assert_eq!(should_keep_edge(EdgeSource::Rhs, OUTSIDE, pass), KeepDecision::Discard);
        assert_eq!(should_keep_edge(EdgeSource::Rhs, INSIDE, pass), KeepDecision::KeepFlipped);
    }

    #[test]
    fn reverse_difference_mirrors_sides() {
        let pass = SelectionPass::RhsMinusLhs;
        assert_eq!(should_keep_edge(EdgeSource::Rhs, OUTSIDE, pass), KeepDecision::Keep);
        assert_eq!(should_keep_edge(EdgeSource::Lhs, INSIDE, pass), KeepDecision::KeepFlipped);
        assert_eq!(
            should_keep_edge(EdgeSource::Rhs, EdgeClassification::OppositeCoincident, pass),
            KeepDecision::Keep
        );
        assert_eq!(should_keep_edge(EdgeSource::Lhs, ON_BOUNDARY, pass), KeepDecision::Discard);
    }

    #[test]
    fn shared_edges_keep_one_copy_or_none() {
        let shared = EdgeClassification::Coincident;
        assert_eq!(should_keep_edge(EdgeSource::Both, shared, SelectionPass::Union), KeepDecision::Keep);
        assert_eq!(
            should_keep_edge(EdgeSource::Both, shared, SelectionPass::Intersection),
            KeepDecision::Keep
        );
        assert_eq!(
            should_keep_edge(EdgeSource::Both, shared, SelectionPass::LhsMinusRhs),
            KeepDecision::Discard
        );

        let twin = EdgeClassification::OppositeCoincident;
        for source in [EdgeSource::Lhs, EdgeSource::Rhs] {
            assert_eq!(should_keep_edge(source, twin, SelectionPass::Union), KeepDecision::Discard);
        }
        assert_eq!(should_keep_edge(EdgeSource::Lhs, twin, SelectionPass::LhsMinusRhs), KeepDecision::Keep);
    }

    #[test]
    fn symmetric_difference_runs_both_differences() {
        assert_eq!(
            BooleanOp::SymmetricDifference.passes(),
            &[SelectionPass::LhsMinusRhs, SelectionPass::RhsMinusLhs]
        );
    }
}
