mod classify;
mod engine;
mod graph;
mod intersect;
mod select;
mod trace;

pub use classify::{classify_edge, classify_point, EdgeClassification, PointClassification};
pub use engine::BooleanCombination;
pub use graph::{EdgeId, EdgeSource, GraphEdge, GraphNode, Membership, NodeId, NodeKind, SimplexGraph};
pub use intersect::{compute_intersections, PeriodPair};
pub use select::{should_keep_edge, BooleanOp, KeepDecision, SelectionPass};
pub use trace::{trace_contours, TracedEdge};
