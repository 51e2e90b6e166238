use std::collections::HashMap;

use slotmap::SlotMap;

use crate::geometry::periodic::PeriodicGeometry;
use crate::geometry::simplex::{EdgeKind, Simplex};
use crate::math::{Point2, Tolerance, TOLERANCE};

use super::intersect::PeriodPair;

slotmap::new_key_type! {
    /// Unique identifier for a node in a [`SimplexGraph`].
    pub struct NodeId;
}

slotmap::new_key_type! {
    /// Unique identifier for an edge in a [`SimplexGraph`].
    pub struct EdgeId;
}

/// Where a node came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Endpoint of a simplex of the left (`on_lhs`) or right shape.
    Geometry { on_lhs: bool },
    /// A boundary intersection that is not also a simplex endpoint.
    Intersection,
}

/// A boundary point shared by every edge that starts or ends there.
#[derive(Debug, Clone)]
pub struct GraphNode {
    /// Creation order: geometry nodes first, then intersections.
    pub ordinal: usize,
    pub kind: NodeKind,
    pub point: Point2,
}

/// Which shape boundaries an edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Membership {
    pub on_lhs: bool,
    pub on_rhs: bool,
}

/// Shape an edge is taken from, derived from its [`Membership`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSource {
    Lhs,
    Rhs,
    /// Shared by both boundaries in the same direction.
    Both,
}

impl Membership {
    #[must_use]
    pub fn source(&self) -> EdgeSource {
        match (self.on_lhs, self.on_rhs) {
            (true, true) => EdgeSource::Both,
            (false, true) => EdgeSource::Rhs,
            _ => EdgeSource::Lhs,
        }
    }
}

/// A directed boundary fragment between two nodes.
#[derive(Debug, Clone)]
pub struct GraphEdge {
    pub start: NodeId,
    pub end: NodeId,
    /// Squared length of the source simplex, not of this fragment.
    pub length_squared: f64,
    pub kind: EdgeKind,
    pub membership: Membership,
}

/// Boundary fragments of two shapes, cut at their intersections.
///
/// Nodes are boundary points deduplicated by coordinate; edges are the
/// simplex pieces between them. Construction is deterministic: nodes and
/// edges are inserted in shape, simplex and intersection order.
#[derive(Debug, Default)]
pub struct SimplexGraph {
    nodes: SlotMap<NodeId, GraphNode>,
    edges: SlotMap<EdgeId, GraphEdge>,
    by_endpoints: HashMap<(NodeId, NodeId), Vec<EdgeId>>,
}

impl SimplexGraph {
    /// Builds the graph of `lhs` and `rhs` split at `intersections`.
    ///
    /// # Panics
    ///
    /// Panics if an intersection period does not fall inside any simplex of
    /// its shape, which means `intersections` were not computed for these
    /// two shapes.
    pub fn build<A, B>(lhs: &A, rhs: &B, intersections: &[PeriodPair], tolerance: &Tolerance) -> Self
    where
        A: PeriodicGeometry + ?Sized,
        B: PeriodicGeometry + ?Sized,
    {
        let lhs_simplexes = lhs.all_simplexes();
        let rhs_simplexes = rhs.all_simplexes();
        let mut builder = GraphBuilder::new(*tolerance);

        for (simplexes, on_lhs) in [(&lhs_simplexes, true), (&rhs_simplexes, false)] {
            for s in simplexes {
                builder.node_at(s.start(), NodeKind::Geometry { on_lhs });
                builder.node_at(s.end(), NodeKind::Geometry { on_lhs });
            }
        }
        for pair in intersections {
            if let Some(point) = lhs.point_at(pair.on_lhs) {
                builder.node_at(point, NodeKind::Intersection);
            }
        }

        let lhs_cuts = cuts_per_simplex(&lhs_simplexes, intersections.iter().map(|p| p.on_lhs));
        let rhs_cuts = cuts_per_simplex(&rhs_simplexes, intersections.iter().map(|p| p.on_rhs));
        for (simplexes, cuts, on_lhs) in [(&lhs_simplexes, lhs_cuts, true), (&rhs_simplexes, rhs_cuts, false)] {
            for (s, cut) in simplexes.iter().zip(cuts) {
                builder.split_simplex(s, &cut, on_lhs);
            }
        }

        let graph = builder.graph;
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            intersections = intersections.len(),
            "built simplex graph"
        );
        graph
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&GraphEdge> {
        self.edges.get(id)
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> {
        self.nodes.iter()
    }

    /// Edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &GraphEdge)> {
        self.edges.iter()
    }

    /// Rebuilds the fragment an edge stands for, addressed on `[0, 1)`.
    #[must_use]
    pub fn edge_simplex(&self, id: EdgeId) -> Option<Simplex> {
        let edge = self.edges.get(id)?;
        let start = self.nodes.get(edge.start)?.point;
        let end = self.nodes.get(edge.end)?.point;
        Simplex::from_edge_kind(start, end, edge.kind, 0.0..1.0).ok()
    }

    /// Returns an edge of the other shape running over the same curve as
    /// `id` in the opposite direction.
    #[must_use]
    pub fn opposite_edge(&self, id: EdgeId, tolerance: &Tolerance) -> Option<EdgeId> {
        let edge = self.edges.get(id)?;
        let flipped = reversed_kind(edge.kind);
        self.by_endpoints
            .get(&(edge.end, edge.start))?
            .iter()
            .copied()
            .find(|&other| {
                self.edges.get(other).is_some_and(|o| {
                    o.membership != edge.membership && o.kind.approx_eq(&flipped, tolerance.distance)
                })
            })
    }
}

fn reversed_kind(kind: EdgeKind) -> EdgeKind {
    match kind {
        EdgeKind::Line => EdgeKind::Line,
        EdgeKind::CircleArc { center, sweep } => EdgeKind::CircleArc {
            center,
            sweep: -sweep,
        },
    }
}

/// Groups intersection periods by the simplex whose half-open range holds
/// them, each group sorted and deduplicated.
fn cuts_per_simplex(simplexes: &[Simplex], periods: impl Iterator<Item = f64>) -> Vec<Vec<f64>> {
    let mut cuts = vec![Vec::new(); simplexes.len()];
    for period in periods {
        let index = simplexes
            .partition_point(|s| s.start_period() <= period)
            .checked_sub(1)
            .filter(|&i| period < simplexes[i].end_period());
        let Some(index) = index else {
            panic!("intersection period {period} lies outside every simplex");
        };
        cuts[index].push(period);
    }
    for cut in &mut cuts {
        cut.sort_by(f64::total_cmp);
        cut.dedup();
    }
    cuts
}

struct GraphBuilder {
    graph: SimplexGraph,
    tolerance: Tolerance,
    cell_size: f64,
    cells: HashMap<(i64, i64), Vec<NodeId>>,
}

impl GraphBuilder {
    fn new(tolerance: Tolerance) -> Self {
        Self {
            graph: SimplexGraph::default(),
            tolerance,
            cell_size: tolerance.distance.max(TOLERANCE),
            cells: HashMap::new(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell_of(&self, point: &Point2) -> (i64, i64) {
        (
            (point.x / self.cell_size).floor() as i64,
            (point.y / self.cell_size).floor() as i64,
        )
    }

    /// Returns the node at `point`, creating it if no node lies within the
    /// distance tolerance.
    fn node_at(&mut self, point: Point2, kind: NodeKind) -> NodeId {
        let (cx, cy) = self.cell_of(&point);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(ids) = self.cells.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for &id in ids {
                    if self.tolerance.points_coincide(&self.graph.nodes[id].point, &point) {
                        return id;
                    }
                }
            }
        }

        let ordinal = self.graph.nodes.len();
        let id = self.graph.nodes.insert(GraphNode { ordinal, kind, point });
        self.cells.entry((cx, cy)).or_default().push(id);
        id
    }

    /// Emits one edge per piece of `simplex` between consecutive cuts.
    fn split_simplex(&mut self, simplex: &Simplex, cuts: &[f64], on_lhs: bool) {
        let mut bounds = Vec::with_capacity(cuts.len() + 2);
        bounds.push(simplex.start_period());
        bounds.extend(cuts.iter().copied().filter(|&c| c > simplex.start_period()));
        bounds.push(simplex.end_period());

        let min_length_sq = self.tolerance.distance * self.tolerance.distance;
        for window in bounds.windows(2) {
            let Some(piece) = simplex.clamped(&(window[0]..window[1])) else {
                continue;
            };
            if piece.is_degenerate() || piece.length_squared() <= min_length_sq {
                continue;
            }
            // Piece ends are existing nodes unless a cut drifted past the tolerance.
            let start = self.node_at(piece.start(), NodeKind::Intersection);
            let end = self.node_at(piece.end(), NodeKind::Intersection);
            self.add_edge(start, end, &piece, simplex.length_squared(), on_lhs);
        }
    }

    /// Inserts an edge, or marks an identical existing one as shared.
    fn add_edge(
        &mut self,
        start: NodeId,
        end: NodeId,
        piece: &Simplex,
        source_length_squared: f64,
        on_lhs: bool,
    ) {
        let kind = piece.edge_kind();
        let existing = self.graph.by_endpoints.get(&(start, end)).and_then(|ids| {
            ids.iter()
                .copied()
                .find(|&id| self.graph.edges[id].kind.approx_eq(&kind, self.tolerance.distance))
        });

        let id = match existing {
            Some(id) => id,
            None => {
                let id = self.graph.edges.insert(GraphEdge {
                    start,
                    end,
                    length_squared: source_length_squared,
                    kind,
                    membership: Membership::default(),
                });
                self.graph.by_endpoints.entry((start, end)).or_default().push(id);
                id
            }
        };
        let membership = &mut self.graph.edges[id].membership;
        if on_lhs {
            membership.on_lhs = true;
        } else {
            membership.on_rhs = true;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::shapes::{Circle, Polygon};
    use crate::operations::boolean::intersect::compute_intersections;

    fn square(x0: f64, y0: f64, size: f64) -> Polygon {
        Polygon::new(vec![
            Point2::new(x0, y0),
            Point2::new(x0 + size, y0),
            Point2::new(x0 + size, y0 + size),
            Point2::new(x0, y0 + size),
        ])
        .unwrap()
    }

    fn build<A: PeriodicGeometry, B: PeriodicGeometry>(a: &A, b: &B) -> SimplexGraph {
        let tol = Tolerance::default();
        let pairs = compute_intersections(a, b, &tol);
        SimplexGraph::build(a, b, &pairs, &tol)
    }

    #[test]
    fn identical_hexagons_share_every_edge() {
        let a = Polygon::regular(Point2::origin(), 100.0, 6).unwrap();
        let b = Polygon::regular(Point2::origin(), 100.0, 6).unwrap();
        let graph = build(&a, &b);
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 6);
        assert!(graph
            .edges()
            .all(|(_, e)| e.membership.source() == EdgeSource::Both));
        assert!(graph
            .nodes()
            .all(|(_, n)| n.kind == NodeKind::Geometry { on_lhs: true }));
    }

    #[test]
    fn overlapping_squares_split_at_crossings() {
        let graph = build(&square(0.0, 0.0, 2.0), &square(1.0, 1.0, 2.0));
        // 8 corners plus 2 crossings.
        assert_eq!(graph.node_count(), 10);
        // Each square gains two extra pieces.
        assert_eq!(graph.edge_count(), 12);
        let crossings = graph
            .nodes()
            .filter(|(_, n)| n.kind == NodeKind::Intersection)
            .count();
        assert_eq!(crossings, 2);
    }

    #[test]
    fn split_pieces_keep_source_length() {
        let graph = build(&square(0.0, 0.0, 2.0), &square(1.0, 1.0, 2.0));
        // Every side is 2 long, split or not.
        for (_, edge) in graph.edges() {
            assert!((edge.length_squared - 4.0).abs() < 1e-12);
        }
    }

    #[test]
    fn construction_is_deterministic() {
        let a = square(0.0, 0.0, 2.0);
        let b = Circle::new(Point2::new(2.0, 1.0), 1.5).unwrap();
        let first = build(&a, &b);
        let second = build(&a, &b);
        let points = |g: &SimplexGraph| g.nodes().map(|(_, n)| (n.ordinal, n.point)).collect::<Vec<_>>();
        assert_eq!(points(&first), points(&second));
        let ends = |g: &SimplexGraph| {
            g.edges()
                .map(|(_, e)| (g.node(e.start).unwrap().ordinal, g.node(e.end).unwrap().ordinal))
                .collect::<Vec<_>>()
        };
        assert_eq!(ends(&first), ends(&second));
    }

    #[test]
    fn ordinals_follow_creation_order() {
        let graph = build(&square(0.0, 0.0, 2.0), &square(1.0, 1.0, 2.0));
        let ordinals: Vec<usize> = graph.nodes().map(|(_, n)| n.ordinal).collect();
        assert_eq!(ordinals, (0..graph.node_count()).collect::<Vec<_>>());
        let first_crossing = graph
            .nodes()
            .find(|(_, n)| n.kind == NodeKind::Intersection)
            .map(|(_, n)| n.ordinal)
            .unwrap();
        assert_eq!(first_crossing, 8);
    }

    #[test]
    fn unsplit_circle_is_a_self_loop() {
        let graph = build(&Circle::new(Point2::origin(), 1.0).unwrap(), &square(5.0, 5.0, 1.0));
        let (id, edge) = graph
            .edges()
            .find(|(_, e)| matches!(e.kind, EdgeKind::CircleArc { .. }))
            .unwrap();
        assert_eq!(edge.start, edge.end);
        let arc = graph.edge_simplex(id).unwrap();
        assert!((arc.length() - std::f64::consts::TAU).abs() < 1e-9);
    }

    #[test]
    fn adjacent_squares_have_opposite_edges() {
        let tol = Tolerance::default();
        let graph = build(&square(0.0, 0.0, 1.0), &square(1.0, 0.0, 1.0));
        let opposite = graph
            .edges()
            .filter(|&(id, _)| graph.opposite_edge(id, &tol).is_some())
            .count();
        assert_eq!(opposite, 2);
    }

    #[test]
    #[should_panic(expected = "outside every simplex")]
    fn foreign_period_panics() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(3.0, 0.0, 1.0);
        let bogus = [PeriodPair {
            on_lhs: 1.5,
            on_rhs: 0.0,
        }];
        let _ = SimplexGraph::build(&a, &b, &bogus, &Tolerance::default());
    }
}
