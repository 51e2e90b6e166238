use std::f64::consts::{PI, TAU};

use slotmap::SecondaryMap;

use crate::geometry::contour::Contour;
use crate::geometry::simplex::Simplex;
use crate::math::arc_2d::normalize_angle;
use crate::math::polygon_2d::leftmost_bottom_index;
use crate::math::{Point2, Tolerance};

use super::graph::NodeId;

/// A selected graph edge, oriented the way the output walks it.
#[derive(Debug, Clone, Copy)]
pub struct TracedEdge {
    pub start: NodeId,
    pub end: NodeId,
    pub simplex: Simplex,
}

/// Walks selected edges into closed contours.
///
/// Each walk starts at the first unused edge and follows edge direction.
/// At a node with several unused outgoing edges it takes the tightest left
/// turn, measured between the tangents at the node; near-equal turns go to
/// the shorter edge. A walk that returns to its start node becomes a
/// contour starting at its leftmost-bottom vertex; one that dead-ends is
/// dropped.
pub fn trace_contours(edges: &[TracedEdge], tolerance: &Tolerance) -> Vec<Contour> {
    let mut adjacency: SecondaryMap<NodeId, Vec<usize>> = SecondaryMap::new();
    for (index, edge) in edges.iter().enumerate() {
        if let Some(entry) = adjacency.entry(edge.start) {
            entry.or_default().push(index);
        }
    }

    let mut used = vec![false; edges.len()];
    let mut results = Vec::new();
    while let Some(start_edge) = used.iter().position(|&u| !u) {
        let Some(walk) = trace_one_boundary(start_edge, edges, &adjacency, &mut used, tolerance) else {
            continue;
        };
        let mut simplexes: Vec<Simplex> = walk.iter().map(|&i| edges[i].simplex).collect();
        let starts: Vec<Point2> = simplexes.iter().map(Simplex::start).collect();
        simplexes.rotate_left(leftmost_bottom_index(&starts));
        match Contour::from_simplexes(simplexes) {
            Ok(contour) => results.push(contour),
            Err(err) => tracing::warn!(%err, "discarding traced boundary"),
        }
    }

    tracing::debug!(edges = edges.len(), contours = results.len(), "traced contours");
    results
}

/// Traces a single boundary loop starting from the given edge. Returns the
/// edge indices of the loop, or `None` if the walk dead-ends.
fn trace_one_boundary(
    start_edge: usize,
    edges: &[TracedEdge],
    adjacency: &SecondaryMap<NodeId, Vec<usize>>,
    used: &mut [bool],
    tolerance: &Tolerance,
) -> Option<Vec<usize>> {
    let start_node = edges[start_edge].start;
    let mut current = start_edge;
    let mut walk = Vec::new();

    loop {
        used[current] = true;
        walk.push(current);
        if edges[current].end == start_node {
            return Some(walk);
        }
        let Some(next) = pick_next_edge(current, edges, adjacency, used, tolerance) else {
            tracing::warn!(edges = walk.len(), "boundary walk dead-ended before closing");
            return None;
        };
        current = next;
    }
}

/// Picks the next edge after `current` using minimum-clockwise-angle
/// selection from the reversed incoming direction.
fn pick_next_edge(
    current: usize,
    edges: &[TracedEdge],
    adjacency: &SecondaryMap<NodeId, Vec<usize>>,
    used: &[bool],
    tolerance: &Tolerance,
) -> Option<usize> {
    let incoming = edges[current].simplex.tangent_at_end();
    let reverse_angle = incoming.y.atan2(incoming.x) + PI;
    let mut best: Option<(usize, f64, f64)> = None;

    for &candidate in adjacency.get(edges[current].end)? {
        if used[candidate] {
            continue;
        }
        let simplex = &edges[candidate].simplex;
        let outgoing = simplex.tangent_at_start();
        let mut delta = normalize_angle(reverse_angle - outgoing.y.atan2(outgoing.x));
        // Doubling straight back is the last resort.
        if delta < tolerance.angle || TAU - delta < tolerance.angle {
            delta = TAU;
        }
        let length_squared = simplex.length_squared();

        let better = match best {
            None => true,
            Some((_, best_delta, best_length)) => {
                delta < best_delta - tolerance.angle
                    || ((delta - best_delta).abs() <= tolerance.angle && length_squared < best_length)
            }
        };
        if better {
            best = Some((candidate, delta, length_squared));
        }
    }

    best.map(|(idx, _, _)| idx)
}
