#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::geometry::aabb::Aabb;
use crate::geometry::periodic::PeriodicGeometry;
use crate::geometry::simplex::Simplex;
use crate::math::disjoint_sets::minimize_ordered;
use crate::math::intersect_2d::{
    arc_arc_intersect_2d, line_arc_intersect_2d, segment_segment_intersect_2d, Hit2d,
};
use crate::math::{Point2, Tolerance};

/// A point where two boundaries meet, as a period on each of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodPair {
    pub on_lhs: f64,
    pub on_rhs: f64,
}

impl PeriodPair {
    fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.on_lhs
            .total_cmp(&other.on_lhs)
            .then(self.on_rhs.total_cmp(&other.on_rhs))
    }
}

#[derive(Debug, Clone, Copy)]
struct Hit {
    point: Point2,
    pair: PeriodPair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Lhs,
    Rhs,
}

/// Computes every point where the boundaries of `lhs` and `rhs` meet.
///
/// The result is sorted by `(on_lhs, on_rhs)`, each period wrapped into its
/// geometry's range. Hits closer than `tolerance.distance` to each other
/// are reported once, keeping the smallest pair of the cluster. Collinear
/// or co-circular overlaps report the ends of the shared stretch.
pub fn compute_intersections<A, B>(lhs: &A, rhs: &B, tolerance: &Tolerance) -> Vec<PeriodPair>
where
    A: PeriodicGeometry + ?Sized,
    B: PeriodicGeometry + ?Sized,
{
    let lhs_simplexes = lhs.all_simplexes();
    let rhs_simplexes = rhs.all_simplexes();
    let candidates = candidate_pairs(&lhs_simplexes, &rhs_simplexes, tolerance.distance);

    #[cfg(feature = "parallel")]
    let local_hits = parallel_hits(&lhs_simplexes, &rhs_simplexes, &candidates, tolerance);
    #[cfg(not(feature = "parallel"))]
    let local_hits = serial_hits(&lhs_simplexes, &rhs_simplexes, &candidates, tolerance);

    let hits = global_hits(lhs, rhs, &lhs_simplexes, &rhs_simplexes, local_hits);
    let mut pairs = deduplicate(&hits, tolerance);
    pairs.sort_by(PeriodPair::total_cmp);
    tracing::debug!(
        candidates = candidates.len(),
        hits = hits.len(),
        intersections = pairs.len(),
        "computed boundary intersections"
    );
    pairs
}

type LocalHit = (usize, usize, Hit2d);

#[cfg_attr(feature = "parallel", allow(dead_code))]
fn serial_hits(
    lhs: &[Simplex],
    rhs: &[Simplex],
    candidates: &[(usize, usize)],
    tolerance: &Tolerance,
) -> Vec<LocalHit> {
    candidates
        .iter()
        .flat_map(|&(i, j)| {
            simplex_hits(&lhs[i], &rhs[j], tolerance)
                .into_iter()
                .map(move |hit| (i, j, hit))
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn parallel_hits(
    lhs: &[Simplex],
    rhs: &[Simplex],
    candidates: &[(usize, usize)],
    tolerance: &Tolerance,
) -> Vec<LocalHit> {
    candidates
        .par_iter()
        .flat_map_iter(|&(i, j)| {
            simplex_hits(&lhs[i], &rhs[j], tolerance)
                .into_iter()
                .map(move |hit| (i, j, hit))
        })
        .collect()
}

/// Maps local simplex parameters to wrapped geometry periods.
fn global_hits<A, B>(
    lhs: &A,
    rhs: &B,
    lhs_simplexes: &[Simplex],
    rhs_simplexes: &[Simplex],
    local_hits: Vec<LocalHit>,
) -> Vec<Hit>
where
    A: PeriodicGeometry + ?Sized,
    B: PeriodicGeometry + ?Sized,
{
    local_hits
        .into_iter()
        .map(|(i, j, (point, t_a, t_b))| Hit {
            point,
            pair: PeriodPair {
                on_lhs: lhs.normalize_period(lhs_simplexes[i].period_at(t_a)),
                on_rhs: rhs.normalize_period(rhs_simplexes[j].period_at(t_b)),
            },
        })
        .collect()
}

/// Sweep-and-prune broad phase: index pairs `(lhs, rhs)` whose bounding
/// boxes overlap, sorted.
fn candidate_pairs(lhs: &[Simplex], rhs: &[Simplex], margin: f64) -> Vec<(usize, usize)> {
    let mut entries: Vec<(Aabb, Side, usize)> = lhs
        .iter()
        .enumerate()
        .map(|(i, s)| (s.bounding_box(), Side::Lhs, i))
        .chain(rhs.iter().enumerate().map(|(i, s)| (s.bounding_box(), Side::Rhs, i)))
        .collect();
    entries.sort_by(|a, b| a.0.min.x.total_cmp(&b.0.min.x));

    let mut active: Vec<usize> = Vec::new();
    let mut pairs = Vec::new();
    for (index, (aabb, side, simplex)) in entries.iter().enumerate() {
        active.retain(|&k| entries[k].0.max.x + margin >= aabb.min.x);
        for &k in &active {
            let (other_aabb, other_side, other_simplex) = &entries[k];
            if other_side == side || !other_aabb.overlaps(aabb, margin) {
                continue;
            }
            pairs.push(match side {
                Side::Lhs => (*simplex, *other_simplex),
                Side::Rhs => (*other_simplex, *simplex),
            });
        }
        active.push(index);
    }
    pairs.sort_unstable();
    pairs
}

/// Narrow phase for one simplex pair; parameters are local to each simplex.
fn simplex_hits(a: &Simplex, b: &Simplex, tolerance: &Tolerance) -> Vec<Hit2d> {
    match (a, b) {
        (Simplex::Line(_), Simplex::Line(_)) => {
            segment_segment_intersect_2d(&a.start(), &a.end(), &b.start(), &b.end(), tolerance)
        }
        (Simplex::Line(_), Simplex::Arc(arc)) => {
            line_arc_intersect_2d(&a.start(), &a.end(), &arc.params(), tolerance)
        }
        (Simplex::Arc(arc), Simplex::Line(_)) => {
            // line_arc returns (point, t_line, t_arc); we need (point, t_arc, t_line).
            line_arc_intersect_2d(&b.start(), &b.end(), &arc.params(), tolerance)
                .into_iter()
                .map(|(p, t_line, t_arc)| (p, t_arc, t_line))
                .collect()
        }
        (Simplex::Arc(arc_a), Simplex::Arc(arc_b)) => {
            arc_arc_intersect_2d(&arc_a.params(), &arc_b.params(), tolerance)
        }
    }
}

/// Clusters hits that share a location and keeps one pair per cluster.
fn deduplicate(hits: &[Hit], tolerance: &Tolerance) -> Vec<PeriodPair> {
    let mut order: Vec<usize> = (0..hits.len()).collect();
    order.sort_by(|&a, &b| hits[a].point.x.total_cmp(&hits[b].point.x));

    let mut neighbours: Vec<Vec<usize>> = (0..hits.len()).map(|i| vec![i]).collect();
    for (k, &i) in order.iter().enumerate() {
        for &j in &order[k + 1..] {
            if hits[j].point.x - hits[i].point.x > tolerance.distance {
                break;
            }
            if tolerance.points_coincide(&hits[i].point, &hits[j].point) {
                neighbours[i].push(j);
            }
        }
    }

    minimize_ordered(&neighbours)
        .into_iter()
        .filter_map(|cluster| {
            cluster
                .into_iter()
                .map(|i| hits[i].pair)
                .min_by(PeriodPair::total_cmp)
        })
        .collect()
}
