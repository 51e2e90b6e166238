use super::arc_2d::{angle_to_arc_param, arc_point_at, ArcParams};
use super::{Point2, Tolerance, Vector2};

/// An intersection between two curves: the shared point and the local
/// parameter (in `[0, 1]`) on each curve.
pub type Hit2d = (Point2, f64, f64);

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
    tol: &Tolerance,
) -> Option<(f64, f64)> {
    let cross = d1.perp(d2);
    if cross.abs() <= tol.angle * d1.norm() * d2.norm() {
        return None;
    }
    let delta = p2 - p1;
    let t = delta.perp(d2) / cross;
    let u = delta.perp(d1) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Crossing segments give one hit. Collinear overlapping segments give
/// the endpoints of the shared stretch (each endpoint of one segment that
/// lies on the other). Parallel disjoint segments give nothing.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    tol: &Tolerance,
) -> Vec<Hit2d> {
    let da = a1 - a0;
    let db = b1 - b0;
    let len_a = da.norm();
    let len_b = db.norm();
    if len_a < tol.distance || len_b < tol.distance {
        return Vec::new();
    }

    let Some((t, u)) = line_line_intersect_2d(a0, &da, b0, &db, tol) else {
        return collinear_overlap(a0, a1, b0, b1, tol);
    };

    // Widen the accepted range by the distance tolerance so endpoints count.
    let eps_a = tol.distance / len_a;
    let eps_b = tol.distance / len_b;
    if t >= -eps_a && t <= 1.0 + eps_a && u >= -eps_b && u <= 1.0 + eps_b {
        let t = t.clamp(0.0, 1.0);
        vec![(a0 + da * t, t, u.clamp(0.0, 1.0))]
    } else {
        Vec::new()
    }
}

/// Endpoints of the shared stretch of two parallel segments, if they are
/// collinear and overlap.
fn collinear_overlap(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2, tol: &Tolerance) -> Vec<Hit2d> {
    let da = a1 - a0;
    let db = b1 - b0;
    let len_a = da.norm();
    let len_b = db.norm();

    // Offset of b0 from the carrier line of a.
    if (b0 - a0).perp(&da).abs() / len_a > tol.distance {
        return Vec::new();
    }

    let param_on_a = |p: &Point2| (p - a0).dot(&da) / (len_a * len_a);
    let param_on_b = |p: &Point2| (p - b0).dot(&db) / (len_b * len_b);
    let eps_a = tol.distance / len_a;
    let eps_b = tol.distance / len_b;

    let mut hits = Vec::new();
    for (p, u) in [(b0, 0.0), (b1, 1.0)] {
        let t = param_on_a(p);
        if t >= -eps_a && t <= 1.0 + eps_a {
            hits.push((*p, t.clamp(0.0, 1.0), u));
        }
    }
    for (p, t) in [(a0, 0.0), (a1, 1.0)] {
        let u = param_on_b(p);
        if u >= -eps_b && u <= 1.0 + eps_b {
            hits.push((*p, t, u.clamp(0.0, 1.0)));
        }
    }
    hits
}

/// Intersection of a line segment with a circular arc in 2D.
///
/// Returns a vector of `(point, t_seg, t_arc)` where both parameters are
/// in `[0, 1]`. A tangent line gives a single hit.
#[must_use]
pub fn line_arc_intersect_2d(a0: &Point2, a1: &Point2, arc: &ArcParams, tol: &Tolerance) -> Vec<Hit2d> {
    let mut results = Vec::new();
    if arc.radius < tol.distance || arc.sweep.abs() < tol.angle {
        return results;
    }

    let d = a1 - a0;
    let len = d.norm();
    if len < tol.distance {
        return results;
    }
    let dir = d / len;

    // Foot of the perpendicular from the center onto the carrier line.
    let s_foot = (arc.center - a0).dot(&dir);
    let foot = a0 + dir * s_foot;
    let dist = (arc.center - foot).norm();
    if dist > arc.radius + tol.distance {
        return results;
    }

    let half_chord = (arc.radius * arc.radius - dist * dist).max(0.0).sqrt();
    let roots = if half_chord < tol.distance {
        vec![s_foot]
    } else {
        vec![s_foot - half_chord, s_foot + half_chord]
    };

    let eps_seg = tol.distance / len;
    let eps_angle = arc_angle_eps(arc, tol);
    for s in roots {
        let t_seg = s / len;
        if t_seg < -eps_seg || t_seg > 1.0 + eps_seg {
            continue;
        }
        let t_seg = t_seg.clamp(0.0, 1.0);
        let p = a0 + d * t_seg;

        // Check if point is within the arc's angular range.
        let angle = (p.y - arc.center.y).atan2(p.x - arc.center.x);
        if let Some(t_arc) = angle_to_arc_param(angle, arc.start_angle, arc.sweep, eps_angle) {
            results.push((p, t_seg, t_arc));
        }
    }

    results
}

/// Intersection of two circular arcs in 2D.
///
/// Returns a vector of `(point, t1, t2)` where `t1` and `t2` are arc
/// parameters in `[0, 1]`. Coincident arcs (same circle) give the
/// endpoints of their shared stretch.
#[must_use]
pub fn arc_arc_intersect_2d(arc1: &ArcParams, arc2: &ArcParams, tol: &Tolerance) -> Vec<Hit2d> {
    let mut results = Vec::new();
    if arc1.radius < tol.distance || arc2.radius < tol.distance {
        return results;
    }

    let delta = arc2.center - arc1.center;
    let dist_sq = delta.norm_squared();
    let dist = dist_sq.sqrt();
    let (r1, r2) = (arc1.radius, arc2.radius);

    if dist < tol.distance {
        if (r1 - r2).abs() < tol.distance {
            return coincident_arc_overlap(arc1, arc2, tol);
        }
        // Concentric circles of different radii never meet.
        return results;
    }

    // Check if circles intersect.
    if dist > r1 + r2 + tol.distance || dist < (r1 - r2).abs() - tol.distance {
        return results;
    }

    // Distance from c1 along the line c1→c2 to the radical line.
    let a = (r1 * r1 - r2 * r2 + dist_sq) / (2.0 * dist);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();
    let axis = delta / dist;
    let mid = arc1.center + axis * a;
    let perp = Vector2::new(-axis.y, axis.x);

    // Two candidate intersection points (or one if tangent).
    let candidates = if h < tol.distance {
        vec![mid]
    } else {
        vec![mid + perp * h, mid - perp * h]
    };

    let eps1 = arc_angle_eps(arc1, tol);
    let eps2 = arc_angle_eps(arc2, tol);
    for p in candidates {
        let angle1 = (p.y - arc1.center.y).atan2(p.x - arc1.center.x);
        let angle2 = (p.y - arc2.center.y).atan2(p.x - arc2.center.x);

        let t1 = angle_to_arc_param(angle1, arc1.start_angle, arc1.sweep, eps1);
        let t2 = angle_to_arc_param(angle2, arc2.start_angle, arc2.sweep, eps2);
        if let (Some(t1), Some(t2)) = (t1, t2) {
            results.push((p, t1, t2));
        }
    }

    results
}

/// Endpoints of the shared stretch of two arcs on the same circle.
fn coincident_arc_overlap(arc1: &ArcParams, arc2: &ArcParams, tol: &Tolerance) -> Vec<Hit2d> {
    let eps1 = arc_angle_eps(arc1, tol);
    let eps2 = arc_angle_eps(arc2, tol);
    let mut hits = Vec::new();

    for t2 in [0.0, 1.0] {
        let angle = arc2.start_angle + arc2.sweep * t2;
        if let Some(t1) = angle_to_arc_param(angle, arc1.start_angle, arc1.sweep, eps1) {
            let p = arc_point_at(&arc2.center, arc2.radius, arc2.start_angle, arc2.sweep, t2);
            hits.push((p, t1, t2));
        }
    }
    for t1 in [0.0, 1.0] {
        let angle = arc1.start_angle + arc1.sweep * t1;
        if let Some(t2) = angle_to_arc_param(angle, arc2.start_angle, arc2.sweep, eps2) {
            let p = arc_point_at(&arc1.center, arc1.radius, arc1.start_angle, arc1.sweep, t1);
            hits.push((p, t1, t2));
        }
    }
    hits
}

/// Angular slack on an arc equivalent to the distance tolerance.
fn arc_angle_eps(arc: &ArcParams, tol: &Tolerance) -> f64 {
    tol.angle.max(tol.distance / arc.radius)
}
