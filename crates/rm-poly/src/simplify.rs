use rm_core::Point2d;

/// Squared distance from `p` to the segment `a`-`b`.
fn point_segment_dist2(p: Point2d, a: Point2d, b: Point2d) -> f64 {
    let ab = b - a;
    let denom = ab.dot(ab);
    if denom == 0.0 {
        return p.dist2(a);
    }

    let t = (p - a).dot(ab) / denom;
    if t <= 0.0 {
        p.dist2(a)
    } else if t >= 1.0 {
        p.dist2(b)
    } else {
        p.dist2(a + ab * t)
    }
}

fn rdp_rec(points: &[Point2d], tol2: f64, start_i: usize, end_i: usize, out: &mut Vec<Point2d>) {
    debug_assert!(start_i < end_i && end_i < points.len());

    let start = points[start_i];
    let end = points[end_i];

    let mut max_d2 = 0.0f64;
    let mut split = None;
    for i in start_i + 1..end_i {
        let d2 = point_segment_dist2(points[i], start, end);
        if d2 > max_d2 {
            max_d2 = d2;
            split = Some(i);
        }
    }

    if max_d2 > tol2 {
        let mid = split.expect("split index exists when max_d2 > 0");
        rdp_rec(points, tol2, start_i, mid, out);
        rdp_rec(points, tol2, mid, end_i, out);
    } else {
        // Only endpoints are pushed in base cases, so no duplicates.
        out.push(end);
    }
}

/// Douglas-Peucker simplification of a closed polygon.
///
/// `points` is the open representation of the loop (first and last vertices
/// distinct, implicitly connected). `tol == 0` is the identity. For
/// `tol > 0` the loop is closed explicitly before recursion and the
/// duplicated closing point dropped from the result, so the returned
/// sequence is again the open representation. The result never has fewer
/// than 2 points; rejecting loops that degenerate below 3 is the caller's
/// decision.
pub fn simplify_closed(points: &[Point2d], tol: f64) -> Vec<Point2d> {
    if tol <= 0.0 || points.len() <= 2 {
        return points.to_vec();
    }

    let mut ring = Vec::with_capacity(points.len() + 1);
    ring.extend_from_slice(points);
    ring.push(points[0]);

    let mut kept = Vec::with_capacity(ring.len());
    kept.push(ring[0]);
    rdp_rec(&ring, tol * tol, 0, ring.len() - 1, &mut kept);

    // Drop the explicit closing point again.
    if kept.len() > 1 {
        kept.pop();
    }

    if kept.len() < 2 {
        // Everything collapsed onto the anchor; keep the farthest vertex so
        // the loop never drops below 2 points.
        let far = points
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| points[0].dist2(**a).total_cmp(&points[0].dist2(**b)))
            .map(|(i, _)| i)
            .unwrap_or(0);
        return vec![points[0], points[far]];
    }

    kept
}
