use rm_core::Point2d;

/// Shoelace area of an implicitly closed polygon. Positive for
/// counter-clockwise traversal.
pub fn signed_area(poly: &[Point2d]) -> f64 {
    if poly.len() < 3 {
        return 0.0;
    }

    let mut acc = 0.0;
    let n = poly.len();
    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        acc += a.x * b.y - b.x * a.y;
    }
    0.5 * acc
}

/// Even-odd point-in-polygon test. Points exactly on the boundary are not
/// guaranteed either way.
pub fn point_in_polygon(poly: &[Point2d], p: Point2d) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = poly[i];
        let b = poly[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
