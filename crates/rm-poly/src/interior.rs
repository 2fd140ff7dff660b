use rm_core::Point2d;

use crate::{
    Error,
    polygon::{point_in_polygon, signed_area},
};

const AREA_EPS: f64 = 1e-12;
const SPAN_EPS: f64 = 1e-9;

/// Find a point strictly inside a simple closed polygon.
///
/// Equivalent to [`interior_point_avoiding`] with no exclusion polygons.
pub fn interior_point(poly: &[Point2d]) -> Result<Point2d, Error> {
    interior_point_avoiding(poly, &[])
}

/// Find a point strictly inside `poly` and strictly outside every polygon
/// in `avoid`.
///
/// Works for arbitrary simple polygons, convex or not: for each pair of
/// consecutive distinct vertex y-coordinates of `poly`, cast a horizontal
/// scan line through the midpoint and intersect it with the edges of `poly`
/// and of every exclusion polygon. The sorted crossings partition the line
/// into intervals of constant membership, so each interval midpoint can be
/// classified with a point-in-polygon test; the first midpoint interior to
/// `poly` and exterior to all exclusions wins. Scan lines near the vertical
/// midrange are tried first.
///
/// Fails on (near) zero-area polygons and when no admissible span wider
/// than an epsilon guard exists on any scan line.
pub fn interior_point_avoiding(poly: &[Point2d], avoid: &[&[Point2d]]) -> Result<Point2d, Error> {
    if poly.len() < 3 || signed_area(poly).abs() < AREA_EPS {
        return Err(Error::ZeroArea);
    }

    let mut ys: Vec<f64> = poly.iter().map(|p| p.y).collect();
    ys.sort_by(f64::total_cmp);
    ys.dedup();

    let y_mid = 0.5 * (ys[0] + ys[ys.len() - 1]);
    let mut scan_lines: Vec<f64> = ys
        .windows(2)
        .filter(|pair| pair[1] - pair[0] > SPAN_EPS)
        .map(|pair| 0.5 * (pair[0] + pair[1]))
        .collect();
    scan_lines.sort_by(|a, b| (a - y_mid).abs().total_cmp(&(b - y_mid).abs()));

    let mut crossings = Vec::with_capacity(poly.len());

    for scan_y in scan_lines {
        crossings.clear();
        scan_crossings(poly, scan_y, &mut crossings);
        for zone in avoid {
            scan_crossings(zone, scan_y, &mut crossings);
        }

        if crossings.len() < 2 {
            continue;
        }
        crossings.sort_by(f64::total_cmp);

        for pair in crossings.windows(2) {
            let (x_lo, x_hi) = (pair[0], pair[1]);
            if x_hi - x_lo <= SPAN_EPS {
                continue;
            }
            let p = Point2d::new(0.5 * (x_lo + x_hi), scan_y);
            if point_in_polygon(poly, p) && !avoid.iter().any(|zone| point_in_polygon(zone, p)) {
                return Ok(p);
            }
        }
    }

    Err(Error::NoInteriorSpan)
}

/// Push the x-coordinates where the horizontal line at `scan_y` crosses the
/// polygon's edges.
fn scan_crossings(poly: &[Point2d], scan_y: f64, out: &mut Vec<f64>) {
    let n = poly.len();
    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        if (a.y > scan_y) != (b.y > scan_y) {
            let t = (scan_y - a.y) / (b.y - a.y);
            out.push(a.x + t * (b.x - a.x));
        }
    }
}
