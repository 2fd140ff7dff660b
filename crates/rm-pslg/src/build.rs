use rm_core::Point2d;
use rm_poly::{interior_point_avoiding, map_loop, point_in_polygon, simplify_closed};
use rm_trace::Boundaries;

use crate::{Error, Pslg};

#[derive(Debug, Clone, PartialEq)]
pub struct PslgBuildConfig {
    /// Douglas-Peucker tolerance in geometric units (pixels). `0` disables
    /// simplification.
    pub tol: f64,
}

impl Default for PslgBuildConfig {
    fn default() -> Self {
        Self { tol: 0.0 }
    }
}

/// A surviving loop, kept self-contained until the final reindexing pass.
struct LoopUnit {
    loop_index: usize,
    is_hole: bool,
    points: Vec<Point2d>,
}

/// Assemble a PSLG from traced boundaries.
///
/// Loops are processed in the tracer's flat order. Each loop is mapped into
/// the geometric frame, simplified when `tol > 0`, and discarded entirely
/// when 2 or fewer vertices remain, an expected outcome for single-pixel
/// artifacts and over-simplified specks, so a silent skip rather than an
/// error.
///
/// Hole interior points are computed once all surviving loops are known:
/// each hole point must be strictly inside its hole loop and strictly
/// outside every loop nested within the hole (islands, and anything
/// deeper), so nested loops become exclusion zones for the search. A hole
/// loop with no admissible interior point means genuinely malformed
/// geometry and aborts with the loop's index.
pub fn build_pslg(
    bounds: &Boundaries,
    image_height: usize,
    cfg: &PslgBuildConfig,
) -> Result<Pslg, Error> {
    let num_outer = bounds.outer.len();
    let mut units = Vec::with_capacity(bounds.num_loops());

    for (loop_index, pixels) in bounds.outer.iter().chain(bounds.holes.iter()).enumerate() {
        let mut points = map_loop(pixels, image_height);
        if cfg.tol > 0.0 {
            points = simplify_closed(&points, cfg.tol);
        }
        if points.len() <= 2 {
            continue;
        }

        units.push(LoopUnit {
            loop_index,
            is_hole: loop_index >= num_outer,
            points,
        });
    }

    let mut hole_points: Vec<Option<Point2d>> = vec![None; units.len()];
    for (i, unit) in units.iter().enumerate() {
        if !unit.is_hole {
            continue;
        }

        // Loops never share vertices, so one vertex inside the hole polygon
        // means the whole loop is nested in it.
        let nested: Vec<&[Point2d]> = units
            .iter()
            .enumerate()
            .filter(|&(j, other)| j != i && point_in_polygon(&unit.points, other.points[0]))
            .map(|(_, other)| other.points.as_slice())
            .collect();

        let p = interior_point_avoiding(&unit.points, &nested).map_err(|source| {
            Error::DegenerateHole {
                loop_index: unit.loop_index,
                source,
            }
        })?;
        hole_points[i] = Some(p);
    }

    // Single concatenation-with-reindexing pass: per-loop indices stay
    // local until here, so filtering above cannot corrupt offsets.
    let mut pslg = Pslg::default();
    for (unit, hole_point) in units.into_iter().zip(hole_points) {
        let base = pslg.vertices.len();
        let n = unit.points.len();
        pslg.vertices.extend(unit.points);
        for k in 0..n {
            pslg.edges.push([base + k, base + (k + 1) % n]);
        }
        if let Some(p) = hole_point {
            pslg.hole_points.push(p);
        }
    }

    Ok(pslg)
}
