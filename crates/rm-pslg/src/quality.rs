use core::fmt;

use crate::{Error, Pslg};

/// Default minimum-angle quality constraint, in degrees.
pub const DEFAULT_MIN_ANGLE_DEG: f64 = 30.0;

/// Calibration divisor applied to the mean squared edge length when deriving
/// the default maximum-area constraint. Biases the default toward finer
/// triangles than the raw mean would give; tune with care, this directly
/// sets default mesh density.
pub const AREA_DIVISOR: f64 = 2.0;

/// Quality request handed to the triangulator: minimum interior angle,
/// optional maximum triangle area, and a quiet flag for callers that report
/// progress.
///
/// Formats as a Triangle-style flag string, e.g. `q30a0.5Q`.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshingDirective {
    pub min_angle_deg: f64,
    pub max_area: Option<f64>,
    pub quiet: bool,
}

impl Default for MeshingDirective {
    fn default() -> Self {
        Self {
            min_angle_deg: DEFAULT_MIN_ANGLE_DEG,
            max_area: None,
            quiet: true,
        }
    }
}

impl fmt::Display for MeshingDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.min_angle_deg)?;
        if let Some(area) = self.max_area {
            write!(f, "a{area}")?;
        }
        if self.quiet {
            write!(f, "Q")?;
        }
        Ok(())
    }
}

/// Derive the default meshing directive from an assembled PSLG.
///
/// The maximum-area constraint is the mean squared edge length divided by
/// [`AREA_DIVISOR`]; the minimum angle is [`DEFAULT_MIN_ANGLE_DEG`]. Fails
/// on an empty edge set; a mean over zero edges must not silently become
/// NaN or zero.
pub fn default_directive(pslg: &Pslg) -> Result<MeshingDirective, Error> {
    if pslg.edges.is_empty() {
        return Err(Error::EmptyEdgeSet);
    }

    let sum: f64 = pslg
        .edges
        .iter()
        .map(|&[a, b]| pslg.vertices[a].dist2(pslg.vertices[b]))
        .sum();
    let max_area = sum / pslg.edges.len() as f64 / AREA_DIVISOR;

    Ok(MeshingDirective {
        min_angle_deg: DEFAULT_MIN_ANGLE_DEG,
        max_area: Some(max_area),
        quiet: true,
    })
}
