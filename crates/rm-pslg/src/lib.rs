//! PSLG construction from traced boundaries.
//!
//! [`build_pslg`] turns a [`rm_trace::Boundaries`] into a planar
//! straight-line graph: per-loop mapping into the geometric frame, optional
//! Douglas-Peucker reduction, degenerate-loop rejection, cyclic edge lists
//! and one interior point per hole loop. [`default_directive`] derives the
//! meshing quality request when the caller does not supply one.
//!
//! Loops are processed in the tracer's flat order (outer loops first, then
//! hole loops), so global vertex and edge indices are deterministic.

mod build;
mod quality;

pub use build::{PslgBuildConfig, build_pslg};
pub use quality::{AREA_DIVISOR, DEFAULT_MIN_ANGLE_DEG, MeshingDirective, default_directive};

use core::fmt;

use rm_core::Point2d;

/// Planar straight-line graph: global vertices, constraint edges indexing
/// into them, and one interior point per hole region.
///
/// Invariants: every edge index is valid against `vertices`; each source
/// loop contributes a single edge cycle; loops never share vertices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pslg {
    pub vertices: Vec<Point2d>,
    pub edges: Vec<[usize; 2]>,
    pub hole_points: Vec<Point2d>,
}

impl Pslg {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A hole loop survived filtering but has no computable interior point.
    /// `loop_index` is the loop's position in the tracer's flat order.
    DegenerateHole {
        loop_index: usize,
        source: rm_poly::Error,
    },
    /// Nothing to mesh: the PSLG has no edges.
    EmptyEdgeSet,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateHole { loop_index, source } => {
                write!(f, "hole loop {loop_index} is degenerate: {source}")
            }
            Self::EmptyEdgeSet => write!(f, "empty edge set: no boundary to mesh"),
        }
    }
}

impl std::error::Error for Error {}
