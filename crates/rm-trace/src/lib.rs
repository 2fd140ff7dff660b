//! Boundary tracing for binary masks.
//!
//! [`trace_boundaries`] runs Suzuki-Abe border following over a `u8` mask
//! (foreground iff value `> 0`) and returns every border as an ordered,
//! implicitly closed pixel loop, split into outer boundaries and hole
//! boundaries. Hole borders are traced on the foreground pixels surrounding
//! the background region, so a hole loop's interior contains the hole.
//!
//! The tracer works on an internal label buffer with a one-pixel zero margin,
//! so blobs touching the image edge trace correctly. Emitted coordinates are
//! in the original image frame.
//!
//! [`BoundaryTracer`] is the seam for swapping the tracer out (stubs in
//! pipeline tests); [`SuzukiAbe`] is the shipped implementation.

mod suzuki;

pub use suzuki::trace_boundaries;

use rm_core::Image;

/// Integer pixel coordinate: `x` is the column, `y` the row, zero-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

/// Ordered closed pixel loop; the last point connects back to the first.
pub type PixelLoop = Vec<PixelPoint>;

/// Traced borders of a mask, outer boundaries and hole boundaries apart.
///
/// Within each list, loops appear in raster discovery order. Downstream
/// indexing treats the flat order (all outer loops, then all hole loops)
/// as the loop processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Boundaries {
    pub outer: Vec<PixelLoop>,
    pub holes: Vec<PixelLoop>,
}

impl Boundaries {
    pub fn num_loops(&self) -> usize {
        self.outer.len() + self.holes.len()
    }
}

/// Strategy seam for boundary tracing.
pub trait BoundaryTracer {
    fn trace(&self, mask: &Image<u8>) -> Boundaries;
}

/// Suzuki-Abe border following (the default tracer).
#[derive(Debug, Clone, Copy, Default)]
pub struct SuzukiAbe;

impl BoundaryTracer for SuzukiAbe {
    fn trace(&self, mask: &Image<u8>) -> Boundaries {
        trace_boundaries(mask)
    }
}
