//! Polygon-level building blocks of the raster-mesh pipeline.
//!
//! - [`pixel_to_geom`]/[`map_loop`]: pixel indices to the y-up geometric
//!   frame with pixel centers at half-integer offsets.
//! - [`simplify_closed`]: Douglas-Peucker reduction of a closed polygon.
//! - [`interior_point`]/[`interior_point_avoiding`]: one point strictly
//!   inside a simple polygon, for arbitrary (including non-convex) shapes,
//!   optionally kept clear of exclusion polygons.
//!
//! Polygons are open sequences of distinct vertices, implicitly closed.

mod interior;
mod map;
mod polygon;
mod simplify;

pub use interior::{interior_point, interior_point_avoiding};
pub use map::{geom_to_pixel, map_loop, pixel_to_geom};
pub use polygon::{point_in_polygon, signed_area};
pub use simplify::simplify_closed;

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    ZeroArea,
    NoInteriorSpan,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroArea => write!(f, "polygon has (near) zero area"),
            Self::NoInteriorSpan => write!(f, "no interior span found on any scan line"),
        }
    }
}

impl std::error::Error for Error {}
