//! Foundational primitives for raster-to-mesh conversion.
//!
//! ## Images
//! Images are dense row-major grids owned by the container. Binary masks use
//! `u8` with the convention that a pixel is foreground iff its value is `> 0`.
//!
//! ## Geometry
//! `Point2d`/`Vec2d` use `f64` throughout. The geometric frame is y-up with
//! the origin at the image's bottom-left corner; pixel centers sit at
//! half-integer offsets (see `rm-poly` for the mapping).

mod error;
mod geom;
mod image;

pub use error::Error;
pub use geom::{Point2d, Vec2d};
pub use image::Image;
