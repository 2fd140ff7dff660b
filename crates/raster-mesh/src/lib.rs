//! Binary raster masks to quality triangle meshes.
//!
//! The pipeline traces foreground boundaries, maps them to geometric
//! coordinates, assembles a planar straight-line graph with one interior
//! point per hole, derives a meshing quality request, and triangulates with
//! a constrained Delaunay triangulation.
//!
//! ```no_run
//! use raster_mesh::{Image, MeshOptions, mesh_from_mask};
//!
//! let mask = Image::new_fill(64, 64, 255u8);
//! let result = mesh_from_mask(&mask, &MeshOptions::default())?;
//! println!("{} triangles", result.mesh.triangles.len());
//! # Ok::<(), raster_mesh::PipelineError>(())
//! ```

mod options;
mod pipeline;

pub use options::{MeshOptions, OptionError, OptionValue};
pub use pipeline::{MeshResult, PipelineError, mesh_from_mask, mesh_from_mask_with};

pub use rm_core::{Image, Point2d};
pub use rm_pslg::{MeshingDirective, Pslg, default_directive};
pub use rm_trace::{Boundaries, BoundaryTracer, SuzukiAbe};
pub use rm_tri::{Mesh, triangulate};
