use core::fmt;

use rm_core::Image;
use rm_pslg::{MeshingDirective, Pslg, PslgBuildConfig, build_pslg, default_directive};
use rm_trace::{BoundaryTracer, SuzukiAbe};
use rm_tri::{Mesh, triangulate};

use crate::options::MeshOptions;

/// Everything the pipeline produced: the triangle mesh, the PSLG it was
/// built from, and the quality directive that was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshResult {
    pub mesh: Mesh,
    pub pslg: Pslg,
    pub directive: MeshingDirective,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Pslg(rm_pslg::Error),
    Triangulation(rm_tri::Error),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Pslg(err) => write!(f, "pslg assembly failed: {err}"),
            PipelineError::Triangulation(err) => write!(f, "triangulation failed: {err}"),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Pslg(err) => Some(err),
            PipelineError::Triangulation(err) => Some(err),
        }
    }
}

impl From<rm_pslg::Error> for PipelineError {
    fn from(err: rm_pslg::Error) -> Self {
        PipelineError::Pslg(err)
    }
}

impl From<rm_tri::Error> for PipelineError {
    fn from(err: rm_tri::Error) -> Self {
        PipelineError::Triangulation(err)
    }
}

/// Mesh a binary mask with the default boundary tracer. Nonzero pixels are
/// foreground.
pub fn mesh_from_mask(mask: &Image<u8>, options: &MeshOptions) -> Result<MeshResult, PipelineError> {
    mesh_from_mask_with(&SuzukiAbe, mask, options)
}

/// Mesh a binary mask with a caller-supplied boundary tracer.
///
/// Runs trace, PSLG assembly, quality derivation (unless `options.directive`
/// is set), and constrained Delaunay triangulation in order; the first
/// failing stage aborts the pipeline.
pub fn mesh_from_mask_with<T: BoundaryTracer>(
    tracer: &T,
    mask: &Image<u8>,
    options: &MeshOptions,
) -> Result<MeshResult, PipelineError> {
    let boundaries = tracer.trace(mask);
    let cfg = PslgBuildConfig { tol: options.tol };
    let pslg = build_pslg(&boundaries, mask.height(), &cfg)?;
    let directive = match &options.directive {
        Some(directive) => directive.clone(),
        None => default_directive(&pslg)?,
    };
    let mesh = triangulate(&pslg, &directive)?;
    Ok(MeshResult { mesh, pslg, directive })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use rm_core::{Image, Point2d};
    use rm_poly::point_in_polygon;
    use rm_trace::{Boundaries, BoundaryTracer, SuzukiAbe};

    use super::{MeshOptions, PipelineError, mesh_from_mask, mesh_from_mask_with};
    use crate::options::{OptionError, OptionValue};

    fn block_mask(w: usize, h: usize, x0: usize, y0: usize, x1: usize, y1: usize) -> Image<u8> {
        let mut img = Image::new_fill(w, h, 0u8);
        for y in y0..y1 {
            for x in x0..x1 {
                if let Some(p) = img.get_mut(x, y) {
                    *p = 255;
                }
            }
        }
        img
    }

    /// Records how often it is invoked; used to show that option validation
    /// happens before any tracing work.
    struct CountingTracer {
        calls: Cell<usize>,
    }

    impl BoundaryTracer for CountingTracer {
        fn trace(&self, mask: &Image<u8>) -> Boundaries {
            self.calls.set(self.calls.get() + 1);
            SuzukiAbe.trace(mask)
        }
    }

    #[test]
    fn solid_block_produces_a_mesh() {
        let mask = block_mask(12, 12, 2, 2, 10, 10);
        let result = mesh_from_mask(&mask, &MeshOptions::default()).expect("meshable mask");
        assert!(!result.mesh.is_empty());
        assert!(!result.pslg.edges.is_empty());
        assert!(result.directive.max_area.is_some());
    }

    #[test]
    fn all_background_fails_before_triangulation() {
        let mask = Image::new_fill(8, 8, 0u8);
        let err = mesh_from_mask(&mask, &MeshOptions::default()).unwrap_err();
        assert_eq!(err, PipelineError::Pslg(rm_pslg::Error::EmptyEdgeSet));
    }

    #[test]
    fn unknown_option_rejected_before_tracer_runs() {
        let tracer = CountingTracer { calls: Cell::new(0) };
        let err = MeshOptions::from_pairs([("smoothing", OptionValue::Number(1.0))]).unwrap_err();
        assert_eq!(err, OptionError::Unknown { name: "smoothing".into() });
        // No options, no pipeline run; the tracer was never consulted.
        assert_eq!(tracer.calls.get(), 0);

        let mask = block_mask(10, 10, 1, 1, 9, 9);
        let opts = MeshOptions::from_pairs([("tol", OptionValue::Number(0.1))]).unwrap();
        mesh_from_mask_with(&tracer, &mask, &opts).expect("meshable mask");
        assert_eq!(tracer.calls.get(), 1);
    }

    #[test]
    fn explicit_directive_is_used_verbatim() {
        let mask = block_mask(10, 10, 1, 1, 9, 9);
        let directive = rm_pslg::MeshingDirective {
            min_angle_deg: 25.0,
            max_area: Some(0.75),
            quiet: false,
        };
        let opts = MeshOptions {
            tol: 0.0,
            directive: Some(directive.clone()),
        };
        let result = mesh_from_mask(&mask, &opts).expect("meshable mask");
        assert_eq!(result.directive, directive);
    }

    #[test]
    fn island_inside_a_hole_keeps_its_triangles() {
        // Foreground block, hole punched in, island floating in the hole.
        // The hole region must be carved while the island stays meshed.
        let mut mask = block_mask(100, 100, 10, 10, 85, 85);
        for y in 20..70 {
            for x in 20..40 {
                if let Some(p) = mask.get_mut(x, y) {
                    *p = 0;
                }
            }
        }
        for y in 40..50 {
            for x in 25..35 {
                if let Some(p) = mask.get_mut(x, y) {
                    *p = 255;
                }
            }
        }

        let result = mesh_from_mask(&mask, &MeshOptions::default()).expect("meshable mask");
        assert_eq!(result.pslg.hole_points.len(), 1);

        // Island pixel centers span x in [25.5, 34.5], y in [50.5, 59.5].
        let island = vec![
            Point2d::new(25.5, 50.5),
            Point2d::new(34.5, 50.5),
            Point2d::new(34.5, 59.5),
            Point2d::new(25.5, 59.5),
        ];
        let hp = result.pslg.hole_points[0];
        assert!(!point_in_polygon(&island, hp), "hole point {hp:?} inside the island");

        let mut island_triangles = 0;
        for &[a, b, c] in &result.mesh.triangles {
            let (pa, pb, pc) = (
                result.mesh.vertices[a],
                result.mesh.vertices[b],
                result.mesh.vertices[c],
            );
            let centroid =
                Point2d::new((pa.x + pb.x + pc.x) / 3.0, (pa.y + pb.y + pc.y) / 3.0);
            if point_in_polygon(&island, centroid) {
                island_triangles += 1;
                continue;
            }
            // Outside the island, nothing may survive inside the carved
            // hole band (pixels x in [20, 40), y rows 20..70).
            let in_hole_band =
                centroid.x > 21.0 && centroid.x < 39.0 && centroid.y > 31.0 && centroid.y < 79.0;
            assert!(!in_hole_band, "triangle centroid {centroid:?} in the carved hole");
        }
        assert!(island_triangles > 0, "island region must stay meshed");
    }

    #[test]
    fn mask_with_hole_yields_hole_point() {
        let mut mask = block_mask(20, 20, 2, 2, 18, 18);
        for y in 7..13 {
            for x in 7..13 {
                if let Some(p) = mask.get_mut(x, y) {
                    *p = 0;
                }
            }
        }
        let result = mesh_from_mask(&mask, &MeshOptions::default()).expect("meshable mask");
        assert_eq!(result.pslg.hole_points.len(), 1);
        assert!(!result.mesh.is_empty());
    }
}
