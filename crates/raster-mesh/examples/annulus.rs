//! Example: mesh a synthetic annulus mask.
//!
//! Builds a square foreground block with a square hole, runs the full
//! pipeline (trace, simplify, PSLG, triangulate), and writes the resulting
//! mesh to a JSON file. Timing is printed to stdout.
//!
//! Run from the workspace root:
//!   cargo run -p raster-mesh --example annulus -- --help
//!   cargo run -p raster-mesh --example annulus

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use raster_mesh::{Image, MeshOptions, mesh_from_mask};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Mesh a synthetic annulus mask and dump the mesh as JSON")]
struct Args {
    /// Mask side length in pixels
    #[arg(long, default_value_t = 128)]
    size: usize,

    /// Douglas-Peucker simplification tolerance (0 keeps every traced pixel)
    #[arg(long, default_value_t = 0.5)]
    tol: f64,

    /// Output JSON path
    #[arg(long, default_value = "annulus_mesh.json")]
    out: String,
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct VertexDto {
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct MeshDto {
    vertices: Vec<VertexDto>,
    triangles: Vec<[usize; 3]>,
    pslg_vertices: usize,
    pslg_edges: usize,
    pslg_holes: usize,
    elapsed_ms: f64,
}

/// Square block spanning the middle of the mask, with a centered square hole
/// a third of its side.
fn annulus_mask(size: usize) -> Image<u8> {
    let lo = size / 8;
    let hi = size - lo;
    let hole_lo = size / 3;
    let hole_hi = size - hole_lo;
    let mut mask = Image::new_fill(size, size, 0u8);
    for y in lo..hi {
        for x in lo..hi {
            let in_hole = (hole_lo..hole_hi).contains(&x) && (hole_lo..hole_hi).contains(&y);
            if !in_hole {
                if let Some(p) = mask.get_mut(x, y) {
                    *p = 255;
                }
            }
        }
    }
    mask
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mask = annulus_mask(args.size);
    let options = MeshOptions {
        tol: args.tol,
        directive: None,
    };

    let t0 = Instant::now();
    let result = mesh_from_mask(&mask, &options).context("meshing annulus mask")?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    println!(
        "{}x{} mask, tol={}: {} vertices, {} triangles  ({elapsed_ms:.2} ms)",
        args.size,
        args.size,
        args.tol,
        result.mesh.vertices.len(),
        result.mesh.triangles.len()
    );
    println!(
        "pslg: {} vertices, {} edges, {} hole point(s), directive {}",
        result.pslg.vertices.len(),
        result.pslg.edges.len(),
        result.pslg.hole_points.len(),
        result.directive
    );

    let dto = MeshDto {
        vertices: result
            .mesh
            .vertices
            .iter()
            .map(|v| VertexDto { x: v.x, y: v.y })
            .collect(),
        triangles: result.mesh.triangles.clone(),
        pslg_vertices: result.pslg.vertices.len(),
        pslg_edges: result.pslg.edges.len(),
        pslg_holes: result.pslg.hole_points.len(),
        elapsed_ms,
    };

    let out_file =
        std::fs::File::create(&args.out).with_context(|| format!("creating {}", args.out))?;
    serde_json::to_writer_pretty(out_file, &dto)
        .with_context(|| format!("writing JSON to {}", args.out))?;

    println!("mesh written to {}", args.out);
    Ok(())
}
