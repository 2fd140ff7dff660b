use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::{GrayImage, Rgb, RgbImage};
use raster_mesh::{MeshOptions, MeshResult, mesh_from_mask};
use rm_core::Image;
use rm_pslg::{MeshingDirective, Pslg, PslgBuildConfig, build_pslg};
use rm_trace::{Boundaries, BoundaryTracer, PixelLoop, SuzukiAbe};

#[derive(Parser, Debug)]
#[command(name = "rm_gallery")]
#[command(about = "Run the raster-mesh pipeline stages on image fixtures")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Trace foreground boundaries and dump the loops
    #[command(name = "trace")]
    Trace(TraceArgs),
    /// Assemble the planar straight-line graph and dump it
    #[command(name = "pslg")]
    Pslg(PslgArgs),
    /// Run the full pipeline and dump the triangle mesh
    #[command(name = "mesh")]
    Mesh(MeshArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out")]
    out: PathBuf,
    /// Pixels with value >= threshold are foreground
    #[arg(long, default_value_t = 128)]
    threshold: u8,
}

#[derive(Args, Debug, Clone)]
struct TraceArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
struct PslgArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Douglas-Peucker simplification tolerance (0 keeps every traced pixel)
    #[arg(long, default_value_t = 0.0)]
    tol: f64,
}

#[derive(Args, Debug, Clone)]
struct MeshArgs {
    #[command(flatten)]
    common: CommonArgs,
    #[arg(long, default_value_t = 0.0)]
    tol: f64,
    /// Minimum interior angle in degrees (overrides the derived directive)
    #[arg(long)]
    min_angle: Option<f64>,
    /// Maximum triangle area (overrides the derived directive)
    #[arg(long)]
    max_area: Option<f64>,
    /// Suppress per-stage progress output
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[derive(Debug, Clone, serde::Serialize)]
struct LoopDto {
    points: Vec<[i32; 2]>,
}

#[derive(Debug, Clone, serde::Serialize)]
struct BoundariesDto {
    width: usize,
    height: usize,
    outer: Vec<LoopDto>,
    holes: Vec<LoopDto>,
}

#[derive(Debug, Clone, serde::Serialize)]
struct PslgDto {
    vertices: Vec<[f64; 2]>,
    edges: Vec<[usize; 2]>,
    hole_points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, serde::Serialize)]
struct MeshDto {
    vertices: Vec<[f64; 2]>,
    triangles: Vec<[usize; 3]>,
}

#[derive(Debug, Clone, serde::Serialize)]
struct MetaMesh {
    tol: f64,
    directive: String,
    pslg_vertices: usize,
    pslg_edges: usize,
    pslg_holes: usize,
    mesh_vertices: usize,
    mesh_triangles: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::Trace(args) => run_trace(args),
        Command::Pslg(args) => run_pslg(args),
        Command::Mesh(args) => run_mesh(args),
    }
}

fn run_trace(args: TraceArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "trace")?;
    let mask = load_mask(&args.common.input, args.common.threshold)?;

    let bounds = SuzukiAbe.trace(&mask);
    println!(
        "traced {} outer loop(s), {} hole loop(s)",
        bounds.outer.len(),
        bounds.holes.len()
    );

    write_json(case_dir.join("boundaries.json"), &boundaries_dto(&mask, &bounds))?;
    Ok(())
}

fn run_pslg(args: PslgArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "pslg")?;
    let mask = load_mask(&args.common.input, args.common.threshold)?;

    let bounds = SuzukiAbe.trace(&mask);
    let pslg = build_pslg(&bounds, mask.height(), &PslgBuildConfig { tol: args.tol })
        .context("assembling pslg")?;
    println!(
        "pslg: {} vertices, {} edges, {} hole point(s)",
        pslg.vertices.len(),
        pslg.edges.len(),
        pslg.hole_points.len()
    );

    write_json(case_dir.join("pslg.json"), &pslg_dto(&pslg))?;
    Ok(())
}

fn run_mesh(args: MeshArgs) -> Result<()> {
    let case_dir = prepare_case(&args.common, "mesh")?;
    let mask = load_mask(&args.common.input, args.common.threshold)?;

    let directive = match (args.min_angle, args.max_area) {
        (None, None) => None,
        (min_angle, max_area) => Some(MeshingDirective {
            min_angle_deg: min_angle.unwrap_or(rm_pslg::DEFAULT_MIN_ANGLE_DEG),
            max_area,
            quiet: args.quiet,
        }),
    };
    let options = MeshOptions {
        tol: args.tol,
        directive,
    };

    let result = mesh_from_mask(&mask, &options).context("meshing input mask")?;
    if !args.quiet {
        println!(
            "mesh: {} vertices, {} triangles (directive {})",
            result.mesh.vertices.len(),
            result.mesh.triangles.len(),
            result.directive
        );
    }

    write_json(
        case_dir.join("mesh.json"),
        &MeshDto {
            vertices: result.mesh.vertices.iter().map(|v| [v.x, v.y]).collect(),
            triangles: result.mesh.triangles.clone(),
        },
    )?;
    write_json(case_dir.join("pslg.json"), &pslg_dto(&result.pslg))?;
    write_json(
        case_dir.join("meta.json"),
        &MetaMesh {
            tol: args.tol,
            directive: result.directive.to_string(),
            pslg_vertices: result.pslg.vertices.len(),
            pslg_edges: result.pslg.edges.len(),
            pslg_holes: result.pslg.hole_points.len(),
            mesh_vertices: result.mesh.vertices.len(),
            mesh_triangles: result.mesh.triangles.len(),
        },
    )?;

    let overlay = render_mesh_overlay(&mask, &result);
    overlay
        .save(case_dir.join("overlay.png"))
        .context("writing mesh overlay.png")?;

    Ok(())
}

fn prepare_case(common: &CommonArgs, case_name: &str) -> Result<PathBuf> {
    ensure_file_exists(&common.input, "input")?;

    let case_dir = common.out.join(case_name);
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;

    fs::copy(&common.input, case_dir.join("input.png")).with_context(|| {
        format!(
            "copying input {} -> {}",
            common.input.display(),
            case_dir.join("input.png").display()
        )
    })?;

    Ok(case_dir)
}

fn load_mask(path: &Path, threshold: u8) -> Result<Image<u8>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let luma = dyn_img.to_luma8();
    let (w, h) = luma.dimensions();
    let data = luma
        .into_raw()
        .into_iter()
        .map(|v| if v >= threshold { 255 } else { 0 })
        .collect();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing mask image from {}", path.display()))
}

fn boundaries_dto(mask: &Image<u8>, bounds: &Boundaries) -> BoundariesDto {
    let loop_dto = |pixels: &PixelLoop| LoopDto {
        points: pixels.iter().map(|p| [p.x, p.y]).collect(),
    };
    BoundariesDto {
        width: mask.width(),
        height: mask.height(),
        outer: bounds.outer.iter().map(loop_dto).collect(),
        holes: bounds.holes.iter().map(loop_dto).collect(),
    }
}

fn pslg_dto(pslg: &Pslg) -> PslgDto {
    PslgDto {
        vertices: pslg.vertices.iter().map(|v| [v.x, v.y]).collect(),
        edges: pslg.edges.clone(),
        hole_points: pslg.hole_points.iter().map(|p| [p.x, p.y]).collect(),
    }
}

fn render_mesh_overlay(mask: &Image<u8>, result: &MeshResult) -> RgbImage {
    let gray = GrayImage::from_raw(
        mask.width() as u32,
        mask.height() as u32,
        mask.data().to_vec(),
    )
    .expect("dimensions and data length must match");
    let mut rgb = image::DynamicImage::ImageLuma8(gray).to_rgb8();

    let h = mask.height() as f64;
    // Geometric (x, y) back to pixel coordinates: the y axis points up and
    // vertices sit on pixel centers.
    let to_px = |x: f64, y: f64| (x - 0.5, h - y - 0.5);

    for &[a, b, c] in &result.mesh.triangles {
        for (i, j) in [(a, b), (b, c), (c, a)] {
            let p = result.mesh.vertices[i];
            let q = result.mesh.vertices[j];
            let (x0, y0) = to_px(p.x, p.y);
            let (x1, y1) = to_px(q.x, q.y);
            draw_line(&mut rgb, x0, y0, x1, y1, Rgb([64, 160, 255]));
        }
    }
    for v in &result.pslg.vertices {
        let (x, y) = to_px(v.x, v.y);
        draw_dot(&mut rgb, x, y, Rgb([255, 64, 64]));
    }

    rgb
}

fn draw_line(img: &mut RgbImage, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb<u8>) {
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = (x0 + t * (x1 - x0)).round() as i64;
        let y = (y0 + t * (y1 - y0)).round() as i64;
        if x < 0 || y < 0 {
            continue;
        }
        let (ux, uy) = (x as u32, y as u32);
        if ux >= img.width() || uy >= img.height() {
            continue;
        }
        img.put_pixel(ux, uy, color);
    }
}

fn draw_dot(img: &mut RgbImage, x: f64, y: f64, color: Rgb<u8>) {
    let xi = x.round() as i32;
    let yi = y.round() as i32;

    for dy in -1..=1 {
        for dx in -1..=1 {
            let nx = xi + dx;
            let ny = yi + dy;
            if nx < 0 || ny < 0 {
                continue;
            }
            let (ux, uy) = (nx as u32, ny as u32);
            if ux >= img.width() || uy >= img.height() {
                continue;
            }
            img.put_pixel(ux, uy, color);
        }
    }
}

fn write_json(path: PathBuf, value: &impl serde::Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
