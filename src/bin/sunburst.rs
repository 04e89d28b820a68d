use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sunburst::{FlatNode, RawNode, Rasterizer, SunburstConfig, View, ZoomOutcome};

#[derive(Parser, Debug)]
#[command(name = "sunburst", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the settled chart as SVG.
    Svg(SvgArgs),
    /// Render the chart as PNG, optionally part-way through the last zoom.
    Png(PngArgs),
    /// Write the last zoom transition as a numbered PNG sequence.
    Frames(FramesArgs),
    /// Print the partition of every node.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input tree JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Read the input as an array of `{id, parent, name, value}` rows.
    #[arg(long, default_value_t = false)]
    flat: bool,

    /// Configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Name path to zoom into, e.g. `flare/analytics`. Repeat to zoom in sequence.
    #[arg(long = "zoom")]
    zoom: Vec<String>,
}

#[derive(Args, Debug)]
struct SvgArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PngArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Output side in pixels (defaults to the configured size).
    #[arg(long)]
    size: Option<u32>,

    /// Capture this many milliseconds into the last zoom instead of its end state.
    #[arg(long)]
    at_ms: Option<u64>,

    /// Keep the background transparent instead of white.
    #[arg(long, default_value_t = false)]
    transparent: bool,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output directory for `frame_NNNN.png`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Output side in pixels (defaults to the configured size).
    #[arg(long)]
    size: Option<u32>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    input: InputArgs,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Svg(args) => cmd_svg(args),
        Command::Png(args) => cmd_png(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// A view with every zoom applied. The last zoom starts at the returned time and is left in
/// flight; earlier ones are settled.
fn load_view(input: &InputArgs) -> anyhow::Result<(View, Duration)> {
    let config = match &input.config {
        Some(path) => SunburstConfig::from_path(path)?,
        None => SunburstConfig::default(),
    };
    let step = config.transition.duration();

    let mut view = if input.flat {
        View::from_flat(&FlatNode::rows_from_path(&input.in_path)?, config)?
    } else {
        View::from_raw(&RawNode::from_path(&input.in_path)?, config)?
    };

    let mut now = Duration::ZERO;
    let mut last_start = now;
    for path in &input.zoom {
        view.finish();
        match view.activate_path(path, now)? {
            ZoomOutcome::Zoomed { .. } => last_start = now,
            ZoomOutcome::Ignored => tracing::warn!(path = %path, "zoom target has no children"),
        }
        now += step;
    }
    Ok((view, last_start))
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn output_size(view: &View, size: Option<u32>) -> u32 {
    size.unwrap_or_else(|| view.config().size.round().max(1.0) as u32)
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let (mut view, _) = load_view(&args.input)?;
    view.finish();

    ensure_parent(&args.out)?;
    std::fs::write(&args.out, view.to_svg())
        .with_context(|| format!("write svg '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_png(args: PngArgs) -> anyhow::Result<()> {
    let (mut view, last_start) = load_view(&args.input)?;
    match args.at_ms {
        Some(ms) => {
            view.tick(last_start + Duration::from_millis(ms));
        }
        None => view.finish(),
    }

    let background = if args.transparent {
        None
    } else {
        Some([255, 255, 255, 255])
    };
    let image = Rasterizer::new().rasterize(
        &view.to_svg(),
        output_size(&view, args.size),
        background,
    )?;
    sunburst::write_png(&image, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    if args.input.zoom.is_empty() {
        anyhow::bail!("frames needs at least one --zoom");
    }
    if args.fps == 0 {
        anyhow::bail!("--fps must be > 0");
    }

    let (mut view, last_start) = load_view(&args.input)?;
    let duration = view.config().transition.duration();
    let frame_step = Duration::from_secs_f64(1.0 / f64::from(args.fps));
    let count = (duration.as_secs_f64() * f64::from(args.fps)).ceil() as u32 + 1;
    let size = output_size(&view, args.size);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let rasterizer = Rasterizer::new();
    for i in 0..count {
        let now = (last_start + frame_step * i).min(last_start + duration);
        view.tick(now);
        let image = rasterizer.rasterize(&view.to_svg(), size, Some([255, 255, 255, 255]))?;
        sunburst::write_png(&image, &args.out_dir.join(format!("frame_{i:04}.png")))?;
    }

    eprintln!("wrote {count} frames to {}", args.out_dir.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let (mut view, _) = load_view(&args.input)?;
    view.finish();

    println!("path\tvalue\tdepth\tx0\tx1\ty0\ty1");
    for node in view.tree().descendants() {
        let b = view.state().get(node.id).current;
        println!(
            "{}\t{}\t{}\t{:.4}\t{:.4}\t{:.4}\t{:.4}",
            view.tree().path_names(node.id),
            node.value,
            node.depth,
            b.x0,
            b.x1,
            b.y0,
            b.y1
        );
    }
    Ok(())
}
