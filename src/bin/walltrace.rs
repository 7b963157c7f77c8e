use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use walltrace::Clock as _;

#[derive(Parser, Debug)]
#[command(name = "walltrace", version)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print path length, coverage and duration for a trajectory.
    Metrics(MetricsArgs),
    /// Render the scene after a number of playback ticks as a PNG.
    Frame(FrameArgs),
    /// Render every playback tick as a numbered PNG sequence.
    Play(PlayArgs),
}

#[derive(Args, Debug)]
struct MetricsArgs {
    /// Run config JSON (wall size, coverage width, obstacles).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Waypoint list JSON.
    #[arg(long)]
    waypoints: PathBuf,

    /// Print metrics as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct TrajectorySource {
    /// Waypoint list JSON.
    #[arg(long, conflicts_with = "planner")]
    waypoints: Option<PathBuf>,

    /// Base URL of a trajectory planner service.
    #[arg(long)]
    planner: Option<String>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Run config JSON (wall size, coverage width, obstacles).
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    source: TrajectorySource,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Ticks to run before capturing; defaults to the whole trajectory.
    #[arg(long)]
    ticks: Option<usize>,

    /// Clip path segments exactly against obstacles.
    #[arg(long)]
    full_clip: bool,
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Run config JSON (wall size, coverage width, obstacles).
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    source: TrajectorySource,

    /// Directory receiving `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Pace ticks in real time instead of rendering as fast as possible.
    #[arg(long)]
    realtime: bool,

    /// Clip path segments exactly against obstacles.
    #[arg(long)]
    full_clip: bool,
}

/// Scene inputs shared by the rendering subcommands.
struct Prepared {
    wall: walltrace::Wall,
    coverage_width: f64,
    obstacles: Vec<walltrace::Obstacle>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Metrics(args) => cmd_metrics(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn prepare(in_path: &Path) -> anyhow::Result<Prepared> {
    let cfg = walltrace::RunConfig::from_path(in_path)
        .with_context(|| format!("load run config '{}'", in_path.display()))?;
    let wall = cfg.wall()?;
    let parsed = cfg.parsed_obstacles();
    for warning in &parsed.warnings {
        eprintln!("warning: {warning}");
    }
    Ok(Prepared {
        wall,
        coverage_width: cfg.coverage_width,
        obstacles: parsed.obstacles,
    })
}

fn make_visualizer(full_clip: bool) -> walltrace::Visualizer {
    let render = walltrace::RenderConfig::from_env();
    let playback = walltrace::PlaybackConfig {
        visibility: if full_clip {
            walltrace::VisibilityMode::FullClip
        } else {
            walltrace::VisibilityMode::EndpointHeuristic
        },
        ..walltrace::PlaybackConfig::default()
    };
    walltrace::Visualizer::new(render, walltrace::SceneStyle::default(), playback)
}

/// Draw the static scene and start playback from either a waypoint file or a planner.
fn start(
    vis: &mut walltrace::Visualizer,
    prepared: &Prepared,
    source: &TrajectorySource,
    now: std::time::Duration,
) -> anyhow::Result<(walltrace::PlaybackHandle, walltrace::Metrics)> {
    match (&source.waypoints, &source.planner) {
        (Some(path), None) => {
            let trajectory = walltrace::read_waypoints(path)?;
            vis.render_static_scene(&prepared.wall, &prepared.obstacles)?;
            let metrics =
                vis.compute_metrics(&trajectory, &prepared.wall, prepared.coverage_width)?;
            let handle = vis.start_playback(&trajectory, &prepared.obstacles, now)?;
            Ok((handle, metrics))
        }
        (None, Some(url)) => {
            let planner = make_planner(url)?;
            let run = vis.plan_and_play(
                planner.as_ref(),
                &prepared.wall,
                prepared.coverage_width,
                &prepared.obstacles,
                now,
            )?;
            Ok((run.handle, run.metrics))
        }
        _ => anyhow::bail!("pass exactly one of --waypoints or --planner"),
    }
}

#[cfg(feature = "http")]
fn make_planner(url: &str) -> anyhow::Result<Box<dyn walltrace::Planner>> {
    Ok(Box::new(walltrace::HttpPlanner::new(url)?))
}

#[cfg(not(feature = "http"))]
fn make_planner(_url: &str) -> anyhow::Result<Box<dyn walltrace::Planner>> {
    anyhow::bail!("this build has no http planner; rebuild with the `http` feature")
}

fn cmd_metrics(args: MetricsArgs) -> anyhow::Result<()> {
    let prepared = prepare(&args.in_path)?;
    let trajectory = walltrace::read_waypoints(&args.waypoints)?;
    let metrics =
        walltrace::compute_metrics(&trajectory, &prepared.wall, prepared.coverage_width)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&metrics).context("serialize metrics")?
        );
    } else {
        println!("{metrics}");
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let prepared = prepare(&args.in_path)?;
    let mut vis = make_visualizer(args.full_clip);
    let (_handle, metrics) = start(&mut vis, &prepared, &args.source, std::time::Duration::ZERO)?;

    let controller = vis.controller_mut();
    match args.ticks {
        Some(n) => {
            for _ in 0..n {
                if !matches!(controller.tick(), walltrace::TickOutcome::Stepped { .. }) {
                    break;
                }
            }
        }
        None => {
            controller.run_to_end(&walltrace::ManualClock::new());
        }
    }

    let mut backend = walltrace::create_backend(walltrace::BackendKind::Cpu);
    let frame = vis.snapshot(backend.as_mut())?;
    write_png(&args.out, &frame)?;

    eprintln!("{metrics}");
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let prepared = prepare(&args.in_path)?;
    let mut vis = make_visualizer(args.full_clip);

    let clock: Box<dyn walltrace::Clock> = if args.realtime {
        Box::new(walltrace::SystemClock::new())
    } else {
        Box::new(walltrace::ManualClock::new())
    };
    let (_handle, metrics) = start(&mut vis, &prepared, &args.source, clock.now())?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut backend = walltrace::create_backend(walltrace::BackendKind::Cpu);
    let first = vis.snapshot(backend.as_mut())?;
    write_png(&frame_path(&args.out_dir, 0), &first)?;

    let mut written = 1usize;
    let status = vis
        .controller_mut()
        .run_to_end_with(clock.as_ref(), |outcome, renderer| {
            if !matches!(outcome, walltrace::TickOutcome::Stepped { .. }) {
                return Ok(());
            }
            let frame = backend.rasterize(renderer.surface())?;
            write_png(&frame_path(&args.out_dir, written), &frame)?;
            written += 1;
            Ok(())
        })?;

    eprintln!("{metrics}");
    eprintln!(
        "wrote {written} frames to {} ({:?})",
        args.out_dir.display(),
        status.unwrap_or(walltrace::PlaybackStatus::Completed)
    );
    Ok(())
}

fn frame_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("frame_{index:05}.png"))
}

fn write_png(path: &Path, frame: &walltrace::FrameRGBA) -> walltrace::WalltraceResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
