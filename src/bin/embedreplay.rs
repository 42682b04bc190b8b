use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use embedreplay::{
    Figure, FigureRenderer, HtmlPageRenderer, InMemoryDataset, JsonFileRenderer, ReducerParams,
    ReplayConfig, ReplaySession, StopCondition, TrajectoryReducer,
};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "embedreplay", version)]
#[command(about = "Replay a recorded t-SNE trajectory as an animated figure")]
struct Cli {
    /// Log verbosity.
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a figure from a recorded trajectory.
    Animate(AnimateArgs),
    /// Summarize a figure JSON.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Recorded trajectory JSON.
    #[arg(long)]
    trajectory: PathBuf,

    /// JSON array with one class label per point.
    #[arg(long)]
    labels: PathBuf,

    /// Replay config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Capture every N-th iteration.
    #[arg(long)]
    cadence: Option<u64>,

    /// Stop after this iteration.
    #[arg(long)]
    stop_at: Option<u64>,

    /// Figure title.
    #[arg(long)]
    title: Option<String>,

    /// Output figure JSON path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Output HTML page path.
    #[arg(long)]
    html: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Figure JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(Level::from(cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Animate(args) => cmd_animate(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    if args.out.is_none() && args.html.is_none() {
        anyhow::bail!("nothing to write: pass --out and/or --html");
    }

    let mut cfg = match &args.config {
        Some(p) => ReplayConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => ReplayConfig::default(),
    };
    if let Some(c) = args.cadence {
        cfg.capture.cadence = c;
    }
    if let Some(m) = args.stop_at {
        cfg.capture.stop = StopCondition {
            max_iteration: Some(m),
            ..cfg.capture.stop
        };
    }
    if let Some(t) = args.title {
        cfg.figure.title = Some(t);
    }

    let mut reducer = TrajectoryReducer::from_path(&args.trajectory)
        .with_context(|| format!("load trajectory '{}'", args.trajectory.display()))?;
    if cfg.reducer.dim != reducer.dim() {
        tracing::warn!(
            configured = cfg.reducer.dim.axes(),
            trajectory = reducer.dim().axes(),
            "trajectory dimensionality overrides reducer settings"
        );
        cfg.reducer = ReducerParams::for_dim(reducer.dim());
    }
    cfg.validate().context("invalid replay settings")?;

    let labels = InMemoryDataset::labels_from_path(&args.labels)
        .with_context(|| format!("load labels '{}'", args.labels.display()))?;
    let dataset = InMemoryDataset::labels_only(labels)?;

    let outcome = ReplaySession::from_config(&cfg)?
        .run(&dataset, &mut reducer)
        .context("replay trajectory")?;

    if let Some(out) = &args.out {
        JsonFileRenderer::new(out).render(&outcome.figure)?;
        eprintln!("wrote {}", out.display());
    }
    if let Some(html) = &args.html {
        HtmlPageRenderer::new(html).render(&outcome.figure)?;
        eprintln!("wrote {}", html.display());
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read figure '{}'", args.in_path.display()))?;
    let fig = Figure::from_json(&text)
        .with_context(|| format!("parse figure '{}'", args.in_path.display()))?;

    let first = fig.frames.first().map(|f| f.iteration.0);
    let last = fig.frames.last();
    println!("dim: {}", fig.dim.axes());
    println!("labels: {:?}", fig.labels.as_slice());
    println!("points per frame: {}", fig.points_per_frame());
    println!("frames: {}", fig.frames.len());
    if let (Some(first), Some(last)) = (first, last) {
        println!("iterations: {first}..={}", last.iteration);
        println!("final loss: {}", last.loss);
    }
    println!("fingerprint: {}", fig.fingerprint()?);
    Ok(())
}
