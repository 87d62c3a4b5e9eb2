use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "modeflow", version)]
struct Cli {
    /// Session configuration JSON; flags below override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Iterate the mean-shift flow field over an image and write the color-coded flow.
    MeanShift(MeanShiftArgs),
    /// Iterate 5-point diffusion over an image (or the built-in demo square).
    Diffuse(DiffuseArgs),
    /// Gaussian-blur an image once.
    Blur(BlurArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Compute backend.
    #[arg(long, value_enum)]
    backend: Option<BackendChoice>,

    /// Worker threads for the parallel backend.
    #[arg(long)]
    threads: Option<usize>,

    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Args, Debug)]
struct MeanShiftArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path for the final flow frame.
    #[arg(long)]
    out: PathBuf,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 10)]
    ticks: u64,

    /// Window half-width in pixels.
    #[arg(long)]
    bandwidth: Option<f32>,

    /// Also write `frame_NNNNN.png` snapshots into this directory.
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    /// Snapshot interval in ticks (with `--frames-dir`).
    #[arg(long, default_value_t = 1)]
    every: u64,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct DiffuseArgs {
    /// Input image; the demo square is used when omitted.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 30)]
    ticks: u64,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct BlurArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Standard deviation in pixels.
    #[arg(long, default_value_t = 3.0)]
    sigma: f32,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Cpu,
    Parallel,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let base = match &cli.config {
        Some(path) => modeflow::FlowConfig::from_path(path)?,
        None => modeflow::FlowConfig::default(),
    };

    match cli.cmd {
        Command::MeanShift(args) => cmd_mean_shift(base, args),
        Command::Diffuse(args) => cmd_diffuse(base, args),
        Command::Blur(args) => cmd_blur(base, args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn apply_common(cfg: &mut modeflow::FlowConfig, common: &CommonArgs) {
    if let Some(choice) = common.backend {
        cfg.backend = match choice {
            BackendChoice::Cpu => modeflow::BackendKind::Cpu,
            BackendChoice::Parallel => modeflow::BackendKind::Parallel,
        };
    }
    if common.threads.is_some() {
        cfg.threads = common.threads;
    }
    if let Some(w) = common.width {
        cfg.canvas.width = w;
    }
    if let Some(h) = common.height {
        cfg.canvas.height = h;
    }
}

fn cmd_mean_shift(mut cfg: modeflow::FlowConfig, args: MeanShiftArgs) -> anyhow::Result<()> {
    cfg.mode = modeflow::FlowMode::MeanShift;
    apply_common(&mut cfg, &args.common);
    if let Some(bw) = args.bandwidth {
        cfg.bandwidth = bw;
    }

    let raster = modeflow::load_raster_from_path(&args.in_path, cfg.canvas)?;
    let mut session = modeflow::FlowSession::new(cfg)?;
    session.load_raster(raster);

    match &args.frames_dir {
        Some(dir) => {
            let mut sink = modeflow::PngSequenceSink::new(dir);
            let stats = session.run(args.ticks, args.every, &mut sink)?;
            eprintln!(
                "wrote {} frames to {}",
                stats.frames_pushed,
                dir.display()
            );
        }
        None => {
            session.advance(args.ticks)?;
        }
    }

    write_frame(&session.current_frame()?, &args.out)
}

fn cmd_diffuse(mut cfg: modeflow::FlowConfig, args: DiffuseArgs) -> anyhow::Result<()> {
    cfg.mode = modeflow::FlowMode::Diffusion;
    apply_common(&mut cfg, &args.common);

    let raster = match &args.in_path {
        Some(path) => modeflow::load_raster_from_path(path, cfg.canvas)?,
        None => modeflow::diffusion_demo_raster(cfg.canvas)?,
    };
    let mut session = modeflow::FlowSession::new(cfg)?;
    session.load_raster(raster);
    session.advance(args.ticks)?;

    write_frame(&session.current_frame()?, &args.out)
}

fn cmd_blur(mut cfg: modeflow::FlowConfig, args: BlurArgs) -> anyhow::Result<()> {
    cfg.mode = modeflow::FlowMode::GaussianBlur;
    apply_common(&mut cfg, &args.common);
    cfg.bandwidth = args.sigma;

    let raster = modeflow::load_raster_from_path(&args.in_path, cfg.canvas)?;
    let mut session = modeflow::FlowSession::new(cfg)?;
    session.load_raster(raster);
    tracing::info!(
        sigma = args.sigma,
        kernel_size = modeflow::gaussian_kernel_size(args.sigma),
        "gaussian blur"
    );

    let frame = session.tick()?;
    write_frame(&frame, &args.out)
}

fn write_frame(frame: &modeflow::Frame, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    modeflow::save_frame_png(frame, out)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
