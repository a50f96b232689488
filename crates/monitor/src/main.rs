//! Operator Vigilance Monitor - Main Entry Point
//!
//! Reads one landmark observation per line from stdin and raises fatigue and
//! guard-mode alerts over audio, overlay, and the CSV event log.

use clap::Parser;
use monitor::{
    init_logging, FrameMonitor, JsonLinesSource, LogRenderer, MonitorConfig, NullRenderer,
    OverlayRenderer,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Fatigue detection with optional Guard Mode
#[derive(Parser, Debug)]
#[command(name = "vigil-monitor", version)]
struct Args {
    /// Enable Guard Mode: alert on no-face timeout and escalate
    #[arg(long)]
    guard: bool,

    /// Run without a display window (audio alerts + logging only)
    #[arg(long)]
    headless: bool,

    /// Open the display fullscreen (if supported by the renderer)
    #[arg(long)]
    fullscreen: bool,

    /// CSV log file path for alert events
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = MonitorConfig::load(args.config.as_deref())?;
    config.guard_mode |= args.guard;
    config.headless |= args.headless;
    config.fullscreen |= args.fullscreen;
    if args.log.is_some() {
        config.log_path = args.log;
    }

    info!("=== Operator Vigilance Monitor v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        guard_mode = config.guard_mode,
        headless = config.headless,
        log = ?config.log_path,
        "starting monitor"
    );

    let sink = alerting::default_sink();
    let mut monitor = FrameMonitor::new(&config, sink, Instant::now());

    let stdin = std::io::stdin();
    let mut source = JsonLinesSource::new(stdin.lock());
    let mut renderer: Box<dyn OverlayRenderer> = if config.headless {
        Box::new(NullRenderer)
    } else {
        Box::new(LogRenderer)
    };

    monitor.run(&mut source, renderer.as_mut())?;
    Ok(())
}
