//! yustat - tmux status line generator.
//!
//! Prints one status line and exits, or with `--interval` keeps refreshing
//! an output file that tmux reads via `#(cat FILE)`.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[cfg(target_os = "linux")]
use yustat::collector::RealFs;
#[cfg(not(target_os = "linux"))]
use yustat::collector::mock::MockFs;
use yustat::collector::SystemSource;
use yustat::publish::{Destination, Publisher};
use yustat::render::{OutputFormat, RenderError, Renderer};
use yustat::sampler::Sampler;
use yustat::scheduler::{Scheduler, ShutdownFlag};

/// Host resource status line for tmux.
#[derive(Parser)]
#[command(name = "yustat", about = "Host resource status line for tmux", version)]
struct Args {
    /// Output file. "-" writes to stdout.
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Refresh interval in seconds. 0 prints once and exits.
    #[arg(short, long, default_value = "0")]
    interval: u64,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Tmux)]
    format: OutputFormat,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber on stderr; stdout carries the status line.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("yustat={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    let destination = Destination::parse(&args.output);
    let interval = Duration::from_secs(args.interval);

    debug!(
        "Config: interval={}s, output={:?}, format={}, proc={}",
        args.interval, destination, args.format, args.proc_path
    );

    if matches!(args.format, OutputFormat::Console | OutputFormat::Json) {
        error!("{}", RenderError::Unsupported(args.format));
        return ExitCode::FAILURE;
    }

    #[cfg(target_os = "linux")]
    let source = SystemSource::new(RealFs::new(), &args.proc_path);
    #[cfg(not(target_os = "linux"))]
    let source = SystemSource::new(MockFs::typical_system(), &args.proc_path);

    let mut scheduler = Scheduler::new(
        Sampler::new(source),
        Renderer::default(),
        args.format,
        Publisher::new(destination),
        interval,
    );

    let shutdown = ShutdownFlag::new();
    if !scheduler.is_one_shot() {
        let flag = shutdown.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            info!("Received shutdown signal");
            flag.trigger();
        }) {
            warn!("Failed to set Ctrl-C handler: {}", e);
        }
    }

    match scheduler.run(&shutdown) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
