//! Trace-driven cache simulator CLI.
//!
//! This binary replays a memory trace against a single cache, twice: once without
//! and once with next-line prefetching. It supports:
//! 1. **Positional run:** Cache parameters on the command line, in the classic
//!    `<size> <assoc> <policy> <block> <trace>` order.
//! 2. **Config run:** Cache parameters from a JSON file.

use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cachesim_core::config::{Associativity, CacheConfig, ReplacementPolicy};
use cachesim_core::{PassReport, SimError, Trace, simulate, simulate_parallel};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = "Replay a memory trace against a cache, without and with next-line prefetching.\n\nExamples:\n  cachesim run 2048 assoc:4 lru 32 trace.txt\n  cachesim run 1024 direct fifo 16 trace.txt --json\n  cachesim config cache.json trace.txt"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate with cache parameters given on the command line.
    Run {
        /// Total cache size in bytes (power of two).
        size: usize,

        /// Associativity: direct, assoc (fully associative) or assoc:N.
        associativity: Associativity,

        /// Replacement policy: fifo or lru.
        policy: ReplacementPolicy,

        /// Block size in bytes (power of two).
        block: usize,

        /// Trace file.
        trace: String,

        /// Blocks fetched past each miss when prefetching.
        #[arg(long, default_value_t = 1)]
        prefetch_degree: usize,
    },

    /// Simulate with cache parameters read from a JSON file.
    Config {
        /// JSON cache configuration.
        config: String,

        /// Trace file.
        trace: String,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Print the two reports as a JSON array.
    #[arg(long, global = true)]
    json: bool,

    /// Run the two passes on separate threads.
    #[arg(long, global = true)]
    parallel: bool,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.output.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Installs a stderr `tracing` subscriber filtered by `RUST_LOG` or `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the configuration, loads the trace and prints both reports.
///
/// The configuration is validated before the trace file is opened, so an
/// invalid geometry is reported even when the trace is missing.
fn run(cli: Cli) -> Result<(), SimError> {
    let (config, trace_path) = match cli.command {
        Commands::Run {
            size,
            associativity,
            policy,
            block,
            trace,
            prefetch_degree,
        } => (
            CacheConfig {
                size_bytes: size,
                line_bytes: block,
                associativity,
                policy,
                prefetch_degree,
            },
            trace,
        ),
        Commands::Config { config, trace } => (CacheConfig::load(&config)?, trace),
    };

    let geometry = config.geometry()?;
    info!(
        sets = geometry.num_sets,
        ways = geometry.ways,
        policy = %config.policy,
        "configured cache"
    );

    let trace = Trace::load(&trace_path)?;
    info!(path = %trace_path, accesses = trace.len(), "loaded trace");

    let reports = if cli.output.parallel {
        simulate_parallel(&config, &trace)?
    } else {
        simulate(&config, &trace)?
    };

    if cli.output.json {
        print_json(&reports);
    } else {
        reports.iter().for_each(PassReport::print);
    }
    Ok(())
}

fn print_json(reports: &[PassReport]) {
    match serde_json::to_string_pretty(reports) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: could not serialize report: {e}");
            process::exit(1);
        }
    }
}
