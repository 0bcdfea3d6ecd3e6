//! Scheduler CLI: parses an instruction stream, runs it to completion (or
//! stuck detection), and writes the per-instruction cycle table.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use oopsim_core::common::error::SimError;
use oopsim_core::stats::RunStats;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Runs the out-of-order pipeline scheduler over an instruction trace.
#[derive(Parser, Debug)]
#[command(name = "oopsim", author, version, about)]
struct Cli {
    /// Input file: a `P,W` header followed by `K,a,b,c` instruction lines.
    input: PathBuf,

    /// Output file: one `fetch,decode,rename,dispatch,issue,writeback,commit`
    /// line per instruction, or empty if the pipeline got stuck.
    output: PathBuf,

    /// Increase log verbosity (repeatable: `-v` debug, `-vv` trace).
    /// Overridden by `RUST_LOG` if set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print a one-line summary (cycles, instructions committed, IPC) to
    /// stderr after a successful run.
    #[arg(long)]
    stats: bool,

    /// Write the same summary as JSON to the given path.
    #[arg(long, value_name = "PATH")]
    stats_json: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), SimError> {
    let input = BufReader::new(File::open(&cli.input)?);
    let output = BufWriter::new(File::create(&cli.output)?);

    let stats = oopsim_core::run(input, output)?;

    if cli.stats {
        eprintln!("{}", stats.summary_line());
    }
    if let Some(path) = &cli.stats_json {
        write_stats_json(path, &stats)?;
    }

    Ok(())
}

fn write_stats_json(path: &PathBuf, stats: &RunStats) -> Result<(), SimError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, stats).map_err(std::io::Error::other)?;
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "oopsim_core=info",
        1 => "oopsim_core=debug",
        _ => "oopsim_core=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
