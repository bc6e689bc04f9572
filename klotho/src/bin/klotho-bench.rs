//! Command-line driver for the filtering benchmark.

use anyhow::{Context, Result};
use clap::Parser;
use klotho::scenario::{DEFAULT_COUNT, DEFAULT_STRING_LENGTH};
use klotho::{checked_length, logging, FilterScenario};
use tracing::info;

/// Time sequential versus parallel filtering of random lowercase strings.
#[derive(Debug, Parser)]
#[command(name = "klotho-bench", version, about)]
struct Args {
    /// Number of strings to generate
    #[arg(long, default_value_t = DEFAULT_COUNT)]
    count: usize,

    /// Length of every generated string
    #[arg(long, default_value_t = DEFAULT_STRING_LENGTH as i64, allow_negative_numbers = true)]
    length: i64,

    /// Substring every kept string must contain (repeatable)
    #[arg(long = "required", value_name = "SUBSTRING")]
    required: Vec<String>,

    /// Worker count for the parallel phases (defaults to available parallelism)
    #[arg(long)]
    workers: Option<usize>,

    /// Smallest range handed to one worker
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Seed for reproducible input
    #[arg(long)]
    seed: Option<u64>,

    /// Generate the input on the main thread only
    #[arg(long)]
    sequential_generation: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level);

    let length = checked_length(args.length).context("invalid --length")?;

    let mut builder = FilterScenario::builder()
        .count(args.count)
        .string_length(length)
        .parallel_generation(!args.sequential_generation);
    if !args.required.is_empty() {
        builder = builder.required(args.required);
    }
    if let Some(workers) = args.workers {
        builder = builder.workers(workers);
    }
    if let Some(chunk_size) = args.chunk_size {
        builder = builder.chunk_size(chunk_size);
    }
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }

    let scenario = builder.build()?;
    let report = scenario.run()?;

    info!(
        generated = report.generated.len(),
        kept = report.sequential.len(),
        agrees = report.agrees(),
        speedup = report.speedup().unwrap_or(f64::NAN),
        "benchmark complete"
    );

    if !report.agrees_as_set() {
        anyhow::bail!("sequential and parallel filters kept different strings");
    }
    Ok(())
}
