//! # Main — CLI Entry Point
//!
//! Routes CLI subcommands to the execution functions in `cli.rs` and handles
//! the shared concerns: structured logging and the rayon thread pool used by
//! batch cracking.
//!
//! ## Subcommands
//!
//! - `crack`: recover `(M, A, C)` from observed raw outputs, report whether
//!   the recovered generator replays the whole window, and optionally
//!   predict the values that follow.
//! - `generate`: emit a reference LCG sequence, the fixture counterpart
//!   used to produce capture files for the cracker.
//!
//! ## Global Options
//!
//! - `--threads`: rayon pool size for batch cracking (0 = all cores).
//! - `LOG_FORMAT=json`: structured JSON logs instead of human-readable.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "clearseed",
    about = "Crack linear congruential generators from raw output windows"
)]
struct Cli {
    /// Number of rayon worker threads for batch cracking (defaults to all logical cores)
    #[arg(long, env = "CLEARSEED_THREADS")]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recover LCG parameters (modulus, multiplier, increment) from observed outputs
    Crack {
        /// Observed raw outputs, oldest first (decimal or 0x-hex)
        values: Vec<String>,
        /// Known modulus (skips modulus recovery; only 3 samples needed)
        #[arg(long)]
        modulus: Option<String>,
        /// Read windows from a capture file instead, one sequence per line
        #[arg(long)]
        file: Option<PathBuf>,
        /// Print the next COUNT predicted values after the window
        #[arg(long, default_value_t = 0)]
        predict: usize,
        /// Emit the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Emit a reference LCG sequence
    Generate {
        /// Modulus M
        #[arg(long)]
        modulus: String,
        /// Multiplier A
        #[arg(long)]
        multiplier: String,
        /// Increment C
        #[arg(long)]
        increment: String,
        /// Seed X0, included as the first output
        #[arg(long)]
        seed: String,
        /// Number of outputs to emit
        #[arg(long, default_value_t = 6)]
        count: usize,
    },
}

fn main() -> Result<()> {
    // Structured logging: LOG_FORMAT=json for machine consumers, human-readable otherwise
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt().json().with_target(false).init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    cli::configure_rayon(cli.threads);

    match &cli.command {
        Commands::Crack {
            values,
            modulus,
            file,
            predict,
            json,
        } => cli::run_crack(values, modulus.as_deref(), file.as_deref(), *predict, *json),
        Commands::Generate {
            modulus,
            multiplier,
            increment,
            seed,
            count,
        } => cli::run_generate(modulus, multiplier, increment, seed, *count),
    }
}
