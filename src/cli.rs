//! # CLI Execution Functions
//!
//! Extracted from `main.rs` to keep the entry point slim. Contains the
//! execution logic for each subcommand: single-window cracking, parallel
//! batch cracking over a capture file, prediction printing, and reference
//! sequence generation.

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use rug::Integer;
use std::path::Path;
use tracing::{info, warn};

use clearseed::crack::CrackedLcg;
use clearseed::lcg::Lcg;
use clearseed::report::{forecast, CrackReport};
use clearseed::{parse_integer, parse_sequence};

pub fn configure_rayon(threads: Option<usize>) {
    let num_threads = threads.unwrap_or(0);
    if num_threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
        {
            warn!(error = %e, "Could not configure rayon thread pool");
        }
    }
}

/// Run the `crack` subcommand: one window from the command line, or a batch
/// of windows from a capture file.
pub fn run_crack(
    values: &[String],
    modulus: Option<&str>,
    file: Option<&Path>,
    predict: usize,
    json: bool,
) -> Result<()> {
    let known_modulus = match modulus {
        Some(text) => {
            let m = parse_integer(text)?;
            if m <= 0u32 {
                bail!("--modulus must be positive, got {}", m);
            }
            m
        }
        None => Integer::new(),
    };

    if let Some(path) = file {
        if !values.is_empty() {
            bail!("pass observations on the command line or via --file, not both");
        }
        return run_crack_file(path, &known_modulus, predict, json);
    }

    if values.is_empty() {
        bail!("no observations given (positional values or --file)");
    }
    let window = values
        .iter()
        .map(|v| parse_integer(v))
        .collect::<Result<Vec<_>>>()?;
    info!(samples = window.len(), "cracking window");
    let cracked = CrackedLcg::crack_with_modulus(known_modulus, &window)?;
    emit_outcome(&cracked, predict, json)
}

/// Crack every line of a capture file (one window per line, `#` comments
/// and blank lines skipped), in parallel across the rayon pool.
fn run_crack_file(
    path: &Path,
    known_modulus: &Integer,
    predict: usize,
    json: bool,
) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read capture file {}", path.display()))?;
    let mut windows = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let window = parse_sequence(line)
            .with_context(|| format!("{}:{}", path.display(), idx + 1))?;
        windows.push((idx + 1, window));
    }
    if windows.is_empty() {
        bail!("capture file {} contains no windows", path.display());
    }
    info!(windows = windows.len(), "cracking capture file");

    let outcomes: Vec<(usize, Result<CrackedLcg, _>)> = windows
        .par_iter()
        .map(|(line_no, window)| {
            (
                *line_no,
                CrackedLcg::crack_with_modulus(known_modulus.clone(), window),
            )
        })
        .collect();

    let mut cracked_count = 0usize;
    for (line_no, outcome) in &outcomes {
        let cracked = match outcome {
            Ok(cracked) => cracked,
            Err(e) => {
                warn!(line = *line_no, error = %e, "window rejected");
                continue;
            }
        };
        if cracked.success() {
            cracked_count += 1;
        }
        if !json {
            println!("# line {}", line_no);
        }
        emit_outcome(cracked, predict, json)?;
    }
    info!(
        cracked = cracked_count,
        total = outcomes.len(),
        "capture file complete"
    );
    Ok(())
}

fn emit_outcome(cracked: &CrackedLcg, predict: usize, json: bool) -> Result<()> {
    if json {
        let report = CrackReport::from_crack(cracked, predict);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    if !cracked.success() {
        println!(
            "not cracked: {} samples do not determine a generator",
            cracked.observations().len()
        );
        return Ok(());
    }
    println!("modulus    M = {}", cracked.modulus());
    println!("multiplier A = {}", cracked.multiplier());
    println!("increment  C = {}", cracked.increment());
    if cracked.is_valid() {
        println!(
            "replay check: all {} samples consistent",
            cracked.observations().len()
        );
    } else {
        println!("replay check: FAILED (window is not a single LCG stream)");
    }
    for (i, value) in forecast(cracked, predict).iter().enumerate() {
        println!("next[{}] = {}", i + 1, value);
    }
    Ok(())
}

/// Run the `generate` subcommand: emit one capture line from the given
/// parameters, suitable for feeding straight back into `crack --file`.
pub fn run_generate(
    modulus: &str,
    multiplier: &str,
    increment: &str,
    seed: &str,
    count: usize,
) -> Result<()> {
    let lcg = Lcg::new(
        parse_integer(modulus)?,
        parse_integer(multiplier)?,
        parse_integer(increment)?,
    )?;
    let seed = parse_integer(seed)?;
    let outputs: Vec<String> = lcg
        .sequence(&seed, count)
        .iter()
        .map(Integer::to_string)
        .collect();
    println!("{}", outputs.join(" "));
    Ok(())
}
