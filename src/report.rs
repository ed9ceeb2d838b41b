//! # Report — Serialized Crack Outcomes
//!
//! Outward-facing summary of one recovery attempt, consumed by the CLI's
//! `--json` output. Parameters are rendered as decimal strings: JSON numbers
//! lose precision past 2^53 and real-world moduli routinely exceed that.

use rug::Integer;
use serde::Serialize;

use crate::crack::CrackedLcg;

/// Machine-readable summary of one recovery attempt.
#[derive(Clone, Debug, Serialize)]
pub struct CrackReport {
    pub success: bool,
    pub valid: bool,
    pub samples: usize,
    pub modulus: String,
    pub multiplier: String,
    pub increment: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub predictions: Vec<String>,
}

impl CrackReport {
    /// Summarize `cracked`, forecasting `predict` values past the window.
    pub fn from_crack(cracked: &CrackedLcg, predict: usize) -> Self {
        Self {
            success: cracked.success(),
            valid: cracked.is_valid(),
            samples: cracked.observations().len(),
            modulus: cracked.modulus().to_string(),
            multiplier: cracked.multiplier().to_string(),
            increment: cracked.increment().to_string(),
            predictions: forecast(cracked, predict)
                .iter()
                .map(Integer::to_string)
                .collect(),
        }
    }
}

/// The next `count` values following the observed window.
///
/// Empty when the attempt failed; prediction needs resolved parameters.
pub fn forecast(cracked: &CrackedLcg, count: usize) -> Vec<Integer> {
    let mut out = Vec::with_capacity(count);
    let Some(last) = cracked.observations().last() else {
        return out;
    };
    let mut state = last.clone();
    for _ in 0..count {
        match cracked.next(&state) {
            Ok(value) => {
                state = value;
                out.push(state.clone());
            }
            Err(_) => break,
        }
    }
    out
}
