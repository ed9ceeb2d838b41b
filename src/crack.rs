//! # Crack — LCG Parameter Recovery and Replay Validation
//!
//! Recovers the secret parameters of a linear congruential generator
//! `X[i+1] = (A·X[i] + C) mod M` from a short window of raw, untruncated
//! outputs, then validates the recovered generator by replaying it against
//! the whole window. LCGs leak their entire state in every output: a handful
//! of consecutive values is enough to reconstruct the generator and predict
//! the stream in both directions.
//!
//! ## Algorithm: Modulus Recovery by GCD Accumulation
//!
//! For consecutive outputs, let `d[i] = X[i] − X[i−1]`. The recurrence gives
//! `d[i] ≡ A·d[i−1] (mod M)`, so
//!
//! ```text
//! Z[i] = d[i]·d[i−2] − d[i−1]²  ≡  A²·d[i−2]² − A²·d[i−2]²  ≡  0 (mod M)
//! ```
//!
//! i.e. every `Z[i]` is an exact integer multiple of `M`. Accumulating
//! `gcd(|Z[i]|)` across the window converges to the modulus: a common
//! factor that is not `M` itself rarely survives a second independent `Z`.
//! Windows shorter than
//! [`MIN_SAMPLES_UNKNOWN_MODULUS`] values, and degenerate windows where every
//! `Z[i]` vanishes, leave the modulus unresolved.
//!
//! ## Algorithm: Solving the Recurrence
//!
//! With `M` in hand, the first three outputs give two instances of the
//! recurrence; subtracting them eliminates `C`:
//!
//! ```text
//! X[1] − X[2] ≡ A·(X[0] − X[1]) (mod M)
//! ```
//!
//! a single congruence in `A`, solved by modular division, after which `C`
//! falls out by back-substitution. The division fails when
//! `gcd(X[0] − X[1], M) != 1` (a constant window is the extreme case);
//! that failure is an expected property of the data, reported through
//! [`CrackedLcg::success`] rather than an error.
//!
//! ## References
//!
//! - Haldir, "How to crack a Linear Congruential Generator", root.org, 2004.
//! - J. Boyar, "Inferring Sequences Produced by Pseudo-Random Number
//!   Generators", Journal of the ACM, 36(1), 1989.
//! - D. E. Knuth, The Art of Computer Programming, vol. 2, §3.2.1.

use rug::Integer;
use std::sync::OnceLock;
use thiserror::Error;

use crate::modular::{mod_divide, normalize, ModularError};

/// Samples required before modulus recovery is attempted.
pub const MIN_SAMPLES_UNKNOWN_MODULUS: usize = 5;

/// Samples required to solve for the multiplier and increment.
pub const MIN_SAMPLES_KNOWN_MODULUS: usize = 3;

/// Misuse of the public cracking interface.
///
/// Data that merely fails to crack is *not* an error; it surfaces as
/// [`CrackedLcg::success`] `== false`.
#[derive(Debug, Error)]
pub enum CrackError {
    /// The call itself was malformed; no partial result exists.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// [`CrackedLcg::next`] was invoked on a failed recovery attempt.
    #[error("generator parameters were not recovered from this window")]
    NotCracked,
}

/// One single-shot recovery attempt over a fixed observation window.
///
/// All recovery work happens at construction; the result is immutable
/// afterward and safe to share across threads for concurrent reads. A new
/// (possibly extended) window means a new attempt.
#[derive(Debug)]
pub struct CrackedLcg {
    observations: Vec<Integer>,
    modulus: Integer,
    multiplier: Integer,
    increment: Integer,
    valid: OnceLock<bool>,
}

impl CrackedLcg {
    /// Crack a window with unknown modulus.
    ///
    /// Needs at least [`MIN_SAMPLES_UNKNOWN_MODULUS`] values to attempt
    /// modulus recovery; shorter windows construct fine and report
    /// `success() == false`.
    pub fn crack(observations: &[Integer]) -> Result<Self, CrackError> {
        Self::crack_with_modulus(Integer::new(), observations)
    }

    /// Crack a window, optionally with a known modulus.
    ///
    /// `known_modulus == 0` means unknown (attempt recovery); a positive
    /// value skips modulus recovery and is used as-is, which lowers the
    /// sample floor to [`MIN_SAMPLES_KNOWN_MODULUS`].
    pub fn crack_with_modulus(
        known_modulus: Integer,
        observations: &[Integer],
    ) -> Result<Self, CrackError> {
        if known_modulus < 0i32 {
            return Err(CrackError::InvalidArgument(
                "known modulus must be 0 (unknown) or positive",
            ));
        }
        if observations.is_empty() {
            return Err(CrackError::InvalidArgument(
                "at least one observation is required",
            ));
        }

        let observations = observations.to_vec();
        let modulus = if known_modulus > 0u32 {
            known_modulus
        } else {
            recover_modulus(&observations)
        };

        let (multiplier, increment) =
            if modulus > 0u32 && observations.len() >= MIN_SAMPLES_KNOWN_MODULUS {
                match recover_coefficients(&observations, &modulus) {
                    Ok(pair) => pair,
                    // A non-invertible divisor is a property of the window
                    // (constant sequences being the extreme case), not a
                    // usage error: report an uncracked outcome.
                    Err(ModularError::NonInvertibleDivisor { .. }) => {
                        (Integer::new(), Integer::new())
                    }
                }
            } else {
                (Integer::new(), Integer::new())
            };

        Ok(Self {
            observations,
            modulus,
            multiplier,
            increment,
            valid: OnceLock::new(),
        })
    }

    /// Recovered modulus `M`; 0 when unresolved.
    pub fn modulus(&self) -> &Integer {
        &self.modulus
    }

    /// Recovered multiplier `A`; 0 when unresolved.
    pub fn multiplier(&self) -> &Integer {
        &self.multiplier
    }

    /// Recovered increment `C`; meaningful only when `success()`.
    pub fn increment(&self) -> &Integer {
        &self.increment
    }

    /// Read-only view of the window this attempt was constructed from.
    pub fn observations(&self) -> &[Integer] {
        &self.observations
    }

    /// Both stages produced a usable answer.
    pub fn success(&self) -> bool {
        self.modulus > 0u32 && self.multiplier > 0u32
    }

    /// The output following `prior` under the recovered parameters:
    /// `(A·prior + C) mod M`.
    ///
    /// Fails with [`CrackError::NotCracked`] when `success()` is false;
    /// never silently produces a number from unresolved parameters.
    pub fn next(&self, prior: &Integer) -> Result<Integer, CrackError> {
        if !self.success() {
            return Err(CrackError::NotCracked);
        }
        let stepped = Integer::from(&self.multiplier * prior) + &self.increment;
        Ok(normalize(stepped, &self.modulus))
    }

    /// Replay the recovered generator across the entire window.
    ///
    /// Recovery only pins the first three outputs; this is the authoritative
    /// check against false positives on short or pathological windows.
    /// Computed on first use and cached. The inputs are immutable, so
    /// racing readers recompute the same answer.
    pub fn is_valid(&self) -> bool {
        *self.valid.get_or_init(|| self.replay_matches())
    }

    fn replay_matches(&self) -> bool {
        if !self.success() {
            return false;
        }
        self.observations
            .windows(2)
            .all(|pair| self.next(&pair[0]).is_ok_and(|predicted| predicted == pair[1]))
    }
}

/// Stage 1: derive the modulus by GCD accumulation over the window.
///
/// Returns 0 when the window is shorter than
/// [`MIN_SAMPLES_UNKNOWN_MODULUS`] or every `Z[i]` vanishes (constant or
/// exactly-affine windows carry no wrap-around information).
fn recover_modulus(observations: &[Integer]) -> Integer {
    let mut modulus = Integer::new();
    if observations.len() < MIN_SAMPLES_UNKNOWN_MODULUS {
        return modulus;
    }
    for window in observations.windows(4) {
        let d0 = Integer::from(&window[3] - &window[2]);
        let d1 = Integer::from(&window[2] - &window[1]);
        let d2 = Integer::from(&window[1] - &window[0]);
        let z = (d0 * d2 - Integer::from(&d1 * &d1)).abs();
        if z == 0u32 {
            continue;
        }
        modulus = modulus.gcd(&z);
    }
    modulus
}

/// Stage 2: solve the first three outputs for the multiplier and increment.
fn recover_coefficients(
    observations: &[Integer],
    modulus: &Integer,
) -> Result<(Integer, Integer), ModularError> {
    let top = normalize(Integer::from(&observations[1] - &observations[2]), modulus);
    let bottom = normalize(Integer::from(&observations[0] - &observations[1]), modulus);
    let multiplier = mod_divide(&top, &bottom, modulus)?;
    let product = Integer::from(&multiplier * &observations[0]);
    let increment = normalize(Integer::from(&observations[1] - &product), modulus);
    Ok((multiplier, increment))
}
