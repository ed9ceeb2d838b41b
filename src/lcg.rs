//! # Lcg — Reference Generator
//!
//! The forward recurrence `X[i+1] = (A·X[i] + C) mod M` over
//! arbitrary-precision integers. This is the fixture side of the crate:
//! `clearseed generate`, the test suites, and the benches use it to produce
//! the capture windows the cracker is pointed at.

use anyhow::{bail, Result};
use rug::Integer;

use crate::modular::normalize;

/// A linear congruential generator with fixed parameters.
pub struct Lcg {
    modulus: Integer,
    multiplier: Integer,
    increment: Integer,
}

impl Lcg {
    /// `modulus` must be positive; multiplier and increment are reduced
    /// into `[0, modulus)`.
    pub fn new(modulus: Integer, multiplier: Integer, increment: Integer) -> Result<Self> {
        if modulus <= 0u32 {
            bail!("LCG modulus must be positive, got {}", modulus);
        }
        let multiplier = normalize(multiplier, &modulus);
        let increment = normalize(increment, &modulus);
        Ok(Self {
            modulus,
            multiplier,
            increment,
        })
    }

    /// One step of the recurrence.
    pub fn step(&self, state: &Integer) -> Integer {
        let stepped = Integer::from(&self.multiplier * state) + &self.increment;
        normalize(stepped, &self.modulus)
    }

    /// `count` consecutive outputs starting with the (reduced) seed itself.
    pub fn sequence(&self, seed: &Integer, count: usize) -> Vec<Integer> {
        let mut outputs = Vec::with_capacity(count);
        if count == 0 {
            return outputs;
        }
        let mut state = normalize(seed.clone(), &self.modulus);
        outputs.push(state.clone());
        for _ in 1..count {
            state = self.step(&state);
            outputs.push(state.clone());
        }
        outputs
    }
}
