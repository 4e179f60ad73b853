//! Mutator — applies [`MutationRules`] to a byte buffer with an explicit PRNG
//!
//! All randomness comes from the one generator owned by the mutator and is
//! consumed in a fixed order: per byte a probability draw, followed by a value
//! draw only when the byte is replaced; at a checkpoint one draw per appended
//! byte. The same generator state, rules and input therefore always produce
//! the same output.

use super::MutationRules;
use crate::error::{FuzzError, Result};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Counters collected while mutating
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationStats {
    /// Iterations actually executed
    pub iterations: u64,
    /// Bytes that received a replacement draw (the new value may equal the old one)
    pub replacements: u64,
    /// Growth checkpoints reached
    pub growths: u64,
    /// Total bytes appended at checkpoints
    pub appended: u64,
}

pub struct Mutator<R: Rng> {
    rng: R,
    rules: MutationRules,
}

impl Mutator<StdRng> {
    /// Mutator over a `StdRng` seeded from `prng_seed`
    pub fn from_seed(prng_seed: u64, rules: MutationRules) -> Self {
        Self::new(StdRng::seed_from_u64(prng_seed), rules)
    }
}

impl<R: Rng> Mutator<R> {
    pub fn new(rng: R, rules: MutationRules) -> Self {
        Self { rng, rules }
    }

    /// One mutation pass: every byte, in order, is replaced with probability `rate`.
    ///
    /// Returns the number of bytes that were replaced.
    pub fn mutate_pass(&mut self, data: &mut [u8]) -> u64 {
        let mut replaced = 0;
        for byte in data.iter_mut() {
            if self.rng.gen::<f64>() < self.rules.rate {
                *byte = self.rng.gen::<u8>();
                replaced += 1;
            }
        }
        replaced
    }

    /// Append `growth_len` random bytes to the end of the buffer.
    pub fn grow(&mut self, data: &mut Vec<u8>) -> Result<()> {
        let n = self.rules.growth_len;
        data.try_reserve(n)
            .map_err(|source| FuzzError::Allocation { requested: n, source })?;
        let rng = &mut self.rng;
        data.extend((0..n).map(|_| rng.gen::<u8>()));
        Ok(())
    }

    /// Run `iterations` mutation passes, growing the buffer at every checkpoint.
    pub fn run(&mut self, data: &mut Vec<u8>, iterations: u64) -> Result<MutationStats> {
        let mut stats = MutationStats::default();

        for i in 0..iterations {
            stats.replacements += self.mutate_pass(data);

            if self.rules.is_checkpoint(i) {
                self.grow(data)?;
                stats.growths += 1;
                stats.appended += self.rules.growth_len as u64;
                debug!("Checkpoint at iteration {}: buffer grew to {} bytes", i + 1, data.len());
            }
            stats.iterations += 1;
        }

        Ok(stats)
    }
}
