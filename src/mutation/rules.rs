//! MutationRules — how often bytes change and when the buffer grows
//!
//! A run is a sequence of iterations. Each iteration revisits every byte and
//! replaces it with probability `rate`; every `growth_interval` iterations the
//! buffer is extended by `growth_len` random bytes.

use serde::{Deserialize, Serialize};

/// Rules governing byte mutation and buffer growth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationRules {
    /// Probability that a single byte is replaced during one iteration
    pub rate: f64,
    /// Number of iterations between growth checkpoints
    pub growth_interval: u64,
    /// Number of random bytes appended at each checkpoint
    pub growth_len: usize,
}

impl Default for MutationRules {
    fn default() -> Self {
        Self {
            rate: 0.13,
            growth_interval: 500,
            growth_len: 10,
        }
    }
}

impl MutationRules {
    /// Whether the iteration at 0-based index `iteration` ends on a growth checkpoint
    pub fn is_checkpoint(&self, iteration: u64) -> bool {
        self.growth_interval != 0 && (iteration + 1) % self.growth_interval == 0
    }

    /// Number of checkpoints reached after `iterations` iterations
    pub fn checkpoints(&self, iterations: u64) -> u64 {
        if self.growth_interval == 0 {
            return 0;
        }
        iterations / self.growth_interval
    }

    /// Buffer length after running `iterations` iterations on `initial_len` bytes.
    ///
    /// `None` when the length does not fit in `usize`.
    pub fn expected_len(&self, initial_len: usize, iterations: u64) -> Option<usize> {
        let checkpoints = usize::try_from(self.checkpoints(iterations)).ok()?;
        checkpoints
            .checked_mul(self.growth_len)?
            .checked_add(initial_len)
    }
}
