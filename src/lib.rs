//! fuzzgen — seed-driven random byte mutator
//!
//! Produces fuzz inputs by repeatedly mutating a seed file's bytes with a
//! deterministic PRNG and periodically growing the buffer with random bytes.

pub mod config;
pub mod engine;
pub mod error;
pub mod mutation;
pub mod seed;

pub use config::FuzzConfig;
pub use engine::{generate, run, RunReport};
pub use error::{FuzzError, Result};
pub use mutation::{MutationRules, MutationStats, Mutator};
pub use seed::{SeedSource, DEFAULT_SEED, SEED_FILE};
