//! Seed acquisition — the starting buffer of every run
//!
//! A seed is the byte buffer the mutator starts from. It lives in a single
//! file which is created with a default literal when missing.

mod source;

pub use source::{SeedSource, DEFAULT_SEED, SEED_FILE};
