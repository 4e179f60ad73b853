//! Error taxonomy for a fuzzing run
//!
//! Every failure is fatal: helpers return a `FuzzError` and the binary
//! reports it once and exits non-zero.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, FuzzError>;

#[derive(Debug, thiserror::Error)]
pub enum FuzzError {
    #[error("This is how you must run the fuzzer: {program} <prng_seed> <iterations>")]
    Usage { program: String },

    #[error("The input: <prng_seed> and <iterations> must be integers, try again. ({name} = {value:?})")]
    InvalidArgument { name: &'static str, value: String },

    #[error("Error creating seed file {}: {source}", path.display())]
    SeedCreate { path: PathBuf, source: io::Error },

    #[error("Error opening seed file {}: {source}", path.display())]
    SeedOpen { path: PathBuf, source: io::Error },

    #[error("Error reading seed file {}: {source}", path.display())]
    SeedRead { path: PathBuf, source: io::Error },

    /// `requested` is the size of the reservation that failed, in bytes
    #[error("Error allocating {requested} more bytes for the buffer: {source}")]
    Allocation { requested: usize, source: TryReserveError },

    #[error("Seed file {} is too large to load ({len} bytes)", path.display())]
    SeedTooLarge { path: PathBuf, len: u64 },

    #[error("Error writing fuzzed data: {0}")]
    Output(#[source] io::Error),
}

impl FuzzError {
    /// Whether the error came from bad command-line input rather than the run itself
    pub fn is_usage(&self) -> bool {
        matches!(self, FuzzError::Usage { .. } | FuzzError::InvalidArgument { .. })
    }
}
