//! Run configuration
//!
//! The CLI only chooses the PRNG seed and the iteration count; the seed file
//! and mutation rules keep their defaults unless set through the library.

use crate::error::{FuzzError, Result};
use crate::mutation::MutationRules;
use crate::seed::SEED_FILE;
use serde::{Deserialize, Serialize};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzConfig {
    /// Seed for the mutation PRNG
    pub prng_seed: u64,
    /// Requested iteration count; negative values run nothing
    pub iterations: i64,
    /// Seed file to read, created on first use
    pub seed_path: PathBuf,
    pub rules: MutationRules,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            prng_seed: 0,
            iterations: 0,
            seed_path: PathBuf::from(SEED_FILE),
            rules: MutationRules::default(),
        }
    }
}

impl FuzzConfig {
    pub fn new(prng_seed: u64, iterations: i64) -> Self {
        Self {
            prng_seed,
            iterations,
            ..Self::default()
        }
    }

    /// Parse `<program> <prng_seed> <iterations>`.
    ///
    /// Arguments are taken as OS strings so that non-UTF-8 input is reported
    /// as a format error instead of aborting the process.
    pub fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        if args.len() != 3 {
            let program = args
                .first()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_else(|| "fuzzer".to_string());
            return Err(FuzzError::Usage { program });
        }

        let prng_seed = parse_arg::<u64>("prng_seed", &args[1])?;
        let iterations = parse_arg::<i64>("iterations", &args[2])?;
        Ok(Self::new(prng_seed, iterations))
    }

    pub fn with_seed_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.seed_path = path.into();
        self
    }

    pub fn with_rules(mut self, rules: MutationRules) -> Self {
        self.rules = rules;
        self
    }

    /// Iterations to actually run: negative counts are treated as zero.
    pub fn effective_iterations(&self) -> u64 {
        u64::try_from(self.iterations).unwrap_or(0)
    }
}

fn parse_arg<T: std::str::FromStr>(name: &'static str, value: &OsStr) -> Result<T> {
    let invalid = || FuzzError::InvalidArgument {
        name,
        value: value.to_string_lossy().into_owned(),
    };
    value.to_str().ok_or_else(invalid)?.trim().parse().map_err(|_| invalid())
}
