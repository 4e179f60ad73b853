//! Engine — one complete fuzzing run
//!
//! ensure seed → load seed → mutate → emit. Nothing is written to the output
//! until mutation has finished, so a failed run emits no partial data.

use crate::config::FuzzConfig;
use crate::error::{FuzzError, Result};
use crate::mutation::{MutationStats, Mutator};
use crate::seed::SeedSource;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::PathBuf;

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub seed_path: PathBuf,
    pub seed_created: bool,
    pub prng_seed: u64,
    pub initial_len: usize,
    pub final_len: usize,
    pub stats: MutationStats,
    /// SHA-256 of the seed as loaded
    pub seed_fingerprint: String,
    /// SHA-256 of the emitted buffer
    pub output_fingerprint: String,
}

impl RunReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Hex-encoded SHA-256 of a buffer
pub fn fingerprint(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Produce the mutated buffer described by `config` without emitting it.
pub fn generate(config: &FuzzConfig) -> Result<(Vec<u8>, RunReport)> {
    let source = SeedSource::new(&config.seed_path);
    let (mut data, seed_created) = source.acquire()?;
    let initial_len = data.len();
    let seed_fingerprint = fingerprint(&data);

    let iterations = config.effective_iterations();
    if config.iterations < 0 {
        debug!("Negative iteration count {} treated as zero", config.iterations);
    }

    // Reserve all checkpoint growth at once; an unrepresentable total is left
    // for the mutator to report at the first checkpoint that overflows.
    if let Some(total) = config.rules.expected_len(initial_len, iterations) {
        let extra = total - initial_len;
        data.try_reserve_exact(extra)
            .map_err(|source| FuzzError::Allocation { requested: extra, source })?;
    }

    let mut mutator = Mutator::from_seed(config.prng_seed, config.rules.clone());
    let stats = mutator.run(&mut data, iterations)?;

    let report = RunReport {
        seed_path: config.seed_path.clone(),
        seed_created,
        prng_seed: config.prng_seed,
        initial_len,
        final_len: data.len(),
        stats,
        seed_fingerprint,
        output_fingerprint: fingerprint(&data),
    };
    Ok((data, report))
}

/// Run the whole flow and write the mutated buffer, unframed, to `out`.
pub fn run<W: Write>(config: &FuzzConfig, out: &mut W) -> Result<RunReport> {
    let (data, report) = generate(config)?;

    out.write_all(&data).map_err(FuzzError::Output)?;
    out.flush().map_err(FuzzError::Output)?;

    match report.to_json() {
        Ok(json) => debug!("Run report: {}", json),
        Err(e) => warn!("Failed to serialize run report: {}", e),
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::MutationRules;
    use crate::seed::{DEFAULT_SEED, SEED_FILE};
    use std::io;

    fn config_in(dir: &tempfile::TempDir, prng_seed: u64, iterations: i64) -> FuzzConfig {
        FuzzConfig::new(prng_seed, iterations).with_seed_path(dir.path().join(SEED_FILE))
    }

    #[test]
    fn test_fresh_run_creates_seed_and_grows() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, 42, 1000);
        let mut out = Vec::new();

        let report = run(&config, &mut out).unwrap();
        assert!(report.seed_created);
        assert_eq!(std::fs::read(&config.seed_path).unwrap(), DEFAULT_SEED);
        assert_eq!(out.len(), 35);
        assert_eq!(report.initial_len, 15);
        assert_eq!(report.final_len, 35);
        assert_eq!(report.stats.growths, 2);
        assert_eq!(report.output_fingerprint, fingerprint(&out));
    }

    #[test]
    fn test_repeat_runs_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, 99, 777);

        let mut first = Vec::new();
        let mut second = Vec::new();
        run(&config, &mut first).unwrap();
        let report = run(&config, &mut second).unwrap();
        assert!(!report.seed_created);
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_iterations_reproduce_seed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SEED_FILE);
        let seed: Vec<u8> = (0..=255u8).rev().collect();
        std::fs::write(&path, &seed).unwrap();

        let mut out = Vec::new();
        let report = run(&FuzzConfig::new(1, 0).with_seed_path(&path), &mut out).unwrap();
        assert_eq!(out, seed);
        assert_eq!(report.seed_fingerprint, report.output_fingerprint);
        assert_eq!(std::fs::read(&path).unwrap(), seed);
    }

    #[test]
    fn test_negative_iterations_reproduce_seed() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, 1, -500);
        let mut out = Vec::new();
        let report = run(&config, &mut out).unwrap();
        assert_eq!(out, DEFAULT_SEED);
        assert_eq!(report.stats.iterations, 0);
    }

    #[test]
    fn test_seed_file_is_not_mutated_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, 5, 1200);
        let mut out = Vec::new();
        run(&config, &mut out).unwrap();
        assert_ne!(out, DEFAULT_SEED);
        assert_eq!(std::fs::read(&config.seed_path).unwrap(), DEFAULT_SEED);
    }

    #[test]
    fn test_custom_rules() {
        let dir = tempfile::tempdir().unwrap();
        let rules = MutationRules { rate: 0.0, growth_interval: 1, growth_len: 2 };
        let config = config_in(&dir, 5, 3).with_rules(rules);
        let (data, _) = generate(&config).unwrap();
        assert_eq!(&data[..15], DEFAULT_SEED);
        assert_eq!(data.len(), 21);
    }

    #[test]
    fn test_growth_is_reserved_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let (data, report) = generate(&config_in(&dir, 8, 2000)).unwrap();
        assert_eq!(data.len(), 55);
        assert!(data.capacity() >= report.final_len);
    }

    #[test]
    fn test_oversized_growth_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let rules = MutationRules { rate: 0.13, growth_interval: 1, growth_len: usize::MAX / 4 };
        let config = config_in(&dir, 1, 2).with_rules(rules);
        let mut out = Vec::new();
        match run(&config, &mut out) {
            Err(FuzzError::Allocation { requested, .. }) => assert_eq!(requested, usize::MAX / 4 * 2),
            other => panic!("expected Allocation, got {:?}", other),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_seed_error_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = FuzzConfig::new(1, 10).with_seed_path(dir.path().join("missing").join(SEED_FILE));
        let mut out = Vec::new();
        assert!(matches!(run(&config, &mut out), Err(FuzzError::SeedCreate { .. })));
        assert!(out.is_empty());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, 1, 1);
        assert!(matches!(run(&config, &mut BrokenPipe), Err(FuzzError::Output(_))));
    }

    #[test]
    fn test_report_json() {
        let dir = tempfile::tempdir().unwrap();
        let (_, report) = generate(&config_in(&dir, 3, 10)).unwrap();
        let back: RunReport = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(back, report);
    }
}
