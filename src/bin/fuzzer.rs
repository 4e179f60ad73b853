//! fuzzer — emit one mutated fuzz input on stdout
//!
//! Usage: fuzzer <prng_seed> <iterations>
//!
//! Reads `_seed_` from the working directory (creating it with
//! `InitialSeedData` when missing), mutates it and writes the raw bytes to
//! stdout. Diagnostics and logs go to stderr.
//!
//! Exit status: 0 on success, 2 for bad arguments, 1 for any failed run.

use fuzzgen_core::{engine, FuzzConfig, DEFAULT_SEED};
use std::env;
use std::io;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let result = FuzzConfig::from_args(env::args_os()).and_then(|config| {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        engine::run(&config, &mut out)
    });

    match result {
        Ok(report) => {
            if report.seed_created {
                eprintln!(
                    "Created a default seed file with content: {}",
                    String::from_utf8_lossy(DEFAULT_SEED)
                );
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(if e.is_usage() { 2 } else { 1 });
        }
    }
}
