//! SeedSource — the on-disk file every run starts from
//!
//! The source is created with a default literal the first time it is needed
//! and then read back verbatim on every run.

use crate::error::{FuzzError, Result};
use log::debug;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// File name used by the CLI, relative to the working directory
pub const SEED_FILE: &str = "_seed_";

/// Contents written to a freshly created seed file
pub const DEFAULT_SEED: &[u8] = b"InitialSeedData";

/// A seed file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSource {
    path: PathBuf,
}

impl SeedSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the seed file with [`DEFAULT_SEED`] if it is missing.
    ///
    /// Returns `true` when the file was created by this call. The user-facing
    /// notice is left to the caller, which sees this flag in the run report.
    pub fn ensure(&self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }

        let create_err = |source| FuzzError::SeedCreate {
            path: self.path.clone(),
            source,
        };
        let mut file = File::create(&self.path).map_err(create_err)?;
        file.write_all(DEFAULT_SEED).map_err(create_err)?;
        file.flush().map_err(create_err)?;

        debug!("Created default seed file {}", self.path.display());
        Ok(true)
    }

    /// Read the whole seed file into memory.
    ///
    /// The buffer is sized from the file's metadata before reading, so an
    /// oversized file fails with an allocation error rather than aborting.
    pub fn load(&self) -> Result<Vec<u8>> {
        let mut file = File::open(&self.path).map_err(|source| FuzzError::SeedOpen {
            path: self.path.clone(),
            source,
        })?;

        let len = file
            .metadata()
            .map_err(|source| FuzzError::SeedRead {
                path: self.path.clone(),
                source,
            })?
            .len();
        let size = usize::try_from(len).map_err(|_| FuzzError::SeedTooLarge {
            path: self.path.clone(),
            len,
        })?;

        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|source| FuzzError::Allocation { requested: size, source })?;
        file.read_to_end(&mut data).map_err(|source| FuzzError::SeedRead {
            path: self.path.clone(),
            source,
        })?;

        debug!("Loaded {} seed bytes from {}", data.len(), self.path.display());
        Ok(data)
    }

    /// Ensure the seed exists, then load it. Returns the buffer and whether it was created.
    pub fn acquire(&self) -> Result<(Vec<u8>, bool)> {
        let created = self.ensure()?;
        let data = self.load()?;
        Ok((data, created))
    }
}
