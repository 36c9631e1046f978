use std::path::PathBuf;

use crate::{ensure, Error};

/// Highest accepted `max_level`. A list needs about 2^level entries before
/// a level is expected to be occupied, so anything above this is never used.
pub const MAX_LEVEL_LIMIT: usize = 64;

const DEFAULT_MAX_LEVEL: usize = 32;
const DEFAULT_STORE_PATH: &str = "store/dumpFile";

#[derive(Debug, Clone)]
pub struct Config {
    /// Highest level a node can be assigned. The header spans `0..=max_level`.
    pub max_level: usize,
    /// Snapshot file used by `dump` and `load`.
    pub store_path: PathBuf,
    /// Seed for level generation. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            seed: None,
        }
    }
}

impl Config {
    pub fn with_max_level(max_level: usize) -> Self {
        Self {
            max_level,
            ..Default::default()
        }
    }

    pub fn store_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.store_path = path.into();
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn validate(&self) -> crate::Result<()> {
        ensure!(
            self.max_level <= MAX_LEVEL_LIMIT,
            Error::ConfigError(format!(
                "max_level {} exceeds limit {}",
                self.max_level, MAX_LEVEL_LIMIT
            ))
        );
        ensure!(
            !self.store_path.as_os_str().is_empty(),
            Error::ConfigError("store_path is empty".to_string())
        );
        Ok(())
    }
}
