//! Runtime configuration for an ingestion run.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone, Hash)]
pub enum ConfigError {
    #[error("Hero username is empty")]
    EmptyHero,

    #[error("No input files or directories given")]
    NoInputs,

    #[error("Input path does not exist: {0}")]
    MissingInput(PathBuf),

    #[error("Store path is a directory: {0}")]
    StorePathIsDirectory(PathBuf),
}

/// Who the hero is, what to read and where to keep the results.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerConfig {
    pub hero: String,
    /// Session files or directories of them.
    pub inputs: Vec<PathBuf>,
    /// JSON Lines store. Hands are only kept in memory without one.
    pub store_path: Option<PathBuf>,
}

impl LedgerConfig {
    pub fn new(hero: impl Into<String>, inputs: Vec<PathBuf>) -> Self {
        Self {
            hero: hero.into(),
            inputs,
            store_path: None,
        }
    }

    pub fn with_store_path(mut self, store_path: impl Into<PathBuf>) -> Self {
        self.store_path = Some(store_path.into());
        self
    }

    /// Check the configuration before any file is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hero.trim().is_empty() {
            return Err(ConfigError::EmptyHero);
        }
        if self.inputs.is_empty() {
            return Err(ConfigError::NoInputs);
        }
        if let Some(missing) = self.inputs.iter().find(|p| !p.exists()) {
            return Err(ConfigError::MissingInput(missing.clone()));
        }
        match &self.store_path {
            Some(path) if path.is_dir() => Err(ConfigError::StorePathIsDirectory(path.clone())),
            _ => Ok(()),
        }
    }
}
