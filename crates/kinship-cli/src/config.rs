//! Workspace configuration stored in `.kinship/config.json`.

use clap::ValueEnum;
use kinship_core::Result as CoreResult;
use kinship_graph::{ConnectivityIndex, JsonFileStore, ProfileRepository, SledStore, StoreError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory holding config and data, relative to the workspace.
pub const KINSHIP_DIR: &str = ".kinship";

const CONFIG_FILE: &str = "config.json";

/// Slot count used when no config file exists.
pub const DEFAULT_CAPACITY: usize = 1000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not access config: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where profiles are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Pretty-printed JSON file.
    Json,
    /// Embedded sled database.
    Sled,
}

impl Backend {
    fn default_data(self) -> PathBuf {
        match self {
            Backend::Json => PathBuf::from("profiles.json"),
            Backend::Sled => PathBuf::from("profiles.db"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    pub backend: Backend,
    /// Data location, relative to the `.kinship` directory.
    pub data: PathBuf,
    /// Index slot count; `None` means the index grows on demand.
    pub capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Backend::Json, Some(DEFAULT_CAPACITY))
    }
}

impl Config {
    pub fn new(backend: Backend, capacity: Option<usize>) -> Self {
        Self {
            version: "1.0".to_string(),
            backend,
            data: backend.default_data(),
            capacity,
        }
    }

    pub fn path(workspace: &Path) -> PathBuf {
        workspace.join(KINSHIP_DIR).join(CONFIG_FILE)
    }

    /// Reads the workspace config, falling back to defaults if there is none.
    pub fn load(workspace: &Path) -> Result<Self, ConfigError> {
        let path = Self::path(workspace);
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, workspace: &Path) -> Result<(), ConfigError> {
        fs::create_dir_all(workspace.join(KINSHIP_DIR))?;
        fs::write(Self::path(workspace), serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn data_path(&self, workspace: &Path) -> PathBuf {
        workspace.join(KINSHIP_DIR).join(&self.data)
    }

    /// Opens the configured persistence backend.
    pub fn repository(&self, workspace: &Path) -> Result<Box<dyn ProfileRepository>, StoreError> {
        let path = self.data_path(workspace);
        Ok(match self.backend {
            Backend::Json => Box::new(JsonFileStore::new(path)),
            Backend::Sled => Box::new(SledStore::open(path)?),
        })
    }

    /// Builds an empty connectivity index of the configured shape.
    pub fn index(&self) -> CoreResult<ConnectivityIndex> {
        match self.capacity {
            Some(capacity) => ConnectivityIndex::with_capacity(capacity),
            None => Ok(ConnectivityIndex::growable()),
        }
    }
}
