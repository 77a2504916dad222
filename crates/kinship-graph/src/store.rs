//! Profile persistence.
//!
//! Only profiles are persisted; the connectivity index is rebuilt from their
//! adjacency on load (see [`crate::NetworkBuilder`]). Both backends write
//! profiles in id order so repeated saves of the same data are identical.

use kinship_core::Profile;
use sled::{Batch, Db, Tree};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Database error: {0}")]
    Sled(#[from] sled::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("Stored profiles at {} could not be read ({reason}); refusing to overwrite them", .path.display())]
    Unavailable { path: PathBuf, reason: String },
}

/// Loads and saves profile snapshots.
pub trait ProfileRepository {
    /// Reads every stored profile.
    fn load(&self) -> Result<Vec<Profile>, StoreError>;

    /// Replaces the stored snapshot with `profiles`.
    fn save(&self, profiles: &[&Profile]) -> Result<(), StoreError>;
}

fn sorted<'a>(profiles: &[&'a Profile]) -> Vec<&'a Profile> {
    let mut sorted = profiles.to_vec();
    sorted.sort_by(|a, b| a.id().cmp(b.id()));
    sorted
}

/// Pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileRepository for JsonFileStore {
    /// A missing file is an empty snapshot, not an error.
    fn load(&self) -> Result<Vec<Profile>, StoreError> {
        if !self.path.exists() {
            debug!("No profile file at {}", self.path.display());
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        let profiles: Vec<Profile> = serde_json::from_str(&raw)?;
        info!(
            "Read {} profiles from {}",
            profiles.len(),
            self.path.display()
        );
        Ok(profiles)
    }

    fn save(&self, profiles: &[&Profile]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&sorted(profiles))?;
        fs::write(&self.path, json)?;
        debug!(
            "Saved {} profiles to {}",
            profiles.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Embedded sled database, one bincode record per profile.
pub struct SledStore {
    db: Db,
    profiles: Tree,
}

impl SledStore {
    /// Opens or creates a store at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        let profiles = db.open_tree("profiles")?;
        Ok(Self { db, profiles })
    }
}

impl ProfileRepository for SledStore {
    fn load(&self) -> Result<Vec<Profile>, StoreError> {
        let mut profiles = Vec::new();
        for entry in self.profiles.iter() {
            let (_, bytes) = entry?;
            profiles.push(bincode::deserialize(&bytes)?);
        }
        Ok(profiles)
    }

    /// Replaces the whole tree in a single atomic batch.
    fn save(&self, profiles: &[&Profile]) -> Result<(), StoreError> {
        let mut batch = Batch::default();
        for key in self.profiles.iter().keys() {
            batch.remove(key?);
        }
        for profile in sorted(profiles) {
            batch.insert(profile.id().as_bytes(), bincode::serialize(profile)?);
        }

        self.profiles.apply_batch(batch)?;
        self.db.flush()?;
        Ok(())
    }
}
