//! Keyed profile collection.
//!
//! The store is the single source of truth for friendship edges. Each edge is
//! recorded twice, once in each endpoint's adjacency, and
//! [`ProfileStore::generate_friendship`] is the only place that writes them.

use kinship_core::{Error, Profile, Quality, Result, ValidationError};
use std::collections::HashMap;
use tracing::debug;

/// In-memory profile table keyed by profile id.
#[derive(Debug, Default, Clone)]
pub struct ProfileStore {
    profiles: HashMap<String, Profile>,
}

impl ProfileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new profile.
    ///
    /// Fails if the id is blank or already taken.
    pub fn create(&mut self, profile: Profile) -> Result<()> {
        self.check_insertable(profile.id())?;
        debug!("Created profile {}", profile.id());
        self.profiles.insert(profile.id().to_string(), profile);
        Ok(())
    }

    /// Checks whether `id` could be passed to [`create`](Self::create).
    pub(crate) fn check_insertable(&self, id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(ValidationError::BlankId.into());
        }
        if self.profiles.contains_key(id) {
            return Err(ValidationError::DuplicateId(id.to_string()).into());
        }
        Ok(())
    }

    pub fn lookup(&self, id: &str) -> Option<&Profile> {
        self.profiles.get(id)
    }

    pub fn lookup_mut(&mut self, id: &str) -> Option<&mut Profile> {
        self.profiles.get_mut(id)
    }

    pub fn exists(&self, id: &str) -> bool {
        self.profiles.contains_key(id)
    }

    /// Removes a profile. Does nothing if it is absent.
    ///
    /// Reciprocal adjacency entries in other profiles are left in place.
    pub fn delete(&mut self, id: &str) -> Option<Profile> {
        self.profiles.remove(id)
    }

    pub fn count(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Iterates over every profile in no particular order.
    pub fn enumerate_all(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.values()
    }

    /// Quality of the edge between two profiles.
    ///
    /// Checks `a`'s adjacency first and falls back to `b`'s.
    pub fn shared_quality(&self, a: &str, b: &str) -> Option<Quality> {
        self.lookup(a)
            .and_then(|profile| profile.quality_with(b))
            .or_else(|| self.lookup(b).and_then(|profile| profile.quality_with(a)))
    }

    /// Records a friendship on both sides.
    ///
    /// Both ids must exist and differ, and the quality must be in `1..=5`.
    /// The connectivity index is not touched.
    pub fn generate_friendship(&mut self, a: &str, b: &str, quality: u8) -> Result<()> {
        self.check_friendship(a, b)?;
        let quality = Quality::new(quality)?;

        if let Some(profile) = self.profiles.get_mut(a) {
            profile.add_friend(b, quality);
        }
        if let Some(profile) = self.profiles.get_mut(b) {
            profile.add_friend(a, quality);
        }

        debug!("Recorded friendship {} <-> {} ({})", a, b, quality);
        Ok(())
    }

    pub(crate) fn check_friendship(&self, a: &str, b: &str) -> Result<()> {
        for id in [a, b] {
            if !self.exists(id) {
                return Err(Error::not_found(id));
            }
        }
        if a == b {
            return Err(ValidationError::SelfFriendship(a.to_string()).into());
        }
        Ok(())
    }
}
