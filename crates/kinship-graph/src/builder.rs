//! Network builder for reconstructing state from a profile snapshot.
//!
//! Persistence only captures profiles. The builder restores everything else
//! in two passes:
//! 1. Add every profile to the store and register it in the index
//! 2. Replay the adjacency of every profile into the index as unions

use crate::connectivity::ConnectivityIndex;
use crate::network::SocialNetwork;
use crate::profile_store::ProfileStore;
use kinship_core::{Profile, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Outcome of a bulk edge import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Unions that merged two components.
    pub unions: usize,
    /// Adjacency entries naming an id the index does not know.
    pub skipped: usize,
}

/// Replays every stored edge into the connectivity index.
///
/// Pairs that are already connected are left alone, so running this twice
/// creates no new unions the second time.
pub fn import_edges(store: &ProfileStore, index: &mut ConnectivityIndex) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    for profile in store.enumerate_all() {
        for (friend_id, quality) in profile.friends() {
            if index.connected(profile.id(), friend_id) {
                continue;
            }
            if !index.contains(profile.id()) || !index.contains(friend_id) {
                warn!(
                    "Skipping edge {} -> {}: not registered in the index",
                    profile.id(),
                    friend_id
                );
                report.skipped += 1;
                continue;
            }

            if index.generate_friendship(profile.id(), friend_id, quality.get())? {
                report.unions += 1;
            }
        }
    }

    debug!(
        "Imported edges: {} unions, {} skipped",
        report.unions, report.skipped
    );
    Ok(report)
}

/// Builds a [`SocialNetwork`] from loaded profiles.
#[derive(Debug)]
pub struct NetworkBuilder {
    store: ProfileStore,
    index: ConnectivityIndex,
}

impl NetworkBuilder {
    /// Starts a builder around an empty index.
    pub fn new(index: ConnectivityIndex) -> Self {
        Self {
            store: ProfileStore::new(),
            index,
        }
    }

    /// Adds profiles and registers them in the index.
    ///
    /// Blank or duplicate ids are logged and skipped. Running out of index
    /// capacity is an error.
    pub fn add_profiles(&mut self, profiles: Vec<Profile>) -> Result<&mut Self> {
        for profile in profiles {
            let id = profile.id().to_string();
            if let Err(e) = self.store.check_insertable(&id) {
                warn!("Could not load profile {:?}: {}", id, e);
                continue;
            }
            self.index.add_user(&id)?;
            self.store.create(profile)?;
        }
        Ok(self)
    }

    /// Resolves stored edges and returns the finished network.
    pub fn build(mut self) -> Result<(SocialNetwork, ImportReport)> {
        let report = import_edges(&self.store, &mut self.index)?;
        info!(
            "Loaded {} profiles ({} friendship unions)",
            self.store.count(),
            report.unions
        );
        Ok((SocialNetwork::from_parts(self.store, self.index), report))
    }
}
