//! The social network context.
//!
//! `SocialNetwork` owns the profile store and the connectivity index and is
//! the only type that mutates both. Each compound operation checks the
//! preconditions of both structures before writing to either, so they never
//! drift apart through this API.

use crate::builder::{import_edges, ImportReport};
use crate::connectivity::ConnectivityIndex;
use crate::profile_store::ProfileStore;
use crate::projection::GraphProjection;
use crate::suggest::SuggestionEngine;
use kinship_core::{Error, Profile, Quality, Result, Suggestion};
use tracing::{debug, info};

/// Profiles plus the connectivity index derived from them.
#[derive(Debug, Clone)]
pub struct SocialNetwork {
    profiles: ProfileStore,
    index: ConnectivityIndex,
}

impl SocialNetwork {
    /// Creates an empty network around `index`.
    pub fn new(index: ConnectivityIndex) -> Self {
        Self::from_parts(ProfileStore::new(), index)
    }

    pub(crate) fn from_parts(profiles: ProfileStore, index: ConnectivityIndex) -> Self {
        Self { profiles, index }
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    pub fn index(&self) -> &ConnectivityIndex {
        &self.index
    }

    /// Adds a profile to the store and registers it in the index.
    pub fn create_profile(&mut self, profile: Profile) -> Result<()> {
        self.profiles.check_insertable(profile.id())?;
        self.index.add_user(profile.id())?;
        info!("Created profile {}", profile.id());
        self.profiles.create(profile)
    }

    /// Records a friendship in the store and merges the two components.
    pub fn befriend(&mut self, a: &str, b: &str, quality: u8) -> Result<()> {
        self.profiles.check_friendship(a, b)?;
        Quality::new(quality)?;
        for id in [a, b] {
            if !self.index.contains(id) {
                return Err(Error::not_found(id));
            }
        }

        self.profiles.generate_friendship(a, b, quality)?;
        let merged = self.index.generate_friendship(a, b, quality)?;
        info!(
            "Created friendship {} <-> {} (quality {}, merged: {})",
            a, b, quality, merged
        );
        Ok(())
    }

    /// Whether two profiles are in the same component.
    pub fn connected(&mut self, a: &str, b: &str) -> bool {
        self.index.connected(a, b)
    }

    /// Ranked two-hop suggestions for `user_id`.
    pub fn suggest_friends(&self, user_id: &str) -> Result<Vec<Suggestion<'_>>> {
        debug!("Suggesting friends for {}", user_id);
        SuggestionEngine::new(&self.profiles).suggest_friends(user_id)
    }

    /// Re-runs the bulk edge import over the current store.
    pub fn import_edges(&mut self) -> Result<ImportReport> {
        import_edges(&self.profiles, &mut self.index)
    }

    /// Profiles sorted by id.
    pub fn list_profiles(&self) -> Vec<&Profile> {
        let mut profiles: Vec<&Profile> = self.profiles.enumerate_all().collect();
        profiles.sort_by(|a, b| a.id().cmp(b.id()));
        profiles
    }

    /// Read-only graph view for rendering.
    pub fn projection(&self) -> GraphProjection {
        GraphProjection::from_store(&self.profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship_core::ValidationError;

    fn network(ids: &[&str]) -> SocialNetwork {
        let mut network = SocialNetwork::new(ConnectivityIndex::with_capacity(8).unwrap());
        for id in ids {
            network
                .create_profile(Profile::new(*id, *id, 30, "X").unwrap())
                .unwrap();
        }
        network
    }

    #[test]
    fn test_create_profile_registers_in_index() {
        let network = network(&["A", "B"]);
        assert_eq!(network.profiles().count(), 2);
        assert_eq!(network.index().index_of("A"), Some(0));
        assert_eq!(network.index().index_of("B"), Some(1));
    }

    #[test]
    fn test_create_profile_failure_leaves_both_untouched() {
        let mut network = network(&["A"]);
        let err = network
            .create_profile(Profile::new("A", "Again", 30, "X").unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            Error::Validation(ValidationError::DuplicateId("A".to_string()))
        );
        assert_eq!(network.index().len(), 1);
    }

    #[test]
    fn test_capacity_failure_leaves_store_untouched() {
        let mut network = SocialNetwork::new(ConnectivityIndex::with_capacity(1).unwrap());
        network
            .create_profile(Profile::new("A", "A", 30, "X").unwrap())
            .unwrap();
        let err = network
            .create_profile(Profile::new("B", "B", 30, "X").unwrap())
            .unwrap_err();
        assert_eq!(err, Error::CapacityExceeded { capacity: 1 });
        assert!(!network.profiles().exists("B"));
    }

    #[test]
    fn test_befriend_updates_both_views() {
        let mut network = network(&["A", "B", "C"]);
        network.befriend("A", "B", 4).unwrap();

        assert_eq!(
            network.profiles().shared_quality("A", "B"),
            Quality::new(4).ok()
        );
        assert!(network.connected("A", "B"));
        assert!(!network.connected("A", "C"));
        assert_eq!(network.index().component_count(), 7);
    }

    #[test]
    fn test_befriend_rejects_before_writing() {
        let mut network = network(&["A", "B"]);
        assert!(network.befriend("A", "B", 9).is_err());
        assert!(network.befriend("A", "A", 3).is_err());
        assert!(network.befriend("A", "Z", 3).is_err());

        assert_eq!(network.profiles().lookup("A").unwrap().friend_count(), 0);
        assert!(!network.connected("A", "B"));
    }

    #[test]
    fn test_store_only_edges_need_import() {
        let mut network = network(&["A", "B", "C", "D"]);
        network.befriend("A", "B", 5).unwrap();

        // Written straight to the store, bypassing the index.
        network
            .profiles
            .generate_friendship("B", "C", 3)
            .unwrap();
        assert!(!network.connected("A", "C"));

        let report = network.import_edges().unwrap();
        assert_eq!(report.unions, 1);
        assert!(network.connected("A", "C"));
        assert!(!network.connected("A", "D"));
    }

    #[test]
    fn test_suggest_and_list() {
        let mut network = network(&["C", "A", "B", "D"]);
        network.befriend("A", "B", 5).unwrap();
        network.befriend("B", "C", 3).unwrap();

        let suggestions = network.suggest_friends("A").unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].candidate_id(), "C");

        let ids: Vec<&str> = network.list_profiles().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["A", "B", "C", "D"]);
    }
}
