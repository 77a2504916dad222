//! Two-hop friend suggestions.
//!
//! Walks the adjacency of the query user's direct friends to find everyone
//! reachable through exactly one intermediary. Each candidate is scored with
//! the best quality among the query user's edges that lead to it, then the
//! list is ranked by [`crate::rank_suggestions`].
//!
//! Only the profile store is consulted; the connectivity index plays no part.

use crate::profile_store::ProfileStore;
use crate::ranking::rank_suggestions;
use kinship_core::{Error, Result, Suggestion};
use std::collections::HashMap;
use tracing::debug;

/// Computes friend suggestions against a borrowed store.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionEngine<'a> {
    store: &'a ProfileStore,
}

impl<'a> SuggestionEngine<'a> {
    pub fn new(store: &'a ProfileStore) -> Self {
        Self { store }
    }

    /// Returns every second-degree contact of `user_id`, best first.
    ///
    /// An empty list means nobody qualifies. Fails only if `user_id` itself is
    /// unknown.
    pub fn suggest_friends(&self, user_id: &str) -> Result<Vec<Suggestion<'a>>> {
        let user = self
            .store
            .lookup(user_id)
            .ok_or_else(|| Error::not_found(user_id))?;

        // Candidates in first-discovery order, plus their position by id.
        let mut candidates: Vec<Suggestion<'a>> = Vec::new();
        let mut positions: HashMap<&'a str, usize> = HashMap::new();

        for (friend_id, &quality) in user.friends() {
            let Some(friend) = self.store.lookup(friend_id) else {
                continue;
            };

            for candidate_id in friend.friends().keys() {
                if candidate_id == user_id || user.is_friend(candidate_id) {
                    continue;
                }
                let Some(candidate) = self.store.lookup(candidate_id) else {
                    continue;
                };

                match positions.get(candidate.id()) {
                    Some(&pos) => {
                        if quality > candidates[pos].priority() {
                            candidates[pos] = candidates[pos].with_priority(quality);
                        }
                    }
                    None => {
                        positions.insert(candidate.id(), candidates.len());
                        candidates.push(Suggestion::new(candidate.id(), quality, candidate)?);
                    }
                }
            }
        }

        debug!(
            "Found {} suggestion candidates for {}",
            candidates.len(),
            user_id
        );
        Ok(rank_suggestions(candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship_core::{Profile, Quality};

    fn add(store: &mut ProfileStore, id: &str, name: &str) {
        store.create(Profile::new(id, name, 30, "X").unwrap()).unwrap();
    }

    fn summary(suggestions: &[Suggestion<'_>]) -> Vec<(String, u8)> {
        suggestions
            .iter()
            .map(|s| (s.candidate_id().to_string(), s.priority().get()))
            .collect()
    }

    /// A(B:5), B(A:5, C:3), C(B:3), D.
    fn scenario() -> ProfileStore {
        let mut store = ProfileStore::new();
        add(&mut store, "A", "Alice");
        add(&mut store, "B", "Bruno");
        add(&mut store, "C", "Carla");
        add(&mut store, "D", "Dario");
        store.generate_friendship("A", "B", 5).unwrap();
        store.generate_friendship("B", "C", 3).unwrap();
        store
    }

    #[test]
    fn test_scenario() {
        let mut store = scenario();

        // Scored by A's own edge to the intermediary B.
        let for_a = SuggestionEngine::new(&store).suggest_friends("A").unwrap();
        assert_eq!(summary(&for_a), vec![("C".to_string(), 5)]);
        assert_eq!(for_a[0].profile().name(), "Carla");

        assert!(SuggestionEngine::new(&store)
            .suggest_friends("D")
            .unwrap()
            .is_empty());

        store.generate_friendship("A", "D", 2).unwrap();
        let for_d = SuggestionEngine::new(&store).suggest_friends("D").unwrap();
        assert_eq!(summary(&for_d), vec![("B".to_string(), 2)]);
    }

    #[test]
    fn test_unknown_user() {
        let store = scenario();
        let err = SuggestionEngine::new(&store)
            .suggest_friends("nobody")
            .unwrap_err();
        assert_eq!(err, Error::not_found("nobody"));
    }

    #[test]
    fn test_priority_is_best_path_quality() {
        // U reaches X through F1 (quality 2) and F2 (quality 4).
        let mut store = ProfileStore::new();
        for id in ["U", "F1", "F2", "X"] {
            add(&mut store, id, id);
        }
        store.generate_friendship("U", "F1", 2).unwrap();
        store.generate_friendship("U", "F2", 4).unwrap();
        store.generate_friendship("F1", "X", 5).unwrap();
        store.generate_friendship("F2", "X", 1).unwrap();

        let suggestions = SuggestionEngine::new(&store).suggest_friends("U").unwrap();
        assert_eq!(summary(&suggestions), vec![("X".to_string(), 4)]);
    }

    #[test]
    fn test_excludes_self_and_direct_friends() {
        // Triangle U-F-G: G is a friend of F but already U's friend.
        let mut store = ProfileStore::new();
        for id in ["U", "F", "G", "H"] {
            add(&mut store, id, id);
        }
        store.generate_friendship("U", "F", 3).unwrap();
        store.generate_friendship("U", "G", 3).unwrap();
        store.generate_friendship("F", "G", 3).unwrap();
        store.generate_friendship("G", "H", 1).unwrap();

        let suggestions = SuggestionEngine::new(&store).suggest_friends("U").unwrap();
        assert_eq!(summary(&suggestions), vec![("H".to_string(), 3)]);
    }

    #[test]
    fn test_ignores_third_degree_contacts() {
        let mut store = ProfileStore::new();
        for id in ["U", "F", "S", "T"] {
            add(&mut store, id, id);
        }
        store.generate_friendship("U", "F", 3).unwrap();
        store.generate_friendship("F", "S", 3).unwrap();
        store.generate_friendship("S", "T", 3).unwrap();

        let suggestions = SuggestionEngine::new(&store).suggest_friends("U").unwrap();
        assert_eq!(summary(&suggestions), vec![("S".to_string(), 3)]);
    }

    #[test]
    fn test_ties_ordered_by_name_ignoring_case() {
        let mut store = ProfileStore::new();
        add(&mut store, "u", "User");
        add(&mut store, "f", "Friend");
        add(&mut store, "c1", "zoe");
        add(&mut store, "c2", "Adam");
        add(&mut store, "c3", "bea");
        add(&mut store, "c4", "Max");
        store.generate_friendship("u", "f", 3).unwrap();
        for id in ["c1", "c2", "c3", "c4"] {
            store.generate_friendship("f", id, 1).unwrap();
        }

        let names: Vec<&str> = SuggestionEngine::new(&store)
            .suggest_friends("u")
            .unwrap()
            .iter()
            .map(|s| s.profile().name())
            .collect();
        assert_eq!(names, vec!["Adam", "bea", "Max", "zoe"]);
    }

    #[test]
    fn test_higher_priority_first() {
        let mut store = ProfileStore::new();
        for (id, name) in [("u", "U"), ("weak", "W"), ("strong", "S"), ("a", "Aa"), ("b", "Bb")] {
            add(&mut store, id, name);
        }
        store.generate_friendship("u", "weak", 1).unwrap();
        store.generate_friendship("u", "strong", 5).unwrap();
        store.generate_friendship("weak", "a", 5).unwrap();
        store.generate_friendship("strong", "b", 1).unwrap();

        let suggestions = SuggestionEngine::new(&store).suggest_friends("u").unwrap();
        assert_eq!(
            summary(&suggestions),
            vec![("b".to_string(), 5), ("a".to_string(), 1)]
        );
    }

    #[test]
    fn test_skips_dangling_references() {
        let mut store = scenario();
        // A still lists B, and B still lists C, but C's profile is gone.
        store.delete("C");
        assert!(SuggestionEngine::new(&store)
            .suggest_friends("A")
            .unwrap()
            .is_empty());

        // A friend entry whose profile is missing is skipped too.
        store
            .lookup_mut("D")
            .unwrap()
            .add_friend("ghost", Quality::new(4).unwrap());
        assert!(SuggestionEngine::new(&store)
            .suggest_friends("D")
            .unwrap()
            .is_empty());
    }
}
