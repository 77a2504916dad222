//! Kinship Graph - Profiles, connectivity and friend suggestions
//!
//! This crate manages the social graph: the profile store that records every
//! friendship, the union-find index that answers "are these two in the same
//! component?", and the two-hop engine that answers "who should this user
//! befriend next?".
//!
//! # Architecture
//!
//! The [`ProfileStore`] is the source of truth for edges. The
//! [`ConnectivityIndex`] is derived from it and kept in sync explicitly,
//! either per edge by [`SocialNetwork::befriend`] or in bulk by
//! [`NetworkBuilder`] at startup. The [`SuggestionEngine`] reads only the
//! store.
//!
//! # Example
//!
//! ```
//! use kinship_core::Profile;
//! use kinship_graph::{ConnectivityIndex, SocialNetwork};
//!
//! let mut network = SocialNetwork::new(ConnectivityIndex::growable());
//! for (id, name) in [("a", "Ana"), ("b", "Bo"), ("c", "Cy")] {
//!     network.create_profile(Profile::new(id, name, 30, "X").unwrap()).unwrap();
//! }
//! network.befriend("a", "b", 5).unwrap();
//! network.befriend("b", "c", 3).unwrap();
//!
//! assert!(network.connected("a", "c"));
//! let suggestions = network.suggest_friends("a").unwrap();
//! assert_eq!(suggestions[0].candidate_id(), "c");
//! ```

mod builder;
mod connectivity;
mod network;
mod profile_store;
mod projection;
mod query;
mod ranking;
mod store;
mod suggest;

pub use builder::{import_edges, ImportReport, NetworkBuilder};
pub use connectivity::{ConnectivityIndex, IndexSnapshot};
pub use network::SocialNetwork;
pub use profile_store::ProfileStore;
pub use projection::{GraphEdge, GraphNode, GraphProjection};
pub use query::{ProfileInfo, SuggestionInfo};
pub use ranking::{merge_sort_by, rank_suggestions};
pub use store::{JsonFileStore, ProfileRepository, SledStore, StoreError};
pub use suggest::SuggestionEngine;
