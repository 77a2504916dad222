//! Owned, serializable views of query results.

use kinship_core::{Profile, Suggestion};
use serde::Serialize;

/// Summary of a profile for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileInfo {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub gender: String,
    #[serde(rename = "friendCount")]
    pub friend_count: usize,
}

impl From<&Profile> for ProfileInfo {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id().to_string(),
            name: profile.name().to_string(),
            age: profile.age().get(),
            gender: profile.gender().to_string(),
            friend_count: profile.friend_count(),
        }
    }
}

/// A suggestion detached from the store it was computed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionInfo {
    pub id: String,
    pub name: String,
    pub priority: u8,
}

impl From<&Suggestion<'_>> for SuggestionInfo {
    fn from(suggestion: &Suggestion<'_>) -> Self {
        Self {
            id: suggestion.candidate_id().to_string(),
            name: suggestion.profile().name().to_string(),
            priority: suggestion.priority().get(),
        }
    }
}
