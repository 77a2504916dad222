//! Profiles and the validated values they carry.
//!
//! A profile owns its side of every friendship: the adjacency maps each
//! direct friend's id to the quality of that edge. The other side of the edge
//! lives in the friend's profile and must carry the same quality.

use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Strength label on a friendship edge, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validates a raw quality value.
    pub fn new(value: u8) -> std::result::Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::QualityOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Quality {
    type Error = ValidationError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Age in years, always within `1..=120`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Age(u8);

impl Age {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 120;

    pub fn new(value: u8) -> std::result::Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::AgeOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Age {
    type Error = ValidationError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Age> for u8 {
    fn from(age: Age) -> Self {
        age.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user of the social network.
///
/// The id is fixed at construction. Adjacency is kept in an ordered map so
/// that serialized snapshots are identical across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    id: String,
    name: String,
    age: Age,
    gender: String,
    #[serde(default)]
    adjacency: BTreeMap<String, Quality>,
}

impl Profile {
    /// Creates a profile with no friends.
    ///
    /// Fails if the id is blank or the age is out of range.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        age: u8,
        gender: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::BlankId.into());
        }

        Ok(Self {
            id,
            name: name.into(),
            age: Age::new(age)?,
            gender: gender.into(),
            adjacency: BTreeMap::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> Age {
        self.age
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    /// Direct friends and the quality of each edge, ordered by friend id.
    pub fn friends(&self) -> &BTreeMap<String, Quality> {
        &self.adjacency
    }

    pub fn friend_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_friend(&self, friend_id: &str) -> bool {
        self.adjacency.contains_key(friend_id)
    }

    /// Quality of the edge to `friend_id`, if this side records one.
    pub fn quality_with(&self, friend_id: &str) -> Option<Quality> {
        self.adjacency.get(friend_id).copied()
    }

    /// Records this side of an edge. An existing quality is overwritten.
    ///
    /// Only one side is touched here; use the store-level friendship
    /// operation to keep both sides in step.
    pub fn add_friend(&mut self, friend_id: impl Into<String>, quality: Quality) {
        self.adjacency.insert(friend_id.into(), quality);
    }

    /// Drops this side of an edge, returning its quality if it existed.
    pub fn remove_friend(&mut self, friend_id: &str) -> Option<Quality> {
        self.adjacency.remove(friend_id)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] age {} ({}), {} friends",
            self.name,
            self.id,
            self.age,
            self.gender,
            self.adjacency.len()
        )
    }
}
