//! Friend suggestions.

use crate::error::{Result, ValidationError};
use crate::profile::{Profile, Quality};

/// A ranked second-degree contact for some query user.
///
/// Borrows the candidate's profile from the store it was computed against, so
/// a suggestion cannot outlive the data it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion<'a> {
    candidate_id: &'a str,
    priority: Quality,
    profile: &'a Profile,
}

impl<'a> Suggestion<'a> {
    /// Creates a suggestion for `profile` ranked at `priority`.
    pub fn new(candidate_id: &'a str, priority: Quality, profile: &'a Profile) -> Result<Self> {
        if candidate_id.trim().is_empty() {
            return Err(ValidationError::BlankId.into());
        }
        Ok(Self {
            candidate_id,
            priority,
            profile,
        })
    }

    pub fn candidate_id(&self) -> &'a str {
        self.candidate_id
    }

    /// Best edge quality over every path to the candidate.
    pub fn priority(&self) -> Quality {
        self.priority
    }

    pub fn profile(&self) -> &'a Profile {
        self.profile
    }

    /// Returns a copy ranked at `priority` instead.
    pub fn with_priority(self, priority: Quality) -> Self {
        Self { priority, ..self }
    }
}
