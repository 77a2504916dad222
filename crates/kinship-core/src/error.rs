//! Error types for Kinship.
//!
//! Every failure in the core is synchronous and typed. Nothing here is
//! transient, so callers should never retry on these.

use thiserror::Error;

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for profile, index and suggestion operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input was rejected before any state changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A query or mutation referenced an unknown profile id.
    #[error("profile not found: {0}")]
    NotFound(String),

    /// Every slot of a fixed-capacity connectivity index is in use.
    #[error("connectivity index is full ({capacity} slots)")]
    CapacityExceeded { capacity: usize },

    /// An internal handle fell outside the assigned range.
    ///
    /// This means the profile store and the connectivity index drifted apart.
    #[error("index {index} is not assigned (valid range 0..{assigned})")]
    InvalidIndex { index: usize, assigned: usize },
}

/// Reasons an input is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("profile id must not be blank")]
    BlankId,

    #[error("profile already exists: {0}")]
    DuplicateId(String),

    #[error("age {0} is outside 1..=120")]
    AgeOutOfRange(u8),

    #[error("friendship quality {0} is outside 1..=5")]
    QualityOutOfRange(u8),

    #[error("a profile cannot befriend itself: {0}")]
    SelfFriendship(String),

    #[error("connectivity index capacity must be greater than zero")]
    ZeroCapacity,
}

impl Error {
    /// Shorthand for [`Error::NotFound`].
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_converts_into_error() {
        let err: Error = ValidationError::BlankId.into();
        assert_eq!(err, Error::Validation(ValidationError::BlankId));
        assert_eq!(err.to_string(), "profile id must not be blank");
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::CapacityExceeded { capacity: 3 }.to_string(),
            "connectivity index is full (3 slots)"
        );
        assert_eq!(
            Error::InvalidIndex {
                index: 7,
                assigned: 2
            }
            .to_string(),
            "index 7 is not assigned (valid range 0..2)"
        );
        assert_eq!(Error::not_found("ana").to_string(), "profile not found: ana");
    }
}
