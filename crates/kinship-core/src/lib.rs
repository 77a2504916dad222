//! Kinship Core - Profiles, friendship quality and errors
//!
//! This crate holds the data model shared by the rest of Kinship: the
//! [`Profile`] record with its weighted adjacency, the validated [`Quality`]
//! and [`Age`] values, the borrowed [`Suggestion`] produced by the friend
//! recommender, and the error taxonomy every operation reports through.
//!
//! # Example
//!
//! ```
//! use kinship_core::{Profile, Quality};
//!
//! let mut ana = Profile::new("ana", "Ana", 30, "F").unwrap();
//! ana.add_friend("bo", Quality::new(4).unwrap());
//! assert!(ana.is_friend("bo"));
//! ```

mod error;
mod profile;
mod suggestion;

pub use error::{Error, Result, ValidationError};
pub use profile::{Age, Profile, Quality};
pub use suggestion::Suggestion;
