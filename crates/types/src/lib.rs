// crates/types/src/lib.rs
//! Shared data model for jobtrack: the job [`Record`], its enumerated
//! [`Status`] and [`ExperienceLevel`], and the case-insensitive
//! [`IdentityKey`] used for lookup and deduplication.

pub mod labels;
pub mod record;

pub use labels::{ExperienceLevel, ParseLabelError, Status};
pub use record::{parse_keywords, IdentityKey, Record};
