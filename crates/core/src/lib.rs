// crates/core/src/lib.rs
pub mod error;
pub mod filter;
pub mod paths;
pub mod resume;
pub mod settings;
pub mod store;

pub use error::*;
pub use filter::{filter, sort, view, Matcher, SearchField, SearchQuery, SortColumn, SortOrder, SortSpec};
pub use resume::{resume_archive, ResumeEntry, ResumeFile};
pub use settings::Settings;
pub use store::RecordStore;
