//! Core data models for educational content and search operations.

mod content;
mod search;

pub use content::{ContentItem, ContentItemBuilder, ContentType, ScoredItem};
pub use search::{Query, SearchOutcome, SourceFailure, SourceResult};
