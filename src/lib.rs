//! # Edu Search
//!
//! Concurrent educational content search. A query is sent to several
//! independent sources at once; whatever comes back in time is merged, scored
//! by educational quality, capped at ten results and summarized.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Query, ContentItem, SearchOutcome, etc.)
//! - [`sources`]: Content sources behind the [`Source`] trait and their registry
//! - [`search`]: Dispatcher, aggregation, ranking, summaries and the [`EducationalSearch`] service
//! - [`utils`]: Shared HTTP client
//! - [`config`]: Configuration management

pub mod config;
pub mod models;
pub mod search;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::{ContentItem, SearchOutcome};
pub use search::{EducationalSearch, SearchError};
pub use sources::{Source, SourceRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
