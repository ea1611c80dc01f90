//! Educational content sources with a trait-based architecture.
//!
//! This module defines the [`Source`] trait that every content source
//! implements. Sources are registered by identifier in the [`SourceRegistry`],
//! which is built once at startup and then only read.
//!
//! # Feature Flags
//!
//! Individual sources can be disabled at compile time using Cargo features:
//!
//! - `wikipedia` - Wikipedia REST summary with an opensearch fallback (default: enabled)
//! - `brasil_escola` - Brasil Escola portal (default: enabled)
//! - `so_matematica` - Só Matemática, mathematics queries only (default: enabled)
//! - `khan_academy` - Khan Academy search links (default: enabled)
//! - `duckduckgo` - DuckDuckGo Instant Answer API (default: enabled)
//!
//! # Runtime Source Configuration
//!
//! All compiled-in sources are registered unless the `[sources]` section of the
//! configuration says otherwise:
//!
//! - `enabled` - only use these sources
//! - `disabled` - never use these sources (takes precedence)
//!
//! The same lists can be given through `EDU_SEARCH_SOURCES__ENABLED` and
//! `EDU_SEARCH_SOURCES__DISABLED`.

#[cfg(feature = "source-brasil-escola")]
mod brasil_escola;
#[cfg(feature = "source-duckduckgo")]
mod duckduckgo;
#[cfg(feature = "source-khan-academy")]
mod khan_academy;
mod registry;
#[cfg(feature = "source-so-matematica")]
mod so_matematica;
#[cfg(feature = "source-wikipedia")]
mod wikipedia;

pub mod mock;

#[cfg(feature = "source-brasil-escola")]
pub use brasil_escola::BrasilEscolaSource;
#[cfg(feature = "source-duckduckgo")]
pub use duckduckgo::DuckDuckGoSource;
#[cfg(feature = "source-khan-academy")]
pub use khan_academy::KhanAcademySource;
pub use mock::MockSource;
pub use registry::SourceRegistry;
#[cfg(feature = "source-so-matematica")]
pub use so_matematica::SoMatematicaSource;
#[cfg(feature = "source-wikipedia")]
pub use wikipedia::WikipediaSource;

use crate::models::ContentItem;
use async_trait::async_trait;

/// The Source trait defines the interface for all content sources.
///
/// # Implementing a New Source
///
/// 1. Create a struct that implements `Source`
/// 2. Return a stable `id` (used to select the source) and a display `name`
///    (stamped on every item as its `source_name`)
/// 3. Bound every network call; the dispatcher stops waiting after its timeout
///    but cannot force the call to end
/// 4. Register the source in [`SourceRegistry::from_config`] or at runtime
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g., "wikipedia")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Trust baseline given to items from the preferred retrieval path
    fn base_quality(&self) -> f64;

    /// Search for educational content matching the query text
    ///
    /// Items are returned in the order the source ranks them. An empty vector
    /// is a successful search that found nothing.
    async fn search(&self, query: &str) -> Result<Vec<ContentItem>, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (JSON, HTML, etc.)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// API error from the source
    #[error("API error: {0}")]
    Api(String),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

/// Encode a query for a form-style query string (spaces become `+`)
pub(crate) fn form_encode(query: &str) -> String {
    url::form_urlencoded::byte_serialize(query.trim().as_bytes()).collect()
}
