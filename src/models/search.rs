//! Search request, per-source result and aggregate outcome models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{ContentItem, ScoredItem};

/// A user query together with the sources it should be sent to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Free-text query
    pub text: String,

    /// Source identifiers to search; empty means every configured source
    #[serde(default)]
    pub requested_sources: Vec<String>,
}

impl Query {
    /// Create a query that targets every configured source
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            requested_sources: Vec::new(),
        }
    }

    /// Restrict the query to the given source identifiers
    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requested_sources = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the query targets every configured source
    pub fn targets_all(&self) -> bool {
        self.requested_sources.iter().all(|s| s.trim().is_empty())
    }
}

/// Why a single source did not contribute results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum SourceFailure {
    /// The source exceeded its time budget
    #[error("timed out")]
    Timeout,

    /// The source raised or returned an unexpected error
    #[error("adapter failure: {0}")]
    AdapterFailure(String),
}

/// The outcome of one source invocation
///
/// `items` is empty whenever `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceResult {
    /// Registry identifier of the source
    pub source_id: String,

    /// Items in the order the source returned them
    pub items: Vec<ContentItem>,

    /// Failure, if the source did not complete successfully
    pub error: Option<SourceFailure>,
}

impl SourceResult {
    /// A successful result, possibly with no items
    pub fn success(source_id: impl Into<String>, items: Vec<ContentItem>) -> Self {
        Self {
            source_id: source_id.into(),
            items,
            error: None,
        }
    }

    /// A failed result; carries no items
    pub fn failure(source_id: impl Into<String>, error: SourceFailure) -> Self {
        Self {
            source_id: source_id.into(),
            items: Vec::new(),
            error: Some(error),
        }
    }

    /// Whether the source completed without error
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// The final aggregate returned for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// The query text as submitted
    pub query: String,

    /// Sources that completed without error (even with zero items)
    pub sources_searched: BTreeSet<String>,

    /// Sources that failed or timed out
    pub sources_failed: BTreeSet<String>,

    /// Ranked results, best first
    pub results: Vec<ScoredItem>,

    /// Mean final score over `results`, 0.0 when empty
    pub overall_quality: f64,

    /// Human-readable summary
    pub summary: String,

    /// When the outcome was assembled
    pub timestamp: DateTime<Utc>,
}

impl SearchOutcome {
    /// Whether any results were found
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
