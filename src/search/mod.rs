//! The search pipeline: dispatch, aggregate, rank, summarize.
//!
//! [`EducationalSearch`] is the entry point. It validates the query, fans it
//! out through the [`Dispatcher`], merges the per-source results with
//! [`aggregate`], scores them with [`rank`] and describes them with
//! [`summarize`].
//!
//! ```rust,no_run
//! use edu_search::config::Config;
//! use edu_search::search::EducationalSearch;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let search = EducationalSearch::from_config(&Config::default())?;
//! let outcome = search.search("equação do segundo grau", &[]).await?;
//! println!("{}", outcome.summary);
//! # Ok(())
//! # }
//! ```

mod aggregate;
mod dispatcher;
mod rank;
mod summary;

pub use aggregate::{aggregate, Aggregation};
pub use dispatcher::{Dispatcher, DEFAULT_SOURCE_TIMEOUT};
pub use rank::{
    content_type_bonus, educational_score, overall_quality, rank, source_bonus,
    CONTENT_TYPE_BONUS, MAX_RESULTS, SOURCE_BONUS,
};
pub use summary::summarize;

use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::models::{Query, SearchOutcome};
use crate::sources::{SourceError, SourceRegistry};

/// Errors that prevent a search outcome from being produced
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The query text was empty or blank
    #[error("Invalid query: query text must not be empty")]
    InvalidQuery,

    /// The service could not be built
    #[error("Failed to initialize sources: {0}")]
    Init(#[from] SourceError),
}

/// Educational content search service
///
/// Holds the source registry (and through it the shared HTTP client) for the
/// lifetime of the process. Each call to [`search`](Self::search) is
/// independent of earlier ones.
#[derive(Debug, Clone)]
pub struct EducationalSearch {
    dispatcher: Dispatcher,
}

impl EducationalSearch {
    /// Create a service over a registry with the default per-source timeout
    pub fn new(registry: SourceRegistry) -> Self {
        Self::with_timeout(registry, DEFAULT_SOURCE_TIMEOUT)
    }

    /// Create a service over a registry with a custom per-source timeout
    pub fn with_timeout(registry: SourceRegistry, timeout: Duration) -> Self {
        Self {
            dispatcher: Dispatcher::with_timeout(Arc::new(registry), timeout),
        }
    }

    /// Create a service with every source the configuration enables
    pub fn from_config(config: &Config) -> Result<Self, SearchError> {
        let registry = SourceRegistry::from_config(config)?;
        Ok(Self::with_timeout(registry, config.search.timeout()))
    }

    /// The registry searched by this service
    pub fn registry(&self) -> &SourceRegistry {
        self.dispatcher.registry()
    }

    /// Search `sources` (all configured sources when empty) for `query`
    ///
    /// Only a blank query fails. Source failures and timeouts end up in
    /// `sources_failed` and never fail the call.
    pub async fn search(&self, query: &str, sources: &[String]) -> Result<SearchOutcome, SearchError> {
        let query = Query::new(query).sources(sources.iter().cloned());
        self.search_query(&query).await
    }

    /// Run a prepared [`Query`]
    pub async fn search_query(&self, query: &Query) -> Result<SearchOutcome, SearchError> {
        if query.text.trim().is_empty() {
            return Err(SearchError::InvalidQuery);
        }

        let started = Instant::now();
        let results = self.dispatcher.dispatch(query).await;

        let Aggregation {
            candidates,
            sources_searched,
            sources_failed,
        } = aggregate(results);
        let candidate_count = candidates.len();

        let results = rank(candidates);
        let overall_quality = overall_quality(&results);
        let summary = summarize(&query.text, &results);

        tracing::info!(
            query = %query.text,
            searched = sources_searched.len(),
            failed = sources_failed.len(),
            candidates = candidate_count,
            results = results.len(),
            quality = overall_quality,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Educational search completed"
        );

        Ok(SearchOutcome {
            query: query.text.clone(),
            sources_searched,
            sources_failed,
            results,
            overall_quality,
            summary,
            timestamp: Utc::now(),
        })
    }
}
