//! Concurrent fan-out of one query to many sources.

use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};

use crate::models::{Query, SourceFailure, SourceResult};
use crate::sources::{Source, SourceRegistry};

/// Default per-source time budget
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(10);

/// Dispatches a query to every resolved source in parallel
///
/// Each source runs in its own task. The dispatcher waits for all of them
/// against one shared deadline; a source still running at the deadline is
/// recorded as [`SourceFailure::Timeout`] and its task is told to abort.
/// Whatever it produces afterwards is dropped with the task.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<SourceRegistry>,
    timeout: Duration,
}

impl Dispatcher {
    /// Create a dispatcher with the default timeout
    pub fn new(registry: Arc<SourceRegistry>) -> Self {
        Self::with_timeout(registry, DEFAULT_SOURCE_TIMEOUT)
    }

    /// Create a dispatcher with a custom per-source timeout
    pub fn with_timeout(registry: Arc<SourceRegistry>, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    /// The per-source timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The registry sources are resolved from
    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Search every source the query resolves to
    ///
    /// Returns one result per resolved source, in resolution order. Unknown
    /// source identifiers produce no entry.
    pub async fn dispatch(&self, query: &Query) -> Vec<SourceResult> {
        let sources = self.registry.resolve(&query.requested_sources);
        self.dispatch_to(sources, &query.text).await
    }

    async fn dispatch_to(&self, sources: Vec<Arc<dyn Source>>, text: &str) -> Vec<SourceResult> {
        let timeout = self.timeout;
        let deadline = Instant::now() + timeout;
        let text: Arc<str> = Arc::from(text);

        let tasks: Vec<_> = sources
            .into_iter()
            .map(|source| {
                let id = source.id().to_string();
                let text = Arc::clone(&text);
                tracing::debug!(source = %id, "Dispatching search");

                let handle = tokio::spawn(async move {
                    let started = Instant::now();
                    let result = source.search(&text).await;
                    (result, started.elapsed())
                });

                (id, handle)
            })
            .collect();

        let waits = tasks.into_iter().map(move |(id, mut handle)| async move {
            let outcome = timeout_at(deadline, &mut handle).await;
            match outcome {
                Ok(Ok((Ok(items), elapsed))) => {
                    tracing::debug!(
                        source = %id,
                        items = items.len(),
                        elapsed_ms = elapsed.as_millis() as u64,
                        "Source completed"
                    );
                    SourceResult::success(id, items)
                }
                Ok(Ok((Err(e), _))) => {
                    tracing::warn!(source = %id, error = %e, "Source search failed");
                    SourceResult::failure(id, SourceFailure::AdapterFailure(e.to_string()))
                }
                Ok(Err(join_error)) => {
                    tracing::warn!(source = %id, error = %join_error, "Source task aborted");
                    let message = if join_error.is_panic() {
                        "source panicked".to_string()
                    } else {
                        join_error.to_string()
                    };
                    SourceResult::failure(id, SourceFailure::AdapterFailure(message))
                }
                Err(_) => {
                    handle.abort();
                    tracing::warn!(source = %id, timeout_ms = timeout.as_millis() as u64, "Source timed out");
                    SourceResult::failure(id, SourceFailure::Timeout)
                }
            }
        });

        join_all(waits).await
    }
}
