//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::models::{ContentItem, ContentItemBuilder, ContentType};
use crate::sources::{Source, SourceError};

/// What a mock source does when searched
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the configured items
    Items(Vec<ContentItem>),
    /// Sleep, then return the configured items
    Delayed(Duration, Vec<ContentItem>),
    /// Return an error
    Fail(String),
    /// Panic inside the search call
    Panic,
    /// Never complete
    Hang,
}

/// A mock source for testing that returns predefined responses.
#[derive(Debug)]
pub struct MockSource {
    id: String,
    name: String,
    behavior: Mutex<MockBehavior>,
    calls: AtomicUsize,
}

impl MockSource {
    /// Create a new mock source that finds nothing; the id doubles as the name.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            behavior: Mutex::new(MockBehavior::Items(Vec::new())),
            calls: AtomicUsize::new(0),
        }
    }

    /// Set the display name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the behavior.
    pub fn with_behavior(self, behavior: MockBehavior) -> Self {
        self.set_behavior(behavior);
        self
    }

    /// Return these items.
    pub fn with_items(self, items: Vec<ContentItem>) -> Self {
        self.with_behavior(MockBehavior::Items(items))
    }

    /// Replace the behavior of a shared mock.
    pub fn set_behavior(&self, behavior: MockBehavior) {
        let mut guard = self.behavior.lock().unwrap();
        *guard = behavior;
    }

    /// Number of times `search` was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn base_quality(&self) -> f64 {
        0.5
    }

    async fn search(&self, _query: &str) -> Result<Vec<ContentItem>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self.behavior.lock().unwrap().clone();

        match behavior {
            MockBehavior::Items(items) => Ok(items),
            MockBehavior::Delayed(delay, items) => {
                tokio::time::sleep(delay).await;
                Ok(items)
            }
            MockBehavior::Fail(message) => Err(SourceError::Other(message)),
            MockBehavior::Panic => panic!("mock source {} panicked", self.id),
            MockBehavior::Hang => std::future::pending().await,
        }
    }
}

/// Helper function to create a content item for testing.
pub fn make_item(
    title: &str,
    source_name: &str,
    content_type: ContentType,
    base_quality: f64,
) -> ContentItem {
    ContentItemBuilder::new(
        title,
        format!("http://example.com/{}", title.replace(' ', "-")),
        source_name,
        content_type,
    )
    .snippet(format!("About {}", title))
    .base_quality(base_quality)
    .language("pt")
    .build()
}
