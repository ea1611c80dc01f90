//! Content item model representing one piece of educational material from any source.

use serde::{Deserialize, Serialize};

/// The category of educational material an item points to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Encyclopedia,
    EducationalPortal,
    Mathematics,
    SearchLink,
    Generic,
}

impl ContentType {
    /// Returns the wire identifier of the content type
    pub fn id(&self) -> &'static str {
        match self {
            ContentType::Encyclopedia => "encyclopedia",
            ContentType::EducationalPortal => "educational_portal",
            ContentType::Mathematics => "mathematics",
            ContentType::SearchLink => "search_link",
            ContentType::Generic => "generic",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A single piece of educational content returned by a source
///
/// Items are immutable once an adapter hands them over. The ranker never
/// mutates them; it wraps them in a [`ScoredItem`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Item title
    pub title: String,

    /// Short description or extract
    pub snippet: String,

    /// Page URL
    pub url: String,

    /// Display name of the source that produced the item (e.g. "Wikipedia")
    pub source_name: String,

    /// Category of the content
    pub content_type: ContentType,

    /// Trust baseline assigned by the source, in [0, 1]
    pub base_quality_score: f64,

    /// Language code of the content (e.g. "pt")
    pub language: String,
}

impl ContentItem {
    /// Create a new item with the required fields
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        source_name: impl Into<String>,
        content_type: ContentType,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: String::new(),
            url: url.into(),
            source_name: source_name.into(),
            content_type,
            base_quality_score: 0.5,
            language: String::new(),
        }
    }
}

/// Builder for creating ContentItem instances
#[derive(Debug, Clone)]
pub struct ContentItemBuilder {
    item: ContentItem,
}

impl ContentItemBuilder {
    /// Create a new builder with required fields
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        source_name: impl Into<String>,
        content_type: ContentType,
    ) -> Self {
        Self {
            item: ContentItem::new(title, url, source_name, content_type),
        }
    }

    /// Set snippet
    pub fn snippet(mut self, snippet: impl Into<String>) -> Self {
        self.item.snippet = snippet.into();
        self
    }

    /// Set the base quality score, clamped to [0, 1]
    pub fn base_quality(mut self, score: f64) -> Self {
        self.item.base_quality_score = score.clamp(0.0, 1.0);
        self
    }

    /// Set language
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.item.language = language.into();
        self
    }

    /// Build the ContentItem
    pub fn build(self) -> ContentItem {
        self.item
    }
}

/// A content item annotated with its final educational score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    #[serde(flatten)]
    pub item: ContentItem,

    /// Composite educational quality in [0, 1]
    pub final_educational_score: f64,
}
