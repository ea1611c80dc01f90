//! Khan Academy source implementation.

use async_trait::async_trait;

use crate::models::{ContentItem, ContentItemBuilder, ContentType};
use crate::sources::{form_encode, Source, SourceError};

const KHAN_ACADEMY_BASE: &str = "https://pt.khanacademy.org";

const LINK_QUALITY: f64 = 0.75;

/// Khan Academy source
///
/// Khan Academy has no public search API, so this source links to the site's
/// search page for the query.
#[derive(Debug, Clone)]
pub struct KhanAcademySource {
    base_url: String,
}

impl KhanAcademySource {
    /// Create a new Khan Academy source
    pub fn new() -> Self {
        Self::with_base_url(KHAN_ACADEMY_BASE)
    }

    /// Create a source against a custom base URL
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for KhanAcademySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Source for KhanAcademySource {
    fn id(&self) -> &str {
        "khan_academy"
    }

    fn name(&self) -> &str {
        "Khan Academy"
    }

    fn base_quality(&self) -> f64 {
        LINK_QUALITY
    }

    async fn search(&self, query: &str) -> Result<Vec<ContentItem>, SourceError> {
        let query = query.trim();
        let url = format!(
            "{}/search?page_search_query={}",
            self.base_url,
            form_encode(query)
        );

        Ok(vec![ContentItemBuilder::new(
            format!("Khan Academy: {}", query),
            url,
            self.name(),
            ContentType::SearchLink,
        )
        .snippet(format!("Aulas e exercícios da Khan Academy sobre {}", query))
        .base_quality(LINK_QUALITY)
        .language("pt")
        .build()])
    }
}
