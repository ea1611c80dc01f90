//! Só Matemática source implementation.

use async_trait::async_trait;

use crate::models::{ContentItem, ContentItemBuilder, ContentType};
use crate::sources::{form_encode, Source, SourceError};

const SO_MATEMATICA_BASE: &str = "https://www.somatematica.com.br";

const MATH_QUALITY: f64 = 0.9;

/// Terms that mark a query as mathematical, with and without accents
pub const MATH_KEYWORDS: &[&str] = &[
    "matemática",
    "matematica",
    "equação",
    "equacao",
    "função",
    "funcao",
    "derivada",
    "integral",
    "álgebra",
    "algebra",
    "geometria",
];

/// Só Matemática source
///
/// Only answers mathematical queries; anything else is an empty result.
/// Makes no network calls.
#[derive(Debug, Clone)]
pub struct SoMatematicaSource {
    base_url: String,
}

impl SoMatematicaSource {
    /// Create a new Só Matemática source
    pub fn new() -> Self {
        Self::with_base_url(SO_MATEMATICA_BASE)
    }

    /// Create a source against a custom base URL
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for SoMatematicaSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the query mentions a mathematics keyword
pub fn is_math_query(query: &str) -> bool {
    let lower = query.to_lowercase();
    MATH_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

#[async_trait]
impl Source for SoMatematicaSource {
    fn id(&self) -> &str {
        "so_matematica"
    }

    fn name(&self) -> &str {
        "Só Matemática"
    }

    fn base_quality(&self) -> f64 {
        MATH_QUALITY
    }

    async fn search(&self, query: &str) -> Result<Vec<ContentItem>, SourceError> {
        let query = query.trim();
        if !is_math_query(query) {
            return Ok(Vec::new());
        }

        let url = format!("{}/busca.php?busca={}", self.base_url, form_encode(query));
        let item = ContentItemBuilder::new(
            format!("Matemática: {}", query),
            url,
            self.name(),
            ContentType::Mathematics,
        )
        .snippet(format!("Conteúdo especializado em matemática sobre {}", query))
        .base_quality(MATH_QUALITY)
        .language("pt")
        .build();

        Ok(vec![item])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_math_query() {
        assert!(is_math_query("Equação do segundo grau"));
        assert!(is_math_query("funcao afim"));
        assert!(is_math_query("GEOMETRIA plana"));
        assert!(!is_math_query("revolução francesa"));
    }

    #[tokio::test]
    async fn test_math_query_yields_item() {
        let items = SoMatematicaSource::new().search("derivada de x²").await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].content_type, ContentType::Mathematics);
        assert_eq!(items[0].base_quality_score, 0.9);
        assert!(items[0]
            .url
            .starts_with("https://www.somatematica.com.br/busca.php?busca=derivada+de+x"));
    }

    #[tokio::test]
    async fn test_other_query_is_empty_success() {
        let items = SoMatematicaSource::new().search("história do Brasil").await.unwrap();
        assert!(items.is_empty());
    }
}
