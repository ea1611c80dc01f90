//! Wikipedia source implementation.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{ContentItem, ContentItemBuilder, ContentType};
use crate::sources::{Source, SourceError};
use crate::utils::HttpClient;

const SUMMARY_QUALITY: f64 = 0.9;
const OPENSEARCH_QUALITY: f64 = 0.8;
const OPENSEARCH_LIMIT: &str = "3";

/// Wikipedia source
///
/// Looks the query up as a page title through the REST summary endpoint. When
/// no such page exists it falls back once to the opensearch API and returns up
/// to three related pages.
#[derive(Debug, Clone)]
pub struct WikipediaSource {
    client: HttpClient,
    base_url: String,
    language: String,
}

impl WikipediaSource {
    /// Create a source for the given language edition (e.g. "pt")
    pub fn new(client: HttpClient, language: &str) -> Self {
        let language = language.trim().to_ascii_lowercase();
        Self {
            client,
            base_url: format!("https://{}.wikipedia.org", language),
            language,
        }
    }

    /// Create a source against a custom base URL
    pub fn with_base_url(client: HttpClient, base_url: &str, language: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.trim().to_ascii_lowercase(),
        }
    }

    /// Fetch the page summary; `None` when the title does not resolve
    async fn fetch_summary(&self, query: &str) -> Result<Option<ContentItem>, SourceError> {
        let title = query.trim().replace(' ', "_");
        let url = format!(
            "{}/api/rest_v1/page/summary/{}",
            self.base_url,
            urlencoding::encode(&title)
        );

        let response = self
            .client
            .client()
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch Wikipedia summary: {}", e)))?;

        if !response.status().is_success() {
            tracing::debug!(
                status = %response.status(),
                "Wikipedia summary lookup missed - trying opensearch"
            );
            return Ok(None);
        }

        let data: PageSummary = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse summary JSON: {}", e)))?;

        let page_url = data
            .content_urls
            .and_then(|urls| urls.desktop)
            .and_then(|desktop| desktop.page)
            .unwrap_or_default();

        let item = ContentItemBuilder::new(
            data.title.unwrap_or_else(|| query.trim().to_string()),
            page_url,
            self.name(),
            ContentType::Encyclopedia,
        )
        .snippet(
            data.extract
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "Conteúdo não disponível".to_string()),
        )
        .base_quality(SUMMARY_QUALITY)
        .language(data.lang.unwrap_or_else(|| self.language.clone()))
        .build();

        Ok(Some(item))
    }

    /// Search related page titles through the opensearch API
    async fn opensearch(&self, query: &str) -> Result<Vec<ContentItem>, SourceError> {
        let url = format!("{}/w/api.php", self.base_url);

        let response = self
            .client
            .client()
            .get(&url)
            .query(&[
                ("action", "opensearch"),
                ("search", query.trim()),
                ("limit", OPENSEARCH_LIMIT),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search Wikipedia: {}", e)))?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "Wikipedia opensearch unavailable - returning empty results");
            return Ok(Vec::new());
        }

        let (_, titles, descriptions, urls): OpenSearchResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse opensearch JSON: {}", e)))?;

        let items = titles
            .into_iter()
            .zip(descriptions)
            .zip(urls)
            .map(|((title, description), url)| {
                let snippet = if description.trim().is_empty() {
                    "Resumo não disponível".to_string()
                } else {
                    description
                };
                ContentItemBuilder::new(title, url, self.name(), ContentType::Encyclopedia)
                    .snippet(snippet)
                    .base_quality(OPENSEARCH_QUALITY)
                    .language(self.language.clone())
                    .build()
            })
            .collect();

        Ok(items)
    }
}

#[async_trait]
impl Source for WikipediaSource {
    fn id(&self) -> &str {
        "wikipedia"
    }

    fn name(&self) -> &str {
        "Wikipedia"
    }

    fn base_quality(&self) -> f64 {
        SUMMARY_QUALITY
    }

    async fn search(&self, query: &str) -> Result<Vec<ContentItem>, SourceError> {
        if query.trim().is_empty() {
            return Err(SourceError::InvalidRequest("empty query".to_string()));
        }

        match self.fetch_summary(query).await? {
            Some(item) => Ok(vec![item]),
            None => self.opensearch(query).await,
        }
    }
}

/// `[query, titles, descriptions, urls]`
type OpenSearchResponse = (String, Vec<String>, Vec<String>, Vec<String>);

#[derive(Debug, Deserialize)]
struct PageSummary {
    title: Option<String>,
    extract: Option<String>,
    lang: Option<String>,
    content_urls: Option<ContentUrls>,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: Option<PageUrls>,
}

#[derive(Debug, Deserialize)]
struct PageUrls {
    page: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn source(server: &mockito::ServerGuard) -> WikipediaSource {
        WikipediaSource::with_base_url(HttpClient::new().unwrap(), &server.url(), "pt")
    }

    #[test]
    fn test_default_base_url() {
        let source = WikipediaSource::new(HttpClient::new().unwrap(), "PT");
        assert_eq!(source.base_url, "https://pt.wikipedia.org");
        assert_eq!(source.id(), "wikipedia");
    }

    #[tokio::test]
    async fn test_summary_hit() {
        let mut server = mockito::Server::new_async().await;
        let summary = server
            .mock("GET", "/api/rest_v1/page/summary/Teorema_de_Pitagoras")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "title": "Teorema de Pitágoras",
                    "extract": "Relação fundamental entre os lados de um triângulo retângulo.",
                    "lang": "pt",
                    "content_urls": {"desktop": {"page": "https://pt.wikipedia.org/wiki/Teorema_de_Pit%C3%A1goras"}}
                }"#,
            )
            .create_async()
            .await;
        let fallback = server
            .mock("GET", "/w/api.php")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let items = source(&server).search("Teorema de Pitagoras").await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Teorema de Pitágoras");
        assert_eq!(items[0].content_type, ContentType::Encyclopedia);
        assert_eq!(items[0].base_quality_score, 0.9);
        assert_eq!(items[0].source_name, "Wikipedia");
        assert!(items[0].url.ends_with("Teorema_de_Pit%C3%A1goras"));
        summary.assert_async().await;
        fallback.assert_async().await;
    }

    #[tokio::test]
    async fn test_summary_miss_falls_back_to_opensearch() {
        let mut server = mockito::Server::new_async().await;
        let summary = server
            .mock("GET", "/api/rest_v1/page/summary/derivadas")
            .with_status(404)
            .create_async()
            .await;
        let fallback = server
            .mock("GET", "/w/api.php")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("action".into(), "opensearch".into()),
                Matcher::UrlEncoded("search".into(), "derivadas".into()),
                Matcher::UrlEncoded("limit".into(), "3".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"["derivadas",
                    ["Derivada", "Derivada parcial"],
                    ["Conceito do cálculo", ""],
                    ["https://pt.wikipedia.org/wiki/Derivada", "https://pt.wikipedia.org/wiki/Derivada_parcial"]]"#,
            )
            .expect(1)
            .create_async()
            .await;

        let items = source(&server).search("derivadas").await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Derivada");
        assert_eq!(items[0].base_quality_score, 0.8);
        assert_eq!(items[1].snippet, "Resumo não disponível");
        assert_eq!(items[1].url, "https://pt.wikipedia.org/wiki/Derivada_parcial");
        summary.assert_async().await;
        fallback.assert_async().await;
    }

    #[tokio::test]
    async fn test_fallback_miss_is_empty_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/rest_v1/page/summary/xyz")
            .with_status(404)
            .create_async()
            .await;
        server
            .mock("GET", "/w/api.php")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let items = source(&server).search("xyz").await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_summary_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/rest_v1/page/summary/broken")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = source(&server).search("broken").await.unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }
}
