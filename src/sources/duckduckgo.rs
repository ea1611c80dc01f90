//! DuckDuckGo Instant Answer source implementation.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{ContentItem, ContentItemBuilder, ContentType};
use crate::sources::{Source, SourceError};
use crate::utils::HttpClient;

const DUCKDUCKGO_API_BASE: &str = "https://api.duckduckgo.com";

const ANSWER_QUALITY: f64 = 0.6;
const TOPIC_QUALITY: f64 = 0.5;
const MAX_TOPICS: usize = 3;

/// DuckDuckGo source
///
/// Uses the Instant Answer API. The abstract and definition become one item
/// each and up to three related topics follow.
#[derive(Debug, Clone)]
pub struct DuckDuckGoSource {
    client: HttpClient,
    base_url: String,
}

impl DuckDuckGoSource {
    /// Create a new DuckDuckGo source
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, DUCKDUCKGO_API_BASE)
    }

    /// Create a source against a custom base URL
    pub fn with_base_url(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn parse_answer(&self, query: &str, data: InstantAnswer) -> Vec<ContentItem> {
        let heading = data
            .heading
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| query.to_string());
        let mut items = Vec::new();

        if let Some(text) = data.abstract_text.filter(|t| !t.trim().is_empty()) {
            items.push(self.item(&heading, text, data.abstract_url, ANSWER_QUALITY));
        }

        if let Some(text) = data.definition.filter(|t| !t.trim().is_empty()) {
            let title = format!("Definição: {}", heading);
            items.push(self.item(&title, text, data.definition_url, ANSWER_QUALITY));
        }

        let topics = data
            .related_topics
            .into_iter()
            .filter_map(|topic| match (topic.text, topic.first_url) {
                (Some(text), Some(url)) if !text.trim().is_empty() => Some((text, url)),
                _ => None,
            })
            .take(MAX_TOPICS);

        for (text, url) in topics {
            let title = text.split(" - ").next().unwrap_or(&text).trim().to_string();
            items.push(self.item(&title, text, Some(url), TOPIC_QUALITY));
        }

        items
    }

    fn item(&self, title: &str, snippet: String, url: Option<String>, quality: f64) -> ContentItem {
        ContentItemBuilder::new(title, url.unwrap_or_default(), self.name(), ContentType::Generic)
            .snippet(snippet)
            .base_quality(quality)
            .language("pt")
            .build()
    }
}

#[async_trait]
impl Source for DuckDuckGoSource {
    fn id(&self) -> &str {
        "duckduckgo"
    }

    fn name(&self) -> &str {
        "DuckDuckGo"
    }

    fn base_quality(&self) -> f64 {
        ANSWER_QUALITY
    }

    async fn search(&self, query: &str) -> Result<Vec<ContentItem>, SourceError> {
        let query = query.trim();
        let response = self
            .client
            .client()
            .get(format!("{}/", self.base_url))
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
                ("kl", "br-pt"),
            ])
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to query DuckDuckGo: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "DuckDuckGo API returned status: {}",
                response.status()
            )));
        }

        // The API answers with a javascript content type, so decode the bytes directly
        let body = response.bytes().await?;
        let data: InstantAnswer = serde_json::from_slice(&body)?;

        Ok(self.parse_answer(query, data))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InstantAnswer {
    heading: Option<String>,
    #[serde(rename = "Abstract")]
    abstract_text: Option<String>,
    #[serde(rename = "AbstractURL")]
    abstract_url: Option<String>,
    definition: Option<String>,
    #[serde(rename = "DefinitionURL")]
    definition_url: Option<String>,
    #[serde(default)]
    related_topics: Vec<RelatedTopic>,
}

/// A related topic; topic groups carry neither field and are skipped
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RelatedTopic {
    text: Option<String>,
    #[serde(rename = "FirstURL")]
    first_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const ANSWER: &str = r#"{
        "Heading": "Fotossíntese",
        "Abstract": "Processo pelo qual plantas convertem luz em energia química.",
        "AbstractURL": "https://pt.wikipedia.org/wiki/Fotoss%C3%ADntese",
        "Definition": "",
        "DefinitionURL": "",
        "RelatedTopics": [
            {"Text": "Clorofila - pigmento verde", "FirstURL": "https://duckduckgo.com/Clorofila"},
            {"Name": "Veja também", "Topics": []},
            {"Text": "Cloroplasto - organela", "FirstURL": "https://duckduckgo.com/Cloroplasto"},
            {"Text": "Respiração celular", "FirstURL": "https://duckduckgo.com/Respiracao"},
            {"Text": "Ciclo de Calvin", "FirstURL": "https://duckduckgo.com/Calvin"}
        ]
    }"#;

    #[tokio::test]
    async fn test_instant_answer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "fotossíntese".into()),
                Matcher::UrlEncoded("format".into(), "json".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/x-javascript")
            .with_body(ANSWER)
            .create_async()
            .await;

        let source = DuckDuckGoSource::with_base_url(HttpClient::new().unwrap(), &server.url());
        let items = source.search("fotossíntese").await.unwrap();

        assert_eq!(items.len(), 4);
        assert_eq!(items[0].title, "Fotossíntese");
        assert_eq!(items[0].base_quality_score, 0.6);
        assert_eq!(items[1].title, "Clorofila");
        assert_eq!(items[1].base_quality_score, 0.5);
        assert_eq!(items[3].url, "https://duckduckgo.com/Respiracao");
        assert!(items.iter().all(|i| i.content_type == ContentType::Generic));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(502)
            .create_async()
            .await;

        let source = DuckDuckGoSource::with_base_url(HttpClient::new().unwrap(), &server.url());
        let err = source.search("qualquer").await.unwrap_err();
        assert!(matches!(err, SourceError::Api(_)));
    }
}
