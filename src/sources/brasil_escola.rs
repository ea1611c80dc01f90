//! Brasil Escola portal source implementation.

use async_trait::async_trait;

use crate::models::{ContentItem, ContentItemBuilder, ContentType};
use crate::sources::{form_encode, Source, SourceError};
use crate::utils::HttpClient;

const BRASIL_ESCOLA_BASE: &str = "https://brasilescola.uol.com.br";

const PORTAL_QUALITY: f64 = 0.85;
const LINK_QUALITY: f64 = 0.7;

/// Brasil Escola source
///
/// Probes the portal's search page. A reachable portal yields a portal item;
/// otherwise the source degrades to a plain search link. Either way the search
/// succeeds.
#[derive(Debug, Clone)]
pub struct BrasilEscolaSource {
    client: HttpClient,
    base_url: String,
}

impl BrasilEscolaSource {
    /// Create a new Brasil Escola source
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, BRASIL_ESCOLA_BASE)
    }

    /// Create a source against a custom base URL
    pub fn with_base_url(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn search_url(&self, query: &str) -> String {
        format!("{}/busca?q={}", self.base_url, form_encode(query))
    }

    async fn portal_reachable(&self, url: &str) -> bool {
        match self.client.client().get(url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::debug!(status = %response.status(), "Brasil Escola probe failed - using search link");
                false
            }
            Err(e) => {
                tracing::debug!(error = %e, "Brasil Escola unreachable - using search link");
                false
            }
        }
    }
}

#[async_trait]
impl Source for BrasilEscolaSource {
    fn id(&self) -> &str {
        "brasil_escola"
    }

    fn name(&self) -> &str {
        "Brasil Escola"
    }

    fn base_quality(&self) -> f64 {
        PORTAL_QUALITY
    }

    async fn search(&self, query: &str) -> Result<Vec<ContentItem>, SourceError> {
        let query = query.trim();
        let url = self.search_url(query);

        let item = if self.portal_reachable(&url).await {
            ContentItemBuilder::new(
                format!("Conteúdo sobre {} - Brasil Escola", query),
                url,
                self.name(),
                ContentType::EducationalPortal,
            )
            .snippet(format!("Material educacional brasileiro sobre {}", query))
            .base_quality(PORTAL_QUALITY)
        } else {
            ContentItemBuilder::new(
                format!("Pesquise sobre {}", query),
                url,
                self.name(),
                ContentType::SearchLink,
            )
            .snippet(format!("Busca no Brasil Escola por {}", query))
            .base_quality(LINK_QUALITY)
        };

        Ok(vec![item.language("pt").build()])
    }
}
