//! Registry for managing content sources.

use std::collections::HashMap;
use std::sync::Arc;

use super::{Source, SourceError};
use crate::config::Config;
use crate::utils::HttpClient;

#[cfg(feature = "source-brasil-escola")]
use super::BrasilEscolaSource;
#[cfg(feature = "source-duckduckgo")]
use super::DuckDuckGoSource;
#[cfg(feature = "source-khan-academy")]
use super::KhanAcademySource;
#[cfg(feature = "source-so-matematica")]
use super::SoMatematicaSource;
#[cfg(feature = "source-wikipedia")]
use super::WikipediaSource;

/// Registry for all configured content sources
///
/// Sources are keyed by their lower-case identifier and remember the order
/// they were registered in, which is the order "all sources" resolves to.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn Source>>,
    order: Vec<String>,
}

impl SourceRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry with every compiled-in source that the configuration enables
    ///
    /// All HTTP-backed sources share one client built from `config.http`.
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        let http = HttpClient::from_config(&config.http)?;
        let mut registry = Self::empty();

        #[allow(unused_variables)]
        let endpoints = &config.endpoints;

        #[cfg(feature = "source-wikipedia")]
        registry.register(Arc::new(match &endpoints.wikipedia {
            Some(base) => WikipediaSource::with_base_url(
                http.clone(),
                base,
                &endpoints.wikipedia_language,
            ),
            None => WikipediaSource::new(http.clone(), &endpoints.wikipedia_language),
        }));

        #[cfg(feature = "source-brasil-escola")]
        registry.register(Arc::new(match &endpoints.brasil_escola {
            Some(base) => BrasilEscolaSource::with_base_url(http.clone(), base),
            None => BrasilEscolaSource::new(http.clone()),
        }));

        #[cfg(feature = "source-so-matematica")]
        registry.register(Arc::new(match &endpoints.so_matematica {
            Some(base) => SoMatematicaSource::with_base_url(base),
            None => SoMatematicaSource::new(),
        }));

        #[cfg(feature = "source-khan-academy")]
        registry.register(Arc::new(match &endpoints.khan_academy {
            Some(base) => KhanAcademySource::with_base_url(base),
            None => KhanAcademySource::new(),
        }));

        #[cfg(feature = "source-duckduckgo")]
        registry.register(Arc::new(match &endpoints.duckduckgo {
            Some(base) => DuckDuckGoSource::with_base_url(http.clone(), base),
            None => DuckDuckGoSource::new(http.clone()),
        }));

        drop(http);
        registry.retain(|id| config.sources.is_active(id));

        tracing::debug!(sources = ?registry.order, "Source registry initialized");
        Ok(registry)
    }

    /// Register a new source, replacing any source with the same id
    pub fn register(&mut self, source: Arc<dyn Source>) {
        let id = source.id().to_ascii_lowercase();
        if self.sources.insert(id.clone(), source).is_none() {
            self.order.push(id);
        }
    }

    /// Keep only the sources whose id satisfies the predicate
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.order.retain(|id| keep(id));
        let order = &self.order;
        self.sources.retain(|id, _| order.contains(id));
    }

    /// Get a source by ID (case-insensitive)
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Source>> {
        self.sources.get(&id.trim().to_ascii_lowercase())
    }

    /// Get all registered sources in registration order
    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn Source>> {
        self.order.iter().filter_map(|id| self.sources.get(id))
    }

    /// Get all source IDs in registration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    /// Resolve requested identifiers to sources
    ///
    /// An empty request (or one with only blank entries) resolves to every
    /// registered source. Unknown identifiers are skipped and duplicates are
    /// resolved once, keeping the order of first mention.
    pub fn resolve(&self, requested: &[String]) -> Vec<Arc<dyn Source>> {
        let requested: Vec<&str> = requested
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        if requested.is_empty() {
            return self.all().cloned().collect();
        }

        let mut resolved: Vec<Arc<dyn Source>> = Vec::with_capacity(requested.len());
        for id in requested {
            match self.get(id) {
                Some(source) if !resolved.iter().any(|s| s.id() == source.id()) => {
                    resolved.push(Arc::clone(source));
                }
                Some(_) => {}
                None => tracing::debug!(source = id, "Ignoring unknown source"),
            }
        }
        resolved
    }

    /// Check if a source exists
    pub fn has(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Get the number of registered sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourcesConfig;
    use crate::sources::MockSource;

    fn mock_registry() -> SourceRegistry {
        let mut registry = SourceRegistry::empty();
        registry.register(Arc::new(MockSource::new("alpha")));
        registry.register(Arc::new(MockSource::new("beta")));
        registry.register(Arc::new(MockSource::new("gamma")));
        registry
    }

    fn ids(sources: &[Arc<dyn Source>]) -> Vec<&str> {
        sources.iter().map(|s| s.id()).collect()
    }

    #[test]
    fn test_registry_basic() {
        let registry = mock_registry();
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_get_source() {
        let registry = mock_registry();
        assert_eq!(registry.get("beta").unwrap().id(), "beta");
        assert_eq!(registry.get(" BETA ").unwrap().id(), "beta");
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_register_replaces_without_reordering() {
        let mut registry = mock_registry();
        registry.register(Arc::new(MockSource::new("alpha")));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.ids().next(), Some("alpha"));
    }

    #[test]
    fn test_resolve_all_when_empty() {
        let registry = mock_registry();
        assert_eq!(ids(&registry.resolve(&[])), vec!["alpha", "beta", "gamma"]);
        assert_eq!(ids(&registry.resolve(&[" ".to_string()])).len(), 3);
    }

    #[test]
    fn test_resolve_skips_unknown_and_duplicates() {
        let registry = mock_registry();
        let requested = vec![
            "gamma".to_string(),
            "unknown".to_string(),
            "Alpha".to_string(),
            "gamma".to_string(),
        ];
        assert_eq!(ids(&registry.resolve(&requested)), vec!["gamma", "alpha"]);
    }

    #[test]
    fn test_resolve_all_unknown_is_empty() {
        let registry = mock_registry();
        assert!(registry.resolve(&["nope".to_string()]).is_empty());
    }

    #[test]
    fn test_retain() {
        let mut registry = mock_registry();
        let sources = SourcesConfig {
            enabled: vec![],
            disabled: vec!["beta".into()],
        };
        registry.retain(|id| sources.is_active(id));
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["alpha", "gamma"]);
        assert!(!registry.has("beta"));
    }

    #[cfg(all(
        feature = "source-wikipedia",
        feature = "source-brasil-escola",
        feature = "source-so-matematica",
        feature = "source-khan-academy",
        feature = "source-duckduckgo"
    ))]
    #[test]
    fn test_all_sources_registered() {
        let registry = SourceRegistry::from_config(&Config::default()).unwrap();

        let expected = [
            "wikipedia",
            "brasil_escola",
            "so_matematica",
            "khan_academy",
            "duckduckgo",
        ];
        assert_eq!(registry.ids().collect::<Vec<_>>(), expected);
    }

    #[cfg(feature = "source-wikipedia")]
    #[test]
    fn test_from_config_honors_enabled_list() {
        let mut config = Config::default();
        config.sources.enabled = vec!["wikipedia".into()];

        let registry = SourceRegistry::from_config(&config).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("wikipedia").unwrap().name(), "Wikipedia");
    }
}
