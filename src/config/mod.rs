//! Configuration management.
//!
//! Configuration is read from an optional TOML file and overridden by
//! environment variables prefixed with `EDU_SEARCH_` (nested keys use `__`,
//! e.g. `EDU_SEARCH_SEARCH__TIMEOUT_SECS=5`).
//!
//! ```toml
//! [search]
//! timeout_secs = 10
//!
//! [sources]
//! enabled = ["wikipedia", "so_matematica"]
//! disabled = ["duckduckgo"]
//!
//! [http]
//! user_agent = "edu-search/0.1"
//! request_timeout_secs = 8
//! connect_timeout_secs = 5
//!
//! [endpoints]
//! wikipedia_language = "pt"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the configuration file looked up by [`find_config_file`]
pub const CONFIG_FILE_NAME: &str = "edu-search.toml";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "EDU_SEARCH";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Dispatch settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Which sources are active
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Shared HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Per-source endpoint overrides
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

/// Dispatch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Per-source timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl SearchConfig {
    /// Per-source timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    crate::search::DEFAULT_SOURCE_TIMEOUT.as_secs()
}

/// Source selection
///
/// `disabled` always wins over `enabled`. An empty `enabled` list means every
/// compiled-in source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub enabled: Vec<String>,

    #[serde(default)]
    pub disabled: Vec<String>,
}

impl SourcesConfig {
    /// Whether a source id passes the enabled/disabled lists
    pub fn is_active(&self, id: &str) -> bool {
        let listed = |list: &[String]| list.iter().any(|s| s.trim().eq_ignore_ascii_case(id));

        if listed(&self.disabled) {
            return false;
        }
        self.enabled.is_empty() || listed(&self.enabled)
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout; kept below the dispatch timeout so adapters give up first
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_request_timeout() -> u64 {
    8
}

fn default_connect_timeout() -> u64 {
    5
}

/// Base URL overrides for the built-in sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Wikipedia language edition
    #[serde(default = "default_language")]
    pub wikipedia_language: String,

    /// Full Wikipedia base URL; takes precedence over `wikipedia_language`
    #[serde(default)]
    pub wikipedia: Option<String>,

    #[serde(default)]
    pub brasil_escola: Option<String>,

    #[serde(default)]
    pub so_matematica: Option<String>,

    #[serde(default)]
    pub khan_academy: Option<String>,

    #[serde(default)]
    pub duckduckgo: Option<String>,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            wikipedia_language: default_language(),
            wikipedia: None,
            brasil_escola: None,
            so_matematica: None,
            khan_academy: None,
            duckduckgo: None,
        }
    }
}

fn default_language() -> String {
    "pt".to_string()
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(env_source())
        .build()?;

    settings.try_deserialize()
}

/// Load configuration from environment variables only
pub fn load_from_env() -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(env_source())
        .build()?;

    settings.try_deserialize()
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("sources.enabled")
        .with_list_parse_key("sources.disabled")
}

/// Look for a configuration file in the working directory, then the user config dir
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("edu-search").join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}
