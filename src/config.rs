//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.jobscout.toml` files.

use crate::models::{JobSource, DEFAULT_LIMIT};
use crate::search::AggregatorConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = ".jobscout.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Search provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Aggregation settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Report format, `markdown` or `json`.
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// JSON file with local listings to append.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_jobs: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            verbose: false,
            local_jobs: None,
        }
    }
}

fn default_format() -> String {
    "markdown".to_string()
}

/// Web-search provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Search endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key sent as `api_key`. Usually supplied through the environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Fixed query parameters added to every request.
    #[serde(default = "default_extra_params")]
    pub extra_params: BTreeMap<String, String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            timeout_seconds: default_timeout(),
            extra_params: default_extra_params(),
        }
    }
}

fn default_endpoint() -> String {
    "https://serpapi.com/search.json".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_extra_params() -> BTreeMap<String, String> {
    [("engine".to_string(), "google".to_string())]
        .into_iter()
        .collect()
}

/// Aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Results requested per source when the search sets no limit.
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Sources to query, in merge order.
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,

    /// Lifetime of cached per-source results.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            sources: default_sources(),
            cache_ttl_seconds: default_cache_ttl(),
        }
    }
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_sources() -> Vec<String> {
    crate::sources::DEFAULT_SOURCES
        .iter()
        .map(|s| s.prefix().to_string())
        .collect()
}

fn default_cache_ttl() -> u64 {
    300 // 5 min
}

impl SearchConfig {
    /// Parsed, searchable sources. Unknown or duplicate names are skipped.
    pub fn parsed_sources(&self) -> Vec<JobSource> {
        let mut sources = Vec::new();
        for name in &self.sources {
            match name.parse::<JobSource>() {
                Ok(source) if !source.is_searchable() => {
                    warn!("Source {} cannot be searched, ignoring", source)
                }
                Ok(source) if !sources.contains(&source) => sources.push(source),
                Ok(_) => {}
                Err(e) => warn!("{}", e),
            }
        }
        sources
    }

    pub fn to_aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            sources: self.parsed_sources(),
            default_limit: self.default_limit,
            cache_ttl: Duration::from_secs(self.cache_ttl_seconds),
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were actually given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref endpoint) = args.endpoint {
            self.provider.endpoint = endpoint.clone();
        }
        if let Some(ref key) = args.api_key {
            self.provider.api_key = Some(key.clone());
        }
        if let Some(timeout) = args.timeout {
            self.provider.timeout_seconds = timeout;
        }

        if let Some(ref sources) = args.sources {
            self.search.sources = sources.clone();
        }
        if let Some(ttl) = args.cache_ttl {
            self.search.cache_ttl_seconds = ttl;
        }

        if let Some(ref path) = args.local_jobs {
            self.general.local_jobs = Some(path.display().to_string());
        }
        if let Some(format) = args.format {
            self.general.format = format.as_str().to_string();
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
