use std::net::SocketAddr;
use std::time::Duration;

use ::config::{Config as Layers, ConfigError, Environment, File};
use serde::Deserialize;

use crate::category::Category;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    /// `s-maxage` handed to edge caches.
    pub edge_ttl_secs: u64,
    pub stale_while_revalidate_secs: u64,
    /// Bearer token for `POST /api/revalidate`. The route is disabled when unset.
    pub revalidate_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
            edge_ttl_secs: 21600,
            stale_while_revalidate_secs: 86400,
            revalidate_token: None,
        }
    }
}

impl ApiConfig {
    pub fn cache_control(&self) -> String {
        format!(
            "public, s-maxage={}, stale-while-revalidate={}",
            self.edge_ttl_secs, self.stale_while_revalidate_secs
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub locale: String,
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.playstation.com/bin/imagic/gameslist".to_string(),
            locale: "en-in".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl UpstreamConfig {
    pub fn endpoint_url(&self, category: Category) -> String {
        format!(
            "{}?locale={}&categoryList={}",
            self.base_url.trim_end_matches('/'),
            self.locale,
            category.list_id()
        )
    }

    /// One endpoint per category, in [`Category::ALL`] order.
    pub fn endpoints(&self) -> Vec<(Category, String)> {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.endpoint_url(category)))
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    pub warm_on_start: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 21600,
            warm_on_start: true,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub level: String,
    pub api: ApiConfig,
    pub upstream: UpstreamConfig,
    pub cache: CacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            api: ApiConfig::default(),
            upstream: UpstreamConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    /// Reads `config.yaml` (or the file named by `PSPLUS_CONFIG`) when present,
    /// then applies `PSPLUS__SECTION__KEY` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("PSPLUS_CONFIG").unwrap_or_else(|_| "config.yaml".into());

        Layers::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(
                Environment::with_prefix("PSPLUS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
