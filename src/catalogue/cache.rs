use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use moka::future::Cache;

use super::{aggregate, Aggregation};
use crate::upstream::CatalogueSource;

/// The only key the catalogue is stored under.
pub const CACHE_KEY: &str = "psplus:catalogue";
/// Invalidation tag covering [`CACHE_KEY`].
pub const CACHE_TAG: &str = "psplus";

const TAGGED_KEYS: &[(&str, &str)] = &[(CACHE_TAG, CACHE_KEY)];

#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("failed to encode catalogue: {0}")]
    Encode(#[from] serde_json::Error),
}

/// An aggregation pass, already encoded as the response body.
#[derive(Debug, Clone)]
pub struct CachedCatalogue {
    pub body: Bytes,
    pub game_count: usize,
    pub failed_count: usize,
}

impl CachedCatalogue {
    pub fn encode(aggregation: &Aggregation) -> Result<Self, AggregateError> {
        Ok(Self {
            body: Bytes::from(serde_json::to_vec(&aggregation.games)?),
            game_count: aggregation.games.len(),
            failed_count: aggregation.failed_count,
        })
    }

    pub fn is_partial(&self) -> bool {
        self.failed_count > 0
    }
}

/// Produces a fresh catalogue for the cache on a miss.
#[async_trait]
pub trait CatalogueLoader: Send + Sync {
    async fn load(&self) -> Result<CachedCatalogue, AggregateError>;
}

/// Aggregates every category from a [`CatalogueSource`] and encodes the result.
pub struct AggregatingLoader {
    source: Arc<dyn CatalogueSource>,
}

impl AggregatingLoader {
    pub fn new(source: Arc<dyn CatalogueSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl CatalogueLoader for AggregatingLoader {
    async fn load(&self) -> Result<CachedCatalogue, AggregateError> {
        let aggregation = aggregate(self.source.as_ref()).await;
        CachedCatalogue::encode(&aggregation)
    }
}

/// Process-wide catalogue cache. Concurrent misses share a single upstream
/// pass and all observe its outcome. Failed passes are not stored.
pub struct CatalogueCache {
    loader: Arc<dyn CatalogueLoader>,
    entries: Cache<&'static str, Arc<CachedCatalogue>>,
}

impl CatalogueCache {
    pub fn new(source: Arc<dyn CatalogueSource>, ttl: Duration) -> Self {
        Self::with_loader(Arc::new(AggregatingLoader::new(source)), ttl)
    }

    pub fn with_loader(loader: Arc<dyn CatalogueLoader>, ttl: Duration) -> Self {
        let entries = Cache::builder()
            .max_capacity(16)
            .time_to_live(ttl)
            .build();

        Self { loader, entries }
    }

    pub async fn get(&self) -> Result<Arc<CachedCatalogue>, Arc<AggregateError>> {
        self.entries.try_get_with(CACHE_KEY, self.load()).await
    }

    #[tracing::instrument(skip(self))]
    async fn load(&self) -> Result<Arc<CachedCatalogue>, AggregateError> {
        tracing::debug!("catalogue cache miss");

        let cached = self.loader.load().await.inspect_err(|e| {
            tracing::error!(error = %e, "catalogue load failed, not caching");
        })?;

        Ok(Arc::new(cached))
    }

    /// Drops every entry associated with `tag` so the next read recomputes it.
    /// Returns false for an unknown tag.
    #[tracing::instrument(skip(self))]
    pub async fn invalidate_tag(&self, tag: &str) -> bool {
        let mut matched = false;

        for (_, key) in TAGGED_KEYS.iter().filter(|(t, _)| *t == tag) {
            self.entries.invalidate(key).await;
            matched = true;
        }

        if matched {
            tracing::info!(tag, "invalidated catalogue cache");
        }

        matched
    }
}
