use std::sync::Arc;

use anyhow::Context as _;

use crate::catalogue::CatalogueCache;
use crate::config::Config;
use crate::upstream::{CatalogueSource, PlayStationSource};

pub struct Global {
    pub config: Config,
    pub catalogue: CatalogueCache,
    pub started_at: std::time::Instant,
}

impl Global {
    pub fn init(config: Config) -> anyhow::Result<Arc<Self>> {
        let http_client = reqwest::Client::builder()
            .user_agent(&config.upstream.user_agent)
            .build()
            .context("http client")?;

        let source = PlayStationSource::new(http_client, config.upstream.clone());

        for (category, url) in config.upstream.endpoints() {
            tracing::info!(%category, %url, "catalogue endpoint");
        }

        Ok(Self::with_source(config, Arc::new(source)))
    }

    pub fn with_source(config: Config, source: Arc<dyn CatalogueSource>) -> Arc<Self> {
        let catalogue = CatalogueCache::new(source, config.cache.ttl());
        Self::with_catalogue(config, catalogue)
    }

    pub fn with_catalogue(config: Config, catalogue: CatalogueCache) -> Arc<Self> {
        Arc::new(Self {
            config,
            catalogue,
            started_at: std::time::Instant::now(),
        })
    }

    /// Fills the catalogue cache ahead of the first request.
    #[tracing::instrument(name = "Warmup", skip_all)]
    pub async fn warm(self: Arc<Self>) {
        match self.catalogue.get().await {
            Ok(cached) => tracing::info!(
                games = cached.game_count,
                failed = cached.failed_count,
                "catalogue cache warmed"
            ),
            Err(e) => tracing::error!(error = %e, "failed to warm catalogue cache"),
        }
    }
}
