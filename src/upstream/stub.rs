use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hyper::StatusCode;

use super::{Bucket, CatalogueSource, RawGame, UpstreamError};
use crate::catalogue::{AggregateError, AggregatingLoader, CachedCatalogue, CatalogueLoader};
use crate::category::Category;

pub fn raw(concept_id: u64, name: &str) -> RawGame {
    RawGame {
        concept_id,
        name: name.to_string(),
        image_url: format!("https://image.api.playstation.com/{concept_id}.png"),
    }
}

/// In-memory source. Categories without configured buckets fail with 502.
#[derive(Default)]
pub struct StubSource {
    responses: HashMap<Category, Vec<Bucket>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: Category, games: Vec<RawGame>) -> Self {
        self.responses
            .entry(category)
            .or_default()
            .push(Bucket { games });
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `fetch` calls across all categories.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogueSource for StubSource {
    async fn fetch(&self, category: Category) -> Result<Vec<Bucket>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .get(&category)
            .cloned()
            .ok_or(UpstreamError::Status(StatusCode::BAD_GATEWAY))
    }
}

/// Loader whose first `failures` loads fail to encode, then aggregates normally.
pub struct FlakyLoader {
    inner: AggregatingLoader,
    failures: usize,
    loads: AtomicUsize,
}

impl FlakyLoader {
    pub fn new(source: Arc<dyn CatalogueSource>, failures: usize) -> Self {
        Self {
            inner: AggregatingLoader::new(source),
            failures,
            loads: AtomicUsize::new(0),
        }
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogueLoader for FlakyLoader {
    async fn load(&self) -> Result<CachedCatalogue, AggregateError> {
        let attempt = self.loads.fetch_add(1, Ordering::SeqCst);

        if attempt < self.failures {
            let err = serde_json::from_str::<u64>("not json").unwrap_err();
            return Err(AggregateError::Encode(err));
        }

        self.inner.load().await
    }
}
