use std::collections::HashMap;

use futures_util::future::join_all;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::upstream::{CatalogueSource, RawGame};

pub mod cache;
pub mod collate;


pub use cache::{
    AggregateError, AggregatingLoader, CachedCatalogue, CatalogueCache, CatalogueLoader, CACHE_KEY,
    CACHE_TAG,
};
pub use collate::compare_names;

/// A catalogue entry after merging every category it was listed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: u64,
    pub name: String,
    pub image_url: String,
    pub categories: Vec<Category>,
}

impl Game {
    pub fn in_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }
}

/// Result of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    pub games: Vec<Game>,
    /// Endpoints that failed and contributed nothing.
    pub failed_count: usize,
}

impl Aggregation {
    pub fn is_partial(&self) -> bool {
        self.failed_count > 0
    }
}

/// Accumulates games by concept id while remembering first-seen order.
#[derive(Debug, Default)]
pub struct CatalogueBuilder {
    index: HashMap<u64, usize>,
    games: Vec<Game>,
}

impl CatalogueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one bucket. Merging the same bucket again adds nothing.
    pub fn merge_bucket(&mut self, category: Category, games: &[RawGame]) {
        for raw in games {
            match self.index.get(&raw.concept_id) {
                Some(&pos) => {
                    let game = &mut self.games[pos];
                    if !game.in_category(category) {
                        game.categories.push(category);
                    }
                }
                None => {
                    self.index.insert(raw.concept_id, self.games.len());
                    self.games.push(Game {
                        id: raw.concept_id,
                        name: raw.name.clone(),
                        image_url: raw.image_url.clone(),
                        categories: vec![category],
                    });
                }
            }
        }
    }

    /// Games sorted by name. Equal names keep the order they were first seen in.
    pub fn finish(self) -> Vec<Game> {
        let mut games = self.games;
        games.sort_by(|a, b| compare_names(&a.name, &b.name));
        games
    }
}

/// Fetches every category concurrently and merges whatever came back.
/// An endpoint that fails is logged and counted, never fatal.
#[tracing::instrument(skip_all)]
pub async fn aggregate(source: &dyn CatalogueSource) -> Aggregation {
    let results = join_all(Category::ALL.into_iter().map(|category| async move {
        (category, source.fetch(category).await)
    }))
    .await;

    let mut builder = CatalogueBuilder::new();
    let mut failed_count = 0;

    for (category, result) in results {
        match result {
            Ok(buckets) => {
                for bucket in &buckets {
                    builder.merge_bucket(category, &bucket.games);
                }
            }
            Err(e) => {
                tracing::warn!(%category, error = %e, "catalogue endpoint failed");
                failed_count += 1;
            }
        }
    }

    let games = builder.finish();

    tracing::info!(games = games.len(), failed = failed_count, "aggregated catalogue");

    Aggregation {
        games,
        failed_count,
    }
}
