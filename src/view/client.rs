use async_trait::async_trait;
use hyper::StatusCode;

use crate::catalogue::Game;

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("Failed to load data ({0})")]
    Status(StatusCode),
}

/// Loads the merged catalogue for the view.
#[async_trait]
pub trait CatalogueClient: Send + Sync {
    async fn fetch_games(&self) -> Result<Vec<Game>, ViewError>;
}

/// Reads `GET /api/games` from a running catalogue service.
pub struct HttpCatalogueClient {
    http_client: reqwest::Client,
    url: String,
}

impl HttpCatalogueClient {
    pub fn new(http_client: reqwest::Client, base_url: &str) -> Self {
        Self {
            http_client,
            url: format!("{}/api/games", base_url.trim_end_matches('/')),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogueClient for HttpCatalogueClient {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn fetch_games(&self) -> Result<Vec<Game>, ViewError> {
        let resp = self.http_client.get(&self.url).send().await?;

        if !resp.status().is_success() {
            return Err(ViewError::Status(resp.status()));
        }

        if let Some(failures) = resp.headers().get("x-partial-failures") {
            tracing::warn!(failures = ?failures, "catalogue is missing some categories");
        }

        Ok(resp.json().await?)
    }
}
