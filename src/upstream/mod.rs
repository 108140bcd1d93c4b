use async_trait::async_trait;
use hyper::StatusCode;
use serde::Deserialize;

use crate::category::Category;
use crate::config::UpstreamConfig;

#[cfg(test)]
pub(crate) mod stub;
#[cfg(test)]
mod tests;

/// One game as the upstream game list reports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGame {
    pub concept_id: u64,
    pub name: String,
    pub image_url: String,
}

/// A sub-listing inside one upstream response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bucket {
    pub games: Vec<RawGame>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream responded with {0}")]
    Status(StatusCode),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Something that can produce the buckets for one category.
#[async_trait]
pub trait CatalogueSource: Send + Sync {
    async fn fetch(&self, category: Category) -> Result<Vec<Bucket>, UpstreamError>;
}

/// Decodes an upstream body. A `null` body is an empty listing; any other
/// non-array top level is malformed. Buckets whose `games` field is missing or
/// not an array are kept as empty buckets; entries that are not valid games
/// are skipped one by one.
pub fn parse_buckets(body: &[u8]) -> Result<Vec<Bucket>, UpstreamError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| UpstreamError::Decode(e.to_string()))?;

    let items = match value {
        serde_json::Value::Null => return Ok(Vec::new()),
        serde_json::Value::Array(items) => items,
        other => {
            return Err(UpstreamError::Decode(format!(
                "expected an array of buckets, got {}",
                json_kind(&other)
            )))
        }
    };

    let buckets = items
        .into_iter()
        .map(|item| match item.get("games") {
            Some(serde_json::Value::Array(entries)) => Bucket {
                games: entries.iter().filter_map(decode_game).collect(),
            },
            _ => Bucket::default(),
        })
        .collect();

    Ok(buckets)
}

fn decode_game(entry: &serde_json::Value) -> Option<RawGame> {
    RawGame::deserialize(entry)
        .map_err(|e| tracing::debug!(error = %e, entry = %entry, "skipping malformed game"))
        .ok()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Fetches the public PlayStation game lists over HTTP.
pub struct PlayStationSource {
    http_client: reqwest::Client,
    config: UpstreamConfig,
}

impl PlayStationSource {
    pub fn new(http_client: reqwest::Client, config: UpstreamConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }
}

#[async_trait]
impl CatalogueSource for PlayStationSource {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, category: Category) -> Result<Vec<Bucket>, UpstreamError> {
        let url = self.config.endpoint_url(category);

        let resp = self.http_client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body = resp.bytes().await?;
        let buckets = parse_buckets(&body)?;

        tracing::debug!(buckets = buckets.len(), "fetched game list");

        Ok(buckets)
    }
}
