//! OpenSearch REST client.

use super::{LOG_INDEX_PATTERN, LogStore, SearchHits};
use crate::{
  config::Config,
  error::StoreError,
  models::{
    log::{log_entry::LogDocument, stored_record::StoredLogRecord},
    search::search_query::SearchQuery,
  },
  query::build_search_body,
};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

/// Talks to one OpenSearch node over HTTP with basic auth.
///
/// The underlying `reqwest::Client` holds the connection pool and is shared by
/// all requests; it carries no per-request state.
#[derive(Clone)]
pub struct OpenSearchStore {
  client: reqwest::Client,
  base_url: String,
  user: String,
  pass: String,
}

#[derive(Debug, Deserialize)]
struct IndexResponse {
  #[serde(rename = "_id")]
  id: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
  hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
  total: Option<TotalHits>,
  #[serde(default)]
  hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct TotalHits {
  value: u64,
}

#[derive(Debug, Deserialize)]
struct Hit {
  #[serde(rename = "_id")]
  id: String,
  #[serde(rename = "_source")]
  source: Value,
}

/// OpenSearch's default `index.max_result_window`: `from + size` past this is rejected.
pub const DEFAULT_MAX_RESULT_WINDOW: u64 = 10_000;

impl OpenSearchStore {
  pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
    let client = reqwest::Client::builder()
      .timeout(config.opensearch_timeout.0)
      .build()?;
    Ok(OpenSearchStore {
      client,
      base_url: config.engine_url(),
      user: config.opensearch_user.clone(),
      pass: config.opensearch_pass.clone(),
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
    let response = request
      .basic_auth(&self.user, Some(&self.pass))
      .send()
      .await
      .map_err(StoreError::Unavailable)?;

    let status = response.status();
    if status.is_success() {
      return Ok(response);
    }
    let reason = error_reason(response).await;
    if status.is_client_error() {
      Err(StoreError::Rejected {
        status: status.as_u16(),
        reason,
      })
    } else {
      Err(StoreError::Upstream {
        status: status.as_u16(),
        reason,
      })
    }
  }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
  response.json::<T>().await.map_err(|e| {
    if e.is_decode() {
      StoreError::Decode(e.to_string())
    } else {
      StoreError::Unavailable(e)
    }
  })
}

/// Pull `type: reason` out of an OpenSearch error body, falling back to the raw text.
async fn error_reason(response: Response) -> String {
  let body = response.text().await.unwrap_or_default();
  let Ok(parsed) = serde_json::from_str::<Value>(&body) else {
    return body;
  };
  let error = &parsed["error"];
  match (error["type"].as_str(), error["reason"].as_str()) {
    (Some(kind), Some(reason)) => format!("{kind}: {reason}"),
    (None, Some(reason)) => reason.to_string(),
    _ => error.as_str().map(str::to_string).unwrap_or(body),
  }
}

#[async_trait]
impl LogStore for OpenSearchStore {
  async fn index(&self, partition: &str, doc: &LogDocument) -> Result<String, StoreError> {
    let url = format!("{}/{}/_doc", self.base_url, partition);
    let response = self.send(self.client.post(url).json(doc)).await?;
    let indexed: IndexResponse = decode(response).await?;
    debug!(partition, id = %indexed.id, "indexed log document");
    Ok(indexed.id)
  }

  /// Pages reaching past `DEFAULT_MAX_RESULT_WINDOW` are refused by the engine
  /// unless the partitions raise the limit; that surfaces as `StoreError::Rejected`.
  ///
  /// Hits whose `_source` does not fit `LogDocument` (other writers share the
  /// `logs-*` namespace) are skipped with a warning; `total` stays the engine's count.
  async fn search(&self, query: &SearchQuery) -> Result<SearchHits, StoreError> {
    let url = format!("{}/{}/_search", self.base_url, LOG_INDEX_PATTERN);
    let window = query.offset() + u64::from(query.size);
    if window > DEFAULT_MAX_RESULT_WINDOW {
      debug!(
        window,
        limit = DEFAULT_MAX_RESULT_WINDOW,
        "page reaches past the engine's default result window"
      );
    }
    let body = build_search_body(query);
    let response = self.send(self.client.post(url).json(&body)).await?;
    let found: SearchResponse = decode(response).await?;

    let records: Vec<StoredLogRecord> = found
      .hits
      .hits
      .into_iter()
      .filter_map(|hit| match serde_json::from_value::<LogDocument>(hit.source) {
        Ok(doc) => Some(StoredLogRecord::new(hit.id, doc)),
        Err(e) => {
          warn!(id = %hit.id, "skipping log document that does not fit the schema: {e}");
          None
        }
      })
      .collect();
    let total = found
      .hits
      .total
      .map(|t| t.value)
      .unwrap_or(records.len() as u64);
    debug!(total, returned = records.len(), "searched logs");
    Ok(SearchHits { total, records })
  }

  async fn delete_all(&self) -> Result<(), StoreError> {
    let url = format!("{}/{}", self.base_url, LOG_INDEX_PATTERN);
    self
      .send(
        self
          .client
          .delete(url)
          .query(&[("ignore_unavailable", "true")]),
      )
      .await?;
    debug!(pattern = LOG_INDEX_PATTERN, "deleted log partitions");
    Ok(())
  }
}
