//! Log ingestion, search and bulk-delete handlers.

use crate::{
  app::AppState,
  error::ApiError,
  models::{
    log::{
      level::{Level, Service},
      log_entry::{LogDocument, LogEntry},
      stored_record::StoredLogRecord,
    },
    search::{
      search_query::{DEFAULT_PAGE, DEFAULT_SIZE, MAX_SIZE, SearchQuery},
      search_result::SearchResult,
    },
  },
  query::parse_date_filter,
  store::partition_for,
};
use axum::{
  Json,
  extract::{
    Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
  http::StatusCode,
};
use serde::Deserialize;
use tracing::{debug, info};

/// Raw query string of `GET /logs/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
  pub q: Option<String>,
  pub level: Option<String>,
  pub service: Option<String>,
  pub date: Option<String>,
  pub size: Option<u32>,
  pub page: Option<u32>,
}

fn non_blank(value: Option<String>) -> Option<String> {
  value
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty())
}

/// Validate raw parameters into a `SearchQuery`.
pub fn compute_search_query(p: SearchParams) -> Result<SearchQuery, ApiError> {
  let page = p.page.unwrap_or(DEFAULT_PAGE);
  if page < 1 {
    return Err(ApiError::InvalidParams(
      "page must be greater than or equal to 1".into(),
    ));
  }
  let size = p.size.unwrap_or(DEFAULT_SIZE);
  if !(1..=MAX_SIZE).contains(&size) {
    return Err(ApiError::InvalidParams(format!(
      "size must be between 1 and {MAX_SIZE}"
    )));
  }
  let level = non_blank(p.level)
    .map(|s| s.parse::<Level>())
    .transpose()
    .map_err(|e| ApiError::InvalidParams(e.to_string()))?;
  let service = non_blank(p.service)
    .map(|s| s.parse::<Service>())
    .transpose()
    .map_err(|e| ApiError::InvalidParams(e.to_string()))?;
  let date = non_blank(p.date)
    .map(|s| parse_date_filter(&s))
    .transpose()?;

  Ok(SearchQuery {
    text: non_blank(p.q),
    level,
    service,
    date,
    page,
    size,
  })
}

pub async fn insert_log(
  State(state): State<AppState>,
  payload: Result<Json<LogEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<StoredLogRecord>), ApiError> {
  let Json(entry) = payload.map_err(|e| ApiError::InvalidPayload(e.body_text()))?;

  let timestamp = state.clock.now();
  let partition = partition_for(&timestamp);
  let doc = LogDocument::new(entry, timestamp);
  let id = state.store.index(&partition, &doc).await?;
  debug!(partition = %partition, id = %id, "stored log entry");

  Ok((StatusCode::CREATED, Json(StoredLogRecord::new(id, doc))))
}

pub async fn search_logs(
  State(state): State<AppState>,
  params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResult>, ApiError> {
  let Query(params) = params.map_err(|e| ApiError::InvalidParams(e.body_text()))?;
  let query = compute_search_query(params)?;

  let hits = state.store.search(&query).await?;
  Ok(Json(SearchResult {
    total: hits.total,
    page: query.page,
    size: query.size,
    results: hits.records,
  }))
}

pub async fn delete_logs(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
  state.store.delete_all().await?;
  info!("deleted all log partitions");
  Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_apply() {
    let q = compute_search_query(SearchParams::default()).unwrap();
    assert_eq!(q, SearchQuery::default());
    assert_eq!((q.page, q.size), (1, 20));
  }

  #[test]
  fn blank_filters_are_ignored() {
    let q = compute_search_query(SearchParams {
      q: Some("   ".into()),
      level: Some("".into()),
      service: Some("".into()),
      date: Some("".into()),
      ..Default::default()
    })
    .unwrap();
    assert_eq!(q, SearchQuery::default());
  }

  #[test]
  fn size_is_bounded() {
    for size in [0, 101] {
      let err = compute_search_query(SearchParams {
        size: Some(size),
        ..Default::default()
      })
      .unwrap_err();
      assert!(matches!(err, ApiError::InvalidParams(_)));
    }
    let q = compute_search_query(SearchParams {
      size: Some(100),
      ..Default::default()
    })
    .unwrap();
    assert_eq!(q.size, 100);
  }

  #[test]
  fn page_zero_is_rejected() {
    let err = compute_search_query(SearchParams {
      page: Some(0),
      ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidParams(_)));
  }

  #[test]
  fn unknown_level_filter_is_rejected() {
    let err = compute_search_query(SearchParams {
      level: Some("critical".into()),
      ..Default::default()
    })
    .unwrap_err();
    assert!(err.to_string().contains("critical"));
  }

  #[test]
  fn bad_date_is_a_format_error() {
    let err = compute_search_query(SearchParams {
      date: Some("24".into()),
      ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidDateFormat));
  }

  #[test]
  fn filters_are_parsed() {
    let q = compute_search_query(SearchParams {
      q: Some(" timeout ".into()),
      level: Some("error".into()),
      service: Some("payment".into()),
      date: Some("2024-03".into()),
      size: Some(10),
      page: Some(2),
    })
    .unwrap();
    assert_eq!(q.text.as_deref(), Some("timeout"));
    assert_eq!(q.level, Some(Level::Error));
    assert_eq!(q.service, Some(Service::Payment));
    assert!(q.date.is_some());
    assert_eq!(q.offset(), 10);
  }
}
