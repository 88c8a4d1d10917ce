//! Error taxonomy for the engine-client boundary and the HTTP layer.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// Failures talking to the search engine, classified by who is at fault.
#[derive(Error, Debug)]
pub enum StoreError {
  #[error("search engine unreachable: {0}")]
  Unavailable(#[source] reqwest::Error),
  #[error("search engine rejected the request ({status}): {reason}")]
  Rejected { status: u16, reason: String },
  #[error("search engine failed ({status}): {reason}")]
  Upstream { status: u16, reason: String },
  #[error("unexpected search engine response: {0}")]
  Decode(String),
}

impl StoreError {
  /// Whether the same request could succeed if sent again later.
  pub fn is_transient(&self) -> bool {
    matches!(self, StoreError::Unavailable(_) | StoreError::Upstream { .. })
  }
}

/// Errors surfaced to API callers.
#[derive(Error, Debug)]
pub enum ApiError {
  #[error("{0}")]
  InvalidPayload(String),
  #[error("{0}")]
  InvalidParams(String),
  #[error("Invalid date format. Use YYYY, YYYY-MM, or YYYY-MM-DD")]
  InvalidDateFormat,
  #[error("Internal server error")]
  Store(#[from] StoreError),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::InvalidPayload(_) | ApiError::InvalidParams(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::InvalidDateFormat => StatusCode::BAD_REQUEST,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match &self {
      ApiError::Store(e) => error!(transient = e.is_transient(), "search engine error: {e}"),
      other => debug!("rejected request: {other}"),
    }
    (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
  }
}
