//! Search response body.

use crate::models::log::stored_record::StoredLogRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
  pub total: u64,
  pub page: u32,
  pub size: u32,
  pub results: Vec<StoredLogRecord>,
}
