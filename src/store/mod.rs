//! Engine-client seam: where log documents are written, searched and dropped.

use crate::{
  error::StoreError,
  models::{
    log::{log_entry::LogDocument, stored_record::StoredLogRecord},
    search::search_query::SearchQuery,
  },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[cfg(feature = "test-util")]
pub mod memory;
pub mod opensearch;

/// Prefix shared by every daily partition.
pub const PARTITION_PREFIX: &str = "logs-";
/// Pattern matching every partition in the log namespace.
pub const LOG_INDEX_PATTERN: &str = "logs-*";

/// Partition holding records written on the UTC day of `ts`, e.g. `logs-2024.03.15`.
pub fn partition_for(ts: &DateTime<Utc>) -> String {
  format!("{PARTITION_PREFIX}{}", ts.format("%Y.%m.%d"))
}

/// One page of matches plus the total match count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHits {
  pub total: u64,
  pub records: Vec<StoredLogRecord>,
}

#[async_trait]
pub trait LogStore: Send + Sync {
  /// Write one document into `partition`, returning the id the store assigned.
  async fn index(&self, partition: &str, doc: &LogDocument) -> Result<String, StoreError>;
  /// Search across all partitions, newest first.
  async fn search(&self, query: &SearchQuery) -> Result<SearchHits, StoreError>;
  /// Drop every partition in the log namespace.
  async fn delete_all(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn partition_uses_utc_day() {
    let ts = Utc.with_ymd_and_hms(2024, 3, 5, 23, 59, 59).unwrap();
    assert_eq!(partition_for(&ts), "logs-2024.03.05");
  }
}
