//! Log record as returned to API callers, carrying the engine-assigned id.

use super::{
  level::{Level, Service},
  log_entry::LogDocument,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredLogRecord {
  pub id: String,
  #[serde(with = "super::timestamp")]
  pub timestamp: DateTime<Utc>,
  pub level: Level,
  pub message: String,
  pub service: Service,
}

impl StoredLogRecord {
  pub fn new(id: String, doc: LogDocument) -> Self {
    StoredLogRecord {
      id,
      timestamp: doc.timestamp,
      level: doc.level,
      message: doc.message,
      service: doc.service,
    }
  }
}
