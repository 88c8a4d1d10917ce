//! Log entry as submitted by a client, and the document written to the engine.

use super::level::{Level, Service};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client payload for `POST /logs/`. Any `id` or `timestamp` sent by the
/// client is ignored; both are assigned on write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
  #[serde(default)]
  pub level: Level,
  pub message: String,
  #[serde(default)]
  pub service: Service,
}

/// Source document as stored in a `logs-YYYY.MM.DD` partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogDocument {
  #[serde(with = "super::timestamp")]
  pub timestamp: DateTime<Utc>,
  pub level: Level,
  pub message: String,
  pub service: Service,
}

impl LogDocument {
  pub fn new(entry: LogEntry, timestamp: DateTime<Utc>) -> Self {
    LogDocument {
      timestamp,
      level: entry.level,
      message: entry.message,
      service: entry.service,
    }
  }
}
