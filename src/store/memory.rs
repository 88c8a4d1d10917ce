//! In-process `LogStore` for tests.
//!
//! Only built with the `test-util` feature. Follows the engine query closely
//! enough for handler tests: lowercased substring of a single word of
//! `message`, exact `level`/`service`, half-open date range, newest first.

use super::{LogStore, PARTITION_PREFIX, SearchHits};
use crate::{
  error::StoreError,
  models::{
    log::{log_entry::LogDocument, stored_record::StoredLogRecord},
    search::search_query::SearchQuery,
  },
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryStore {
  partitions: RwLock<BTreeMap<String, Vec<StoredLogRecord>>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Names of the partitions currently holding records.
  pub async fn partitions(&self) -> Vec<String> {
    self.partitions.read().await.keys().cloned().collect()
  }
}

#[async_trait]
impl LogStore for MemoryStore {
  async fn index(&self, partition: &str, doc: &LogDocument) -> Result<String, StoreError> {
    let id = Uuid::new_v4().simple().to_string();
    self
      .partitions
      .write()
      .await
      .entry(partition.to_string())
      .or_default()
      .push(StoredLogRecord::new(id.clone(), doc.clone()));
    Ok(id)
  }

  async fn search(&self, query: &SearchQuery) -> Result<SearchHits, StoreError> {
    let partitions = self.partitions.read().await;
    let mut matched: Vec<&StoredLogRecord> = partitions
      .iter()
      .filter(|(name, _)| name.starts_with(PARTITION_PREFIX))
      .flat_map(|(_, records)| records.iter())
      .filter(|record| matches(query, record))
      .collect();
    matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));

    let total = matched.len() as u64;
    let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
    let records = matched
      .into_iter()
      .skip(offset)
      .take(query.size as usize)
      .cloned()
      .collect();
    Ok(SearchHits { total, records })
  }

  async fn delete_all(&self) -> Result<(), StoreError> {
    self
      .partitions
      .write()
      .await
      .retain(|name, _| !name.starts_with(PARTITION_PREFIX));
    Ok(())
  }
}

fn matches(query: &SearchQuery, record: &StoredLogRecord) -> bool {
  if let Some(level) = query.level {
    if record.level != level {
      return false;
    }
  }
  if let Some(service) = query.service {
    if record.service != service {
      return false;
    }
  }
  if let Some(range) = &query.date {
    if !range.contains(&record.timestamp) {
      return false;
    }
  }
  match &query.text {
    Some(text) => text_matches(text, &record.message),
    None => true,
  }
}

/// The engine's `wildcard` clause runs against single analyzed terms, so the
/// lowercased text must sit inside one word of the message. The fuzzy `match`
/// clause is left to the engine and has no counterpart here.
fn text_matches(text: &str, message: &str) -> bool {
  let needle = text.to_lowercase();
  message
    .to_lowercase()
    .split(|c: char| !c.is_alphanumeric())
    .any(|word| !word.is_empty() && word.contains(&needle))
}
