//! Half-open UTC time range produced by a `date` filter.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
  /// Inclusive lower bound.
  pub start: DateTime<Utc>,
  /// Exclusive upper bound.
  pub end: DateTime<Utc>,
}

impl DateRange {
  pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
    *ts >= self.start && *ts < self.end
  }
}
