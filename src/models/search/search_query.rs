//! Validated search request.

use super::date_range::DateRange;
use crate::models::log::level::{Level, Service};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_SIZE: u32 = 20;
pub const MAX_SIZE: u32 = 100;

/// A search that has passed validation: `page >= 1` and `size` in `1..=100`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
  pub text: Option<String>,
  pub level: Option<Level>,
  pub service: Option<Service>,
  pub date: Option<DateRange>,
  pub page: u32,
  pub size: u32,
}

impl Default for SearchQuery {
  fn default() -> Self {
    SearchQuery {
      text: None,
      level: None,
      service: None,
      date: None,
      page: DEFAULT_PAGE,
      size: DEFAULT_SIZE,
    }
  }
}

impl SearchQuery {
  /// Number of matches skipped before the requested page.
  pub fn offset(&self) -> u64 {
    u64::from(self.page.saturating_sub(1)) * u64::from(self.size)
  }
}
