//! Translation of a validated search into the engine's query DSL.

use crate::{
  error::ApiError,
  models::{
    log::timestamp,
    search::{date_range::DateRange, search_query::SearchQuery},
  },
};
use chrono::{DateTime, Months, NaiveDate, TimeZone, Utc};
use serde_json::{Value, json};

/// Parse a `date` filter by its length: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
pub fn parse_date_filter(raw: &str) -> Result<DateRange, ApiError> {
  let (start, end) = match raw.len() {
    4 => {
      let year = parse_year(raw)?;
      let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(ApiError::InvalidDateFormat)?;
      (start, start.checked_add_months(Months::new(12)))
    }
    7 => {
      check_shape(raw)?;
      let start = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        .map_err(|_| ApiError::InvalidDateFormat)?;
      (start, start.checked_add_months(Months::new(1)))
    }
    10 => {
      check_shape(raw)?;
      let start =
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ApiError::InvalidDateFormat)?;
      (start, start.succ_opt())
    }
    _ => return Err(ApiError::InvalidDateFormat),
  };
  let end = end.ok_or(ApiError::InvalidDateFormat)?;
  Ok(DateRange {
    start: midnight_utc(start)?,
    end: midnight_utc(end)?,
  })
}

fn parse_year(raw: &str) -> Result<i32, ApiError> {
  if !raw.bytes().all(|b| b.is_ascii_digit()) {
    return Err(ApiError::InvalidDateFormat);
  }
  raw.parse().map_err(|_| ApiError::InvalidDateFormat)
}

/// Digits everywhere except `-` at positions 4 and 7.
fn check_shape(raw: &str) -> Result<(), ApiError> {
  let ok = raw.bytes().enumerate().all(|(i, b)| match i {
    4 | 7 => b == b'-',
    _ => b.is_ascii_digit(),
  });
  if ok {
    Ok(())
  } else {
    Err(ApiError::InvalidDateFormat)
  }
}

fn midnight_utc(date: NaiveDate) -> Result<DateTime<Utc>, ApiError> {
  let naive = date.and_hms_opt(0, 0, 0).ok_or(ApiError::InvalidDateFormat)?;
  Ok(Utc.from_utc_datetime(&naive))
}

/// Escape the wildcard metacharacters so user text matches literally.
pub fn escape_wildcard(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    if matches!(c, '\\' | '*' | '?') {
      out.push('\\');
    }
    out.push(c);
  }
  out
}

/// Build the `_search` request body for a query.
pub fn build_search_body(query: &SearchQuery) -> Value {
  let mut must: Vec<Value> = Vec::new();

  if let Some(text) = &query.text {
    must.push(json!({
      "bool": {
        "should": [
          {
            "wildcard": {
              "message": {
                "value": format!("*{}*", escape_wildcard(&text.to_lowercase()))
              }
            }
          },
          {
            "match": {
              "message": {
                "query": text,
                "fuzziness": "AUTO"
              }
            }
          }
        ],
        "minimum_should_match": 1
      }
    }));
  }

  if let Some(level) = query.level {
    must.push(json!({ "term": { "level.keyword": level.as_str() } }));
  }

  if let Some(service) = query.service {
    must.push(json!({ "term": { "service.keyword": service.as_str() } }));
  }

  if let Some(range) = &query.date {
    must.push(json!({
      "range": {
        "timestamp": {
          "gte": timestamp::format(&range.start),
          "lt": timestamp::format(&range.end)
        }
      }
    }));
  }

  if must.is_empty() {
    must.push(json!({ "match_all": {} }));
  }

  json!({
    "query": { "bool": { "must": must } },
    "sort": [{ "timestamp": { "order": "desc" } }],
    "from": query.offset(),
    "size": query.size,
    "track_total_hits": true
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::log::level::{Level, Service};

  fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
  }

  #[test]
  fn year_filter_covers_whole_year() {
    let range = parse_date_filter("2024").unwrap();
    assert_eq!(range.start, utc(2024, 1, 1));
    assert_eq!(range.end, utc(2025, 1, 1));
  }

  #[test]
  fn month_filter_covers_whole_month() {
    let range = parse_date_filter("2024-03").unwrap();
    assert_eq!(range.start, utc(2024, 3, 1));
    assert_eq!(range.end, utc(2024, 4, 1));

    let december = parse_date_filter("2023-12").unwrap();
    assert_eq!(december.end, utc(2024, 1, 1));
  }

  #[test]
  fn day_filter_covers_one_day() {
    let range = parse_date_filter("2024-03-15").unwrap();
    assert_eq!(range.start, utc(2024, 3, 15));
    assert_eq!(range.end, utc(2024, 3, 16));

    let leap = parse_date_filter("2024-02-29").unwrap();
    assert_eq!(leap.end, utc(2024, 3, 1));
  }

  #[test]
  fn malformed_dates_are_rejected() {
    for raw in [
      "24",
      "",
      "2024-3",
      "2024-03-1",
      "2024/03/15",
      "abcd",
      "2024-13",
      "2023-02-29",
      "2024-03-15T00",
      "+024",
    ] {
      assert!(
        matches!(parse_date_filter(raw), Err(ApiError::InvalidDateFormat)),
        "{raw} should be rejected"
      );
    }
  }

  #[test]
  fn empty_query_matches_everything() {
    let body = build_search_body(&SearchQuery::default());
    assert_eq!(
      body,
      json!({
        "query": { "bool": { "must": [{ "match_all": {} }] } },
        "sort": [{ "timestamp": { "order": "desc" } }],
        "from": 0,
        "size": 20,
        "track_total_hits": true
      })
    );
  }

  #[test]
  fn all_filters_are_combined() {
    let query = SearchQuery {
      text: Some("Timeout".into()),
      level: Some(Level::Error),
      service: Some(Service::Payment),
      date: Some(parse_date_filter("2024-03").unwrap()),
      page: 3,
      size: 10,
    };
    let body = build_search_body(&query);
    let must = body["query"]["bool"]["must"].as_array().unwrap();
    assert_eq!(must.len(), 4);

    let should = &must[0]["bool"]["should"];
    assert_eq!(should[0]["wildcard"]["message"]["value"], "*timeout*");
    assert_eq!(should[1]["match"]["message"]["query"], "Timeout");
    assert_eq!(should[1]["match"]["message"]["fuzziness"], "AUTO");
    assert_eq!(must[0]["bool"]["minimum_should_match"], 1);

    assert_eq!(must[1], json!({ "term": { "level.keyword": "error" } }));
    assert_eq!(must[2], json!({ "term": { "service.keyword": "payment" } }));
    assert_eq!(
      must[3],
      json!({
        "range": {
          "timestamp": {
            "gte": "2024-03-01T00:00:00.000Z",
            "lt": "2024-04-01T00:00:00.000Z"
          }
        }
      })
    );
    assert_eq!(body["from"], 20);
    assert_eq!(body["size"], 10);
  }

  #[test]
  fn wildcard_metacharacters_are_escaped() {
    assert_eq!(escape_wildcard("50% *off?"), "50% \\*off\\?");
    assert_eq!(escape_wildcard("a\\b"), "a\\\\b");
  }
}
