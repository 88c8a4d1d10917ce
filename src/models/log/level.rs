//! Closed vocabularies accepted for `level` and `service`.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Severity of a log entry. The empty string is an accepted, explicit "unset".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Fatal,
  Error,
  Warn,
  Info,
  Debug,
  #[default]
  #[serde(rename = "")]
  Unspecified,
}

/// Service that emitted a log entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
  Auth,
  Payment,
  Notifications,
  #[default]
  #[serde(rename = "")]
  Unspecified,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {field} `{value}`, expected one of {expected}")]
pub struct UnknownVariant {
  pub field: &'static str,
  pub value: String,
  pub expected: &'static str,
}

impl Level {
  pub fn as_str(&self) -> &'static str {
    match self {
      Level::Fatal => "fatal",
      Level::Error => "error",
      Level::Warn => "warn",
      Level::Info => "info",
      Level::Debug => "debug",
      Level::Unspecified => "",
    }
  }
}

impl Service {
  pub fn as_str(&self) -> &'static str {
    match self {
      Service::Auth => "auth",
      Service::Payment => "payment",
      Service::Notifications => "notifications",
      Service::Unspecified => "",
    }
  }
}

impl FromStr for Level {
  type Err = UnknownVariant;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "fatal" => Ok(Level::Fatal),
      "error" => Ok(Level::Error),
      "warn" => Ok(Level::Warn),
      "info" => Ok(Level::Info),
      "debug" => Ok(Level::Debug),
      "" => Ok(Level::Unspecified),
      other => Err(UnknownVariant {
        field: "level",
        value: other.to_string(),
        expected: "fatal, error, warn, info, debug",
      }),
    }
  }
}

impl FromStr for Service {
  type Err = UnknownVariant;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "auth" => Ok(Service::Auth),
      "payment" => Ok(Service::Payment),
      "notifications" => Ok(Service::Notifications),
      "" => Ok(Service::Unspecified),
      other => Err(UnknownVariant {
        field: "service",
        value: other.to_string(),
        expected: "auth, payment, notifications",
      }),
    }
  }
}

impl fmt::Display for Level {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl fmt::Display for Service {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn empty_string_is_unspecified() {
    let level: Level = serde_json::from_value(json!("")).unwrap();
    assert_eq!(level, Level::Unspecified);
    assert_eq!(serde_json::to_value(Service::Unspecified).unwrap(), json!(""));
  }

  #[test]
  fn unknown_level_is_rejected() {
    assert!(serde_json::from_value::<Level>(json!("critical")).is_err());
    let err = "critical".parse::<Level>().unwrap_err();
    assert_eq!(err.field, "level");
    assert!(err.to_string().contains("critical"));
  }

  #[test]
  fn parse_matches_serde_names() {
    for level in [Level::Fatal, Level::Error, Level::Warn, Level::Info, Level::Debug] {
      let name = serde_json::to_value(level).unwrap();
      assert_eq!(name, json!(level.as_str()));
      assert_eq!(level.as_str().parse::<Level>().unwrap(), level);
    }
    for service in [Service::Auth, Service::Payment, Service::Notifications] {
      assert_eq!(service.as_str().parse::<Service>().unwrap(), service);
    }
  }

  #[test]
  fn values_are_case_sensitive() {
    assert!("INFO".parse::<Level>().is_err());
    assert!("Auth".parse::<Service>().is_err());
  }
}
