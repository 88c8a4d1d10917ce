//! Process configuration, read once from the environment at startup.

use envconfig::Envconfig;
use std::{net::SocketAddr, str::FromStr, time};

#[derive(Envconfig, Clone)]
pub struct Config {
  #[envconfig(from = "LOGGATE_ADDR", default = "127.0.0.1:8000")]
  pub address: SocketAddr,

  #[envconfig(from = "OPENSEARCH_SCHEME", default = "http")]
  pub opensearch_scheme: String,

  #[envconfig(from = "OPENSEARCH_HOST", default = "localhost")]
  pub opensearch_host: String,

  #[envconfig(from = "OPENSEARCH_PORT", default = "9200")]
  pub opensearch_port: u16,

  #[envconfig(from = "OPENSEARCH_USER", default = "admin")]
  pub opensearch_user: String,

  #[envconfig(from = "OPENSEARCH_PASS", default = "admin")]
  pub opensearch_pass: String,

  #[envconfig(from = "OPENSEARCH_TIMEOUT_MS", default = "10000")]
  pub opensearch_timeout: EnvMsDuration,
}

impl Config {
  /// Base URL of the search engine, without a trailing slash.
  pub fn engine_url(&self) -> String {
    format!(
      "{}://{}:{}",
      self.opensearch_scheme, self.opensearch_host, self.opensearch_port
    )
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvMsDuration(pub time::Duration);

#[derive(Debug, PartialEq, Eq)]
pub struct ParseEnvMsDurationError;

impl FromStr for EnvMsDuration {
  type Err = ParseEnvMsDurationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let ms = s.parse::<u64>().map_err(|_| ParseEnvMsDurationError)?;

    Ok(EnvMsDuration(time::Duration::from_millis(ms)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  #[test]
  fn defaults_point_at_local_engine() {
    let config = Config::init_from_hashmap(&HashMap::new()).unwrap();
    assert_eq!(config.engine_url(), "http://localhost:9200");
    assert_eq!(config.opensearch_user, "admin");
    assert_eq!(config.opensearch_pass, "admin");
    assert_eq!(config.address, "127.0.0.1:8000".parse().unwrap());
    assert_eq!(config.opensearch_timeout.0, time::Duration::from_secs(10));
  }

  #[test]
  fn overrides_are_applied() {
    let env = HashMap::from([
      ("OPENSEARCH_HOST".to_string(), "search.internal".to_string()),
      ("OPENSEARCH_PORT".to_string(), "9201".to_string()),
      ("OPENSEARCH_SCHEME".to_string(), "https".to_string()),
      ("OPENSEARCH_TIMEOUT_MS".to_string(), "250".to_string()),
    ]);
    let config = Config::init_from_hashmap(&env).unwrap();
    assert_eq!(config.engine_url(), "https://search.internal:9201");
    assert_eq!(config.opensearch_timeout.0, time::Duration::from_millis(250));
  }

  #[test]
  fn invalid_port_is_an_error() {
    let env = HashMap::from([("OPENSEARCH_PORT".to_string(), "nine".to_string())]);
    assert!(Config::init_from_hashmap(&env).is_err());
  }
}
