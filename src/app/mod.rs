//! Application setup and runtime.

use crate::{
  config::Config,
  http,
  store::{LogStore, opensearch::OpenSearchStore},
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

/// Source of write timestamps.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Shared application state. Both members are shared handles with no
/// per-request state.
#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn LogStore>,
  pub clock: Arc<dyn Clock>,
}

impl AppState {
  pub fn new<S: LogStore + 'static>(store: S) -> Self {
    AppState {
      store: Arc::new(store),
      clock: Arc::new(SystemClock),
    }
  }

  pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
    self.clock = Arc::new(clock);
    self
  }
}

/// Build the state for a configuration, backed by the configured OpenSearch node.
pub fn build_state(config: &Config) -> Result<AppState, reqwest::Error> {
  let store = OpenSearchStore::new(config)?;
  info!("search engine:        {}", store.base_url());
  Ok(AppState::new(store))
}

/// Serve the HTTP API until SIGINT or SIGTERM.
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  crate::util::init_tracing();

  let state = build_state(&config)?;
  let app = http::build_router(state);

  info!("ingest endpoint:      POST http://{}/logs/", config.address);
  info!("search endpoint:      GET http://{}/logs/search", config.address);

  let listener = tokio::net::TcpListener::bind(config.address).await?;
  axum::serve(listener, app)
    .with_graceful_shutdown(wait_for_shutdown_signal())
    .await?;
  info!("shut down");
  Ok(())
}

async fn wait_for_shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      warn!("failed to listen for SIGINT: {e}");
      std::future::pending::<()>().await;
    }
  };
  #[cfg(unix)]
  {
    use tokio::signal::unix::{SignalKind, signal};
    match signal(SignalKind::terminate()) {
      Ok(mut sigterm) => tokio::select! {
        _ = ctrl_c => info!("received SIGINT"),
        _ = sigterm.recv() => info!("received SIGTERM"),
      },
      Err(e) => {
        warn!("failed to install SIGTERM handler, waiting for SIGINT only: {e}");
        ctrl_c.await;
        info!("received SIGINT");
      }
    }
  }
  #[cfg(not(unix))]
  {
    ctrl_c.await;
    info!("received Ctrl-C");
  }
}
