//! loggate library entrypoint.
//!
//! Modules:
//! - `app`: startup, shared state, graceful shutdown
//! - `config`: environment-driven configuration
//! - `error`: engine and API error taxonomy
//! - `http`: Axum router and handlers
//! - `models`: typed records used across layers
//! - `query`: search request translation to the engine query DSL
//! - `store`: engine client seam and the OpenSearch backend
//! - `util`: tracing setup

pub mod app;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod query;
pub mod store;
pub mod util;
