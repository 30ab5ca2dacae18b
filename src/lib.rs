//! Crate entrypoint wiring together configuration, the UniFi client, and the
//! external-dns webhook API.

pub mod api;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod provider;
pub mod unifi;
pub mod validation;

use config::AppConfig;
use provider::DnsProvider;

use std::sync::Arc;

/// Complete application dependencies shared across handlers.
pub struct AppState {
    pub config: AppConfig,
    pub provider: Box<dyn DnsProvider>,
}

/// Arc-wrapped version of `AppState` passed into Axum extensions.
pub type SharedState = Arc<AppState>;
