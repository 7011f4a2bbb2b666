use std::sync::Arc;

use proxyhub_db::repositories::ProxyClientRepository;

use crate::config::AppConfig;
use crate::services::ProxyClientService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Process configuration.
    pub config: Arc<AppConfig>,
    /// Proxy client use cases.
    pub proxy_clients: Arc<ProxyClientService>,
    /// Backing repository, used directly only by the health probe.
    pub repo: Arc<dyn ProxyClientRepository>,
}

impl AppState {
    /// Wire the service layer on top of `repo`.
    pub fn new(config: AppConfig, repo: Arc<dyn ProxyClientRepository>) -> Self {
        Self {
            config: Arc::new(config),
            proxy_clients: Arc::new(ProxyClientService::new(Arc::clone(&repo))),
            repo,
        }
    }
}
