//! HTTP server lifecycle.
//!
//! A [`Server`] owns the fully wired router and the bind address. Its state
//! is published on a `watch` channel so callers (the binary, tests) can wait
//! for the listener to come up and learn the bound address:
//!
//! ```text
//! Constructed --start()--> Running(addr) --stop()--> Stopping --> Stopped
//! ```
//!
//! [`Server::stop`] closes the listener immediately. In-flight connections
//! are not drained.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::Router;
use proxyhub_db::repositories::ProxyClientRepository;
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::config::AppConfig;
use crate::router::build_app_router;
use crate::state::AppState;

/// Observable lifecycle state of a [`Server`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Constructed,
    Running(SocketAddr),
    Stopping,
    Stopped,
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server I/O error: {0}")]
    Serve(#[source] std::io::Error),
    #[error("server has already been started")]
    AlreadyStarted,
}

/// The proxy client HTTP service.
pub struct Server {
    bind_addr: String,
    router: Router,
    started: AtomicBool,
    shutdown: watch::Sender<bool>,
    state: watch::Sender<ServerState>,
}

impl Server {
    /// Wire repository, use case, state, and router. Nothing is bound yet.
    pub fn new(config: AppConfig, repo: Arc<dyn ProxyClientRepository>) -> Self {
        let bind_addr = format!("{}:{}", config.server.host, config.server.port);
        let router = build_app_router(AppState::new(config, repo));
        let (shutdown, _) = watch::channel(false);
        let (state, _) = watch::channel(ServerState::Constructed);

        Self {
            bind_addr,
            router,
            started: AtomicBool::new(false),
            shutdown,
            state,
        }
    }

    /// Bind and serve until [`stop`](Self::stop) is called or serving fails.
    ///
    /// Returns `Ok(())` when the close was requested through `stop`. May be
    /// called at most once.
    pub async fn start(&self) -> Result<(), ServerError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(ServerError::AlreadyStarted);
        }

        let mut shutdown = self.shutdown.subscribe();
        if *shutdown.borrow_and_update() {
            tracing::info!("Server stopped before it was started");
            self.mark_stopped();
            return Ok(());
        }

        let listener = TcpListener::bind(&self.bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: self.bind_addr.clone(),
                source,
            })
            .inspect_err(|_| self.mark_stopped())?;
        let local_addr = listener
            .local_addr()
            .map_err(ServerError::Serve)
            .inspect_err(|_| self.mark_stopped())?;

        self.state.send_replace(ServerState::Running(local_addr));
        tracing::info!(addr = %local_addr, "Server listening");

        let serve = axum::serve(
            listener,
            self.router
                .clone()
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .into_future();

        let result = tokio::select! {
            res = serve => res.map_err(ServerError::Serve),
            () = stop_requested(shutdown) => Ok(()),
        };

        self.mark_stopped();
        match &result {
            Ok(()) => tracing::info!(addr = %local_addr, "Server stopped"),
            Err(e) => tracing::error!(error = %e, "Server failed"),
        }
        result
    }

    fn mark_stopped(&self) {
        self.state.send_replace(ServerState::Stopped);
    }

    /// Request an immediate close. Idempotent; safe before `start`.
    pub fn stop(&self) {
        self.shutdown.send_replace(true);
        self.state.send_if_modified(|state| match state {
            ServerState::Running(_) => {
                *state = ServerState::Stopping;
                true
            }
            _ => false,
        });
    }

    /// Receiver for lifecycle transitions.
    pub fn subscribe(&self) -> watch::Receiver<ServerState> {
        self.state.subscribe()
    }

    /// The bound address while running.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        match *self.state.borrow() {
            ServerState::Running(addr) => Some(addr),
            _ => None,
        }
    }
}

async fn stop_requested(mut shutdown: watch::Receiver<bool>) {
    // An error means the sender is gone, which only happens with the server.
    let _ = shutdown.wait_for(|stop| *stop).await;
}
