//! Server Implementation
//!
//! HTTP server startup and graceful shutdown. On SIGTERM (or a cloud
//! spot-termination notice) the server enters a draining window during which
//! `/health` reports 503 so the load balancer stops routing here, then the
//! listener closes.

use crate::api;
use crate::core::{Config, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (for sharing with tests)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        if let Some(url) = state.config.spot_termination_url.clone() {
            spawn_spot_termination_watcher(state.clone(), url);
        }

        let app = api::app(state.clone());

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Hemline store server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(state))
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

/// Resolve when the server should stop accepting connections
///
/// Waits for SIGTERM / ctrl-c / a termination request, flips the health
/// endpoint into its 503 window, and drains for the configured period
/// before returning.
async fn shutdown_signal(state: ServerState) {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received ctrl-c"),
        _ = terminate => tracing::info!("Received SIGTERM"),
        _ = state.shutdown.termination_requested() => {
            tracing::info!("Termination requested by watcher")
        }
    }

    state.shutdown.begin();
    let drain = std::time::Duration::from_millis(state.config.shutdown_drain_ms);
    tracing::info!(drain_ms = state.config.shutdown_drain_ms, "Draining before shutdown");
    tokio::time::sleep(drain).await;
}

/// Poll the cloud provider's spot-termination notice endpoint
///
/// Some providers give ~2 minutes of notice via a metadata URL that starts
/// answering 200 shortly before the instance is reclaimed.
fn spawn_spot_termination_watcher(state: ServerState, url: String) {
    tokio::spawn(async move {
        let client = reqwest::Client::new();
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(5));
        loop {
            interval.tick().await;
            if state.shutdown.is_shutting_down() {
                return;
            }
            match client.get(&url).send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::warn!("Spot termination notice received, shutting down");
                    state.shutdown.request_termination();
                    return;
                }
                _ => {}
            }
        }
    });
}
