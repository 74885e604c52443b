//! Web layer module
//!
//! HTTP control surface for the player: stream selection, playback controls,
//! status and the embedded control page. Handlers are thin and delegate to
//! [`StreamStateManager`].

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{config::Config, services::StreamStateManager};

pub mod handlers;
pub mod responses;

pub use responses::{handle_error, ApiResponse, StatusResponse};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub stream_state: StreamStateManager,
}

/// Create the router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index::index))
        .route("/health", get(handlers::health::health_check))
        .route("/status", get(handlers::stream::get_status))
        // Stream selection
        .route("/stream", post(handlers::stream::set_stream))
        .route("/stream/clear", post(handlers::stream::clear_stream))
        // Playback controls
        .route("/play", get(handlers::playback::play))
        .route("/pause", get(handlers::playback::pause))
        .route("/stop", get(handlers::playback::stop))
        .route("/skip/forward/{seconds}", get(handlers::playback::skip_forward))
        .route("/skip/backward/{seconds}", get(handlers::playback::skip_backward))
        .route("/jump/from-start/{seconds}", get(handlers::playback::jump_from_start))
        .route("/jump/from-end/{seconds}", get(handlers::playback::jump_from_end))
        // Static assets
        .route("/static/{*path}", get(handlers::static_assets::serve_static_asset))
        // Middleware (applied in reverse order)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
    stream_state: StreamStateManager,
}

impl WebServer {
    pub fn new(config: Config, stream_state: StreamStateManager) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        let app = create_router(AppState {
            stream_state: stream_state.clone(),
        });

        Ok(Self {
            app,
            addr,
            stream_state,
        })
    }

    /// Serve until `cancellation_token` fires, then stop any live poller
    pub async fn serve_with_cancellation(self, cancellation_token: CancellationToken) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", self.addr, e))?;
        info!("Web server listening on {}", self.addr);

        let shutdown_signal = async move {
            cancellation_token.cancelled().await;
            info!("Web server received cancellation signal, shutting down gracefully");
        };

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        self.stream_state.shutdown().await;
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}
