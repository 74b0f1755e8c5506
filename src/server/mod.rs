//! HTTP API over the commands
//!
//! The caller's identity comes from the `X-User-Id` header; errors are returned as
//! `{ "error", "kind", "details" }` JSON with a status derived from the error kind.

pub mod auth;
pub mod error;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderName, Method};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};

use crate::AppState;

pub use auth::{CurrentUser, USER_HEADER};

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(USER_HEADER)])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(routes::health))
        .route("/api/decks", get(routes::list_decks).post(routes::create_deck))
        .route(
            "/api/decks/{id}",
            get(routes::get_deck).put(routes::update_deck).delete(routes::delete_deck),
        )
        .route(
            "/api/decks/{id}/flashcards",
            get(routes::list_flashcards).post(routes::create_flashcard),
        )
        .route(
            "/api/decks/{id}/sessions",
            get(routes::list_sessions).post(routes::record_session),
        )
        .route(
            "/api/flashcards/{id}",
            get(routes::get_flashcard)
                .put(routes::update_flashcard)
                .delete(routes::delete_flashcard),
        )
        .route("/api/british-history", get(routes::history_info).post(routes::ask_history))
        .route("/api/translate", get(routes::translation_info).post(routes::translate))
        .layer(cors)
        .with_state(state)
}

/// Handle to a server running in the background
pub struct ServerHandle {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
    state: Arc<AppState>,
}

impl ServerHandle {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Cancel in-flight translations, stop accepting connections and wait for
    /// open requests to drain
    pub async fn stop(mut self) {
        self.state.shutdown.cancel();
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = self.task.await {
            log::error!("API server task failed: {}", e);
        }
    }
}

/// Bind `addr` and serve in a background task until [`ServerHandle::stop`]
pub async fn start_server(state: Arc<AppState>, addr: &str) -> std::io::Result<ServerHandle> {
    let listener = TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;
    let app = router(Arc::clone(&state));

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let task = tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                log::info!("API server shutting down");
            })
            .await;
        if let Err(e) = result {
            log::error!("API server error: {}", e);
        }
    });

    Ok(ServerHandle {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
        state,
    })
}

/// Serve until Ctrl-C or SIGTERM
pub async fn serve(state: Arc<AppState>, addr: &str) -> std::io::Result<()> {
    let handle = start_server(state, addr).await?;
    log::info!("Server running on {}", handle.base_url());

    shutdown_signal().await;
    handle.stop().await;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => log::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                log::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                log::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                log::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
