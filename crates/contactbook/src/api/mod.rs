//! HTTP service for contactbook.
//!
//! This module exposes the contact store as a JSON REST API:
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | `POST` | `/contacts` | 201 + created contact |
//! | `GET` | `/contacts` | 200 + array of contacts |
//! | `PUT` | `/contacts/:id` | 200 + updated contact |
//! | `DELETE` | `/contacts/:id` | 204 |
//!
//! Failures are turned into JSON bodies by [`ApiError`].

mod error;
mod handlers;
mod middleware;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, put};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::storage::ContactStore;

pub use error::{ApiError, Operation};

/// Shared state handed to every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    store: Arc<Mutex<ContactStore>>,
    cors_allowed_origins: Arc<[String]>,
}

impl AppState {
    /// Wrap a store and the server settings for sharing across requests.
    #[must_use]
    pub fn new(store: ContactStore, server: &ServerConfig) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            cors_allowed_origins: server.cors_allowed_origins.clone().into(),
        }
    }

    /// Run a store operation on the blocking thread pool.
    ///
    /// `SQLite` calls block, so they are kept off the async workers. Calls
    /// are serialized by the store mutex.
    pub(crate) async fn with_store<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&ContactStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let guard = store
                .lock()
                .map_err(|_| Error::internal("contact store lock poisoned"))?;
            op(&guard)
        })
        .await
        .map_err(|e| Error::internal(format!("store task failed: {e}")))?
    }

    pub(crate) fn cors_allowed_origins(&self) -> &[String] {
        &self.cors_allowed_origins
    }
}

/// Build the contact API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/contacts",
            get(handlers::list_contacts).post(handlers::create_contact),
        )
        .route(
            "/contacts/:id",
            put(handlers::update_contact).delete(handlers::delete_contact),
        )
        .layer(from_fn_with_state(state.clone(), middleware::cors_middleware))
        .layer(from_fn(middleware::request_logging_middleware))
        .with_state(state)
}

/// Bind the listening socket.
///
/// # Errors
///
/// Returns an error if the address cannot be bound.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| Error::ServerBind { addr, source })
}

/// Serve the contact API on `listener` until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the server fails while accepting connections.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Contact service listening on http://{addr}");
    }
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;
    info!("Contact service stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
