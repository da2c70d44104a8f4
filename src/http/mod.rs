//! HTTP layer - axum router, shared state, and request handlers.
//!
//! Handlers are thin: they extract the verified caller, hand the request to
//! the matching core operation, and translate the result. Everything the
//! permission model decides lives in [`crate::core`], not here.

/// Bearer-credential extraction
pub mod auth;
/// Error-to-response mapping
pub mod error;
/// Route handlers per resource
pub mod routes;


use crate::errors::Result;
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Shared state available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all operations
    pub db: DatabaseConnection,
    /// Lifetime of newly issued session tokens
    pub session_ttl: chrono::Duration,
}

impl AppState {
    /// Creates the shared state handed to the router.
    #[must_use]
    pub const fn new(db: DatabaseConnection, session_ttl: chrono::Duration) -> Self {
        Self { db, session_ttl }
    }
}

/// Builds the full application router.
#[must_use]
pub fn router(state: AppState) -> axum::Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves the application until the process stops.
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
