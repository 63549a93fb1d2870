//! Axum router and server setup.
//! Used by: main.

use axum::routing::{any, get};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::page::root))
        .route("/style.css", get(handlers::assets::stylesheet))
        .route("/app.js", get(handlers::assets::bootstrap))
        .route("/health", get(handlers::health::health))
        .route("/metrics", get(handlers::metrics::metrics))
        .route("/api/users", any(handlers::users::handle))
        .route("/:page", get(handlers::page::show))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(state: AppState, addr: &str) -> std::io::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, router).await
}
