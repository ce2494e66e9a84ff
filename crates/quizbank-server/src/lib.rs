//! Quizbank Server
//!
//! JSON API for multiple-choice quiz questions, stored in SQLite.

pub mod config;
pub mod error;
pub mod handlers;
pub mod storage;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }
}

/// Build the HTTP router
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        .route(
            "/questions",
            get(handlers::questions::list).post(handlers::questions::create),
        )
        .route(
            "/questions/:id",
            get(handlers::questions::get)
                .put(handlers::questions::update)
                .delete(handlers::questions::delete),
        )
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}
