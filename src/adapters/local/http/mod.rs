//! HTTP inbound adapter.
//!
//! JSON API for uploading, trimming and concatenating videos, plus static
//! serving of the storage directory under `/uploads`.

mod error;
pub mod handlers;

use crate::application::editor::EditorService;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub editor: Arc<EditorService>,
    /// Base for download links; the request's Host header is used when unset.
    pub public_url: Option<String>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let uploads = ServeDir::new(state.editor.storage().root());

    Router::new()
        .route("/upload", post(handlers::upload::handle))
        .route("/trim", post(handlers::trim::handle))
        .route("/concat", post(handlers::concat::handle))
        .route("/performAll", post(handlers::perform_all::handle))
        .route("/download", get(handlers::download::handle))
        .route("/video-info", get(handlers::info::handle))
        .route("/jobs/:id", get(handlers::jobs::handle))
        .nest_service("/uploads", uploads)
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
