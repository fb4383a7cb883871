pub mod extract;
pub mod rest;

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use std::sync::Arc;

use crate::service::NoteService;

pub fn router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/", get(rest::root))
        .route("/openapi.json", get(rest::openapi))
        .route("/notes", get(rest::list_notes).post(rest::create_note))
        .route(
            "/notes/{id}",
            get(rest::get_note)
                .put(rest::update_note)
                .delete(rest::delete_note),
        )
        .with_state(service)
        // Note bodies are unbounded text; no request size cap.
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        // Mirrors any origin and allows credentials. Not for production use.
        .layer(CorsLayer::very_permissive())
}
