//! HTTP handler implementation.
//!
//! Serves the scraped dataset at `GET /api/movies`, wrapped in a
//! `{ statusCode, message, data }` envelope. The file is re-read on every
//! request so a fresh scrape shows up without a restart.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Json, Router, extract::State, http::Method, routing::get};
use reelscore_core::read_dataset;
use serde::Serialize;
use serde_json::{Map, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

/// Shared state for the API.
#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset_path: PathBuf,
}

/// Uniform success body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub status_code: u16,
    pub message: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self { status_code: 200, message: message.into(), data }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods([Method::GET]);

    Router::new()
        .route("/api/movies", get(list_movies))
        .with_state(Arc::new(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn list_movies(State(state): State<Arc<AppState>>) -> Result<Json<Envelope<Vec<Map<String, Value>>>>, ApiError> {
    let movies = read_dataset(&state.dataset_path).await?;
    tracing::debug!(count = movies.len(), "serving movies");

    Ok(Json(Envelope::ok("Successfully fetched movies data", movies)))
}
