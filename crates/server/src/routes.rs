use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use shareflix_core::error::ApiError;
use shareflix_core::types::{ImdbId, MediaKind};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::addon::{Manifest, StreamsResponse};
use crate::error::AppError;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/manifest.json", get(manifest))
        .route("/stream/{kind}/{id}", get(streams))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ---------------------------------------------------------------------------
// Addon
// ---------------------------------------------------------------------------

async fn manifest() -> Json<Manifest> {
    Json(Manifest::new())
}

/// `GET /stream/{kind}/{id}.json`
async fn streams(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<StreamsResponse>, AppError> {
    let id = id.strip_suffix(".json").unwrap_or(&id);
    let imdb_id = ImdbId::parse(id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if MediaKind::from_str_opt(&kind) != Some(MediaKind::Movie) {
        debug!(kind = %kind, imdb_id = %imdb_id, "unsupported content type");
        return Ok(Json(StreamsResponse::default()));
    }

    match tokio::time::timeout(state.resolve_timeout, state.resolver.resolve(&imdb_id)).await {
        Ok(descriptors) => Ok(Json(StreamsResponse::from_descriptors(&descriptors))),
        Err(_) => {
            warn!(
                imdb_id = %imdb_id,
                timeout_secs = state.resolve_timeout.as_secs(),
                "stream resolution timed out"
            );
            Ok(Json(StreamsResponse::default()))
        }
    }
}
