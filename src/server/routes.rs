// REST API routes
// Every failure is reported as `{"detail": "..."}`.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use super::AppState;
use crate::error::{MediaError, RecommendationError};
use crate::models::{Artist, PlaylistRequest, PlaylistResponse, TrackCatalog};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Recommendation(#[from] RecommendationError),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("{0}")]
    InvalidRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Recommendation(_) | ApiError::Media(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// ---- Route registration ----

pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/artists", get(get_artists))
        .route("/recommendations", post(create_recommendations))
}

// ---- Handlers ----

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

async fn get_artists(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Artist>>, ApiError> {
    let artists = state.library.get_all_artists().await.map_err(|e| {
        error!(error = %e, "failed to get artists");
        e
    })?;
    Ok(Json(artists))
}

async fn create_recommendations(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PlaylistRequest>, JsonRejection>,
) -> Result<Json<PlaylistResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    request.validate().map_err(ApiError::InvalidRequest)?;

    generate_playlist(&state, &request).await.map(Json).map_err(|e| {
        match &e {
            ApiError::Recommendation(inner) => {
                error!(stage = %inner.stage(), error = %e, "error creating playlist")
            }
            _ => error!(error = %e, "error creating playlist"),
        }
        e
    })
}

/// Artist selection, track catalog fetch, track selection, naming, creation
async fn generate_playlist(
    state: &AppState,
    request: &PlaylistRequest,
) -> Result<PlaylistResponse, ApiError> {
    let artists = state.library.get_all_artists().await?;
    let selected: Vec<String> = state
        .recommender
        .select_artists(&request.prompt, &artists, &request.model)
        .await?
        .into_iter()
        .filter(|name| {
            let blank = name.trim().is_empty();
            if blank {
                warn!("skipping blank artist name from artist selection");
            }
            !blank
        })
        .collect();

    let mut catalog = TrackCatalog::new();
    for artist in &selected {
        catalog.extend(state.library.get_artist_tracks(artist).await?);
    }

    let picks = state
        .recommender
        .select_tracks(&request.prompt, &catalog, &request.model)
        .await?;

    let name = state
        .recommender
        .generate_playlist_name(&request.prompt, &request.model)
        .await?;

    let playlist = state.library.create_curated_playlist(&name, &picks).await?;
    info!(name = %playlist.title, tracks = playlist.track_count, "playlist ready");

    Ok(PlaylistResponse {
        name: playlist.title,
        track_count: playlist.track_count,
        artists: selected,
        id: playlist.id,
    })
}
