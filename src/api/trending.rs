use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use tracing::debug;

use super::{ApiError, ApiResponse, AppState, RecordSearchRequest, TrendingEntryDto};

/// Store failures yield an empty leaderboard, not an error response.
pub async fn get_trending(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<TrendingEntryDto>>> {
    let entries = state
        .tracker()
        .fetch_trending()
        .await
        .into_iter()
        .map(TrendingEntryDto::from)
        .collect();

    Json(ApiResponse::success(entries))
}

/// Accepts the search and counts it in the background.
pub async fn record_search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecordSearchRequest>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), ApiError> {
    if request.search_term.trim().is_empty() {
        return Err(ApiError::validation("search_term must not be empty"));
    }

    debug!(search_term = %request.search_term, movie_id = request.movie.id, "Search accepted");

    state
        .tracker()
        .spawn_record_search(request.search_term, request.movie);

    Ok((StatusCode::ACCEPTED, Json(ApiResponse::success(()))))
}
