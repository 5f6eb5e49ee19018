//! Home feed API handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use blitz_core::{FeedFilter, FeedView};
use serde::Deserialize;

use super::ErrorResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedParams {
    #[serde(default)]
    pub category: Option<String>,
}

/// GET /api/v1/feed?category=all|movies|shows|games|books
///
/// Fetches and shuffles a fresh feed per request.
pub async fn get_feed(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeedParams>,
) -> Result<Json<FeedView>, (StatusCode, Json<ErrorResponse>)> {
    let filter = match params.category.as_deref() {
        None | Some("") => FeedFilter::All,
        Some(raw) => raw.parse::<FeedFilter>().map_err(|error| {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
        })?,
    };

    let feed = state.orchestrator().home_feed().await;
    Ok(Json(FeedView::build(&feed, filter)))
}
