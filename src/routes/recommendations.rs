use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{FavoriteItem, RecommendationResponse},
    routes::{AppJson, AppState},
    services::recommendations,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub favorites: Vec<FavoriteItem>,
    #[serde(default)]
    pub exclude_titles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatorWorksRequest {
    pub creator: String,
    pub category: String,
    pub current_title: String,
}

/// Handler for taste-based recommendations
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppJson(request): AppJson<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        favorites_count = request.favorites.len(),
        exclude_count = request.exclude_titles.len(),
        "Processing recommendation request"
    );

    let response = recommendations::get_recommendations(
        state.provider.as_ref(),
        &request.favorites,
        &request.exclude_titles,
    )
    .await?;

    Ok(Json(response))
}

/// Handler for "more by this creator"
pub async fn by_creator(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppJson(request): AppJson<CreatorWorksRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        creator = %request.creator,
        category = %request.category,
        "Processing creator works request"
    );

    let response = recommendations::get_works_by_creator(
        state.provider.as_ref(),
        &request.creator,
        &request.category,
        &request.current_title,
    )
    .await?;

    Ok(Json(response))
}
