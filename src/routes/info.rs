use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::InfoQuery,
    routes::{AppJson, AppState},
    services::{
        media_info,
        render::{split_bold, TextSegment},
    },
};

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub text: String,
    pub segments: Vec<TextSegment>,
}

/// Handler for the quick info finder
pub async fn lookup(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppJson(query): AppJson<InfoQuery>,
) -> AppResult<Json<InfoResponse>> {
    tracing::info!(
        request_id = %request_id,
        mode = ?query.mode,
        discover = query.discover_current_airing,
        "Processing info lookup"
    );

    let text = media_info::lookup_media_info(state.provider.as_ref(), &query).await?;
    let segments = split_bold(&text);

    Ok(Json(InfoResponse { text, segments }))
}
