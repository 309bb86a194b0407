use crate::{
    error::{AppError, AppResult},
    models::{FavoriteItem, RecommendationResponse},
    services::{
        prompts,
        providers::{GenerationProvider, GenerationRequest},
    },
};

const RECOMMENDATIONS_FAILED: &str = "Failed to fetch recommendations. Try again!";

/// Generates taste-based recommendations from the user's favorites
///
/// Recommends 3 items for each category present in `favorites`, skipping
/// anything in `exclude_titles`. An empty favorites list returns an empty
/// response without calling the provider.
pub async fn get_recommendations(
    provider: &dyn GenerationProvider,
    favorites: &[FavoriteItem],
    exclude_titles: &[String],
) -> AppResult<RecommendationResponse> {
    provider.ensure_configured()?;

    if favorites.is_empty() {
        return Ok(RecommendationResponse::empty());
    }

    let request = GenerationRequest::json(
        prompts::recommendations_prompt(favorites, exclude_titles),
        RecommendationResponse::response_schema(),
    );

    let response = fetch_recommendations(provider, &request)
        .await
        .and_then(|decoded| decoded.ok_or(AppError::EmptyResponse))
        .map_err(|e| {
            tracing::error!(error = %e, provider = provider.name(), "Recommendation request failed");
            e.into_user_facing(RECOMMENDATIONS_FAILED)
        })?;

    tracing::info!(
        favorites = favorites.len(),
        excluded = exclude_titles.len(),
        results = response.recommendations.len(),
        "Recommendations generated"
    );

    Ok(response)
}

/// Finds other works by the creator of `current_title`
///
/// Unlike [`get_recommendations`], an empty response body is not an error
/// here; it resolves to an empty list.
pub async fn get_works_by_creator(
    provider: &dyn GenerationProvider,
    creator: &str,
    category: &str,
    current_title: &str,
) -> AppResult<RecommendationResponse> {
    provider.ensure_configured()?;

    if creator.trim().is_empty() {
        return Err(AppError::InvalidInput("Creator cannot be empty".to_string()));
    }

    let request = GenerationRequest::json(
        prompts::creator_works_prompt(creator, category, current_title),
        RecommendationResponse::response_schema(),
    );

    let response = fetch_recommendations(provider, &request)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                creator = %creator,
                provider = provider.name(),
                "Creator lookup failed"
            );
            e.into_user_facing(format!("Failed to find more works by {}", creator))
        })?
        .unwrap_or_default();

    tracing::info!(
        creator = %creator,
        results = response.recommendations.len(),
        "Creator works generated"
    );

    Ok(response)
}

/// Performs the call and decodes the body; `None` for an empty body
async fn fetch_recommendations(
    provider: &dyn GenerationProvider,
    request: &GenerationRequest,
) -> AppResult<Option<RecommendationResponse>> {
    let Some(text) = provider
        .generate(request)
        .await?
        .filter(|text| !text.trim().is_empty())
    else {
        return Ok(None);
    };

    let decoded: RecommendationResponse = serde_json::from_str(&text).map_err(|e| {
        tracing::debug!(response = %text, "Response did not match recommendation schema");
        AppError::Parse(e)
    })?;

    Ok(Some(decoded))
}
