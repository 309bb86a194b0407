use chrono::{Local, NaiveDate};

use crate::{
    error::{AppError, AppResult},
    models::InfoQuery,
    services::{
        prompts,
        providers::{GenerationProvider, GenerationRequest},
    },
};

/// Returned when the endpoint answers with no usable text
pub const NO_INFO_FALLBACK: &str = "Could not find info.";

const LOOKUP_FAILED: &str = "Failed to lookup info.";

/// Looks up where a title can be watched, or lists currently airing series
///
/// Free-text result, intended to go through [`crate::services::render::split_bold`]
/// before display.
pub async fn lookup_media_info(
    provider: &dyn GenerationProvider,
    query: &InfoQuery,
) -> AppResult<String> {
    lookup_media_info_on(provider, query, Local::now().date_naive()).await
}

/// [`lookup_media_info`] with an explicit "today" for the prompt context
pub async fn lookup_media_info_on(
    provider: &dyn GenerationProvider,
    query: &InfoQuery,
    today: NaiveDate,
) -> AppResult<String> {
    provider.ensure_configured()?;

    if !query.discover_current_airing && query.query.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let prompt = prompts::lookup_prompt(
        &query.query,
        query.mode,
        query.discover_current_airing,
        query.check_all_providers,
        today,
    );

    let text = provider
        .generate(&GenerationRequest::text(prompt))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, provider = provider.name(), "Media info lookup failed");
            e.into_user_facing(LOOKUP_FAILED)
        })?;

    tracing::info!(
        mode = ?query.mode,
        discover = query.discover_current_airing,
        "Media info lookup completed"
    );

    Ok(text
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| NO_INFO_FALLBACK.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LookupMode;
    use crate::services::providers::MockGenerationProvider;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 2).unwrap()
    }

    fn configured_provider() -> MockGenerationProvider {
        let mut provider = MockGenerationProvider::new();
        provider.expect_ensure_configured().returning(|| Ok(()));
        provider.expect_name().return_const("mock");
        provider
    }

    fn info_query(query: &str, mode: LookupMode, discover: bool) -> InfoQuery {
        InfoQuery {
            query: query.to_string(),
            mode,
            discover_current_airing: discover,
            check_all_providers: false,
        }
    }

    #[tokio::test]
    async fn test_lookup_returns_text_unchanged() {
        let mut provider = configured_provider();
        provider
            .expect_generate()
            .withf(|request| {
                request.response_schema.is_none()
                    && request.prompt.contains("Where can I stream \"Severance\"?")
                    && request.prompt.contains("Today is November 2, 2025.")
            })
            .times(1)
            .returning(|_| Ok(Some("Available on: **Apple TV+**\nTotal: 2 Seasons".to_string())));

        let text = lookup_media_info_on(
            &provider,
            &info_query("Severance", LookupMode::Streaming, false),
            today(),
        )
        .await
        .unwrap();
        assert_eq!(text, "Available on: **Apple TV+**\nTotal: 2 Seasons");
    }

    #[tokio::test]
    async fn test_blank_body_resolves_to_fallback() {
        for body in [None, Some(String::new()), Some(" \n\t".to_string())] {
            let mut provider = configured_provider();
            provider.expect_generate().return_once(move |_| Ok(body));

            let text = lookup_media_info_on(
                &provider,
                &info_query("Fauda", LookupMode::Israeli, false),
                today(),
            )
            .await
            .unwrap();
            assert_eq!(text, NO_INFO_FALLBACK);
        }
    }

    #[tokio::test]
    async fn test_discovery_ignores_query() {
        let mut provider = configured_provider();
        provider
            .expect_generate()
            .withf(|request| !request.prompt.contains("unused-query"))
            .times(1)
            .returning(|_| Ok(Some("**Shtisel** - [שטיסל] (**YES**)".to_string())));

        let result = lookup_media_info_on(
            &provider,
            &info_query("unused-query", LookupMode::Israeli, true),
            today(),
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_discovery_allows_blank_query() {
        let mut provider = configured_provider();
        provider
            .expect_generate()
            .times(1)
            .returning(|_| Ok(Some("list".to_string())));

        let result =
            lookup_media_info_on(&provider, &info_query("", LookupMode::Israeli, true), today())
                .await;
        assert_eq!(result.unwrap(), "list");
    }

    #[tokio::test]
    async fn test_blank_query_rejected_without_network() {
        let mut provider = configured_provider();
        provider.expect_generate().never();

        let err = lookup_media_info_on(
            &provider,
            &info_query("   ", LookupMode::Streaming, false),
            today(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_missing_credential() {
        let mut provider = MockGenerationProvider::new();
        provider
            .expect_ensure_configured()
            .returning(|| Err(AppError::Configuration("API key is missing".to_string())));
        provider.expect_generate().never();

        let err = lookup_media_info_on(
            &provider,
            &info_query("Severance", LookupMode::Streaming, false),
            today(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_is_user_facing() {
        let mut provider = configured_provider();
        provider
            .expect_generate()
            .returning(|_| Err(AppError::ExternalApi("status 500".to_string())));

        let err = lookup_media_info_on(
            &provider,
            &info_query("Severance", LookupMode::Streaming, false),
            today(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), LOOKUP_FAILED);
    }
}
