/// Google Gemini provider
///
/// Calls the `generateContent` REST endpoint once per request. When a
/// response schema is supplied the request sets
/// `responseMimeType: application/json` so the model answers with JSON
/// matching that schema; otherwise free text comes back.
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    services::providers::{GenerationConfig, GenerationProvider, GenerationRequest},
};

const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME_TYPE: &str = "application/json";

#[derive(Clone)]
pub struct GeminiProvider {
    http_client: HttpClient,
    config: GenerationConfig,
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<ResponseConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResponseConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl GeminiProvider {
    /// Creates a provider from an explicitly resolved configuration
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            http_client: HttpClient::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url, self.config.model
        )
    }

    fn api_key(&self) -> AppResult<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("API key is missing. Please set API_KEY.".to_string()))
    }

    fn build_body<'a>(request: &'a GenerationRequest) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: request.response_schema.as_ref().map(|schema| ResponseConfig {
                response_mime_type: JSON_MIME_TYPE,
                response_schema: schema,
            }),
        }
    }
}

#[async_trait::async_trait]
impl GenerationProvider for GeminiProvider {
    fn ensure_configured(&self) -> AppResult<()> {
        self.api_key().map(|_| ())
    }

    async fn generate(&self, request: &GenerationRequest) -> AppResult<Option<String>> {
        let api_key = self.api_key()?;

        let response = self
            .http_client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&Self::build_body(request))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Gemini API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw Gemini API response");

        let parsed: GenerateContentResponse = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(error = %e, "Failed to deserialize Gemini response envelope");
            AppError::ExternalApi(format!("Failed to parse Gemini response: {}", e))
        })?;

        let text = parsed.into_text();

        tracing::info!(
            model = %self.config.model,
            structured = request.response_schema.is_some(),
            empty = text.is_none(),
            provider = self.name(),
            "Generation completed"
        );

        Ok(text)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_provider(api_key: Option<&str>) -> GeminiProvider {
        GeminiProvider::new(GenerationConfig {
            api_key: api_key.map(str::to_string),
            api_url: "http://test.local".to_string(),
            model: "gemini-2.5-flash".to_string(),
        })
    }

    #[test]
    fn test_endpoint_includes_model() {
        let provider = create_test_provider(Some("key"));
        assert_eq!(
            provider.endpoint(),
            "http://test.local/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_ensure_configured_without_key() {
        let provider = create_test_provider(None);
        assert!(matches!(
            provider.ensure_configured(),
            Err(AppError::Configuration(_))
        ));
        assert!(create_test_provider(Some("key")).ensure_configured().is_ok());
    }

    #[tokio::test]
    async fn test_generate_without_key_fails_before_network() {
        // test.local never resolves; a configuration error proves no call was attempted
        let provider = create_test_provider(None);
        let result = provider.generate(&GenerationRequest::text("hello")).await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_text_request_body_has_no_generation_config() {
        let request = GenerationRequest::text("Where can I stream \"Fauda\"?");
        let body = serde_json::to_value(GeminiProvider::build_body(&request)).unwrap();

        assert_eq!(
            body,
            json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "Where can I stream \"Fauda\"?"}]}
                ]
            })
        );
    }

    #[test]
    fn test_json_request_body_carries_schema() {
        let schema = json!({"type": "OBJECT"});
        let request = GenerationRequest::json("recommend", schema.clone());
        let body = serde_json::to_value(GeminiProvider::build_body(&request)).unwrap();

        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let json = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Available on: "}, {"text": "**Netflix**"}]}},
                {"content": {"role": "model", "parts": [{"text": "ignored"}]}}
            ]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_text(), Some("Available on: **Netflix**".to_string()));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        assert_eq!(response.into_text(), None);

        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert_eq!(response.into_text(), None);
    }
}
