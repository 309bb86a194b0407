/// Text-generation provider abstraction
///
/// Providers take a composed prompt, perform exactly one call to a hosted
/// generation endpoint and hand back the raw response text. Decoding that
/// text into typed values is left to the services, so a provider never
/// needs to know which shape a caller expects.
use serde_json::Value;

use crate::error::AppResult;

pub mod gemini;

pub use gemini::GeminiProvider;

/// Settings injected into a provider at construction
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Credential for the endpoint; `None` fails every request before any I/O
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
}

/// One prompt, optionally constrained to a JSON output schema
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    /// Request for unstructured text
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: None,
        }
    }

    /// Request for JSON conforming to `schema`
    pub fn json(prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: Some(schema),
        }
    }
}

/// Trait for text-generation providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Fails with a configuration error when no credential was injected.
    ///
    /// Performs no I/O, so services call it before deciding whether a
    /// network call is needed at all.
    fn ensure_configured(&self) -> AppResult<()>;

    /// Sends the request and returns the response text.
    ///
    /// `Ok(None)` means the endpoint answered but produced no text.
    async fn generate(&self, request: &GenerationRequest) -> AppResult<Option<String>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
