use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Empty response from generation endpoint")]
    EmptyResponse,

    #[error("Failed to parse generation response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// User-facing failure raised at a service boundary
    #[error("{0}")]
    Fetch(String),
}

impl AppError {
    /// Replaces transport and parse failures with a call-site message.
    ///
    /// Configuration and input errors pass through untouched.
    pub fn into_user_facing(self, message: impl Into<String>) -> Self {
        match self {
            AppError::Configuration(_) | AppError::InvalidInput(_) | AppError::Fetch(_) => self,
            AppError::HttpClient(_)
            | AppError::ExternalApi(_)
            | AppError::EmptyResponse
            | AppError::Parse(_) => AppError::Fetch(message.into()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Configuration(_) => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            AppError::Fetch(msg) | AppError::ExternalApi(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::HttpClient(_) | AppError::EmptyResponse | AppError::Parse(_) => {
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_become_user_facing() {
        let err = AppError::ExternalApi("status 500".to_string()).into_user_facing("Failed to lookup info.");
        assert!(matches!(err, AppError::Fetch(ref msg) if msg == "Failed to lookup info."));

        let err = AppError::EmptyResponse.into_user_facing("Failed to lookup info.");
        assert_eq!(err.to_string(), "Failed to lookup info.");
    }

    #[test]
    fn test_parse_errors_become_user_facing() {
        let parse = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = AppError::from(parse).into_user_facing("Failed to fetch recommendations. Try again!");
        assert_eq!(err.to_string(), "Failed to fetch recommendations. Try again!");
    }

    #[test]
    fn test_configuration_error_is_preserved() {
        let err = AppError::Configuration("API key is missing".to_string())
            .into_user_facing("Failed to lookup info.");
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_status_codes() {
        let response = AppError::InvalidInput("empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::Configuration("missing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = AppError::Fetch("Failed to lookup info.".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
