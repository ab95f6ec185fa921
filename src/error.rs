use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Request rate limit exceeded, please try again later")]
    RateLimitExceeded,

    #[error("An error occurred while generating speech, please check the API key and try again")]
    SynthesisFailed,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Failed to save the generated audio, please try again")]
    IoError(#[from] std::io::Error),
}

/// Failure of the remote speech call. Never shown to the caller.
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, code) = match &self {
            AppError::RateLimitExceeded => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT_EXCEEDED"),
            AppError::SynthesisFailed => (StatusCode::BAD_GATEWAY, "SYNTHESIS_FAILED"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::IoError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        };

        match &self {
            AppError::IoError(e) => tracing::error!("Request failed: {} - {}", code, e),
            _ => tracing::error!("Request failed: {} - {}", code, message),
        }

        (
            status,
            Json(ErrorResponse {
                error: message,
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_maps_to_429() {
        let response = AppError::RateLimitExceeded.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn io_failure_hides_os_detail() {
        use http_body_util::BodyExt;

        let err = AppError::from(std::io::Error::new(
            std::io::ErrorKind::Other,
            "File name too long (os error 36)",
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "IO_ERROR");
        assert!(!body["error"].as_str().unwrap().contains("os error"));
    }

    #[test]
    fn synthesis_failure_message_is_generic() {
        let message = AppError::SynthesisFailed.to_string();
        assert!(message.contains("try again"));
        assert_eq!(
            AppError::SynthesisFailed.into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
