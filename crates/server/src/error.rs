//! Unified API error type.
//!
//! Every handler returns `Result<T, ApiError>`, which implements
//! [`IntoResponse`] so errors become the JSON failure envelope
//! `{"success": false, "error": CODE, "message": ...}`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_advisor_core::{AnalysisError, ChatError, ErrorCode};
use serde::Serialize;
use thiserror::Error;

/// All errors that can occur in the request lifecycle.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The chat orchestrator failed.
    #[error(transparent)]
    Chat(#[from] ChatError),

    /// The analysis extractor failed.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// The caller sent an invalid or malformed request.
    #[error("{0}")]
    InvalidInput(String),

    /// The request carried no bearer token.
    #[error("Access token is required")]
    TokenRequired,

    /// The bearer token failed verification.
    #[error("Invalid or expired token")]
    InvalidToken,
}

impl ApiError {
    /// The machine-readable code sent to the client.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Chat(err) => err.code().into(),
            ApiError::Analysis(err) => err.code().into(),
            ApiError::InvalidInput(_) => ErrorCode::InvalidInput.into(),
            ApiError::TokenRequired => "TOKEN_REQUIRED",
            ApiError::InvalidToken => "INVALID_TOKEN",
        }
    }

    /// The HTTP status sent to the client.
    pub fn status(&self) -> StatusCode {
        let code = match self {
            ApiError::Chat(err) => err.code(),
            ApiError::Analysis(err) => err.code(),
            ApiError::InvalidInput(_) => ErrorCode::InvalidInput,
            ApiError::TokenRequired => return StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken => return StatusCode::FORBIDDEN,
        };
        match code {
            ErrorCode::MessageRequired | ErrorCode::InvalidInput => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::ChatFailed => StatusCode::BAD_GATEWAY,
            ErrorCode::AnalysisNotFound => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::AnalysisFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.code(), error = %self, "request failed");
        } else {
            debug!(code = self.code(), error = %self, "request rejected");
        }

        let body = ErrorBody {
            success: false,
            error: self.code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use color_advisor_model::ErrorKind;

    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = ApiError::from(ChatError::Failed {
            kind: ErrorKind::Unavailable,
            message: "Service unavailable".to_owned(),
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.code(), "CHAT_FAILED");
        assert_eq!(err.to_string(), "Service unavailable");

        let err = ApiError::from(AnalysisError::NotFound);
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code(), "ANALYSIS_NOT_FOUND");

        assert_eq!(
            ApiError::from(ChatError::MessageRequired).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::TokenRequired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidToken.status(), StatusCode::FORBIDDEN);
    }
}
