use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::client::ApiMessage;
use thiserror::Error;

/// Handler errors, rendered as `{ "message": "..." }`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No autorizado")]
    Unauthorized,

    #[error("Credenciales inválidas")]
    InvalidCredentials,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "request failed");
        (self.status(), Json(ApiMessage::new(self.to_string()))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
