use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sentiment_types::ErrorResponse;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Every failure inside an operation surfaces as a single server-error category
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        // Alternate format keeps the whole context chain
        ApiError::Internal(format!("{:#}", err))
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}
