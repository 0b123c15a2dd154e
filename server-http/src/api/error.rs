use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::{Error, TtlError};

/// Every way a request can fail, each mapped to exactly one status code
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid token")]
    Unauthorized,
    #[error(transparent)]
    Store(#[from] Error),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("failed to read request body: {0}")]
    BodyRead(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Store(Error::EmptyPayload | Error::InvalidTtl(_)) => StatusCode::BAD_REQUEST,
            ApiError::Store(Error::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Store(Error::Config(_) | Error::Internal(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::BodyRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Store(Error::InvalidTtl(TtlError::Malformed(_))) => {
                "X-Delete-After should be an integer".to_string()
            }
            ApiError::Store(Error::InvalidTtl(TtlError::OutOfRange { min, max, .. })) => {
                format!("X-Delete-After must be within ({}, {})", min, max)
            }
            other => other.to_string(),
        }
    }
}

impl From<TtlError> for ApiError {
    fn from(err: TtlError) -> Self {
        ApiError::Store(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, self.message()).into_response()
    }
}
