use crate::api::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;
use tracing::warn;

/// Constant-time comparison of the presented token with the configured one
fn token_matches(provided: &str, expected: &str) -> bool {
    // Length is not secret; only the content comparison needs to be constant-time
    provided.len() == expected.len() && bool::from(provided.as_bytes().ct_eq(expected.as_bytes()))
}

/// Reject requests whose `Authorization` header is not the shared secret
pub async fn require_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let rejection = match provided {
        Some(token) if token_matches(token, &state.token) => None,
        Some(_) => Some("invalid token"),
        None => Some("missing Authorization header"),
    };

    match rejection {
        None => Ok(next.run(request).await),
        Some(reason) => {
            warn!("Rejected {} {}: {}", request.method(), request.uri(), reason);
            Err(ApiError::Unauthorized)
        }
    }
}
