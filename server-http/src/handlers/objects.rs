use crate::api::{ApiError, ListObjectsResponse};
use crate::state::AppState;
use axum::{
    extract::{rejection::BytesRejection, Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use bytes::Bytes;
use shared::{TtlError, TtlMs};
use tracing::info;

/// Optional per-upload TTL override, in milliseconds
pub const DELETE_AFTER_HEADER: &str = "x-delete-after";

/// POST /objects/{key}
pub async fn upload_object(
    State(state): State<AppState>,
    Path(key): Path<String>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, ApiError> {
    info!("POST: key={}", key);

    let payload = body.map_err(|rejection| match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge,
        _ => ApiError::BodyRead(rejection.body_text()),
    })?;
    let ttl = delete_after(&headers)?;

    state.store.put(key, payload, ttl).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /objects/{key}
pub async fn get_object(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Bytes, ApiError> {
    info!("GET: key={}", key);

    Ok(state.store.get(&key).await?)
}

/// GET /objects
pub async fn list_objects(
    State(state): State<AppState>,
) -> Result<Json<ListObjectsResponse>, ApiError> {
    info!("LIST");

    let list = state.store.list().await?;
    Ok(Json(ListObjectsResponse(list.indexed())))
}

/// An absent or empty header means "use the default TTL"
fn delete_after(headers: &HeaderMap) -> Result<Option<TtlMs>, TtlError> {
    let Some(value) = headers.get(DELETE_AFTER_HEADER) else {
        return Ok(None);
    };
    let raw = value
        .to_str()
        .map_err(|_| TtlError::Malformed(String::from_utf8_lossy(value.as_bytes()).into()))?;

    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(DELETE_AFTER_HEADER, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_delete_after_absent_or_empty() {
        assert_eq!(delete_after(&HeaderMap::new()), Ok(None));
        assert_eq!(delete_after(&headers_with("")), Ok(None));
    }

    #[test]
    fn test_delete_after_parses_integer() {
        assert_eq!(delete_after(&headers_with("400")), Ok(Some(TtlMs(400))));
    }

    #[test]
    fn test_delete_after_rejects_garbage() {
        assert!(matches!(
            delete_after(&headers_with("4s")),
            Err(TtlError::Malformed(_))
        ));
    }
}
