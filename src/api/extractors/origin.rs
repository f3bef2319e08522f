/*
 * Responsibility
 * - `Origin: scheme://host[:port]` ヘッダを必須として受け取る (login など)
 * - 値はそのまま (正規化しない) 保持する: token の origin claim と完全一致で比較するため
 */
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use url::Url;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct RequestOrigin(pub String);

impl<S> FromRequestParts<S> for RequestOrigin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(header::ORIGIN)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::invalid_request("Origin header is required"))?;

        if !is_serialized_origin(raw) {
            return Err(AppError::invalid_request("Origin header is not a valid origin"));
        }

        Ok(Self(raw.to_string()))
    }
}

// Accepts `http(s)://host[:port]` with nothing after the authority
fn is_serialized_origin(raw: &str) -> bool {
    let Ok(url) = Url::parse(raw) else {
        return false;
    };
    matches!(url.scheme(), "http" | "https")
        && url.host_str().is_some()
        && url.path() == "/"
        && !raw.ends_with('/')
        && url.query().is_none()
        && url.fragment().is_none()
        && url.username().is_empty()
}
