//! Authentication stage: Bearer token (+ Origin) 検証 → Principal を extensions に入れる
//!
//! Per request, in order:
//! 1. preflight (`OPTIONS`) -> answered 200 here, never reaches the handler
//! 2. public (method, path) entry -> pass without a principal
//! 3. otherwise `Authorization: Bearer <jwt>` must validate against the request `Origin`
//!    (signature + expiry + connected user + exact origin); anything else is 401

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Method, Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::extractors::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// Outcome of the authentication stage for one request.
#[derive(Debug, PartialEq, Eq)]
pub enum Admission {
    Preflight,
    Public,
    Authenticated(Principal),
}

// Method inspection only; no lock, no store access
pub fn is_preflight(method: &Method) -> bool {
    method == Method::OPTIONS
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub async fn admit(
    state: &AppState,
    method: &Method,
    path: &str,
    headers: &HeaderMap,
) -> Result<Admission, AppError> {
    if is_preflight(method) {
        return Ok(Admission::Preflight);
    }

    if state.gate.is_public(method, path) {
        return Ok(Admission::Public);
    }

    let Some(token) = bearer_token(headers) else {
        tracing::debug!(%method, path, "missing bearer token");
        return Err(AppError::Unauthorized);
    };

    let Some(origin) = headers.get(header::ORIGIN).and_then(|v| v.to_str().ok()) else {
        tracing::warn!(%method, path, "bearer token presented without Origin");
        return Err(AppError::Unauthorized);
    };

    match state.tokens.verify(token, origin).await {
        Ok(verified) => Ok(Admission::Authenticated(Principal::new(
            verified.login,
            verified.species,
        ))),
        Err(err) => {
            tracing::warn!(error = %err, %method, path, "access token rejected");
            Err(AppError::Unauthorized)
        }
    }
}

pub(super) async fn authentication_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let admission = admit(&state, req.method(), req.uri().path(), req.headers()).await?;

    match admission {
        Admission::Preflight => Ok(StatusCode::OK.into_response()),
        Admission::Public => Ok(next.run(req).await),
        Admission::Authenticated(principal) => {
            // middleware → authorization stage / extractor への受け渡し
            req.extensions_mut().insert(principal);
            Ok(next.run(req).await)
        }
    }
}
