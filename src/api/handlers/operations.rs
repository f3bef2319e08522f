/*
 * Responsibility
 * - POST /login, POST /logout, GET /authenticate
 * - Connection state transitions go through TokenService (login sets, logout clears)
 */
use axum::{
    extract::{Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    api::{
        dto::login::AuthenticateQuery,
        extractors::{LoginPayload, PrincipalExtractor, RequestOrigin},
    },
    error::AppError,
    state::AppState,
};

/// 204 + `Authorization: Bearer <token>` on success.
pub async fn login(
    State(state): State<AppState>,
    RequestOrigin(origin): RequestOrigin,
    LoginPayload(req): LoginPayload,
) -> Result<Response, AppError> {
    let token = state.tokens.login(&req.login, &req.password, &origin).await?;

    let bearer = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
        tracing::error!(error = %e, "issued token is not a valid header value");
        AppError::Internal
    })?;

    Ok((StatusCode::NO_CONTENT, [(header::AUTHORIZATION, bearer)]).into_response())
}

/// Always 204. The principal was resolved by the authentication middleware.
pub async fn logout(
    State(state): State<AppState>,
    PrincipalExtractor(principal): PrincipalExtractor,
) -> StatusCode {
    state.tokens.logout(&principal.login).await;
    StatusCode::NO_CONTENT
}

/// Out-of-band check used by the edge process: 204 valid / 400 missing params / 401 invalid.
pub async fn authenticate(
    State(state): State<AppState>,
    Query(query): Query<AuthenticateQuery>,
) -> Result<StatusCode, AppError> {
    let (jwt, origin) = query.required().map_err(AppError::invalid_request)?;

    if state.tokens.validate(jwt, origin).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Unauthorized)
    }
}
