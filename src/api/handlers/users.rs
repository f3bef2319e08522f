/*
 * Responsibility
 * - /users 系 CRUD handler
 * - Path/Json を extractor で受け、DTO validation → repo 呼び出し
 * - 所有者チェックは authorization middleware 側の責務 (ここでは行わない)
 */
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    api::dto::users::{LinkResponse, UserRequest, UserResponse, UsersResponse, user_location},
    error::AppError,
    repos::RepoError,
    state::AppState,
};

fn created(login: &str) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(&user_location(login))
        .map_err(|_| AppError::invalid_request("login cannot be used in a URL"))?;
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
}

pub async fn list_users(State(state): State<AppState>) -> Json<UsersResponse> {
    let users = state
        .users
        .list()
        .await
        .iter()
        .map(|u| LinkResponse {
            link: user_location(u.login()),
        })
        .collect();

    Json(UsersResponse { users })
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<UserRequest>,
) -> Result<Response, AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    let user = req.into_user();
    let login = user.login().to_string();
    // Check the Location value before touching the store
    let response = created(&login)?;
    state.users.create(user).await?;

    tracing::info!(login = %login, "user created");
    Ok(response)
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(login): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.users.find_by_login(&login).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// Create-or-replace. 201 when the login did not exist, 204 when replaced.
///
/// Replacing a record resets its connection flag, so a credential change
/// revokes every live token of that user.
pub async fn update_user(
    State(state): State<AppState>,
    Path(login): Path<String>,
    Json(req): Json<UserRequest>,
) -> Result<Response, AppError> {
    req.validate().map_err(AppError::invalid_request)?;
    if req.login != login {
        return Err(AppError::invalid_request("login cannot be changed"));
    }

    let user = req.into_user();
    match state.users.update(&login, user.clone()).await {
        Ok(()) => {
            tracing::info!(login = %login, "user replaced");
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        Err(RepoError::NotFound(_)) => {
            let response = created(&login)?;
            state.users.create(user).await?;
            tracing::info!(login = %login, "user created");
            Ok(response)
        }
        Err(e) => Err(e.into()),
    }
}

/// Always 204, whether or not the user existed.
pub async fn delete_user(State(state): State<AppState>, Path(login): Path<String>) -> StatusCode {
    if let Err(e) = state.users.delete(&login).await {
        tracing::debug!(login = %login, error = %e, "delete ignored");
    }
    StatusCode::NO_CONTENT
}
