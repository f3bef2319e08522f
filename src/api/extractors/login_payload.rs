/*
 * Responsibility
 * - POST /login の body を JSON / form-urlencoded のどちらでも受け付ける
 * - Content-Type で分岐し、失敗時は 400 (AppError::InvalidRequest)
 */
use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header,
};

use crate::api::dto::login::LoginRequest;
use crate::error::AppError;

pub struct LoginPayload(pub LoginRequest);

impl<S> FromRequest<S> for LoginPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        let dto = if is_form {
            let Form(dto) = Form::<LoginRequest>::from_request(req, state)
                .await
                .map_err(|_| AppError::invalid_request("invalid login form"))?;
            dto
        } else {
            let Json(dto) = Json::<LoginRequest>::from_request(req, state)
                .await
                .map_err(|_| AppError::invalid_request("invalid login body"))?;
            dto
        };

        dto.validate().map_err(AppError::invalid_request)?;
        Ok(Self(dto))
    }
}
