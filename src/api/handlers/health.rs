/*
 * Responsibility
 * - GET /health (疎通用)
 * - gate の外側にマウントする (認証不要)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
