/*
 * Responsibility
 * - URL 構造を定義 (/login, /logout, /authenticate, /users)
 * - 認証/認可は middleware::auth で Router 全体に掛ける (ここでは handler の配線だけ)
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::handlers::{
    operations::{authenticate, login, logout},
    users::{create_user, delete_user, get_user, list_users, update_user},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/authenticate", get(authenticate))
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{login}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
