/*
 * Responsibility
 * - 認証 gate (authentication → authorization) を Router 全体に掛ける
 * - 順序: preflight → public allow-list → Bearer + Origin 検証 → owner-only check → handler
 */
use axum::{Router, middleware::from_fn_with_state};

use crate::state::AppState;

pub mod authentication;
pub mod authorization;
mod policy;

pub use policy::GatePolicy;

use authentication::authentication_middleware;
use authorization::authorization_middleware;

/// Wrap every route of `router` in the gate.
///
/// The last layer added runs first, so authentication sees the request before
/// authorization does.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router
        .layer(from_fn_with_state(state.clone(), authorization_middleware))
        .layer(from_fn_with_state(state, authentication_middleware))
}
