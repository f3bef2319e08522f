/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - users: UserRepo (connection flags live here), tokens: TokenService, gate: GatePolicy
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - Built once at startup; tests build a fresh one (new key, new store) per case
 */
use std::sync::Arc;

use crate::middleware::auth::GatePolicy;
use crate::repos::UserRepo;
use crate::services::auth::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepo>,
    pub tokens: Arc<TokenService>,
    pub gate: Arc<GatePolicy>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepo>, tokens: Arc<TokenService>, gate: Arc<GatePolicy>) -> Self {
        Self {
            users,
            tokens,
            gate,
        }
    }
}
