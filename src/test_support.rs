//! Fixtures shared by unit and end-to-end tests: a fresh signing key and a fresh
//! store for every state.

use std::sync::Arc;

use crate::middleware::auth::GatePolicy;
use crate::models::{Species, User};
use crate::repos::{InMemoryUserRepo, UserRepo};
use crate::services::auth::{TokenCodec, TokenService};
use crate::state::AppState;

pub const ORIGIN: &str = "http://localhost:8080";
pub const OTHER_ORIGIN: &str = "http://attacker.example";

pub async fn state_with(base_path: &str, users: &[(&str, &str, Species)]) -> AppState {
    let repo = Arc::new(InMemoryUserRepo::new());
    for (login, password, species) in users {
        repo.create(User::new(*login, *password, *species))
            .await
            .expect("seed user");
    }
    let users: Arc<dyn UserRepo> = repo;

    let codec = TokenCodec::generate(3600, 0).expect("token codec");
    let tokens = Arc::new(TokenService::new(codec, users.clone()));
    let gate = Arc::new(GatePolicy::new(base_path));

    AppState::new(users, tokens, gate)
}

/// alice (VOLEUR, "pw-alice") and bob (POLICIER, "pw-bob").
pub async fn demo_state() -> AppState {
    state_with(
        "",
        &[
            ("alice", "pw-alice", Species::Thief),
            ("bob", "pw-bob", Species::Police),
        ],
    )
    .await
}
