/*
 * Responsibility
 * - Config読み込み → 依存生成 (signing key / store / seed users) → Router 組み立て
 * - Middleware の適用 (auth gate → CORS → http)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{self, handlers::health::health};
use crate::config::Config;
use crate::middleware::{self, auth::GatePolicy};
use crate::models::{Species, User};
use crate::repos::{InMemoryUserRepo, UserRepo};
use crate::services::auth::{TokenCodec, TokenService};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,user_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: fail fast / production: keep serving
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("loading configuration")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {} (base path {:?})",
        config.app_env,
        config.addr,
        config.base_path
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    axum::serve(listener, app).await.context("serving")?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let repo = Arc::new(InMemoryUserRepo::new());
    seed_users(repo.as_ref(), config).await?;
    let users: Arc<dyn UserRepo> = repo;

    // Fresh key per process: restarting invalidates every token issued before.
    let codec = TokenCodec::generate(config.token_ttl_seconds, config.token_leeway_seconds)
        .context("generating token signing key")?;
    let tokens = Arc::new(TokenService::new(codec, users.clone()));
    let gate = Arc::new(GatePolicy::new(config.base_path.clone()));

    Ok(AppState::new(users, tokens, gate))
}

async fn seed_users(repo: &dyn UserRepo, config: &Config) -> Result<()> {
    if let Some(password) = &config.admin_password {
        repo.create(User::new("admin", password.clone(), Species::Admin))
            .await?;
    }

    // Demo accounts (password = login); never in production
    if !config.app_env.is_production() {
        for (login, species, image) in [
            ("a", Species::Thief, "user-a.png"),
            ("b", Species::Thief, "user-b.png"),
            ("c", Species::Police, "user-c.png"),
            ("d", Species::Police, "user-d.png"),
        ] {
            repo.create(User::new(login, login, species).with_image(image))
                .await?;
        }
    }

    tracing::info!(users = repo.list().await.len(), "user store seeded");
    Ok(())
}

fn build_router(state: AppState, config: &Config) -> Router {
    let api = if config.base_path.is_empty() {
        api::routes()
    } else {
        Router::new().nest(&config.base_path, api::routes())
    };

    // Gate wraps the full paths (base path included); /health stays outside it
    let router = middleware::auth::apply(api, state.clone())
        .route("/health", get(health))
        .with_state(state);

    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}
