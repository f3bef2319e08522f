/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, CORS 許可、Token 設定など)
 * - 設定値のバリデーション (不正なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::services::auth::jwt::MAX_TTL_SECONDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    // Fixed prefix every route lives under ("" or "/segment")
    pub base_path: String,

    // Token lifetime and expiry tolerance (seconds)
    pub token_ttl_seconds: u64,
    pub token_leeway_seconds: u64,

    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,

    // Seeded `admin` account; no admin is created when unset
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins =
            parse_origin_list(&std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        let base_path = normalize_base_path(&std::env::var("BASE_PATH").unwrap_or_default())
            .ok_or(ConfigError::Invalid("BASE_PATH"))?;

        let token_ttl_seconds =
            parse_token_ttl(std::env::var("TOKEN_TTL_SECONDS").ok().as_deref())?;

        let token_leeway_seconds = std::env::var("TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let request_timeout = Duration::from_secs(
            std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(30),
        );

        let request_body_limit_bytes = std::env::var("REQUEST_BODY_LIMIT_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        let admin_password = match std::env::var("ADMIN_PASSWORD") {
            Ok(v) if !v.is_empty() => Some(v),
            _ if app_env.is_production() => return Err(ConfigError::Missing("ADMIN_PASSWORD")),
            _ => Some("admin".to_string()),
        };

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            base_path,
            token_ttl_seconds,
            token_leeway_seconds,
            request_timeout,
            request_body_limit_bytes,
            admin_password,
        })
    }
}

// unset -> 1 hour; zero, garbage and anything above MAX_TTL_SECONDS fail startup
fn parse_token_ttl(raw: Option<&str>) -> Result<u64, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(3600);
    };
    match raw.parse::<u64>() {
        Ok(ttl) if (1..=MAX_TTL_SECONDS).contains(&ttl) => Ok(ttl),
        _ => Err(ConfigError::Invalid("TOKEN_TTL_SECONDS")),
    }
}

fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// "" | "/" -> "", "/api/" -> "/api"; anything not starting with '/' is rejected
fn normalize_base_path(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "/" {
        return Some(String::new());
    }
    if !trimmed.starts_with('/') || trimmed.contains("//") {
        return None;
    }
    Some(trimmed.trim_end_matches('/').to_string())
}
