use std::sync::Arc;

use tracing::{debug, info};

use crate::error::AppError;
use crate::models::Species;
use crate::repos::{RepoError, UserRepo};
use crate::services::auth::jwt::{TokenCodec, TokenError};

/// Why a presented token was refused. Callers only ever turn this into a 401;
/// the variants exist for logging.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("token subject is not a known user")]
    UnknownUser,
    #[error("user is not connected")]
    Disconnected,
    #[error("token origin does not match request origin")]
    OriginMismatch,
}

/// Service-level view of a token that passed every check.
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    pub login: String,
    pub species: Species,
}

/// Ties the token codec to the connection state held in the user store.
///
/// - `login` flips the connection flag on and mints a token.
/// - `logout` flips it off, which revokes every token of that user at once.
/// - `validate` requires signature + expiry + connected user + exact origin.
#[derive(Clone)]
pub struct TokenService {
    codec: TokenCodec,
    users: Arc<dyn UserRepo>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("codec", &self.codec)
            .finish()
    }
}

impl TokenService {
    pub fn new(codec: TokenCodec, users: Arc<dyn UserRepo>) -> Self {
        Self { codec, users }
    }

    /// Authenticate `login` with `password` and issue a token bound to `origin`.
    ///
    /// Unknown login -> NotFound, wrong password -> Unauthorized.
    pub async fn login(&self, login: &str, password: &str, origin: &str) -> Result<String, AppError> {
        let user = self.users.authenticate(login, password).await.map_err(|e| {
            debug!(login = %login, error = %e, "login refused");
            AppError::from(e)
        })?;

        let token = self.codec.issue(user.login(), user.species(), origin)?;
        info!(login = %login, origin = %origin, "user connected");
        Ok(token)
    }

    /// Disconnect `login`. Never fails from the caller's point of view.
    pub async fn logout(&self, login: &str) {
        match self.users.disconnect(login).await {
            Ok(()) => info!(login = %login, "user disconnected"),
            Err(e) => debug!(login = %login, error = %e, "logout ignored"),
        }
    }

    /// Full check of a presented token against the origin of the request carrying it.
    pub async fn verify(&self, token: &str, origin: &str) -> Result<VerifiedToken, ValidationError> {
        let claims = self.codec.parse(token)?;

        let connected = match self.users.is_connected(&claims.sub).await {
            Ok(connected) => connected,
            Err(RepoError::NotFound(_)) => return Err(ValidationError::UnknownUser),
            Err(e) => {
                debug!(error = %e, "connection lookup failed");
                return Err(ValidationError::UnknownUser);
            }
        };
        if !connected {
            return Err(ValidationError::Disconnected);
        }

        if claims.origin != origin {
            return Err(ValidationError::OriginMismatch);
        }

        Ok(VerifiedToken {
            login: claims.sub,
            species: claims.species,
        })
    }

    /// `verify` without the reason; rejections are logged at debug.
    pub async fn validate(&self, token: &str, origin: &str) -> bool {
        match self.verify(token, origin).await {
            Ok(_) => true,
            Err(err) => {
                debug!(error = %err, "token rejected");
                false
            }
        }
    }
}
