//! Token codec: issue and parse signed user tokens.
//!
//! - HS512 with a single process-wide secret, generated once at startup and never persisted.
//! - Claims bind the token to the login, its species and the browser origin it was issued for.
//! - Parsing fails closed: every verification problem surfaces as a `TokenError`.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::models::Species;

/// Fixed `iss` claim for every token minted by this service.
pub const TOKEN_ISSUER: &str = "user-gate";

const SECRET_LEN: usize = 64;

/// Longest accepted token lifetime (one year).
pub const MAX_TTL_SECONDS: u64 = 60 * 60 * 24 * 365;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("malformed token")]
    Malformed,
    #[error("token expired")]
    Expired,
    #[error("failed to generate signing key")]
    KeyGeneration,
    #[error("token expiry does not fit in a timestamp")]
    ExpiryOutOfRange,
    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Malformed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    pub species: Species,
    pub origin: String,
}

/// HS512 signer/verifier.
///
/// - Key material is intentionally not printable via Debug.
/// - Immutable after construction; share it behind an `Arc` and read concurrently.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenCodec")
            .field("validation", &self.validation)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenCodec {
    /// Build a codec around a fresh random secret.
    pub fn generate(ttl_seconds: u64, leeway_seconds: u64) -> Result<Self, TokenError> {
        let mut secret = [0u8; SECRET_LEN];
        getrandom::fill(&mut secret).map_err(|e| {
            error!(error = %e, "failed to gather entropy for the token secret");
            TokenError::KeyGeneration
        })?;

        Ok(Self::from_secret(&secret, ttl_seconds, leeway_seconds))
    }

    pub fn from_secret(secret: &[u8], ttl_seconds: u64, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iat", "iss", "sub"]);
        validation.leeway = leeway_seconds;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_seconds,
        }
    }

    /// Issue a token for `login`, bound to `origin`.
    pub fn issue(&self, login: &str, species: Species, origin: &str) -> Result<String, TokenError> {
        self.issue_at(login, species, origin, chrono::Utc::now().timestamp())
    }

    fn issue_at(
        &self,
        login: &str,
        species: Species,
        origin: &str,
        issued_at: i64,
    ) -> Result<String, TokenError> {
        let exp = i64::try_from(self.ttl_seconds)
            .ok()
            .and_then(|ttl| issued_at.checked_add(ttl))
            .ok_or_else(|| {
                error!(ttl_seconds = self.ttl_seconds, "token lifetime overflows the expiry claim");
                TokenError::ExpiryOutOfRange
            })?;

        let claims = UserClaims {
            sub: login.to_string(),
            iss: TOKEN_ISSUER.to_string(),
            iat: issued_at,
            exp,
            jti: Uuid::new_v4().to_string(),
            species,
            origin: origin.to_string(),
        };

        let mut header = Header::new(Algorithm::HS512);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            TokenError::Signing(e)
        })
    }

    /// Verify signature, issuer and expiry, then return the claims.
    pub fn parse(&self, token: &str) -> Result<UserClaims, TokenError> {
        let data = jsonwebtoken::decode::<UserClaims>(token, &self.decoding_key, &self.validation)?;

        // `sub` is the lookup key for the connection flag; an empty one can never match a user
        if data.claims.sub.trim().is_empty() {
            return Err(TokenError::Malformed);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "http://localhost:8080";

    fn codec() -> TokenCodec {
        TokenCodec::generate(3600, 0).unwrap()
    }

    #[test]
    fn issued_token_parses_back_to_its_claims() {
        let codec = codec();
        let token = codec.issue("alice", Species::Thief, ORIGIN).unwrap();

        let claims = codec.parse(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.species, Species::Thief);
        assert_eq!(claims.origin, ORIGIN);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn expiry_is_issued_at_plus_ttl() {
        let codec = TokenCodec::generate(120, 0).unwrap();
        let claims = codec
            .parse(&codec.issue("alice", Species::Police, ORIGIN).unwrap())
            .unwrap();
        assert_eq!(claims.exp - claims.iat, 120);
    }

    #[test]
    fn token_from_another_key_has_invalid_signature() {
        let token = codec().issue("alice", Species::Thief, ORIGIN).unwrap();
        assert!(matches!(
            codec().parse(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        let codec = codec();
        for raw in ["", "not-a-token", "a.b.c", "Bearer x.y.z"] {
            assert!(
                matches!(codec.parse(raw), Err(TokenError::Malformed)),
                "{raw:?} should be malformed"
            );
        }
    }

    #[test]
    fn token_past_its_expiry_is_expired() {
        let codec = TokenCodec::from_secret(b"fixed-secret-for-tests", 60, 0);
        let issued_at = chrono::Utc::now().timestamp() - 600;
        let token = codec
            .issue_at("alice", Species::Thief, ORIGIN, issued_at)
            .unwrap();

        assert!(matches!(codec.parse(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn leeway_tolerates_recent_expiry() {
        let codec = TokenCodec::from_secret(b"fixed-secret-for-tests", 60, 300);
        let issued_at = chrono::Utc::now().timestamp() - 120;
        let token = codec
            .issue_at("alice", Species::Thief, ORIGIN, issued_at)
            .unwrap();

        assert!(codec.parse(&token).is_ok());
    }

    #[test]
    fn oversized_lifetime_is_refused_instead_of_wrapping() {
        for ttl in [i64::MAX as u64, u64::MAX] {
            let codec = TokenCodec::from_secret(b"fixed-secret-for-tests", ttl, 0);
            assert!(matches!(
                codec.issue("alice", Species::Thief, ORIGIN),
                Err(TokenError::ExpiryOutOfRange)
            ));
        }
    }

    #[test]
    fn longest_accepted_lifetime_issues_a_live_token() {
        let codec = TokenCodec::from_secret(b"fixed-secret-for-tests", MAX_TTL_SECONDS, 0);
        let claims = codec
            .parse(&codec.issue("alice", Species::Thief, ORIGIN).unwrap())
            .unwrap();
        assert_eq!(claims.exp - claims.iat, MAX_TTL_SECONDS as i64);
    }

    #[test]
    fn debug_does_not_expose_key_material() {
        let printed = format!("{:?}", TokenCodec::from_secret(b"super-secret", 60, 0));
        assert!(!printed.contains("super-secret"));
    }
}
