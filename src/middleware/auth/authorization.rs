//! Authorization stage: owner-only resources.
//!
//! Runs after authentication. Without a principal the request came through a public
//! entry and this stage has nothing to decide. With one, owner-only paths require the
//! principal's login to equal the path id; everything else passes untouched.

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    middleware::Next,
    response::Response,
};

use crate::api::extractors::Principal;
use crate::error::AppError;
use crate::middleware::auth::GatePolicy;
use crate::state::AppState;

pub fn authorize(
    policy: &GatePolicy,
    principal: Option<&Principal>,
    method: &Method,
    path: &str,
) -> Result<(), AppError> {
    let Some(principal) = principal else {
        return Ok(());
    };

    match policy.owned_id(method, path) {
        Some(owner) if owner.as_ref() != principal.login.as_str() => {
            tracing::warn!(
                login = %principal.login,
                species = ?principal.species,
                %method,
                path,
                "access to another user's resource"
            );
            Err(AppError::Forbidden)
        }
        _ => Ok(()),
    }
}

pub(super) async fn authorization_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    authorize(
        &state.gate,
        req.extensions().get::<Principal>(),
        req.method(),
        req.uri().path(),
    )?;

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Species;

    fn alice() -> Principal {
        Principal::new("alice", Species::Thief)
    }

    #[test]
    fn owner_may_read_and_replace_own_record() {
        let policy = GatePolicy::new("");
        assert!(authorize(&policy, Some(&alice()), &Method::GET, "/users/alice").is_ok());
        assert!(authorize(&policy, Some(&alice()), &Method::PUT, "/users/alice").is_ok());
    }

    #[test]
    fn other_users_record_is_forbidden() {
        let policy = GatePolicy::new("");
        for method in [Method::GET, Method::PUT] {
            assert!(matches!(
                authorize(&policy, Some(&alice()), &method, "/users/bob"),
                Err(AppError::Forbidden)
            ));
        }
    }

    #[test]
    fn listing_never_triggers_ownership() {
        let policy = GatePolicy::new("");
        let bob = Principal::new("bob", Species::Police);
        for principal in [Some(&bob), Some(&alice()), None] {
            assert!(authorize(&policy, principal, &Method::GET, "/users").is_ok());
        }
    }

    #[test]
    fn head_is_checked_like_get() {
        let policy = GatePolicy::new("");
        assert!(matches!(
            authorize(&policy, Some(&alice()), &Method::HEAD, "/users/bob"),
            Err(AppError::Forbidden)
        ));
        assert!(authorize(&policy, Some(&alice()), &Method::HEAD, "/users/alice").is_ok());
    }

    #[test]
    fn owner_is_compared_after_percent_decoding() {
        let policy = GatePolicy::new("");
        let jose = Principal::new("josé", Species::Police);
        assert!(authorize(&policy, Some(&jose), &Method::GET, "/users/jos%C3%A9").is_ok());
        assert!(authorize(&policy, Some(&jose), &Method::PUT, "/users/jos%C3%A9").is_ok());
        assert!(matches!(
            authorize(&policy, Some(&alice()), &Method::GET, "/users/jos%C3%A9"),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn unmatched_patterns_pass_through() {
        let policy = GatePolicy::new("");
        assert!(authorize(&policy, Some(&alice()), &Method::DELETE, "/users/bob").is_ok());
        assert!(authorize(&policy, Some(&alice()), &Method::POST, "/logout").is_ok());
        assert!(authorize(&policy, Some(&alice()), &Method::GET, "/posts/bob").is_ok());
    }

    #[test]
    fn no_principal_is_a_no_op() {
        let policy = GatePolicy::new("");
        assert!(authorize(&policy, None, &Method::PUT, "/users/bob").is_ok());
    }

    #[test]
    fn ownership_applies_below_base_path() {
        let policy = GatePolicy::new("/api");
        assert!(matches!(
            authorize(&policy, Some(&alice()), &Method::GET, "/api/users/bob"),
            Err(AppError::Forbidden)
        ));
        assert!(authorize(&policy, Some(&alice()), &Method::GET, "/api/users/alice").is_ok());
    }
}
