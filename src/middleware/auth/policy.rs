//! Gate policy: which requests may skip authentication, and which are owner-only.
//!
//! The public list is the only perimeter defense. It is an explicit, enumerable list of
//! (method, path) entries; adding an unauthenticated endpoint means adding an entry here.

use std::borrow::Cow;

use axum::http::Method;

use crate::services::url_matcher::{UrlMatcher, UrlPattern};

#[derive(Debug, Clone)]
pub struct GatePolicy {
    matcher: UrlMatcher,
    public_routes: Vec<UrlPattern>,
    owner_only: Vec<UrlPattern>,
}

/// Unauthenticated operations.
fn default_public_routes() -> Vec<UrlPattern> {
    vec![
        // list all users
        UrlPattern::collection(Method::GET, "users"),
        // delete by id
        UrlPattern::item(Method::DELETE, "users"),
        // submit login
        UrlPattern::collection(Method::POST, "login"),
        // out-of-band token check
        UrlPattern::collection(Method::GET, "authenticate"),
    ]
}

/// Single-user resources restricted to the user they name.
fn default_owner_only() -> Vec<UrlPattern> {
    vec![
        UrlPattern::item(Method::GET, "users"),
        UrlPattern::item(Method::PUT, "users"),
    ]
}

impl GatePolicy {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self::with_rules(base_path, default_public_routes(), default_owner_only())
    }

    pub fn with_rules(
        base_path: impl Into<String>,
        public_routes: Vec<UrlPattern>,
        owner_only: Vec<UrlPattern>,
    ) -> Self {
        Self {
            matcher: UrlMatcher::new(base_path),
            public_routes,
            owner_only,
        }
    }

    pub fn is_public(&self, method: &Method, path: &str) -> bool {
        self.public_routes
            .iter()
            .any(|p| self.matcher.matches(method, path, p))
    }

    /// When `method path` is owner-only, the (percent-decoded) login the principal must own.
    pub fn owned_id<'a>(&self, method: &Method, path: &'a str) -> Option<Cow<'a, str>> {
        let parts = self.matcher.decompose(path)?;
        self.owner_only
            .iter()
            .any(|p| UrlMatcher::matches_parts(method, &parts, p))
            .then(|| parts.decoded_id())
            .flatten()
    }
}
