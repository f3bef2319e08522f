/*
 * Responsibility
 * - Request path -> [resource, id, ...] decomposition (below the fixed base path)
 * - (method, resource, id) pattern matching; HEAD matches like GET (axum routes it to the GET handler)
 * - Ids are compared percent-decoded, the way the `Path` extractor hands them to handlers
 * - Decides *which* requests a policy applies to; it never grants or denies by itself
 */
use std::borrow::Cow;

use axum::http::Method;
use percent_encoding::percent_decode_str;

/// Id segment expectation of a [`UrlPattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdPattern {
    /// The path must stop at the resource (`/users`).
    Absent,
    /// Any non-empty id segment (`/users/{id}`).
    Any,
    /// Exactly this id segment.
    Exact(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPattern {
    pub method: Method,
    pub resource: &'static str,
    pub id: IdPattern,
}

impl UrlPattern {
    pub fn collection(method: Method, resource: &'static str) -> Self {
        Self {
            method,
            resource,
            id: IdPattern::Absent,
        }
    }

    pub fn item(method: Method, resource: &'static str) -> Self {
        Self {
            method,
            resource,
            id: IdPattern::Any,
        }
    }
}

/// Path segments below the base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts<'a> {
    segments: Vec<&'a str>,
}

impl<'a> UrlParts<'a> {
    pub fn resource(&self) -> Option<&'a str> {
        self.segments.first().copied()
    }

    pub fn id(&self) -> Option<&'a str> {
        self.segments.get(1).copied()
    }

    /// Id segment after percent-decoding. Invalid UTF-8 is left encoded.
    pub fn decoded_id(&self) -> Option<Cow<'a, str>> {
        self.id().map(|raw| {
            percent_decode_str(raw)
                .decode_utf8()
                .unwrap_or(Cow::Borrowed(raw))
        })
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }
}

#[derive(Debug, Clone, Default)]
pub struct UrlMatcher {
    base_path: String,
}

impl UrlMatcher {
    /// `base_path` is either empty or `/segment[/segment...]` without a trailing slash.
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Split `path` into segments after the base path.
    ///
    /// Empty segments are kept (`/users/` -> `["users", ""]`) so that a trailing
    /// slash never turns an item path into a collection path.
    /// Returns `None` when `path` is not below the base path.
    pub fn decompose<'a>(&self, path: &'a str) -> Option<UrlParts<'a>> {
        let rest = path.strip_prefix(self.base_path.as_str())?;
        let rest = rest.strip_prefix('/')?;
        Some(UrlParts {
            segments: rest.split('/').collect(),
        })
    }

    pub fn matches(&self, method: &Method, path: &str, pattern: &UrlPattern) -> bool {
        self.decompose(path)
            .is_some_and(|parts| Self::matches_parts(method, &parts, pattern))
    }

    pub fn matches_parts(method: &Method, parts: &UrlParts<'_>, pattern: &UrlPattern) -> bool {
        let method = if *method == Method::HEAD {
            &Method::GET
        } else {
            method
        };
        if *method != pattern.method || parts.resource() != Some(pattern.resource) {
            return false;
        }

        match (&pattern.id, parts.segments().len()) {
            (IdPattern::Absent, 1) => true,
            (IdPattern::Any, 2) => parts.id().is_some_and(|id| !id.is_empty()),
            (IdPattern::Exact(expected), 2) => {
                parts.decoded_id().as_deref() == Some(expected.as_str())
            }
            _ => false,
        }
    }
}
