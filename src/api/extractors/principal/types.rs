/*
 * Responsibility
 * - Handler から見える「認証済み主体」の型
 * - authentication middleware が検証して request extensions に格納し、
 *   authorization middleware / handler はこの型だけを受け取る
 */
use crate::models::Species;

/// Identity resolved from a valid token for the duration of one request.
///
/// Never persisted; recomputed on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub login: String,
    pub species: Species,
}

impl Principal {
    pub fn new(login: impl Into<String>, species: Species) -> Self {
        Self {
            login: login.into(),
            species,
        }
    }
}
