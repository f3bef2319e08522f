/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 */
use thiserror::Error;

use crate::models::AuthenticationError;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("user not found: {0}")]
    NotFound(String),
    #[error("user already exists: {0}")]
    AlreadyExists(String),
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),
}

pub type RepoResult<T> = Result<T, RepoError>;
