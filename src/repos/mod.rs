pub mod error;
pub mod user_repo;

pub use error::{RepoError, RepoResult};
pub use user_repo::{InMemoryUserRepo, UserRepo};
