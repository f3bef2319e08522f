/*
 * Responsibility
 * - User Store: lookup-by-login / create / update / delete / list
 * - Connection state transitions (authenticate / disconnect) happen under the entry lock,
 *   so a concurrent validate never observes a half-updated flag
 */
use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};

use crate::models::User;
use crate::repos::error::{RepoError, RepoResult};

/// Storage seam for user records.
///
/// Lookups return snapshots (clones); mutations of the connection flag go through
/// `authenticate` / `disconnect` so they are applied atomically per login.
#[async_trait]
pub trait UserRepo: Send + Sync + 'static {
    async fn find_by_login(&self, login: &str) -> RepoResult<User>;

    async fn list(&self) -> Vec<User>;

    // Fails with AlreadyExists when the login is taken.
    async fn create(&self, user: User) -> RepoResult<()>;

    // Replaces the record stored under `login`. Fails with NotFound when absent.
    async fn update(&self, login: &str, user: User) -> RepoResult<()>;

    async fn delete(&self, login: &str) -> RepoResult<()>;

    /// Check the password and mark the user connected.
    ///
    /// Returns the connected user snapshot.
    async fn authenticate(&self, login: &str, password: &str) -> RepoResult<User>;

    // Mark the user disconnected. Only fails when the login is unknown.
    async fn disconnect(&self, login: &str) -> RepoResult<()>;

    async fn is_connected(&self, login: &str) -> RepoResult<bool>;
}

/// Process-local store. DashMap locks per shard, so different users do not
/// serialize behind a single store-wide lock.
#[derive(Debug, Default)]
pub struct InMemoryUserRepo {
    users: DashMap<String, User>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn find_by_login(&self, login: &str) -> RepoResult<User> {
        self.users
            .get(login)
            .map(|u| u.value().clone())
            .ok_or_else(|| RepoError::NotFound(login.to_string()))
    }

    async fn list(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by(|a, b| a.login().cmp(b.login()));
        users
    }

    async fn create(&self, user: User) -> RepoResult<()> {
        match self.users.entry(user.login().to_string()) {
            Entry::Occupied(e) => Err(RepoError::AlreadyExists(e.key().clone())),
            Entry::Vacant(e) => {
                e.insert(user);
                Ok(())
            }
        }
    }

    async fn update(&self, login: &str, user: User) -> RepoResult<()> {
        let mut entry = self
            .users
            .get_mut(login)
            .ok_or_else(|| RepoError::NotFound(login.to_string()))?;
        *entry = user;
        Ok(())
    }

    async fn delete(&self, login: &str) -> RepoResult<()> {
        self.users
            .remove(login)
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound(login.to_string()))
    }

    async fn authenticate(&self, login: &str, password: &str) -> RepoResult<User> {
        let mut entry = self
            .users
            .get_mut(login)
            .ok_or_else(|| RepoError::NotFound(login.to_string()))?;
        entry.authenticate(password)?;
        Ok(entry.value().clone())
    }

    async fn disconnect(&self, login: &str) -> RepoResult<()> {
        let mut entry = self
            .users
            .get_mut(login)
            .ok_or_else(|| RepoError::NotFound(login.to_string()))?;
        entry.disconnect();
        Ok(())
    }

    async fn is_connected(&self, login: &str) -> RepoResult<bool> {
        self.users
            .get(login)
            .map(|u| u.is_connected())
            .ok_or_else(|| RepoError::NotFound(login.to_string()))
    }
}
