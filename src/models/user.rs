/*
 * Responsibility
 * - User entity (login / password / species / connection flag)
 * - The connection flag is the only server-side revocation handle for issued tokens:
 *   it is true only between a successful authenticate() and the next disconnect()
 */
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role tag carried by every user (and copied into the `species` token claim).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Species {
    Admin,
    #[serde(rename = "VOLEUR")]
    Thief,
    #[serde(rename = "POLICIER")]
    Police,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("erroneous password")]
pub struct AuthenticationError;

#[derive(Clone)]
pub struct User {
    login: String,
    password: String,
    species: Species,
    // Avatar file name shown on the game map
    image: Option<String>,
    connected: bool,
}

impl User {
    /// New users always start disconnected.
    pub fn new(login: impl Into<String>, password: impl Into<String>, species: Species) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
            species,
            image: None,
            connected: false,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn authenticate(&mut self, password: &str) -> Result<(), AuthenticationError> {
        if self.password != password {
            return Err(AuthenticationError);
        }
        self.connected = true;
        Ok(())
    }

    pub fn disconnect(&mut self) {
        self.connected = false;
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the password
        f.debug_struct("User")
            .field("login", &self.login)
            .field("species", &self.species)
            .field("image", &self.image)
            .field("connected", &self.connected)
            .finish()
    }
}
