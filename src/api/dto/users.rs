/*
 * Responsibility
 * - Users の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 */
use serde::{Deserialize, Serialize};

use crate::models::{Species, User};

#[derive(Deserialize)]
pub struct UserRequest {
    pub login: String,
    pub password: String,
    pub species: Species,
    #[serde(default)]
    pub image: Option<String>,
}

impl UserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.login.trim().is_empty() {
            return Err("login is required");
        }
        if self.login.contains('/') {
            return Err("login must not contain '/'");
        }
        if self.password.is_empty() {
            return Err("password is required");
        }
        Ok(())
    }

    pub fn into_user(self) -> User {
        let user = User::new(self.login, self.password, self.species);
        match self.image.filter(|i| !i.trim().is_empty()) {
            Some(image) => user.with_image(image),
            None => user,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub login: String,
    pub species: Species,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            login: user.login().to_string(),
            species: user.species(),
            image: user.image().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub link: String,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<LinkResponse>,
}

pub fn user_location(login: &str) -> String {
    format!("users/{login}")
}
