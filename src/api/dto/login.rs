use serde::Deserialize;

/// Credentials submitted to `POST /login` (JSON or form body).
#[derive(Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.login.trim().is_empty() {
            return Err("login is required");
        }
        if self.password.is_empty() {
            return Err("password is required");
        }
        Ok(())
    }
}

/// Query of `GET /authenticate`. Both fields are required and non-empty;
/// they are optional here so that a missing one is reported as 400, not as a
/// generic extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct AuthenticateQuery {
    #[serde(default)]
    pub jwt: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
}

impl AuthenticateQuery {
    pub fn required(&self) -> Result<(&str, &str), &'static str> {
        match (self.jwt.as_deref(), self.origin.as_deref()) {
            (Some(jwt), Some(origin)) if !jwt.is_empty() && !origin.is_empty() => {
                Ok((jwt, origin))
            }
            _ => Err("jwt and origin are required"),
        }
    }
}
