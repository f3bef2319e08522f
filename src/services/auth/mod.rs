pub mod jwt;
pub mod token_service;

pub use jwt::TokenCodec;
pub use token_service::{TokenService, ValidationError, VerifiedToken};
