pub mod user;

pub use user::{AuthenticationError, Species, User};
