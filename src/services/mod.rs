pub mod auth;
pub mod url_matcher;
