pub mod login_payload;
pub mod origin;
pub mod principal;

pub use login_payload::LoginPayload;
pub use origin::RequestOrigin;
pub use principal::{Principal, PrincipalExtractor};
