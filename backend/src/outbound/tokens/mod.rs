//! Bearer token adapters.

mod jwt_token_service;
mod secret;

pub use jwt_token_service::JwtTokenService;
pub use secret::{JwtSecret, JwtSecretError, jwt_secret_from_env};
