//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod failure;
pub mod principal;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
