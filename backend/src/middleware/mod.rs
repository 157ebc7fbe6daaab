//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing and authentication.

pub mod security;
pub mod trace;

pub use security::{Access, SecurityConfig, SecurityConfigBuilder, SecurityFilter};
pub use trace::Trace;
