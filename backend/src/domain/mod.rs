//! Domain primitives, ports, and use-case services.
//!
//! Purpose: keep authentication rules transport agnostic. Inbound adapters
//! (HTTP) call the driving ports declared in [`ports`]; outbound adapters
//! (persistence, hashing, tokens) implement the driven ports.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`User`], [`NewUser`], [`Role`] and their validated components.
//! - [`Registration`] / [`LoginCredentials`]: validated use-case inputs.
//! - [`AuthenticationServiceImpl`], [`RepositoryCredentialVerifier`],
//!   [`TokenPrincipalResolver`], [`UserDirectoryService`]: use-case services.

pub mod auth;
mod authentication_service;
mod credential_verifier;
pub mod error;
pub mod ports;
mod token_principal_resolver;
pub mod trace_id;
pub mod user;
mod user_directory;

pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MAX, Registration,
    RegistrationValidationError, RolePolicy,
};
pub use self::authentication_service::AuthenticationServiceImpl;
pub use self::credential_verifier::{BAD_CREDENTIALS, RepositoryCredentialVerifier};
pub use self::error::{Error, ErrorCode};
pub use self::token_principal_resolver::{
    EXPIRED_TOKEN, INVALID_TOKEN, TokenPrincipalResolver, UNKNOWN_SUBJECT,
};
pub use self::trace_id::TraceId;
pub use self::user::{
    EmailAddress, FullName, NewUser, PasswordHash, Role, User, UserId, UserValidationError,
};
pub use self::user_directory::UserDirectoryService;

/// HTTP header carrying the request-scoped trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
