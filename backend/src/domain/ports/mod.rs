//! Domain ports and supporting types for the hexagonal boundary.

mod authentication;
mod credential_verifier;
mod password_hasher;
mod principal_resolver;
mod token_service;
mod user_repository;
mod users_query;

pub use authentication::AuthenticationService;
#[cfg(test)]
pub use authentication::MockAuthenticationService;
pub use credential_verifier::CredentialVerifier;
#[cfg(test)]
pub use credential_verifier::MockCredentialVerifier;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use principal_resolver::MockPrincipalResolver;
pub use principal_resolver::PrincipalResolver;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{IssuedToken, TokenClaims, TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
