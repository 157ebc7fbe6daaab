//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL (Diesel) and in-memory user stores
//! - **crypto**: Argon2id password hashing
//! - **tokens**: HS256 JWT issuance/verification and signing-secret loading
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod crypto;
pub mod persistence;
pub mod tokens;
