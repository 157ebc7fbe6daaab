//! Port for issuing and verifying bearer tokens.

use serde::{Deserialize, Serialize};

use crate::domain::{Role, User};

/// Errors raised by token adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The token was well formed but its expiry has passed.
    #[error("token has expired")]
    Expired,
    /// Signature, issuer, or structure checks failed.
    #[error("token is invalid: {message}")]
    Invalid {
        /// Adapter-supplied detail.
        message: String,
    },
    /// A token could not be produced.
    #[error("token issuance failed: {message}")]
    Issuance {
        /// Adapter-supplied detail.
        message: String,
    },
}

impl TokenError {
    /// Verification failure with `message`.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Signing failure with `message`.
    pub fn issuance(message: impl Into<String>) -> Self {
        Self::Issuance {
            message: message.into(),
        }
    }
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user's email address.
    pub sub: String,
    /// Role granted when the token was issued.
    pub role: Role,
    /// Issuer; must match the configured issuer on verification.
    pub iss: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Unique token identifier.
    pub jti: String,
}

/// A freshly signed access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWS encoding.
    pub token: String,
    /// Seconds until the token expires.
    pub expires_in_secs: u64,
}

/// Issues signed tokens for authenticated users and verifies presented ones.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign a token for `user`.
    fn issue(&self, user: &User) -> Result<IssuedToken, TokenError>;

    /// Verify a presented token and return its claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
