//! HS256 JSON Web Token implementation of the token service port.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::User;
use crate::domain::ports::{IssuedToken, TokenClaims, TokenError, TokenService};

use super::secret::JwtSecret;

/// Signs and verifies HS256 access tokens.
///
/// Verification checks signature, issuer and expiry with no clock leeway.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Sign with `secret`, stamping `issuer_name` and expiring tokens after `ttl`.
    #[must_use]
    pub fn new(
        secret: &JwtSecret,
        issuer_name: impl Into<String>,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let issuer = issuer_name.into();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer,
            ttl,
            clock,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: &User) -> Result<IssuedToken, TokenError> {
        let now = self.clock.utc().timestamp();
        let ttl_secs = i64::try_from(self.ttl.as_secs())
            .map_err(|_| TokenError::issuance("token lifetime out of range"))?;

        let claims = TokenClaims {
            sub: user.email().to_string(),
            role: user.role(),
            iss: self.issuer.clone(),
            iat: now,
            exp: now.saturating_add(ttl_secs),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::issuance(err.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_in_secs: self.ttl.as_secs(),
        })
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::invalid(err.to_string()),
            })
    }
}
