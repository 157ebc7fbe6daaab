//! Loading the JWT signing secret from the environment.
//!
//! Sources, first match wins:
//! 1. `JWT_SECRET_FILE`: path to a file holding the secret (trailing
//!    newlines are ignored).
//! 2. `JWT_SECRET`: the secret itself.
//!
//! Release builds require at least [`JWT_SECRET_MIN_LEN`] bytes and refuse
//! ephemeral secrets. Debug builds, or `JWT_ALLOW_EPHEMERAL=1` outside
//! release, fall back to a random per-process secret with a warning; tokens
//! signed with it stop verifying after a restart.

use std::fmt;
use std::path::PathBuf;

use mockable::Env;
use rand::RngCore;
use tracing::warn;
use zeroize::Zeroizing;

use crate::settings::BuildMode;

const SECRET_FILE_ENV: &str = "JWT_SECRET_FILE";
const SECRET_ENV: &str = "JWT_SECRET";
const ALLOW_EPHEMERAL_ENV: &str = "JWT_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const EPHEMERAL_LEN: usize = 64;

/// Minimum secret length accepted in release builds.
pub const JWT_SECRET_MIN_LEN: usize = 32;

/// HMAC signing secret. Wiped on drop; `Debug` is redacted.
#[derive(Clone)]
pub struct JwtSecret(Zeroizing<Vec<u8>>);

impl JwtSecret {
    /// Wrap raw secret bytes.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    fn generate() -> Self {
        let mut bytes = vec![0_u8; EPHEMERAL_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self::from_bytes(bytes)
    }

    /// Secret bytes, for key derivation.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// Secret length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the secret has no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JwtSecret(<{} bytes redacted>)", self.len())
    }
}

/// Errors raised while loading the signing secret.
#[derive(thiserror::Error, Debug)]
pub enum JwtSecretError {
    /// No secret source is configured and ephemeral secrets are not allowed.
    #[error("no JWT secret configured; set {SECRET_FILE_ENV} or {SECRET_ENV}")]
    Missing,
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
        /// Accepted spellings.
        expected: &'static str,
    },
    /// Reading the secret file failed.
    #[error("failed to read JWT secret at {path}: {source}")]
    SecretRead {
        /// Secret file path.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configured secret is too short for release builds.
    #[error("JWT secret too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        /// Secret length in bytes.
        length: usize,
        /// Required minimum.
        min_len: usize,
    },
    /// Release builds must not allow ephemeral secrets.
    #[error("JWT_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Load the signing secret from `env` following the policy for `mode`.
///
/// # Examples
///
/// ```rust
/// use authgate::outbound::tokens::jwt_secret_from_env;
/// use authgate::settings::BuildMode;
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "JWT_SECRET" => Some("0123456789abcdef0123456789abcdef".to_owned()),
///     _ => None,
/// });
///
/// let secret = jwt_secret_from_env(&env, BuildMode::Release).unwrap();
/// assert_eq!(secret.len(), 32);
/// ```
///
/// # Errors
///
/// Returns [`JwtSecretError`] when the configured secret is unreadable, too
/// short for a release build, or absent without an allowed fallback.
pub fn jwt_secret_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<JwtSecret, JwtSecretError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;

    let configured = match env.string(SECRET_FILE_ENV) {
        Some(path) => read_secret_file(PathBuf::from(path), mode, allow_ephemeral)?,
        None => env
            .string(SECRET_ENV)
            .filter(|value| !value.is_empty())
            .map(|value| JwtSecret::from_bytes(value.into_bytes())),
    };

    match configured {
        Some(secret) => check_length(secret, mode),
        None if mode.is_debug() || allow_ephemeral => {
            warn!("no JWT secret configured; using temporary secret (dev only)");
            Ok(JwtSecret::generate())
        }
        None => Err(JwtSecretError::Missing),
    }
}

fn read_secret_file(
    path: PathBuf,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Option<JwtSecret>, JwtSecretError> {
    match std::fs::read(&path) {
        Ok(contents) => {
            let mut bytes = Zeroizing::new(contents);
            while bytes.last().is_some_and(|b| *b == b'\n' || *b == b'\r') {
                bytes.pop();
            }
            Ok(Some(JwtSecret::from_bytes(bytes.to_vec())))
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "JWT secret file unreadable; falling back"
            );
            Ok(None)
        }
        Err(error) => Err(JwtSecretError::SecretRead {
            path,
            source: error,
        }),
    }
}

fn check_length(secret: JwtSecret, mode: BuildMode) -> Result<JwtSecret, JwtSecretError> {
    let length = secret.len();
    if length >= JWT_SECRET_MIN_LEN {
        return Ok(secret);
    }
    if mode.is_debug() {
        warn!(length, min_len = JWT_SECRET_MIN_LEN, "JWT secret shorter than recommended");
        return Ok(secret);
    }
    Err(JwtSecretError::SecretTooShort {
        length,
        min_len: JWT_SECRET_MIN_LEN,
    })
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, JwtSecretError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return Ok(false);
    };
    match parse_bool(&value) {
        Some(true) if mode.is_debug() => Ok(true),
        Some(true) => Err(JwtSecretError::EphemeralNotAllowed),
        Some(false) => Ok(false),
        None if mode.is_debug() => {
            warn!(value = %value, "invalid JWT_ALLOW_EPHEMERAL; defaulting to disabled");
            Ok(false)
        }
        None => Err(JwtSecretError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
