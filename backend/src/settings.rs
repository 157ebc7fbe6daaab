//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `AUTHGATE_*` environment variables, and
//! configuration files, in that order of precedence. Secrets are not part of
//! these settings; see [`crate::outbound::tokens::jwt_secret_from_env`].

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
const DEFAULT_TOKEN_ISSUER: &str = "authgate";

/// Build mode used to pick strict or lenient configuration policies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate missing secrets and emit warnings.
    Debug,
    /// Release builds require explicit, valid secrets.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use authgate::settings::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode.is_debug(), cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub const fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    /// Whether this is a debug build.
    #[must_use]
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not a socket address.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        /// Configured value, as given.
        value: String,
        /// Parser failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// The token lifetime was configured as zero seconds.
    #[error("token lifetime must be greater than zero seconds")]
    ZeroTokenTtl,
}

/// Service settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "AUTHGATE")]
pub struct AppSettings {
    /// Socket address to listen on.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: String,
    /// PostgreSQL connection URL. When unset, users are kept in memory.
    pub database_url: Option<String>,
    /// Email addresses granted the admin role on signup. The environment
    /// form is comma separated.
    #[serde(default, deserialize_with = "one_or_many")]
    #[ortho_config(default = Vec::new(), merge_strategy = "append")]
    pub admin_emails: Vec<String>,
    /// Access token lifetime in seconds.
    #[ortho_config(default = DEFAULT_TOKEN_TTL_SECS)]
    pub token_ttl_secs: u64,
    /// Value of the `iss` claim in issued tokens.
    #[ortho_config(default = DEFAULT_TOKEN_ISSUER.to_owned())]
    pub token_issuer: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Accept a list or a single (possibly comma-separated) string.
///
/// A lone environment value without a comma reaches serde as a plain string.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(raw) => raw.split(',').map(str::to_owned).collect(),
        OneOrMany::Many(values) => values,
    })
}

impl AppSettings {
    /// Parsed listen address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] for unparsable values.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .trim()
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: self.bind_addr.clone(),
                source,
            })
    }

    /// Database URL, ignoring blank values.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Administrator emails, trimmed, blanks removed.
    #[must_use]
    pub fn admin_emails(&self) -> Vec<String> {
        self.admin_emails
            .iter()
            .map(|email| email.trim())
            .filter(|email| !email.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Access token lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTokenTtl`] when configured as zero.
    pub fn token_ttl(&self) -> Result<Duration, SettingsError> {
        match self.token_ttl_secs {
            0 => Err(SettingsError::ZeroTokenTtl),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Issuer stamped into every token.
    #[must_use]
    pub fn token_issuer(&self) -> &str {
        &self.token_issuer
    }
}
