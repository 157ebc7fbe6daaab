//! Declarative access rules for the security filter.
//!
//! A [`SecurityConfig`] is built once at startup and shared by `Arc` with
//! every worker. Rules are evaluated in insertion order and the first
//! matching pattern decides the [`Access`] level.

use crate::domain::Role;

/// Access level required by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No authentication required.
    Public,
    /// Any verified principal.
    Authenticated,
    /// A verified principal holding the role. Administrators satisfy every
    /// role.
    Role(Role),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathPattern {
    Exact(String),
    /// `/base/**`: the base path itself and everything beneath it.
    Prefix(String),
}

impl PathPattern {
    fn parse(pattern: &str) -> Self {
        match pattern.strip_suffix("/**") {
            Some(base) => Self::Prefix(base.to_owned()),
            None => Self::Exact(pattern.to_owned()),
        }
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(exact) => path == exact,
            Self::Prefix(base) => path
                .strip_prefix(base.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Rule {
    pattern: PathPattern,
    access: Access,
}

/// Immutable, ordered rule list.
///
/// # Examples
/// ```
/// use authgate::domain::Role;
/// use authgate::middleware::{Access, SecurityConfig};
///
/// let config = SecurityConfig::builder()
///     .rule("/public/**", Access::Public)
///     .rule("/admin", Access::Role(Role::Admin))
///     .build();
/// assert_eq!(config.access_for("/public/a/b"), Access::Public);
/// assert_eq!(config.access_for("/admin"), Access::Role(Role::Admin));
/// assert_eq!(config.access_for("/elsewhere"), Access::Authenticated);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityConfig {
    rules: Vec<Rule>,
    default_access: Access,
}

impl SecurityConfig {
    /// Start an empty rule list.
    #[must_use]
    pub fn builder() -> SecurityConfigBuilder {
        SecurityConfigBuilder::default()
    }

    /// Rules protecting the `/api/v1` surface and the documentation routes.
    #[must_use]
    pub fn api_defaults() -> Self {
        Self::builder()
            .rule("/api/v1/auth/**", Access::Public)
            .rule("/api/v1/users/me", Access::Authenticated)
            .rule("/api/v1/users", Access::Role(Role::Admin))
            .rule("/docs/**", Access::Public)
            .rule("/api-docs/**", Access::Public)
            .build()
    }

    /// Access level for `path`; unmatched paths get the default level.
    #[must_use]
    pub fn access_for(&self, path: &str) -> Access {
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(path))
            .map_or(self.default_access, |rule| rule.access)
    }
}

/// Builder for [`SecurityConfig`]. Unmatched paths default to
/// [`Access::Authenticated`].
#[derive(Debug)]
pub struct SecurityConfigBuilder {
    rules: Vec<Rule>,
    default_access: Access,
}

impl Default for SecurityConfigBuilder {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            default_access: Access::Authenticated,
        }
    }
}

impl SecurityConfigBuilder {
    /// Append a rule. `pattern` is an exact path or a `/**` prefix.
    #[must_use]
    pub fn rule(mut self, pattern: &str, access: Access) -> Self {
        self.rules.push(Rule {
            pattern: PathPattern::parse(pattern),
            access,
        });
        self
    }

    /// Access level for paths no rule matches.
    #[must_use]
    pub const fn default_access(mut self, access: Access) -> Self {
        self.default_access = access;
        self
    }

    /// Freeze the rules.
    #[must_use]
    pub fn build(self) -> SecurityConfig {
        SecurityConfig {
            rules: self.rules,
            default_access: self.default_access,
        }
    }
}
