//! Authentication inputs: signup registrations and login credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.
//! Plaintext passwords live in [`Zeroizing`] buffers and are wiped on drop.

use std::collections::HashSet;
use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, FullName, Role, UserValidationError};

/// Maximum accepted plaintext password length, in characters.
pub const PASSWORD_MAX: usize = 128;

fn check_password(password: &str) -> Result<(), PasswordRule> {
    if password.is_empty() {
        return Err(PasswordRule::Empty);
    }
    if password.chars().count() > PASSWORD_MAX {
        return Err(PasswordRule::TooLong);
    }
    Ok(())
}

enum PasswordRule {
    Empty,
    TooLong,
}

/// Domain error returned when a signup payload is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Full name or email failed validation.
    User(UserValidationError),
    /// Password was blank.
    EmptyPassword,
    /// Password exceeded [`PASSWORD_MAX`].
    PasswordTooLong {
        /// Limit in characters.
        max: usize,
    },
}

impl RegistrationValidationError {
    /// Name of the request field the error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::User(err) => err.field(),
            Self::EmptyPassword | Self::PasswordTooLong { .. } => "password",
        }
    }

    /// Stable machine-readable code for the failure.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::User(err) => err.code(),
            Self::EmptyPassword => "empty_password",
            Self::PasswordTooLong { .. } => "password_too_long",
        }
    }
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(err) => err.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooLong { max } => {
                write!(f, "password must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

impl From<UserValidationError> for RegistrationValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::User(value)
    }
}

/// Validated signup request.
///
/// ## Invariants
/// - `full_name` and `email` satisfy the [`FullName`] and [`EmailAddress`]
///   rules.
/// - `password` is non-empty, at most [`PASSWORD_MAX`] characters, and keeps
///   caller-provided whitespace.
///
/// # Examples
/// ```
/// use authgate::domain::Registration;
///
/// let registration =
///     Registration::try_from_parts("Ann Example", "Ann@Example.com", "s3cret!").unwrap();
/// assert_eq!(registration.email().as_ref(), "ann@example.com");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    full_name: FullName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration from raw inputs.
    pub fn try_from_parts(
        raw_full_name: &str,
        raw_email: &str,
        password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let full_name = FullName::new(raw_full_name)?;
        let email = EmailAddress::new(raw_email)?;
        check_password(password).map_err(|rule| match rule {
            PasswordRule::Empty => RegistrationValidationError::EmptyPassword,
            PasswordRule::TooLong => {
                RegistrationValidationError::PasswordTooLong { max: PASSWORD_MAX }
            }
        })?;

        Ok(Self {
            full_name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Validated display name.
    #[must_use]
    pub const fn full_name(&self) -> &FullName {
        &self.full_name
    }

    /// Normalised login email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password supplied by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
    /// Password exceeded [`PASSWORD_MAX`].
    PasswordTooLong {
        /// Limit in characters.
        max: usize,
    },
}

impl LoginValidationError {
    /// Name of the request field the error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail => "email",
            Self::EmptyPassword | Self::PasswordTooLong { .. } => "password",
        }
    }

    /// Stable machine-readable code for the failure.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyEmail => "empty_email",
            Self::EmptyPassword => "empty_password",
            Self::PasswordTooLong { .. } => "password_too_long",
        }
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooLong { max } => {
                write!(f, "password must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// The email is only trimmed and lower-cased here. A malformed address is
/// not a validation error at login: it simply matches no account and fails
/// with the usual bad-credentials response.
///
/// # Examples
/// ```
/// use authgate::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ann@Example.com ", "password").unwrap();
/// assert_eq!(creds.email(), "ann@example.com");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalised = email.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        check_password(password).map_err(|rule| match rule {
            PasswordRule::Empty => LoginValidationError::EmptyPassword,
            PasswordRule::TooLong => LoginValidationError::PasswordTooLong { max: PASSWORD_MAX },
        })?;

        Ok(Self {
            email: normalised,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email suitable for user lookups.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Decides which role a newly registered user receives.
///
/// Emails listed as administrators get [`Role::Admin`]; everyone else gets
/// [`Role::User`].
#[derive(Debug, Clone, Default)]
pub struct RolePolicy {
    admins: HashSet<EmailAddress>,
}

impl RolePolicy {
    /// Build a policy from administrator email addresses.
    ///
    /// Invalid addresses are skipped and returned so the caller can log them.
    pub fn from_admin_emails<I, S>(emails: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut admins = HashSet::new();
        let mut rejected = Vec::new();
        for entry in emails {
            let raw = entry.as_ref();
            if raw.trim().is_empty() {
                continue;
            }
            match EmailAddress::new(raw) {
                Ok(email) => {
                    admins.insert(email);
                }
                Err(_) => rejected.push(raw.to_owned()),
            }
        }
        (Self { admins }, rejected)
    }

    /// Role granted to `email` on signup.
    #[must_use]
    pub fn role_for(&self, email: &EmailAddress) -> Role {
        if self.admins.contains(email) {
            Role::Admin
        } else {
            Role::User
        }
    }
}
