//! Test helpers for inbound HTTP components.

#![expect(
    clippy::expect_used,
    reason = "fixtures are built from literals and fail loudly"
)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::domain::ports::{MockAuthenticationService, MockTokenService, MockUsersQuery};
use crate::domain::{EmailAddress, FullName, NewUser, PasswordHash, Role, User, UserId};
use crate::inbound::http::state::HttpState;

/// Identifier shared by every fixture user.
pub const ANN_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Build a persisted user with a deterministic id and timestamp.
pub fn persisted_user(full_name: &str, email: &str, role: Role) -> User {
    let created_at = Utc
        .with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
        .single()
        .expect("valid timestamp");
    User::from_new(
        UserId::new(ANN_ID).expect("valid id"),
        NewUser {
            full_name: FullName::new(full_name).expect("valid name"),
            email: EmailAddress::new(email).expect("valid email"),
            password_hash: PasswordHash::from_encoded("$argon2id$v=19$stub"),
            role,
        },
        created_at,
    )
}

/// Regular user fixture.
pub fn ann() -> User {
    persisted_user("Ann", "ann@example.com", Role::User)
}

/// Wrap mocks into handler state.
pub fn mock_state(
    auth: MockAuthenticationService,
    tokens: MockTokenService,
    users: MockUsersQuery,
) -> HttpState {
    HttpState::new(Arc::new(auth), Arc::new(tokens), Arc::new(users))
}
