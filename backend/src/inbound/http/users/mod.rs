//! Users API handlers.
//!
//! ```text
//! GET /api/v1/users/me
//! GET /api/v1/users
//! ```

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, Role, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::failure::{ACCESS_DENIED, ProblemDetail};
use crate::inbound::http::principal::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Public view of a registered user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Stable user identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
    /// Display name.
    #[schema(example = "Ann Example")]
    pub full_name: String,
    /// Login email.
    #[schema(example = "ann@example.com")]
    pub email: String,
    /// Granted role.
    pub role: Role,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            full_name: user.full_name().to_string(),
            email: user.email().to_string(),
            role: user.role(),
            created_at: user.created_at(),
        }
    }
}

/// Return the authenticated caller.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ProblemDetail),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser",
    security(("bearer" = []))
)]
#[get("/users/me")]
pub async fn current_user(principal: AuthenticatedUser) -> web::Json<UserResponse> {
    web::Json(UserResponse::from(&*principal))
}

/// List registered users. Administrators only.
///
/// Checks the admin role itself in addition to the security filter's rule.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use authgate::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 401, description = "Missing or invalid token", body = ProblemDetail),
        (status = 403, description = "Caller is not an administrator", body = ProblemDetail),
        (status = 503, description = "User store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security(("bearer" = []))
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    principal: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    if !principal.role().satisfies(Role::Admin) {
        return Err(Error::forbidden(ACCESS_DENIED));
    }
    let users = state.users.list_users(&principal.id()).await?;
    Ok(web::Json(users.iter().map(UserResponse::from).collect()))
}

#[cfg(test)]
mod tests;
