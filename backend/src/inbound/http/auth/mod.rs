//! Signup and login handlers.
//!
//! ```text
//! POST /api/v1/auth/signup {"fullName":"Ann","email":"ann@example.com","password":"s3cret!"}
//! POST /api/v1/auth/login {"email":"ann@example.com","password":"s3cret!"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::domain::ports::TokenError;
use crate::domain::{
    Error, LoginCredentials, LoginValidationError, Registration, RegistrationValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::failure::ProblemDetail;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserResponse;

/// Signup request body for `POST /api/v1/auth/signup`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Display name.
    #[schema(example = "Ann Example")]
    pub full_name: String,
    /// Login email; must be unique.
    #[schema(example = "ann@example.com")]
    pub email: String,
    /// Plaintext password, hashed before storage.
    #[schema(example = "s3cret!")]
    pub password: String,
}

impl TryFrom<SignupRequest> for Registration {
    type Error = RegistrationValidationError;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.full_name, &value.email, &value.password)
    }
}

/// Login request body for `POST /api/v1/auth/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login email.
    #[schema(example = "ann@example.com")]
    pub email: String,
    /// Plaintext password.
    #[schema(example = "s3cret!")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Bearer token returned by a successful login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Signed access token.
    pub token: String,
    /// Token lifetime in seconds.
    #[schema(example = 3600)]
    pub expires_in: u64,
}

fn validation_error(message: String, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

fn map_signup_validation_error(err: RegistrationValidationError) -> Error {
    validation_error(err.to_string(), err.field(), err.code())
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    validation_error(err.to_string(), err.field(), err.code())
}

fn map_token_error(err: TokenError) -> Error {
    error!(error = %err, "token issuance failed");
    Error::internal("token could not be issued")
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 503, description = "User store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let registration =
        Registration::try_from(payload.into_inner()).map_err(map_signup_validation_error)?;
    let user = state.auth.signup(&registration).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Exchange credentials for a bearer token.
///
/// Failed logins return the entry-point body with `detail = "Bad credentials"`
/// whether the email is unknown or the password is wrong.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = ProblemDetail),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user = state.auth.authenticate(&credentials).await?;
    let issued = state.tokens.issue(&user).map_err(map_token_error)?;
    info!(user_id = %user.id(), "login succeeded");
    Ok(web::Json(LoginResponse {
        token: issued.token,
        expires_in: issued.expires_in_secs,
    }))
}
