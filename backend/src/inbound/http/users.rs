//! Account API handlers.
//!
//! ```text
//! POST   /api/v1/users        {"email":"ada@example.com","password":"pw","name":"Ada Lovelace"}
//! POST   /api/v1/users/token  {"email":"ada@example.com","password":"pw"}
//! GET    /api/v1/users/me
//! PATCH  /api/v1/users/me     {"name":"Augusta Ada"}
//! DELETE /api/v1/users/me
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{ProfileChanges, Registration};
use crate::domain::{Email, Error, LoginCredentials, Password, User, UserName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    EMAIL, NAME, PASSWORD, map_credentials_error, map_user_validation_error, require,
};

/// Registration body for `POST /api/v1/users`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        let email = Email::new(require(value.email, EMAIL)?)
            .map_err(|err| map_user_validation_error(EMAIL, err))?;
        let password = Password::new(&require(value.password, PASSWORD)?)
            .map_err(map_credentials_error)?;
        let name = UserName::new(require(value.name, NAME)?)
            .map_err(|err| map_user_validation_error(NAME, err))?;
        Ok(Self {
            email,
            password,
            name,
        })
    }
}

/// Credential exchange body for `POST /api/v1/users/token`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TokenRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

/// API token returned by `POST /api/v1/users/token`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TokenResponse {
    #[schema(example = "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b")]
    pub token: String,
}

/// Profile changes accepted by `PATCH /api/v1/users/me`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[schema(example = "Augusta Ada")]
    pub name: Option<String>,
    pub password: Option<String>,
}

impl TryFrom<UpdateProfileRequest> for ProfileChanges {
    type Error = Error;

    fn try_from(value: UpdateProfileRequest) -> Result<Self, Self::Error> {
        let name = value
            .name
            .map(UserName::new)
            .transpose()
            .map_err(|err| map_user_validation_error(NAME, err))?;
        let password = value
            .password
            .as_deref()
            .map(Password::new)
            .transpose()
            .map_err(map_credentials_error)?;
        Ok(Self { name, password })
    }
}

/// Public view of an account. Password hashes never leave the domain.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            name: user.name().to_string(),
        }
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(payload.into_inner())?;
    let user = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Exchange email and password for the account's API token.
#[utoipa::path(
    post,
    path = "/api/v1/users/token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "issueToken",
    security([])
)]
#[post("/users/token")]
pub async fn issue_token(
    state: web::Data<HttpState>,
    payload: web::Json<TokenRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let TokenRequest { email, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&email, &password).map_err(map_credentials_error)?;
    let token = state.accounts.issue_token(&credentials).await?;
    Ok(web::Json(TokenResponse {
        token: token.as_str().to_owned(),
    }))
}

/// Current account profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Profile", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    auth: Authenticated,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.accounts.profile(auth.user().id()).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Update the current account's name and/or password.
#[utoipa::path(
    patch,
    path = "/api/v1/users/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateCurrentUser"
)]
#[patch("/users/me")]
pub async fn update_current_user(
    state: web::Data<HttpState>,
    auth: Authenticated,
    payload: web::Json<UpdateProfileRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let changes = ProfileChanges::try_from(payload.into_inner())?;
    let user = state
        .accounts
        .update_profile(auth.user().id(), changes)
        .await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Delete the current account together with its events.
#[utoipa::path(
    delete,
    path = "/api/v1/users/me",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteCurrentUser"
)]
#[delete("/users/me")]
pub async fn delete_current_user(
    state: web::Data<HttpState>,
    auth: Authenticated,
) -> ApiResult<HttpResponse> {
    state.accounts.delete_account(auth.user().id()).await?;
    Ok(HttpResponse::NoContent().finish())
}
