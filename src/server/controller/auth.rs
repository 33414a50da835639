use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        user::{LoginDto, RegisterDto, UserDto},
    },
    server::{
        controller::util::get_user::require_user,
        error::Error,
        model::{app::AppState, session::user::SessionUser},
        service::auth::{user_dto, AuthService},
    },
};

pub static AUTH_TAG: &str = "auth";

#[derive(Deserialize, IntoParams)]
pub struct VerifyParams {
    /// One-time token from the verification email
    pub token: String,
}

/// Register a student account
///
/// Creates an unverified student with their profile and emails a verification link.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Student registered, verification email sent", body = UserDto),
        (status = 400, description = "Invalid registration details", body = ErrorDto),
        (status = 409, description = "Email or roll number already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, Error> {
    let user = AuthService::new(&state.db)
        .register(payload, state.mailer.as_ref(), &state.app_url)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = UserDto),
        (status = 401, description = "Invalid credentials or email not verified", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    let user = AuthService::new(&state.db).login(&session, payload).await?;

    Ok((StatusCode::OK, Json(user)))
}

/// Verify an email address with the token from the verification email
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    tag = AUTH_TAG,
    params(VerifyParams),
    responses(
        (status = 200, description = "Email verified", body = UserDto),
        (status = 400, description = "Verification link expired", body = ErrorDto),
        (status = 404, description = "Unknown verification link", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_email(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Result<impl IntoResponse, Error> {
    let user = AuthService::new(&state.db)
        .verify_email(params.token.trim())
        .await?;

    Ok((StatusCode::OK, Json(user)))
}

/// Log the user out by clearing their session
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Logged out"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, Error> {
    let maybe_user = SessionUser::get(&session).await?;

    // Clearing a session that was never stored fails in the store
    if maybe_user.is_some() {
        session.clear().await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Get the logged in user
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged in user", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&state, &session).await?;

    Ok((StatusCode::OK, Json(user_dto(user))))
}
