use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("User ID {0:?} not found in database despite having an active session")]
    UserNotInDatabase(i32),
    #[error("User does not have the role required for this action")]
    Forbidden,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Email address has not been verified")]
    EmailNotVerified,
}

impl AuthError {
    fn unauthorized(message: &str) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("Authentication error: {}", self);

        match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                Self::unauthorized("Please log in to continue")
            }
            Self::Forbidden => Self::unauthorized("You are not allowed to perform this action"),
            Self::InvalidCredentials => Self::unauthorized("Invalid email or password"),
            Self::EmailNotVerified => {
                Self::unauthorized("Please verify your email before logging in")
            }
        }
    }
}
