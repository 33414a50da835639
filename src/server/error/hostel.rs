use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Business rule violations raised by the hostel services.
///
/// Messages are written for the end user and returned verbatim in the response body.
#[derive(Error, Debug)]
pub enum HostelError {
    /// Malformed or out of range input.
    #[error("{0}")]
    Validation(String),
    /// Room assignment would exceed the room's capacity.
    #[error("{0}")]
    Capacity(String),
    /// Referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Uniqueness violation, e.g. a duplicate room number or fee period.
    #[error("{0}")]
    Conflict(String),
}

impl HostelError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

impl IntoResponse for HostelError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Validation(_) | Self::Capacity(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
        };

        tracing::debug!(status = %status, "{}", self);

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
