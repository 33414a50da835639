//! Error types for the hostel server application.
//!
//! This module provides the error handling system with specialized error types for the
//! different domains (authentication, configuration, hostel business rules, mail delivery).
//! All errors implement `IntoResponse` for Axum HTTP responses and use `thiserror` for
//! ergonomic error definitions with automatic `Display` and `Error` trait implementations.

pub mod auth;
pub mod config;
pub mod hostel;
pub mod mail;
pub mod retry;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, hostel::HostelError, mail::MailError,
    },
};

/// Main error type for the hostel server application.
///
/// This enum aggregates all domain-specific error types and external library errors into a
/// single unified error type. It uses `thiserror`'s `#[from]` attribute to enable automatic
/// conversion from underlying error types via the `?` operator. The `IntoResponse` implementation
/// maps errors to appropriate HTTP responses for API consumers.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Authentication errors (session, credentials, role checks)
/// - Hostel errors (validation, capacity, not found, conflicts)
/// - Mail errors (verification email delivery)
/// - External library errors (database, sessions, password hashing)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (session, credentials, insufficient role).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Business rule violation (validation, capacity, not found, conflict).
    #[error(transparent)]
    HostelError(#[from] HostelError),
    /// Verification email could not be delivered.
    #[error(transparent)]
    MailError(#[from] MailError),
    /// Password hashing or hash parsing failed.
    #[error("Failed to process password hash: {0}")]
    PasswordHashError(String),
    /// Internal error indicating a bug in the application's code.
    ///
    /// This error should never occur in normal operation and indicates a programming error
    /// such as a broken foreign key relationship.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// I/O error (binding the HTTP listener).
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Converts application errors into HTTP responses.
///
/// Maps domain-specific errors to appropriate HTTP status codes and JSON error responses.
/// Most errors are treated as internal server errors (500) with logging, while `AuthError`
/// and `HostelError` have custom response mappings.
///
/// # Returns
/// - 400 Bad Request - Validation and capacity errors
/// - 401 Unauthorized - Missing session, bad credentials or insufficient role
/// - 404 Not Found - Missing rooms, students, fee structures, queries
/// - 409 Conflict - Uniqueness violations
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::HostelError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server error" message
/// to the client to avoid leaking implementation details. Used as a fallback for errors that
/// don't have specific HTTP response mappings.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
