//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with an in-memory SQLite state and a memory-backed session,
//! verifying role checks, status codes and the effects on the database.

mod auth;
mod dashboard;
mod fee;
mod query;
mod room;
mod student;

use axum::{http::StatusCode, response::IntoResponse};
use entity::sea_orm_active_enums::UserRole;
use hostel::server::{error::Error, model::session::user::SessionUser};
use hostel_test_utils::prelude::*;

/// Stores `user_id` in the test session as if they had logged in
async fn log_in(test: &TestSetup, user_id: i32, role: UserRole) {
    SessionUser::insert(&test.session, user_id, role)
        .await
        .unwrap();
}

fn status_of<T: IntoResponse>(result: Result<T, Error>) -> StatusCode {
    match result {
        Ok(resp) => resp.into_response().status(),
        Err(e) => e.into_response().status(),
    }
}

/// Status code and parsed JSON body of a handler result
async fn json_of<T: IntoResponse>(result: Result<T, Error>) -> (StatusCode, serde_json::Value) {
    let resp = match result {
        Ok(resp) => resp.into_response(),
        Err(e) => e.into_response(),
    };
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&bytes).unwrap())
}
