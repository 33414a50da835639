//! HTTP controller endpoints for the hostel web API.
//!
//! This module contains Axum handlers for authentication, rooms, students, fees, payments,
//! helpdesk queries and dashboards. Controllers check the session user's role, hand request
//! bodies to the services and map the results to HTTP responses. They integrate with
//! tower-sessions for session management and use utoipa for OpenAPI documentation.

pub mod auth;
pub mod course;
pub mod dashboard;
pub mod fee;
pub mod fee_structure;
pub mod query;
pub mod room;
pub mod student;
pub mod util;
