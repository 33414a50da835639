use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use entity::sea_orm_active_enums::{PaymentStatus, PaymentType};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{api::ErrorDto, fee::FeeSummaryDto, payment::PaymentDto},
    server::{
        controller::util::get_user::{require_admin, require_student},
        error::{hostel::HostelError, Error},
        model::app::AppState,
        service::{fee::FeeService, payment::PaymentService},
        util::time,
    },
};

pub static FEE_TAG: &str = "fee";

#[derive(Deserialize, IntoParams)]
pub struct FeeParams {
    /// Month to resolve as `YYYY-MM`, defaults to the current month
    pub month: Option<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct ListPaymentsParams {
    /// Only list payments with this status: `pending`, `partial` or `paid`
    pub status: Option<String>,
}

/// Get the logged in student's hostel and mess fees for a month
#[utoipa::path(
    get,
    path = "/api/student/fees",
    tag = FEE_TAG,
    params(FeeParams),
    responses(
        (status = 200, description = "Fee summary", body = FeeSummaryDto),
        (status = 400, description = "Malformed month", body = ErrorDto),
        (status = 401, description = "Not logged in as a student", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_student_fees(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<FeeParams>,
) -> Result<impl IntoResponse, Error> {
    let student = require_student(&state, &session).await?;

    let month = match params.month {
        Some(month) => time::parse_month(&month)?,
        None => time::today(),
    };

    let fees = FeeService::new(&state.db)
        .resolve_fees(student.id, month)
        .await?;

    Ok((StatusCode::OK, Json(fees)))
}

/// Pay the full hostel or mess fee for the current month
#[utoipa::path(
    post,
    path = "/api/student/payments/{payment_type}",
    tag = FEE_TAG,
    params(("payment_type" = String, Path, description = "`hostel` or `mess`")),
    responses(
        (status = 200, description = "Payment recorded", body = PaymentDto),
        (status = 400, description = "Unknown payment type", body = ErrorDto),
        (status = 401, description = "Not logged in as a student", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn record_payment(
    State(state): State<AppState>,
    session: Session,
    Path(payment_type): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let student = require_student(&state, &session).await?;

    let payment_type = PaymentType::parse(payment_type.trim())
        .ok_or_else(|| HostelError::validation("Payment type must be hostel or mess"))?;

    let payment = PaymentService::new(&state.db)
        .record_current_payment(student.id, payment_type)
        .await?;

    Ok((StatusCode::OK, Json(payment)))
}

/// List the logged in student's payments, newest month first
#[utoipa::path(
    get,
    path = "/api/student/payments",
    tag = FEE_TAG,
    responses(
        (status = 200, description = "Payment history", body = Vec<PaymentDto>),
        (status = 401, description = "Not logged in as a student", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_student_payments(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let student = require_student(&state, &session).await?;

    let payments = PaymentService::new(&state.db)
        .list_student_payments(student.id)
        .await?;

    Ok((StatusCode::OK, Json(payments)))
}

/// List every student's payments
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = FEE_TAG,
    params(ListPaymentsParams),
    responses(
        (status = 200, description = "Payments, newest month first", body = Vec<PaymentDto>),
        (status = 400, description = "Unknown status", body = ErrorDto),
        (status = 401, description = "Not an administrator", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_payments(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ListPaymentsParams>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    let status = params
        .status
        .map(|status| {
            PaymentStatus::parse(status.trim()).ok_or_else(|| {
                HostelError::validation("Status must be pending, partial or paid")
            })
        })
        .transpose()?;

    let payments = PaymentService::new(&state.db).list_payments(status).await?;

    Ok((StatusCode::OK, Json(payments)))
}
