use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        dashboard::{AdminDashboardDto, StudentDashboardDto},
    },
    server::{
        controller::util::get_user::{require_admin, require_student},
        error::Error,
        model::app::AppState,
        service::dashboard::DashboardService,
    },
};

pub static DASHBOARD_TAG: &str = "dashboard";

/// Hostel occupancy, helpdesk and collection figures
#[utoipa::path(
    get,
    path = "/api/dashboard/admin",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "Admin dashboard", body = AdminDashboardDto),
        (status = 401, description = "Not an administrator", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn admin_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    let dashboard = DashboardService::new(&state.db).admin_dashboard().await?;

    Ok((StatusCode::OK, Json(dashboard)))
}

/// The logged in student's room, fees and helpdesk figures
#[utoipa::path(
    get,
    path = "/api/dashboard/student",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "Student dashboard", body = StudentDashboardDto),
        (status = 401, description = "Not logged in as a student", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn student_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let student = require_student(&state, &session).await?;

    let dashboard = DashboardService::new(&state.db)
        .student_dashboard(student.user_id)
        .await?;

    Ok((StatusCode::OK, Json(dashboard)))
}
