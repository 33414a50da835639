use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        room::AssignRoomDto,
        student::{StudentDto, UpdateProfileDto},
    },
    server::{
        controller::util::get_user::{require_admin, require_student},
        error::Error,
        model::app::AppState,
        service::{room::RoomService, student::StudentService},
    },
};

pub static STUDENT_TAG: &str = "student";

/// List every student with course and room
#[utoipa::path(
    get,
    path = "/api/students",
    tag = STUDENT_TAG,
    responses(
        (status = 200, description = "Students ordered by roll number", body = Vec<StudentDto>),
        (status = 401, description = "Not an administrator", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_students(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    let students = StudentService::new(&state.db).list_students().await?;

    Ok((StatusCode::OK, Json(students)))
}

/// Get a student
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    tag = STUDENT_TAG,
    params(("id" = i32, Path, description = "Student profile ID")),
    responses(
        (status = 200, description = "Student found", body = StudentDto),
        (status = 401, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Student not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_student(
    State(state): State<AppState>,
    session: Session,
    Path(student_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    let student = StudentService::new(&state.db)
        .get_student(student_id)
        .await?;

    Ok((StatusCode::OK, Json(student)))
}

/// Delete a student with their account, payments and queries
///
/// The student's seat is released.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    tag = STUDENT_TAG,
    params(("id" = i32, Path, description = "Student profile ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 401, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Student not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_student(
    State(state): State<AppState>,
    session: Session,
    Path(student_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let admin = require_admin(&state, &session).await?;

    StudentService::new(&state.db)
        .delete_student(student_id)
        .await?;

    tracing::info!("Admin user ID {} deleted student ID {}", admin.id, student_id);

    Ok(StatusCode::NO_CONTENT)
}

/// Assign a student to a room, or vacate their room with `room_id: null`
#[utoipa::path(
    put,
    path = "/api/students/{id}/room",
    tag = STUDENT_TAG,
    params(("id" = i32, Path, description = "Student profile ID")),
    request_body = AssignRoomDto,
    responses(
        (status = 200, description = "Room assigned", body = StudentDto),
        (status = 400, description = "Room is full or inactive", body = ErrorDto),
        (status = 401, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Student or room not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn assign_room(
    State(state): State<AppState>,
    session: Session,
    Path(student_id): Path<i32>,
    Json(payload): Json<AssignRoomDto>,
) -> Result<impl IntoResponse, Error> {
    let admin = require_admin(&state, &session).await?;

    RoomService::new(&state.db)
        .assign_room(student_id, payload.room_id)
        .await?;

    tracing::info!(
        "Admin user ID {} assigned student ID {} to room {:?}",
        admin.id,
        student_id,
        payload.room_id
    );

    let student = StudentService::new(&state.db)
        .get_student(student_id)
        .await?;

    Ok((StatusCode::OK, Json(student)))
}

/// Get the logged in student's profile
#[utoipa::path(
    get,
    path = "/api/student/profile",
    tag = STUDENT_TAG,
    responses(
        (status = 200, description = "Student profile", body = StudentDto),
        (status = 401, description = "Not logged in as a student", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let student = require_student(&state, &session).await?;

    Ok((StatusCode::OK, Json(student)))
}

/// Update the logged in student's name, contact number or address
#[utoipa::path(
    put,
    path = "/api/student/profile",
    tag = STUDENT_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = StudentDto),
        (status = 400, description = "Invalid profile details", body = ErrorDto),
        (status = 401, description = "Not logged in as a student", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, Error> {
    let student = require_student(&state, &session).await?;

    let student = StudentService::new(&state.db)
        .update_profile(student.user_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(student)))
}
