use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use entity::sea_orm_active_enums::{QueryStatus, UserRole};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        query::{CreateQueryDto, QueryDto, UpdateQueryDto},
    },
    server::{
        controller::util::get_user::{require_admin, require_student, require_user},
        error::{hostel::HostelError, Error},
        model::app::AppState,
        service::{
            query::{QueryScope, QueryService},
            student::StudentService,
        },
    },
};

pub static QUERY_TAG: &str = "query";

#[derive(Deserialize, IntoParams)]
pub struct ListQueriesParams {
    /// Only list queries with this status: `pending`, `in_progress` or `resolved`
    pub status: Option<String>,
}

/// Administrators see every query, students only their own
async fn query_scope(state: &AppState, session: &Session) -> Result<QueryScope, Error> {
    let user = require_user(state, session).await?;

    match user.role {
        UserRole::Admin => Ok(QueryScope::Admin),
        UserRole::Student => {
            let student = StudentService::new(&state.db).get_by_user(user.id).await?;

            Ok(QueryScope::Student(student.id))
        }
    }
}

/// List helpdesk queries, newest first
#[utoipa::path(
    get,
    path = "/api/queries",
    tag = QUERY_TAG,
    params(ListQueriesParams),
    responses(
        (status = 200, description = "Queries visible to the user", body = Vec<QueryDto>),
        (status = 400, description = "Unknown status", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_queries(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ListQueriesParams>,
) -> Result<impl IntoResponse, Error> {
    let scope = query_scope(&state, &session).await?;

    let status = params
        .status
        .map(|status| {
            QueryStatus::parse(status.trim()).ok_or_else(|| {
                HostelError::validation("Status must be pending, in_progress or resolved")
            })
        })
        .transpose()?;

    let queries = QueryService::new(&state.db)
        .list_queries(scope, status)
        .await?;

    Ok((StatusCode::OK, Json(queries)))
}

/// Raise a helpdesk query as the logged in student
#[utoipa::path(
    post,
    path = "/api/queries",
    tag = QUERY_TAG,
    request_body = CreateQueryDto,
    responses(
        (status = 201, description = "Query created", body = QueryDto),
        (status = 400, description = "Title or description too short", body = ErrorDto),
        (status = 401, description = "Not logged in as a student", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_query(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateQueryDto>,
) -> Result<impl IntoResponse, Error> {
    let student = require_student(&state, &session).await?;

    let query = QueryService::new(&state.db)
        .create_query(student.id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(query)))
}

/// Get a helpdesk query
#[utoipa::path(
    get,
    path = "/api/queries/{id}",
    tag = QUERY_TAG,
    params(("id" = i32, Path, description = "Query ID")),
    responses(
        (status = 200, description = "Query found", body = QueryDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Query not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_query(
    State(state): State<AppState>,
    session: Session,
    Path(query_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let scope = query_scope(&state, &session).await?;

    let query = QueryService::new(&state.db)
        .get_query(query_id, scope)
        .await?;

    Ok((StatusCode::OK, Json(query)))
}

/// Change a query's status and respond to it
///
/// Resolving a query requires a response.
#[utoipa::path(
    put,
    path = "/api/queries/{id}",
    tag = QUERY_TAG,
    params(("id" = i32, Path, description = "Query ID")),
    request_body = UpdateQueryDto,
    responses(
        (status = 200, description = "Query updated", body = QueryDto),
        (status = 400, description = "Unknown status or missing response", body = ErrorDto),
        (status = 401, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Query not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_query(
    State(state): State<AppState>,
    session: Session,
    Path(query_id): Path<i32>,
    Json(payload): Json<UpdateQueryDto>,
) -> Result<impl IntoResponse, Error> {
    let admin = require_admin(&state, &session).await?;

    let query = QueryService::new(&state.db)
        .update_query(query_id, payload)
        .await?;

    tracing::info!(
        "Admin user ID {} set query ID {} to {:?}",
        admin.id,
        query_id,
        query.status
    );

    Ok((StatusCode::OK, Json(query)))
}

/// Delete a helpdesk query
///
/// Students may only delete their own queries while they are pending.
#[utoipa::path(
    delete,
    path = "/api/queries/{id}",
    tag = QUERY_TAG,
    params(("id" = i32, Path, description = "Query ID")),
    responses(
        (status = 204, description = "Query deleted"),
        (status = 400, description = "Query is no longer pending", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Query not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_query(
    State(state): State<AppState>,
    session: Session,
    Path(query_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let scope = query_scope(&state, &session).await?;

    QueryService::new(&state.db)
        .delete_query(query_id, scope)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
