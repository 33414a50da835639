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
        fee::{FeeStructureDto, FeeStructureInputDto},
    },
    server::{
        controller::util::get_user::{require_admin, require_user},
        error::{hostel::HostelError, Error},
        model::app::AppState,
        service::fee_structure::FeeStructureService,
    },
};

pub static FEE_STRUCTURE_TAG: &str = "fee-structure";

/// List fee structures, newest first
#[utoipa::path(
    get,
    path = "/api/fee-structures",
    tag = FEE_STRUCTURE_TAG,
    responses(
        (status = 200, description = "Fee structures", body = Vec<FeeStructureDto>),
        (status = 401, description = "Not an administrator", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_fee_structures(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    let structures = FeeStructureService::new(&state.db)
        .list_fee_structures()
        .await?;

    Ok((StatusCode::OK, Json(structures)))
}

/// Get the fee structure currently used to bill students
#[utoipa::path(
    get,
    path = "/api/fee-structures/latest",
    tag = FEE_STRUCTURE_TAG,
    responses(
        (status = 200, description = "Latest fee structure", body = FeeStructureDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "No fee structure has been created", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_latest_fee_structure(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    require_user(&state, &session).await?;

    let structure = FeeStructureService::new(&state.db)
        .get_latest()
        .await?
        .ok_or_else(|| HostelError::not_found("No fee structure has been created"))?;

    Ok((StatusCode::OK, Json(structure)))
}

/// Create the fee structure for a year and semester
#[utoipa::path(
    post,
    path = "/api/fee-structures",
    tag = FEE_STRUCTURE_TAG,
    request_body = FeeStructureInputDto,
    responses(
        (status = 201, description = "Fee structure created", body = FeeStructureDto),
        (status = 400, description = "Invalid amounts, period or due date", body = ErrorDto),
        (status = 401, description = "Not an administrator", body = ErrorDto),
        (status = 409, description = "Fee structure for the period already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_fee_structure(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<FeeStructureInputDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    let structure = FeeStructureService::new(&state.db)
        .create_fee_structure(payload)
        .await?;

    Ok((StatusCode::CREATED, Json(structure)))
}

/// Update a fee structure
#[utoipa::path(
    put,
    path = "/api/fee-structures/{id}",
    tag = FEE_STRUCTURE_TAG,
    params(("id" = i32, Path, description = "Fee structure ID")),
    request_body = FeeStructureInputDto,
    responses(
        (status = 200, description = "Fee structure updated", body = FeeStructureDto),
        (status = 400, description = "Invalid amounts, period or due date", body = ErrorDto),
        (status = 401, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Fee structure not found", body = ErrorDto),
        (status = 409, description = "Fee structure for the period already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_fee_structure(
    State(state): State<AppState>,
    session: Session,
    Path(fee_structure_id): Path<i32>,
    Json(payload): Json<FeeStructureInputDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    let structure = FeeStructureService::new(&state.db)
        .update_fee_structure(fee_structure_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(structure)))
}

/// Delete a fee structure, recorded payments are kept
#[utoipa::path(
    delete,
    path = "/api/fee-structures/{id}",
    tag = FEE_STRUCTURE_TAG,
    params(("id" = i32, Path, description = "Fee structure ID")),
    responses(
        (status = 204, description = "Fee structure deleted"),
        (status = 401, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Fee structure not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_fee_structure(
    State(state): State<AppState>,
    session: Session,
    Path(fee_structure_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    FeeStructureService::new(&state.db)
        .delete_fee_structure(fee_structure_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
