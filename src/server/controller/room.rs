use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        room::{CreateRoomDto, RoomDto, UpdateRoomDto},
    },
    server::{
        controller::util::get_user::{require_admin, require_user},
        error::Error,
        model::app::AppState,
        service::room::RoomService,
    },
};

pub static ROOM_TAG: &str = "room";

#[derive(Deserialize, IntoParams)]
pub struct ListRoomsParams {
    /// Only list active rooms with at least one free seat
    pub available: Option<bool>,
}

/// List rooms ordered by room number
#[utoipa::path(
    get,
    path = "/api/rooms",
    tag = ROOM_TAG,
    params(ListRoomsParams),
    responses(
        (status = 200, description = "Rooms with derived type and free seats", body = Vec<RoomDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ListRoomsParams>,
) -> Result<impl IntoResponse, Error> {
    require_user(&state, &session).await?;

    let rooms = RoomService::new(&state.db)
        .list_rooms(params.available.unwrap_or(false))
        .await?;

    Ok((StatusCode::OK, Json(rooms)))
}

/// Get a room
#[utoipa::path(
    get,
    path = "/api/rooms/{id}",
    tag = ROOM_TAG,
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room found", body = RoomDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_room(
    State(state): State<AppState>,
    session: Session,
    Path(room_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_user(&state, &session).await?;

    let room = RoomService::new(&state.db).get_room(room_id).await?;

    Ok((StatusCode::OK, Json(room)))
}

/// Create a room
#[utoipa::path(
    post,
    path = "/api/rooms",
    tag = ROOM_TAG,
    request_body = CreateRoomDto,
    responses(
        (status = 201, description = "Room created", body = RoomDto),
        (status = 400, description = "Invalid room details", body = ErrorDto),
        (status = 401, description = "Not an administrator", body = ErrorDto),
        (status = 409, description = "Room number already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_room(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateRoomDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    let room = RoomService::new(&state.db).create_room(payload).await?;

    Ok((StatusCode::CREATED, Json(room)))
}

/// Update an unoccupied room
#[utoipa::path(
    put,
    path = "/api/rooms/{id}",
    tag = ROOM_TAG,
    params(("id" = i32, Path, description = "Room ID")),
    request_body = UpdateRoomDto,
    responses(
        (status = 200, description = "Room updated", body = RoomDto),
        (status = 400, description = "Invalid room details or room is occupied", body = ErrorDto),
        (status = 401, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 409, description = "Room number already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_room(
    State(state): State<AppState>,
    session: Session,
    Path(room_id): Path<i32>,
    Json(payload): Json<UpdateRoomDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    let room = RoomService::new(&state.db)
        .update_room(room_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(room)))
}

/// Delete an unoccupied room
#[utoipa::path(
    delete,
    path = "/api/rooms/{id}",
    tag = ROOM_TAG,
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 204, description = "Room deleted"),
        (status = 400, description = "Room is occupied", body = ErrorDto),
        (status = 401, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_room(
    State(state): State<AppState>,
    session: Session,
    Path(room_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    RoomService::new(&state.db).delete_room(room_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
