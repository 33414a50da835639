use axum::{
    extract::{Path, Query, State},
    Json,
};
use hostel::{
    model::room::{CreateRoomDto, UpdateRoomDto},
    server::{
        controller::room::{create_room, delete_room, list_rooms, update_room, ListRoomsParams},
        data::room::RoomRepository,
    },
};

use super::*;

fn create_dto(room_number: &str) -> CreateRoomDto {
    CreateRoomDto {
        room_number: room_number.to_string(),
        capacity: 2,
        floor: 1,
        block: "A".to_string(),
        is_active: None,
    }
}

/// Expect 201 for an administrator and 401 for a student
#[tokio::test]
async fn only_admin_creates_rooms() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let (student, _) = test.hostel().insert_student("CS2023001").await?;
    let admin = test.hostel().insert_admin("admin@college.edu").await?;

    log_in(&test, student.id, UserRole::Student).await;
    let as_student = create_room(
        State(test.state()),
        test.session.clone(),
        Json(create_dto("A-101")),
    )
    .await;

    log_in(&test, admin.id, UserRole::Admin).await;
    let as_admin = create_room(
        State(test.state()),
        test.session.clone(),
        Json(create_dto("A-101")),
    )
    .await;

    assert_eq!(status_of(as_student), StatusCode::UNAUTHORIZED);
    assert_eq!(status_of(as_admin), StatusCode::CREATED);
    assert!(RoomRepository::new(&test.db)
        .get_by_room_number("A-101")
        .await?
        .is_some());

    Ok(())
}

/// Expect 409 for a duplicate room number
#[tokio::test]
async fn rejects_duplicate_room_number() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let admin = test.hostel().insert_admin("admin@college.edu").await?;
    test.hostel().insert_room("A-101", 2, 0).await?;
    log_in(&test, admin.id, UserRole::Admin).await;

    let result = create_room(
        State(test.state()),
        test.session.clone(),
        Json(create_dto("A-101")),
    )
    .await;

    assert_eq!(status_of(result), StatusCode::CONFLICT);

    Ok(())
}

/// Expect 200 for any logged in user and 401 without a session
#[tokio::test]
async fn lists_rooms_for_logged_in_users() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let (student, _) = test.hostel().insert_student("CS2023001").await?;
    test.hostel().insert_room("A-101", 2, 0).await?;

    let anonymous = list_rooms(
        State(test.state()),
        test.session.clone(),
        Query(ListRoomsParams { available: None }),
    )
    .await;
    log_in(&test, student.id, UserRole::Student).await;
    let logged_in = list_rooms(
        State(test.state()),
        test.session.clone(),
        Query(ListRoomsParams {
            available: Some(true),
        }),
    )
    .await;

    assert_eq!(status_of(anonymous), StatusCode::UNAUTHORIZED);
    assert_eq!(status_of(logged_in), StatusCode::OK);

    Ok(())
}

/// Expect 400 when editing or deleting an occupied room
#[tokio::test]
async fn rejects_changes_to_occupied_room() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let admin = test.hostel().insert_admin("admin@college.edu").await?;
    let room = test.hostel().insert_room("A-101", 2, 0).await?;
    test.hostel()
        .insert_student_in_room("CS2023001", &room)
        .await?;
    log_in(&test, admin.id, UserRole::Admin).await;

    let updated = update_room(
        State(test.state()),
        test.session.clone(),
        Path(room.id),
        Json(UpdateRoomDto {
            floor: Some(2),
            ..Default::default()
        }),
    )
    .await;
    let deleted = delete_room(State(test.state()), test.session.clone(), Path(room.id)).await;

    assert_eq!(status_of(updated), StatusCode::BAD_REQUEST);
    assert_eq!(status_of(deleted), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 204 when deleting an empty room and 404 afterwards
#[tokio::test]
async fn deletes_empty_room() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let admin = test.hostel().insert_admin("admin@college.edu").await?;
    let room = test.hostel().insert_room("A-101", 2, 0).await?;
    log_in(&test, admin.id, UserRole::Admin).await;

    let first = delete_room(State(test.state()), test.session.clone(), Path(room.id)).await;
    let second = delete_room(State(test.state()), test.session.clone(), Path(room.id)).await;

    assert_eq!(status_of(first), StatusCode::NO_CONTENT);
    assert_eq!(status_of(second), StatusCode::NOT_FOUND);

    Ok(())
}
