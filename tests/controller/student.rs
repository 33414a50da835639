use axum::{
    extract::{Path, State},
    Json,
};
use hostel::{
    model::{room::AssignRoomDto, student::UpdateProfileDto},
    server::{
        controller::student::{
            assign_room, delete_student, get_profile, list_students, update_profile,
        },
        data::{room::RoomRepository, student::StudentProfileRepository},
    },
};

use super::*;

/// Expect 200 for an administrator and 401 for a student
#[tokio::test]
async fn only_admin_lists_students() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let (student, _) = test.hostel().insert_student("CS2023001").await?;
    let admin = test.hostel().insert_admin("admin@college.edu").await?;

    log_in(&test, student.id, UserRole::Student).await;
    let as_student = list_students(State(test.state()), test.session.clone()).await;
    log_in(&test, admin.id, UserRole::Admin).await;
    let as_admin = list_students(State(test.state()), test.session.clone()).await;

    assert_eq!(status_of(as_student), StatusCode::UNAUTHORIZED);
    assert_eq!(status_of(as_admin), StatusCode::OK);

    Ok(())
}

/// Expect a reassignment to move the seat between rooms
#[tokio::test]
async fn reassigns_room() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let admin = test.hostel().insert_admin("admin@college.edu").await?;
    let room_a = test.hostel().insert_room("A-101", 2, 0).await?;
    let room_b = test.hostel().insert_room("B-201", 2, 0).await?;
    let (_, student) = test
        .hostel()
        .insert_student_in_room("CS2023001", &room_a)
        .await?;
    log_in(&test, admin.id, UserRole::Admin).await;

    let result = assign_room(
        State(test.state()),
        test.session.clone(),
        Path(student.id),
        Json(AssignRoomDto {
            room_id: Some(room_b.id),
        }),
    )
    .await;

    assert_eq!(status_of(result), StatusCode::OK);
    let room_repo = RoomRepository::new(&test.db);
    assert_eq!(room_repo.get_by_id(room_a.id).await?.unwrap().occupied_seats, 0);
    assert_eq!(room_repo.get_by_id(room_b.id).await?.unwrap().occupied_seats, 1);

    Ok(())
}

/// Expect 400 when the room is full, leaving occupancy unchanged
#[tokio::test]
async fn rejects_full_room() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let admin = test.hostel().insert_admin("admin@college.edu").await?;
    let room = test.hostel().insert_room("A-101", 2, 2).await?;
    let (_, student) = test.hostel().insert_student("CS2023001").await?;
    log_in(&test, admin.id, UserRole::Admin).await;

    let result = assign_room(
        State(test.state()),
        test.session.clone(),
        Path(student.id),
        Json(AssignRoomDto {
            room_id: Some(room.id),
        }),
    )
    .await;

    assert_eq!(status_of(result), StatusCode::BAD_REQUEST);
    assert_eq!(
        RoomRepository::new(&test.db)
            .get_by_id(room.id)
            .await?
            .unwrap()
            .occupied_seats,
        2
    );

    Ok(())
}

/// Expect 204 and the student's seat to be released
#[tokio::test]
async fn deletes_student() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let admin = test.hostel().insert_admin("admin@college.edu").await?;
    let room = test.hostel().insert_room("A-101", 2, 0).await?;
    let (_, student) = test
        .hostel()
        .insert_student_in_room("CS2023001", &room)
        .await?;
    log_in(&test, admin.id, UserRole::Admin).await;

    let result = delete_student(State(test.state()), test.session.clone(), Path(student.id)).await;

    assert_eq!(status_of(result), StatusCode::NO_CONTENT);
    assert!(StudentProfileRepository::new(&test.db)
        .get_by_id(student.id)
        .await?
        .is_none());
    assert_eq!(
        RoomRepository::new(&test.db)
            .get_by_id(room.id)
            .await?
            .unwrap()
            .occupied_seats,
        0
    );

    Ok(())
}

/// Expect students to read and edit their own profile, administrators to be refused
#[tokio::test]
async fn student_manages_own_profile() -> Result<(), TestError> {
    let test = test_setup_with_hostel_tables!()?;
    let (user, profile) = test.hostel().insert_student("CS2023001").await?;
    let admin = test.hostel().insert_admin("admin@college.edu").await?;

    log_in(&test, admin.id, UserRole::Admin).await;
    let as_admin = get_profile(State(test.state()), test.session.clone()).await;

    log_in(&test, user.id, UserRole::Student).await;
    let read = get_profile(State(test.state()), test.session.clone()).await;
    let updated = update_profile(
        State(test.state()),
        test.session.clone(),
        Json(UpdateProfileDto {
            contact_no: Some("9000000001".to_string()),
            ..Default::default()
        }),
    )
    .await;

    assert_eq!(status_of(as_admin), StatusCode::UNAUTHORIZED);
    assert_eq!(status_of(read), StatusCode::OK);
    assert_eq!(status_of(updated), StatusCode::OK);
    assert_eq!(
        StudentProfileRepository::new(&test.db)
            .get_by_id(profile.id)
            .await?
            .unwrap()
            .contact_no,
        "9000000001"
    );

    Ok(())
}
