use hostel_test_utils::prelude::*;

use crate::server::{
    data::{room::RoomRepository, student::StudentProfileRepository},
    error::{hostel::HostelError, Error},
    service::room::RoomService,
};


/// Reads the current occupied seat count of a room
async fn occupied_seats(test: &TestSetup, room_id: i32) -> Result<i32, TestError> {
    let room = RoomRepository::new(&test.db)
        .get_by_id(room_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("room {}", room_id)))?;

    Ok(room.occupied_seats)
}

/// Reads the current room of a student
async fn room_of(test: &TestSetup, student_id: i32) -> Result<Option<i32>, TestError> {
    let profile = StudentProfileRepository::new(&test.db)
        .get_by_id(student_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("student {}", student_id)))?;

    Ok(profile.room_id)
}
