//! Room occupancy management.
//!
//! Rooms carry an `occupied_seats` counter that must stay within `0..=capacity`. Every
//! operation that moves a student between rooms adjusts the counters and the student's
//! `room_id` inside one transaction, and seat allocation relies on the conditional
//! increment in [`RoomRepository::increment_occupancy`] so concurrent assignments cannot
//! overfill a room.

#[cfg(test)]
mod tests;

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::room::{CreateRoomDto, RoomDto, RoomType, UpdateRoomDto},
    server::{
        data::{
            room::{RoomParams, RoomRepository},
            student::StudentProfileRepository,
        },
        error::{hostel::HostelError, Error},
        model::db::RoomModel,
        service::retry::RetryContext,
        util::validate::require_non_empty,
    },
};

pub const MIN_ROOM_CAPACITY: i32 = 1;
pub const MAX_ROOM_CAPACITY: i32 = 4;

/// Service for room administration and student room assignment.
pub struct RoomService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoomService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists rooms ordered by room number.
    ///
    /// # Arguments
    /// - `available_only` - Only return active rooms with at least one free seat
    pub async fn list_rooms(&self, available_only: bool) -> Result<Vec<RoomDto>, Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry("list rooms", || {
            let db = db.clone();

            async move {
                let rooms = RoomRepository::new(&db).get_all(available_only).await?;

                Ok(rooms.into_iter().map(room_dto).collect())
            }
        })
        .await
    }

    /// Gets a single room.
    ///
    /// # Returns
    /// - `Ok(RoomDto)` - Room found
    /// - `Err(Error::HostelError(HostelError::NotFound))` - No room with that ID
    pub async fn get_room(&self, room_id: i32) -> Result<RoomDto, Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("get room ID {}", room_id), || {
            let db = db.clone();

            async move {
                let room = RoomRepository::new(&db)
                    .get_by_id(room_id)
                    .await?
                    .ok_or_else(|| room_not_found(room_id))?;

                Ok(room_dto(room))
            }
        })
        .await
    }

    /// Creates an empty room.
    ///
    /// # Returns
    /// - `Ok(RoomDto)` - Room created with no occupied seats
    /// - `Err(Error::HostelError(HostelError::Validation))` - Invalid room attributes
    /// - `Err(Error::HostelError(HostelError::Conflict))` - Room number already in use
    pub async fn create_room(&self, payload: CreateRoomDto) -> Result<RoomDto, Error> {
        let params = validate_room(RoomParams {
            room_number: payload.room_number,
            capacity: payload.capacity,
            floor: payload.floor,
            block: payload.block,
            is_active: payload.is_active.unwrap_or(true),
        })?;

        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("create room {}", params.room_number), || {
            let db = db.clone();
            let params = params.clone();

            async move {
                let txn = db.begin().await?;
                let room_repo = RoomRepository::new(&txn);

                if room_repo
                    .get_by_room_number(&params.room_number)
                    .await?
                    .is_some()
                {
                    return Err(duplicate_room_number(&params.room_number));
                }

                let room = room_repo.create(params).await?;
                txn.commit().await?;

                tracing::info!("Created room {} (ID {})", room.room_number, room.id);

                Ok(room_dto(room))
            }
        })
        .await
    }

    /// Edits an empty room.
    ///
    /// Rooms with assigned students cannot be edited, vacate the room first.
    ///
    /// # Returns
    /// - `Ok(RoomDto)` - Updated room
    /// - `Err(Error::HostelError(HostelError::NotFound))` - No room with that ID
    /// - `Err(Error::HostelError(HostelError::Validation))` - Room occupied or invalid attributes
    /// - `Err(Error::HostelError(HostelError::Conflict))` - New room number already in use
    pub async fn update_room(&self, room_id: i32, payload: UpdateRoomDto) -> Result<RoomDto, Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("update room ID {}", room_id), || {
            let db = db.clone();
            let payload = payload.clone();

            async move {
                let txn = db.begin().await?;
                let room_repo = RoomRepository::new(&txn);

                let room = room_repo
                    .get_by_id(room_id)
                    .await?
                    .ok_or_else(|| room_not_found(room_id))?;

                if room.occupied_seats > 0 {
                    return Err(HostelError::validation(format!(
                        "Room {} has students assigned and cannot be edited",
                        room.room_number
                    ))
                    .into());
                }

                let params = validate_room(RoomParams {
                    room_number: payload.room_number.unwrap_or_else(|| room.room_number.clone()),
                    capacity: payload.capacity.unwrap_or(room.capacity),
                    floor: payload.floor.unwrap_or(room.floor),
                    block: payload.block.unwrap_or_else(|| room.block.clone()),
                    is_active: payload.is_active.unwrap_or(room.is_active),
                })?;

                if params.capacity < room.occupied_seats {
                    return Err(HostelError::validation(format!(
                        "Capacity cannot be lower than the {} occupied seats",
                        room.occupied_seats
                    ))
                    .into());
                }

                if params.room_number != room.room_number
                    && room_repo
                        .get_by_room_number(&params.room_number)
                        .await?
                        .is_some()
                {
                    return Err(duplicate_room_number(&params.room_number));
                }

                let room = room_repo
                    .update(room_id, params)
                    .await?
                    .ok_or_else(|| room_not_found(room_id))?;
                txn.commit().await?;

                tracing::info!("Updated room {} (ID {})", room.room_number, room.id);

                Ok(room_dto(room))
            }
        })
        .await
    }

    /// Deletes an empty room.
    ///
    /// # Returns
    /// - `Ok(())` - Room deleted
    /// - `Err(Error::HostelError(HostelError::NotFound))` - No room with that ID
    /// - `Err(Error::HostelError(HostelError::Validation))` - Room has students assigned
    pub async fn delete_room(&self, room_id: i32) -> Result<(), Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("delete room ID {}", room_id), || {
            let db = db.clone();

            async move {
                let txn = db.begin().await?;
                let room_repo = RoomRepository::new(&txn);

                let room = room_repo
                    .get_by_id(room_id)
                    .await?
                    .ok_or_else(|| room_not_found(room_id))?;

                if room.occupied_seats > 0 {
                    return Err(HostelError::validation(format!(
                        "Room {} has students assigned and cannot be deleted",
                        room.room_number
                    ))
                    .into());
                }

                room_repo.delete(room_id).await?;
                txn.commit().await?;

                tracing::info!("Deleted room {} (ID {})", room.room_number, room.id);

                Ok(())
            }
        })
        .await
    }

    /// Moves a student into `room_id`, or out of any room with `None`.
    ///
    /// The previous room loses a seat, the new room gains one and the student's room is
    /// updated, all in one transaction. Assigning a student to the room they already
    /// occupy changes nothing.
    ///
    /// # Returns
    /// - `Ok(())` - Assignment stored
    /// - `Err(Error::HostelError(HostelError::NotFound))` - Student or room does not exist
    /// - `Err(Error::HostelError(HostelError::Validation))` - Target room is inactive
    /// - `Err(Error::HostelError(HostelError::Capacity))` - Target room is full
    pub async fn assign_room(&self, student_id: i32, room_id: Option<i32>) -> Result<(), Error> {
        let mut ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("assign room for student ID {}", student_id), || {
            let db = db.clone();

            async move {
                let txn = db.begin().await?;
                let student_repo = StudentProfileRepository::new(&txn);
                let room_repo = RoomRepository::new(&txn);

                let profile = student_repo
                    .get_by_id(student_id)
                    .await?
                    .ok_or_else(|| {
                        Error::from(HostelError::not_found(format!(
                            "Student ID {} not found",
                            student_id
                        )))
                    })?;

                let current_room_id = profile.room_id;
                if current_room_id == room_id {
                    return Ok(());
                }

                if let Some(new_room_id) = room_id {
                    let room = room_repo
                        .get_by_id(new_room_id)
                        .await?
                        .ok_or_else(|| room_not_found(new_room_id))?;

                    if !room.is_active {
                        return Err(HostelError::validation(format!(
                            "Room {} is not active",
                            room.room_number
                        ))
                        .into());
                    }
                    if room.occupied_seats >= room.capacity {
                        return Err(room_full(&room.room_number));
                    }
                }

                if let Some(old_room_id) = current_room_id {
                    room_repo.decrement_occupancy(old_room_id).await?;
                }

                if let Some(new_room_id) = room_id {
                    // Zero rows means another assignment took the last seat first
                    if room_repo.increment_occupancy(new_room_id).await? == 0 {
                        return Err(room_full(&new_room_id.to_string()));
                    }
                }

                student_repo.set_room(profile, room_id).await?;
                txn.commit().await?;

                tracing::info!(
                    "Moved student ID {} from room {:?} to room {:?}",
                    student_id,
                    current_room_id,
                    room_id
                );

                Ok(())
            }
        })
        .await
    }
}

/// Converts a room row into its API representation with derived fields.
pub fn room_dto(room: RoomModel) -> RoomDto {
    RoomDto {
        room_type: RoomType::from_capacity(room.capacity),
        available_seats: (room.capacity - room.occupied_seats).max(0),
        id: room.id,
        room_number: room.room_number,
        capacity: room.capacity,
        occupied_seats: room.occupied_seats,
        floor: room.floor,
        block: room.block,
        is_active: room.is_active,
    }
}

fn validate_room(params: RoomParams) -> Result<RoomParams, Error> {
    let room_number = require_non_empty("Room number", &params.room_number)?;
    let block = require_non_empty("Block", &params.block)?;

    if !(MIN_ROOM_CAPACITY..=MAX_ROOM_CAPACITY).contains(&params.capacity) {
        return Err(HostelError::validation(format!(
            "Capacity must be between {} and {}",
            MIN_ROOM_CAPACITY, MAX_ROOM_CAPACITY
        ))
        .into());
    }
    if params.floor < 0 {
        return Err(HostelError::validation("Floor cannot be negative").into());
    }

    Ok(RoomParams {
        room_number,
        block,
        ..params
    })
}

fn room_not_found(room_id: i32) -> Error {
    HostelError::not_found(format!("Room ID {} not found", room_id)).into()
}

fn room_full(room: &str) -> Error {
    HostelError::Capacity(format!("Room {} is already full", room)).into()
}

fn duplicate_room_number(room_number: &str) -> Error {
    HostelError::conflict(format!("Room number {} already exists", room_number)).into()
}
