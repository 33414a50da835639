use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    DeleteResult, EntityTrait, ExprTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::util::time;

/// Writable room attributes, occupancy is managed separately
#[derive(Clone, Debug)]
pub struct RoomParams {
    pub room_number: String,
    pub capacity: i32,
    pub floor: i32,
    pub block: String,
    pub is_active: bool,
}

pub struct RoomRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RoomRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new room with no occupied seats
    pub async fn create(&self, params: RoomParams) -> Result<entity::room::Model, DbErr> {
        let room = entity::room::ActiveModel {
            room_number: ActiveValue::Set(params.room_number),
            capacity: ActiveValue::Set(params.capacity),
            occupied_seats: ActiveValue::Set(0),
            floor: ActiveValue::Set(params.floor),
            block: ActiveValue::Set(params.block),
            is_active: ActiveValue::Set(params.is_active),
            created_at: ActiveValue::Set(time::now()),
            ..Default::default()
        };

        room.insert(self.db).await
    }

    pub async fn get_by_id(&self, room_id: i32) -> Result<Option<entity::room::Model>, DbErr> {
        entity::prelude::Room::find_by_id(room_id).one(self.db).await
    }

    pub async fn get_by_room_number(
        &self,
        room_number: &str,
    ) -> Result<Option<entity::room::Model>, DbErr> {
        entity::prelude::Room::find()
            .filter(entity::room::Column::RoomNumber.eq(room_number))
            .one(self.db)
            .await
    }

    /// Lists rooms ordered by room number
    ///
    /// With `available_only` set, only active rooms with at least one free seat are returned.
    pub async fn get_all(&self, available_only: bool) -> Result<Vec<entity::room::Model>, DbErr> {
        let mut select = entity::prelude::Room::find();

        if available_only {
            select = select
                .filter(entity::room::Column::IsActive.eq(true))
                .filter(
                    Expr::col(entity::room::Column::OccupiedSeats)
                        .lt(Expr::col(entity::room::Column::Capacity)),
                );
        }

        select
            .order_by_asc(entity::room::Column::RoomNumber)
            .all(self.db)
            .await
    }

    /// Overwrites the writable attributes of an existing room
    ///
    /// Returns `Ok(None)` if the room does not exist.
    pub async fn update(
        &self,
        room_id: i32,
        params: RoomParams,
    ) -> Result<Option<entity::room::Model>, DbErr> {
        let room = match self.get_by_id(room_id).await? {
            Some(room) => room,
            None => return Ok(None),
        };

        let mut room_am = room.into_active_model();
        room_am.room_number = ActiveValue::Set(params.room_number);
        room_am.capacity = ActiveValue::Set(params.capacity);
        room_am.floor = ActiveValue::Set(params.floor);
        room_am.block = ActiveValue::Set(params.block);
        room_am.is_active = ActiveValue::Set(params.is_active);

        let room = room_am.update(self.db).await?;

        Ok(Some(room))
    }

    /// Takes one seat in a room if a seat is free
    ///
    /// The capacity check and the increment are a single statement, so two callers
    /// racing for the last seat cannot both succeed. Returns the number of rows
    /// affected: 0 means the room is full or does not exist.
    pub async fn increment_occupancy(&self, room_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Room::update_many()
            .col_expr(
                entity::room::Column::OccupiedSeats,
                Expr::col(entity::room::Column::OccupiedSeats).add(1),
            )
            .filter(entity::room::Column::Id.eq(room_id))
            .filter(
                Expr::col(entity::room::Column::OccupiedSeats)
                    .lt(Expr::col(entity::room::Column::Capacity)),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Frees one seat in a room, never going below zero
    pub async fn decrement_occupancy(&self, room_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Room::update_many()
            .col_expr(
                entity::room::Column::OccupiedSeats,
                Expr::col(entity::room::Column::OccupiedSeats).sub(1),
            )
            .filter(entity::room::Column::Id.eq(room_id))
            .filter(entity::room::Column::OccupiedSeats.gt(0))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete(&self, room_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Room::delete_by_id(room_id)
            .exec(self.db)
            .await
    }
}
