use chrono::NaiveDate;
use entity::sea_orm_active_enums::Semester;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::util::time;

/// Validated fee structure fields shared by create and update
#[derive(Clone, Debug)]
pub struct FeeStructureParams {
    pub year: i32,
    pub semester: Semester,
    pub single_room_fees: i64,
    pub double_room_fees: i64,
    pub triple_room_fees: i64,
    pub hostel_fees: i64,
    pub mess_fees: i64,
    pub due_date: NaiveDate,
}

pub struct FeeStructureRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FeeStructureRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: FeeStructureParams,
    ) -> Result<entity::fee_structure::Model, DbErr> {
        let fee_structure = entity::fee_structure::ActiveModel {
            year: ActiveValue::Set(params.year),
            semester: ActiveValue::Set(params.semester),
            single_room_fees: ActiveValue::Set(params.single_room_fees),
            double_room_fees: ActiveValue::Set(params.double_room_fees),
            triple_room_fees: ActiveValue::Set(params.triple_room_fees),
            hostel_fees: ActiveValue::Set(params.hostel_fees),
            mess_fees: ActiveValue::Set(params.mess_fees),
            due_date: ActiveValue::Set(params.due_date),
            created_at: ActiveValue::Set(time::now()),
            ..Default::default()
        };

        fee_structure.insert(self.db).await
    }

    pub async fn get_by_id(
        &self,
        fee_structure_id: i32,
    ) -> Result<Option<entity::fee_structure::Model>, DbErr> {
        entity::prelude::FeeStructure::find_by_id(fee_structure_id)
            .one(self.db)
            .await
    }

    /// Gets the fee structure currently in force
    ///
    /// Highest year wins, ties are broken by the most recently created row.
    pub async fn get_latest(&self) -> Result<Option<entity::fee_structure::Model>, DbErr> {
        entity::prelude::FeeStructure::find()
            .order_by_desc(entity::fee_structure::Column::Year)
            .order_by_desc(entity::fee_structure::Column::CreatedAt)
            .order_by_desc(entity::fee_structure::Column::Id)
            .one(self.db)
            .await
    }

    /// Lists fee structures newest first
    pub async fn get_all(&self) -> Result<Vec<entity::fee_structure::Model>, DbErr> {
        entity::prelude::FeeStructure::find()
            .order_by_desc(entity::fee_structure::Column::Year)
            .order_by_desc(entity::fee_structure::Column::CreatedAt)
            .order_by_desc(entity::fee_structure::Column::Id)
            .all(self.db)
            .await
    }

    /// Finds the fee structure for a (year, semester) period
    ///
    /// `exclude_id` skips the row being updated so it does not conflict with itself.
    pub async fn find_by_period(
        &self,
        year: i32,
        semester: Semester,
        exclude_id: Option<i32>,
    ) -> Result<Option<entity::fee_structure::Model>, DbErr> {
        let mut select = entity::prelude::FeeStructure::find()
            .filter(entity::fee_structure::Column::Year.eq(year))
            .filter(entity::fee_structure::Column::Semester.eq(semester));

        if let Some(exclude_id) = exclude_id {
            select = select.filter(entity::fee_structure::Column::Id.ne(exclude_id));
        }

        select.one(self.db).await
    }

    /// Overwrites every field of an existing fee structure
    ///
    /// Returns `Ok(None)` if the fee structure does not exist.
    pub async fn update(
        &self,
        fee_structure_id: i32,
        params: FeeStructureParams,
    ) -> Result<Option<entity::fee_structure::Model>, DbErr> {
        let fee_structure = match self.get_by_id(fee_structure_id).await? {
            Some(fee_structure) => fee_structure,
            None => return Ok(None),
        };

        let mut fee_am = fee_structure.into_active_model();
        fee_am.year = ActiveValue::Set(params.year);
        fee_am.semester = ActiveValue::Set(params.semester);
        fee_am.single_room_fees = ActiveValue::Set(params.single_room_fees);
        fee_am.double_room_fees = ActiveValue::Set(params.double_room_fees);
        fee_am.triple_room_fees = ActiveValue::Set(params.triple_room_fees);
        fee_am.hostel_fees = ActiveValue::Set(params.hostel_fees);
        fee_am.mess_fees = ActiveValue::Set(params.mess_fees);
        fee_am.due_date = ActiveValue::Set(params.due_date);

        let fee_structure = fee_am.update(self.db).await?;

        Ok(Some(fee_structure))
    }

    pub async fn delete(&self, fee_structure_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::FeeStructure::delete_by_id(fee_structure_id)
            .exec(self.db)
            .await
    }
}
