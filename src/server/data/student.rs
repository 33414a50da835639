use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::util::time;

pub struct CreateStudentProfileParams {
    pub user_id: i32,
    pub roll_no: String,
    pub course_id: i32,
    pub contact_no: String,
    pub date_of_birth: NaiveDate,
    pub address: String,
}

pub struct StudentProfileRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StudentProfileRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a student profile without a room
    pub async fn create(
        &self,
        params: CreateStudentProfileParams,
    ) -> Result<entity::student_profile::Model, DbErr> {
        let profile = entity::student_profile::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            roll_no: ActiveValue::Set(params.roll_no),
            course_id: ActiveValue::Set(params.course_id),
            contact_no: ActiveValue::Set(params.contact_no),
            date_of_birth: ActiveValue::Set(params.date_of_birth),
            address: ActiveValue::Set(params.address),
            room_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(time::now()),
            ..Default::default()
        };

        profile.insert(self.db).await
    }

    pub async fn get_by_id(
        &self,
        student_id: i32,
    ) -> Result<Option<entity::student_profile::Model>, DbErr> {
        entity::prelude::StudentProfile::find_by_id(student_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::student_profile::Model>, DbErr> {
        entity::prelude::StudentProfile::find()
            .filter(entity::student_profile::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    pub async fn get_by_roll_no(
        &self,
        roll_no: &str,
    ) -> Result<Option<entity::student_profile::Model>, DbErr> {
        entity::prelude::StudentProfile::find()
            .filter(entity::student_profile::Column::RollNo.eq(roll_no))
            .one(self.db)
            .await
    }

    /// Lists every profile with its user, ordered by roll number
    pub async fn get_all_with_user(
        &self,
    ) -> Result<Vec<(entity::student_profile::Model, Option<entity::user::Model>)>, DbErr> {
        entity::prelude::StudentProfile::find()
            .find_also_related(entity::prelude::User)
            .order_by_asc(entity::student_profile::Column::RollNo)
            .all(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::StudentProfile::find().count(self.db).await
    }

    /// Points a profile at a room, or clears its room with `None`
    ///
    /// Occupancy counters are not touched here, callers pair this with
    /// [`RoomRepository`](crate::server::data::room::RoomRepository) updates.
    pub async fn set_room(
        &self,
        profile: entity::student_profile::Model,
        room_id: Option<i32>,
    ) -> Result<entity::student_profile::Model, DbErr> {
        let mut profile_am = profile.into_active_model();
        profile_am.room_id = ActiveValue::Set(room_id);

        profile_am.update(self.db).await
    }

    /// Updates the student-editable contact fields
    pub async fn update_contact(
        &self,
        profile: entity::student_profile::Model,
        contact_no: Option<String>,
        address: Option<String>,
    ) -> Result<entity::student_profile::Model, DbErr> {
        let mut profile_am = profile.into_active_model();
        if let Some(contact_no) = contact_no {
            profile_am.contact_no = ActiveValue::Set(contact_no);
        }
        if let Some(address) = address {
            profile_am.address = ActiveValue::Set(address);
        }

        profile_am.update(self.db).await
    }

    pub async fn delete(&self, student_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::StudentProfile::delete_by_id(student_id)
            .exec(self.db)
            .await
    }
}
