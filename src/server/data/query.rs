use entity::sea_orm_active_enums::QueryStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::util::time;

pub struct QueryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> QueryRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a pending query for a student
    pub async fn create(
        &self,
        student_id: i32,
        title: String,
        description: String,
    ) -> Result<entity::query::Model, DbErr> {
        let now = time::now();
        let query = entity::query::ActiveModel {
            student_id: ActiveValue::Set(student_id),
            title: ActiveValue::Set(title),
            description: ActiveValue::Set(description),
            status: ActiveValue::Set(QueryStatus::Pending),
            admin_response: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        query.insert(self.db).await
    }

    pub async fn get_by_id(&self, query_id: i32) -> Result<Option<entity::query::Model>, DbErr> {
        entity::prelude::Query::find_by_id(query_id)
            .one(self.db)
            .await
    }

    /// Lists queries newest first
    ///
    /// `student_id` limits the list to one student, `status` to one workflow state.
    pub async fn get_many(
        &self,
        student_id: Option<i32>,
        status: Option<QueryStatus>,
    ) -> Result<Vec<entity::query::Model>, DbErr> {
        let mut select = entity::prelude::Query::find();

        if let Some(student_id) = student_id {
            select = select.filter(entity::query::Column::StudentId.eq(student_id));
        }
        if let Some(status) = status {
            select = select.filter(entity::query::Column::Status.eq(status));
        }

        select
            .order_by_desc(entity::query::Column::CreatedAt)
            .order_by_desc(entity::query::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn update_status(
        &self,
        query: entity::query::Model,
        status: QueryStatus,
        admin_response: Option<String>,
    ) -> Result<entity::query::Model, DbErr> {
        let mut query_am = query.into_active_model();
        query_am.status = ActiveValue::Set(status);
        query_am.admin_response = ActiveValue::Set(admin_response);
        query_am.updated_at = ActiveValue::Set(time::now());

        query_am.update(self.db).await
    }

    /// Counts queries in one state, optionally for a single student
    pub async fn count_by_status(
        &self,
        student_id: Option<i32>,
        status: QueryStatus,
    ) -> Result<u64, DbErr> {
        let mut select =
            entity::prelude::Query::find().filter(entity::query::Column::Status.eq(status));

        if let Some(student_id) = student_id {
            select = select.filter(entity::query::Column::StudentId.eq(student_id));
        }

        select.count(self.db).await
    }

    pub async fn delete(&self, query_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Query::delete_by_id(query_id)
            .exec(self.db)
            .await
    }

    pub async fn delete_by_student(&self, student_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Query::delete_many()
            .filter(entity::query::Column::StudentId.eq(student_id))
            .exec(self.db)
            .await
    }
}
