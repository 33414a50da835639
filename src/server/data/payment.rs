use chrono::NaiveDate;
use entity::sea_orm_active_enums::{PaymentStatus, PaymentType};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::util::time;

pub struct PaymentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PaymentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets the payment row of a student for one fee type and month bucket
    pub async fn get_for_month(
        &self,
        student_id: i32,
        payment_type: PaymentType,
        due_date: NaiveDate,
    ) -> Result<Option<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::StudentId.eq(student_id))
            .filter(entity::payment::Column::Type.eq(payment_type))
            .filter(entity::payment::Column::DueDate.eq(due_date))
            .one(self.db)
            .await
    }

    /// Creates an unpaid payment row
    pub async fn create(
        &self,
        student_id: i32,
        payment_type: PaymentType,
        amount: i64,
        due_date: NaiveDate,
    ) -> Result<entity::payment::Model, DbErr> {
        let now = time::now();
        let payment = entity::payment::ActiveModel {
            student_id: ActiveValue::Set(student_id),
            r#type: ActiveValue::Set(payment_type),
            amount: ActiveValue::Set(amount),
            paid_amount: ActiveValue::Set(0),
            due_date: ActiveValue::Set(due_date),
            status: ActiveValue::Set(PaymentStatus::Pending),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        payment.insert(self.db).await
    }

    /// Stores a new paid amount and its derived status
    pub async fn update_paid(
        &self,
        payment: entity::payment::Model,
        paid_amount: i64,
        status: PaymentStatus,
    ) -> Result<entity::payment::Model, DbErr> {
        let mut payment_am = payment.into_active_model();
        payment_am.paid_amount = ActiveValue::Set(paid_amount);
        payment_am.status = ActiveValue::Set(status);
        payment_am.updated_at = ActiveValue::Set(time::now());

        payment_am.update(self.db).await
    }

    /// Lists a student's payments, newest month first
    pub async fn get_many_by_student(
        &self,
        student_id: i32,
    ) -> Result<Vec<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::StudentId.eq(student_id))
            .order_by_desc(entity::payment::Column::DueDate)
            .order_by_asc(entity::payment::Column::Type)
            .all(self.db)
            .await
    }

    /// Lists all payments, newest month first, optionally limited to one status
    pub async fn get_all(
        &self,
        status: Option<PaymentStatus>,
    ) -> Result<Vec<entity::payment::Model>, DbErr> {
        let mut select = entity::prelude::Payment::find();

        if let Some(status) = status {
            select = select.filter(entity::payment::Column::Status.eq(status));
        }

        select
            .order_by_desc(entity::payment::Column::DueDate)
            .order_by_asc(entity::payment::Column::StudentId)
            .all(self.db)
            .await
    }

    /// Lists every payment in one month bucket
    pub async fn get_all_for_month(
        &self,
        due_date: NaiveDate,
    ) -> Result<Vec<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::DueDate.eq(due_date))
            .all(self.db)
            .await
    }

    pub async fn delete_by_student(&self, student_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Payment::delete_many()
            .filter(entity::payment::Column::StudentId.eq(student_id))
            .exec(self.db)
            .await
    }
}
