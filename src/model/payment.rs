use chrono::{NaiveDate, NaiveDateTime};
use entity::sea_orm_active_enums::{PaymentStatus, PaymentType};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PaymentDto {
    pub id: i32,
    pub student_id: i32,
    pub payment_type: PaymentType,
    pub amount: i64,
    pub paid_amount: i64,
    pub balance: i64,
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
    pub updated_at: NaiveDateTime,
}
