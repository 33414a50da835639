use chrono::{NaiveDate, NaiveDateTime};
use entity::sea_orm_active_enums::{PaymentStatus, Semester};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FeeStructureDto {
    pub id: i32,
    pub year: i32,
    pub semester: Semester,
    pub single_room_fees: i64,
    pub double_room_fees: i64,
    pub triple_room_fees: i64,
    pub hostel_fees: i64,
    pub mess_fees: i64,
    pub due_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

/// Body for creating or replacing a fee structure.
///
/// `semester` must be `JAN-MAY` or `JUL-DEC` and `due_date` a `YYYY-MM-DD` date at least ten
/// days in the future.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FeeStructureInputDto {
    pub year: i32,
    pub semester: String,
    pub single_room_fees: i64,
    pub double_room_fees: i64,
    pub triple_room_fees: i64,
    pub hostel_fees: i64,
    pub mess_fees: i64,
    pub due_date: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FeeBreakdownDto {
    pub base_fee: i64,
    pub room_type_fee: i64,
    pub total: i64,
    pub paid_amount: i64,
    pub balance: i64,
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
}

/// What a student owes for a month.
///
/// `hostel` and `mess` are omitted when there is neither a fee structure nor a payment
/// record to base them on.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FeeSummaryDto {
    pub room_type: String,
    pub room_number: Option<String>,
    pub year: Option<i32>,
    pub semester: Option<Semester>,
    pub is_default: bool,
    pub month: NaiveDate,
    pub hostel: Option<FeeBreakdownDto>,
    pub mess: Option<FeeBreakdownDto>,
}
