use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::UserRole;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub email_verified_at: Option<NaiveDateTime>,
}

/// Body of a student self-registration request.
///
/// Dates are accepted as `YYYY-MM-DD` strings and validated server-side so that malformed
/// input produces a 400 with a readable message rather than a deserialization rejection.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RegisterDto {
    pub name: String,
    pub email: String,
    pub password: String,
    pub roll_no: String,
    pub course_id: i32,
    pub contact_no: String,
    pub date_of_birth: String,
    pub address: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}
