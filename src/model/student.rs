use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StudentDto {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    pub roll_no: String,
    pub course_id: i32,
    pub course_name: Option<String>,
    pub contact_no: String,
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub room_id: Option<i32>,
    pub room_number: Option<String>,
}

/// Fields a student may change on their own profile.
#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateProfileDto {
    pub name: Option<String>,
    pub contact_no: Option<String>,
    pub address: Option<String>,
}
