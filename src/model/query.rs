use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::QueryStatus;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QueryDto {
    pub id: i32,
    pub student_id: i32,
    pub title: String,
    pub description: String,
    pub status: QueryStatus,
    pub admin_response: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateQueryDto {
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateQueryDto {
    pub status: String,
    pub admin_response: Option<String>,
}
