use serde::{Deserialize, Serialize};

use crate::model::fee::FeeSummaryDto;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QueryCountsDto {
    pub pending: u64,
    pub in_progress: u64,
    pub resolved: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AdminDashboardDto {
    pub total_students: u64,
    pub total_rooms: u64,
    pub active_rooms: u64,
    pub total_capacity: i64,
    pub occupied_seats: i64,
    pub available_seats: i64,
    /// Percentage of seats occupied, 0 when there is no capacity
    pub occupancy_rate: f64,
    pub queries: QueryCountsDto,
    pub collected_this_month: i64,
    pub outstanding_this_month: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StudentDashboardDto {
    pub name: String,
    pub roll_no: String,
    pub room_number: Option<String>,
    pub room_type: String,
    pub fees: FeeSummaryDto,
    pub queries: QueryCountsDto,
}
