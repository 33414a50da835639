use std::fmt;

use serde::{Deserialize, Serialize};

/// Room type, always derived from a room's capacity and never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum RoomType {
    Single,
    Double,
    Triple,
}

impl RoomType {
    /// 1 seat is a single, 2 a double and anything larger is billed as a triple.
    pub fn from_capacity(capacity: i32) -> Self {
        match capacity {
            1 => Self::Single,
            2 => Self::Double,
            _ => Self::Triple,
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "Single"),
            Self::Double => write!(f, "Double"),
            Self::Triple => write!(f, "Triple"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RoomDto {
    pub id: i32,
    pub room_number: String,
    pub room_type: RoomType,
    pub capacity: i32,
    pub occupied_seats: i32,
    pub available_seats: i32,
    pub floor: i32,
    pub block: String,
    pub is_active: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateRoomDto {
    pub room_number: String,
    pub capacity: i32,
    pub floor: i32,
    pub block: String,
    pub is_active: Option<bool>,
}

/// Partial room update, absent fields are left untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateRoomDto {
    pub room_number: Option<String>,
    pub capacity: Option<i32>,
    pub floor: Option<i32>,
    pub block: Option<String>,
    pub is_active: Option<bool>,
}

/// Assign a student to `room_id`, or vacate their room with `null`.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AssignRoomDto {
    pub room_id: Option<i32>,
}
