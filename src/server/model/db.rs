//! Database model type aliases.
//!
//! This module provides convenient type aliases for SeaORM database entity models used
//! throughout the application. These aliases simplify type signatures and provide a single
//! point of reference for database model types.

/// Account used to log in, either an admin or a student.
pub type UserModel = entity::user::Model;

/// Student extension of a user: roll number, course, contact details and room assignment.
pub type StudentProfileModel = entity::student_profile::Model;

/// Hostel room; `occupied_seats` counts the profiles whose `room_id` points at it.
pub type RoomModel = entity::room::Model;

/// Fee amounts for one (year, semester) period.
pub type FeeStructureModel = entity::fee_structure::Model;

/// Monthly hostel or mess payment record for a student.
pub type PaymentModel = entity::payment::Model;

/// Helpdesk query raised by a student.
pub type QueryModel = entity::query::Model;
