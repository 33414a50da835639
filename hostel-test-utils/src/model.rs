//! Database model type aliases for test utilities.
//!
//! These aliases match those in the main hostel crate to keep tests consistent.

pub type UserModel = entity::user::Model;
pub type CourseModel = entity::course::Model;
pub type RoomModel = entity::room::Model;
pub type StudentProfileModel = entity::student_profile::Model;
pub type FeeStructureModel = entity::fee_structure::Model;
pub type PaymentModel = entity::payment::Model;
pub type QueryModel = entity::query::Model;
pub type VerificationTokenModel = entity::verification_token::Model;
