//! Test fixture modules for database record creation.
//!
//! - `factory` - in-memory models that never touch the database
//! - `hostel` - inserts users, students, rooms, fees, payments and queries

pub mod factory;
pub mod hostel;
