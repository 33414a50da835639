//! Data transfer objects shared by the HTTP API.
//!
//! Every request and response body exchanged with clients is defined here, separate from the
//! SeaORM entities so the wire format can evolve independently of the schema.

pub mod api;
pub mod course;
pub mod dashboard;
pub mod fee;
pub mod payment;
pub mod query;
pub mod room;
pub mod student;
pub mod user;
