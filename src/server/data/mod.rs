//! Data access layer repositories.
//!
//! This module contains all database repository implementations for the application.
//! Repositories provide an abstraction layer over database operations, organized per table.
//! Every repository is generic over [`sea_orm::ConnectionTrait`] so that services can run the
//! same queries against a plain connection or inside a transaction.

pub mod course;
pub mod fee_structure;
pub mod payment;
pub mod query;
pub mod room;
pub mod student;
pub mod user;
pub mod verification_token;
