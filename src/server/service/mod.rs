//! Service layer for business logic.
//!
//! Services validate input, open a transaction per mutating operation and coordinate the
//! repositories in `server::data`. Every database round trip runs through [`retry::RetryContext`]
//! so transient connection errors are retried with a fresh transaction.

pub mod auth;
pub mod dashboard;
pub mod fee;
pub mod fee_structure;
pub mod mail;
pub mod payment;
pub mod query;
pub mod retry;
pub mod room;
pub mod student;
