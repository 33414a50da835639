//! Utility functions and helpers for server operations.
//!
//! This module provides reusable helpers for common server tasks: date arithmetic for fee
//! periods and payment months, input validation shared by the services, and password hashing.

pub mod password;
pub mod time;
pub mod validate;
