//! Server application core modules.
//!
//! This module contains all server-side functionality of the hostel backend: HTTP routing,
//! credentials authentication with email verification, room occupancy, fee resolution,
//! payments, fee structure administration, helpdesk queries and dashboard statistics.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
