//! Utility functions for controller request handling.
//!
//! This module provides the session guards used by protected endpoints: any logged in user,
//! administrators only, or students with a profile.

pub mod get_user;
