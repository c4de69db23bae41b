//! Well-known staff role name constants.
//!
//! These appear verbatim in the `role` claim of issued tokens.

pub const ROLE_DOCTOR: &str = "doctor";
pub const ROLE_NURSE: &str = "nurse";
pub const ROLE_ADMIN: &str = "admin";

/// Roles allowed to delete patients from the roster.
pub const ROSTER_MANAGER_ROLES: &[&str] = &[ROLE_DOCTOR, ROLE_ADMIN];
