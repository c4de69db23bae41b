//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the signed-in staff member from a Bearer token.
//! - [`rbac::RequireAuth`] -- Requires any signed-in staff member.
//! - [`rbac::RequireRosterManager`] -- Requires a role that may remove patients.

pub mod auth;
pub mod rbac;
