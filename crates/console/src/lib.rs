//! Terminal client for the RemindCare API.
//!
//! The console keeps the bearer token in a session file, runs every
//! navigation through the route guard in `remindcare_core::routing`, and
//! renders the chosen view as plain text.

pub mod app;
pub mod client;
pub mod config;
pub mod render;
