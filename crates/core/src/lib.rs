//! Core domain logic for RemindCare.
//!
//! This crate has zero internal deps so it can be shared by the API server,
//! the console client, and any future tooling.
//!
//! - [`token`] -- bearer-token claims and the token codec.
//! - [`session`] -- the client-side session store and its storage collaborator.
//! - [`query`] -- search / status filter / sort over in-memory record lists.
//! - [`routing`] -- declarative view table and the route guard.
//! - [`patient`], [`reminder`], [`followup`], [`profile`], [`dashboard`] --
//!   domain types and their validation rules.

pub mod dashboard;
pub mod error;
pub mod followup;
pub mod patient;
pub mod profile;
pub mod query;
pub mod reminder;
pub mod roles;
pub mod routing;
pub mod session;
pub mod token;
pub mod types;
pub mod validation;
