//! Success envelope.
//!
//! Handlers answer `{ "data": ... }`; only `POST /auth/login` returns its
//! token body bare.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
