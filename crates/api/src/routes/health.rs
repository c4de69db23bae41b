//! Liveness probe, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use remindcare_db::TableCounts;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
    /// Rows currently held in memory, per table.
    pub records: TableCounts,
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    let records = remindcare_db::table_counts(&state.pool).await;
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        records,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
