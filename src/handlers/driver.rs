use axum::{extract::State, Json};

use crate::entities::driver::Driver;
use crate::AppState;

/// List the driver roster
pub async fn list_drivers(State(state): State<AppState>) -> Json<Vec<Driver>> {
    Json(state.roster.to_vec())
}
