use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /api/v1/services
///
/// Diagnostics: which AI services the process can currently resolve.
pub async fn handle_list_services(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "available": state.services.available_services() }))
}
