//! Service status and catalog statistics.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use stay_types::EntityKind;

use crate::state::AppState;

/// `GET /api/v1/status` — liveness probe.
pub async fn status() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

/// `GET /api/v1/stats` — record counts per concrete kind.
pub async fn stats(State(state): State<AppState>) -> Json<Value> {
    let store = state.store.lock().expect("store lock poisoned");
    Json(json!({
        "amenities": store.count_of(EntityKind::Amenity),
        "cities": store.count_of(EntityKind::City),
        "places": store.count_of(EntityKind::Place),
        "reviews": store.count_of(EntityKind::Review),
        "states": store.count_of(EntityKind::State),
        "users": store.count_of(EntityKind::User),
    }))
}
