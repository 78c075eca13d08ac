//! Default RESTful API for Place records.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use stay_types::EntityKind;

use crate::error::ApiError;
use crate::handlers::{create_record, destroy_record, fetch_record, list_records, update_record};
use crate::state::AppState;

const KIND: EntityKind = EntityKind::Place;
const REQUIRED: &[&str] = &["user_id", "name"];

pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    list_records(&state, KIND)
}

pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    fetch_record(&state, KIND, &id)
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    create_record(&state, KIND, REQUIRED, payload)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    update_record(&state, KIND, &id, payload)
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    destroy_record(&state, KIND, &id)
}
