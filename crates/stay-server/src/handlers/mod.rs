//! REST handlers, one module per entity type.
//!
//! Every entity exposes the same five routes, each translating to one or
//! two store calls. The shared helpers below hold the store interaction;
//! the per-entity modules pin the kind and its creation-payload
//! requirements.

pub mod amenities;
pub mod cities;
pub mod places;
pub mod reviews;
pub mod states;
pub mod status;
pub mod users;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{Map, Value};

use stay_types::{EntityKind, Record};

use crate::error::ApiError;
use crate::state::AppState;

/// Unwrap a request body into a JSON object, or fail with the API's
/// canonical 400 message.
fn require_object(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Map<String, Value>, ApiError> {
    let Json(value) = payload.map_err(|_| ApiError::BadRequest("Not a JSON".into()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::BadRequest("Not a JSON".into())),
    }
}

pub(crate) fn list_records(state: &AppState, kind: EntityKind) -> Result<Json<Value>, ApiError> {
    let store = state.store.lock().expect("store lock poisoned");
    let mut items = Vec::with_capacity(store.count_of(kind));
    for record in store.all_of(kind).into_values() {
        items.push(record.to_attrs()?);
    }
    Ok(Json(Value::Array(items)))
}

pub(crate) fn fetch_record(
    state: &AppState,
    kind: EntityKind,
    id: &str,
) -> Result<Json<Value>, ApiError> {
    let store = state.store.lock().expect("store lock poisoned");
    let record = store.get(kind, id).ok_or(ApiError::NotFound)?;
    Ok(Json(record.to_attrs()?))
}

pub(crate) fn create_record(
    state: &AppState,
    kind: EntityKind,
    required: &[&str],
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let attrs = require_object(payload)?;
    for field in required {
        if !attrs.contains_key(*field) {
            return Err(ApiError::BadRequest(format!("Missing {field}")));
        }
    }
    let record = Record::from_payload(kind, attrs)?;
    let body = record.to_attrs()?;

    let mut store = state.store.lock().expect("store lock poisoned");
    store.add(record);
    store.save()?;
    Ok((StatusCode::CREATED, Json(body)))
}

pub(crate) fn update_record(
    state: &AppState,
    kind: EntityKind,
    id: &str,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let mut store = state.store.lock().expect("store lock poisoned");
    // Missing records 404 before the body is inspected.
    if store.get(kind, id).is_none() {
        return Err(ApiError::NotFound);
    }
    let attrs = require_object(payload)?;
    let record = store.get_mut(kind, id).ok_or(ApiError::NotFound)?;
    record.apply_update(&attrs);
    let body = record.to_attrs()?;
    store.save()?;
    Ok(Json(body))
}

pub(crate) fn destroy_record(
    state: &AppState,
    kind: EntityKind,
    id: &str,
) -> Result<Json<Value>, ApiError> {
    let mut store = state.store.lock().expect("store lock poisoned");
    let record = store.get(kind, id).cloned().ok_or(ApiError::NotFound)?;
    store.remove(&record);
    store.save()?;
    Ok(Json(Value::Object(Map::new())))
}
