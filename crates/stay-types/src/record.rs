//! The polymorphic record type.
//!
//! [`Record`] wraps every concrete model in one internally-tagged enum. The
//! serde tag is the snapshot format's `__class__` marker, so serializing a
//! record embeds the marker and deserializing reconstructs the right
//! variant — there is no separate reflection step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ModelError;
use crate::kind::EntityKind;
use crate::models::{fresh_id, Amenity, BaseModel, City, Place, Review, State, User};
use crate::timestamp;

/// Attribute names that no update path may overwrite.
pub const RESERVED_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

/// One persisted domain object.
///
/// The variant IS the record's runtime type: stores filter on
/// [`Record::kind`], and snapshots round-trip through the `__class__` tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__class__")]
pub enum Record {
    Amenity(Amenity),
    BaseModel(BaseModel),
    City(City),
    Place(Place),
    Review(Review),
    State(State),
    User(User),
}

impl Record {
    /// The discriminant for this record's concrete variant.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Amenity(_) => EntityKind::Amenity,
            Self::BaseModel(_) => EntityKind::BaseModel,
            Self::City(_) => EntityKind::City,
            Self::Place(_) => EntityKind::Place,
            Self::Review(_) => EntityKind::Review,
            Self::State(_) => EntityKind::State,
            Self::User(_) => EntityKind::User,
        }
    }

    /// The record's unique identifier.
    pub fn id(&self) -> &str {
        match self {
            Self::Amenity(m) => &m.id,
            Self::BaseModel(m) => &m.id,
            Self::City(m) => &m.id,
            Self::Place(m) => &m.id,
            Self::Review(m) => &m.id,
            Self::State(m) => &m.id,
            Self::User(m) => &m.id,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Amenity(m) => m.created_at,
            Self::BaseModel(m) => m.created_at,
            Self::City(m) => m.created_at,
            Self::Place(m) => m.created_at,
            Self::Review(m) => m.created_at,
            Self::State(m) => m.created_at,
            Self::User(m) => m.created_at,
        }
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        match self {
            Self::Amenity(m) => m.updated_at,
            Self::BaseModel(m) => m.updated_at,
            Self::City(m) => m.updated_at,
            Self::Place(m) => m.updated_at,
            Self::Review(m) => m.updated_at,
            Self::State(m) => m.updated_at,
            Self::User(m) => m.updated_at,
        }
    }

    /// Advance `updated_at` to the current time.
    pub fn touch(&mut self) {
        let now = timestamp::now();
        match self {
            Self::Amenity(m) => m.updated_at = now,
            Self::BaseModel(m) => m.updated_at = now,
            Self::City(m) => m.updated_at = now,
            Self::Place(m) => m.updated_at = now,
            Self::Review(m) => m.updated_at = now,
            Self::State(m) => m.updated_at = now,
            Self::User(m) => m.updated_at = now,
        }
    }

    /// Serialize to a plain attribute map, `__class__` marker included.
    pub fn to_attrs(&self) -> Result<Value, ModelError> {
        serde_json::to_value(self).map_err(|e| ModelError::Serialization(e.to_string()))
    }

    /// Reconstruct a record from an attribute map.
    ///
    /// The map must carry a recognized `__class__` marker; remaining fields
    /// populate the variant, with unknown keys ignored and omitted
    /// type-specific columns defaulted.
    pub fn from_attrs(attrs: Value) -> Result<Self, ModelError> {
        match attrs.get("__class__") {
            Some(Value::String(name)) => {
                if EntityKind::from_name(name).is_none() {
                    return Err(ModelError::UnknownClass(name.clone()));
                }
            }
            _ => return Err(ModelError::MissingClass),
        }
        serde_json::from_value(attrs).map_err(|e| ModelError::Serialization(e.to_string()))
    }

    /// Build a brand-new record of `kind` from a request payload.
    ///
    /// A caller-supplied `id` or timestamp is honored; anything missing is
    /// stamped fresh (UUIDv4, current time). Unknown payload keys are
    /// ignored.
    pub fn from_payload(kind: EntityKind, payload: Map<String, Value>) -> Result<Self, ModelError> {
        let mut attrs = payload;
        attrs.insert("__class__".into(), Value::String(kind.as_str().into()));
        if !attrs.get("id").map(Value::is_string).unwrap_or(false) {
            attrs.insert("id".into(), Value::String(fresh_id()));
        }
        let now = timestamp::to_wire(&timestamp::now());
        if !attrs.contains_key("created_at") {
            attrs.insert("created_at".into(), Value::String(now.clone()));
        }
        if !attrs.contains_key("updated_at") {
            attrs.insert("updated_at".into(), Value::String(now));
        }
        Self::from_attrs(Value::Object(attrs))
    }

    /// Apply an update payload to this record, field by field.
    ///
    /// Only the variant's own columns are writable: `id`, `created_at`, and
    /// `updated_at` are never overwritten, unknown keys are ignored, and a
    /// value whose JSON type does not match the column is skipped. Finishes
    /// by touching `updated_at`.
    pub fn apply_update(&mut self, payload: &Map<String, Value>) {
        for (key, value) in payload {
            if RESERVED_FIELDS.contains(&key.as_str()) {
                continue;
            }
            self.apply_field(key, value);
        }
        self.touch();
    }

    fn apply_field(&mut self, key: &str, value: &Value) {
        match self {
            Self::BaseModel(_) => {}
            Self::User(m) => match key {
                "name" => set_string(&mut m.name, value),
                "email" => set_string(&mut m.email, value),
                "password" => set_string(&mut m.password, value),
                _ => {}
            },
            Self::State(m) => {
                if key == "name" {
                    set_string(&mut m.name, value);
                }
            }
            Self::Amenity(m) => {
                if key == "name" {
                    set_string(&mut m.name, value);
                }
            }
            Self::City(m) => match key {
                "state_id" => set_string(&mut m.state_id, value),
                "name" => set_string(&mut m.name, value),
                _ => {}
            },
            Self::Place(m) => match key {
                "city_id" => set_string(&mut m.city_id, value),
                "user_id" => set_string(&mut m.user_id, value),
                "name" => set_string(&mut m.name, value),
                "description" => set_string(&mut m.description, value),
                "number_rooms" => set_i64(&mut m.number_rooms, value),
                "number_bathrooms" => set_i64(&mut m.number_bathrooms, value),
                "max_guest" => set_i64(&mut m.max_guest, value),
                "price_by_night" => set_i64(&mut m.price_by_night, value),
                "latitude" => set_f64(&mut m.latitude, value),
                "longitude" => set_f64(&mut m.longitude, value),
                "amenity_ids" => set_string_list(&mut m.amenity_ids, value),
                _ => {}
            },
            Self::Review(m) => match key {
                "place_id" => set_string(&mut m.place_id, value),
                "user_id" => set_string(&mut m.user_id, value),
                "text" => set_string(&mut m.text, value),
                _ => {}
            },
        }
    }
}

fn set_string(dst: &mut String, value: &Value) {
    if let Some(s) = value.as_str() {
        *dst = s.to_string();
    }
}

fn set_i64(dst: &mut i64, value: &Value) {
    if let Some(n) = value.as_i64() {
        *dst = n;
    }
}

fn set_f64(dst: &mut f64, value: &Value) {
    if let Some(n) = value.as_f64() {
        *dst = n;
    }
}

fn set_string_list(dst: &mut Vec<String>, value: &Value) {
    if let Some(items) = value.as_array() {
        if items.iter().all(Value::is_string) {
            *dst = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
        }
    }
}

impl From<Amenity> for Record {
    fn from(m: Amenity) -> Self {
        Self::Amenity(m)
    }
}

impl From<BaseModel> for Record {
    fn from(m: BaseModel) -> Self {
        Self::BaseModel(m)
    }
}

impl From<City> for Record {
    fn from(m: City) -> Self {
        Self::City(m)
    }
}

impl From<Place> for Record {
    fn from(m: Place) -> Self {
        Self::Place(m)
    }
}

impl From<Review> for Record {
    fn from(m: Review) -> Self {
        Self::Review(m)
    }
}

impl From<State> for Record {
    fn from(m: State) -> Self {
        Self::State(m)
    }
}

impl From<User> for Record {
    fn from(m: User) -> Self {
        Self::User(m)
    }
}
