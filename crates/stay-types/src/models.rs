//! The concrete catalog models.
//!
//! Every model carries the shared identity fields (`id`, `created_at`,
//! `updated_at`) plus its own columns. Type-specific fields default when a
//! snapshot omits them, so sparse entries written by older processes still
//! parse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timestamp;

/// A fresh hyphenated UUIDv4 identifier.
pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generic base variant: identity fields only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaseModel {
    pub id: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl BaseModel {
    pub fn new() -> Self {
        let now = timestamp::now();
        Self {
            id: fresh_id(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        Self::new()
    }
}

/// A registered account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        let now = timestamp::now();
        Self {
            id: fresh_id(),
            created_at: now,
            updated_at: now,
            name: name.into(),
            email: String::new(),
            password: String::new(),
        }
    }
}

/// A top-level region grouping cities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub name: String,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        let now = timestamp::now();
        Self {
            id: fresh_id(),
            created_at: now,
            updated_at: now,
            name: name.into(),
        }
    }
}

/// A city within a state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub state_id: String,
    #[serde(default)]
    pub name: String,
}

impl City {
    pub fn new(state_id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = timestamp::now();
        Self {
            id: fresh_id(),
            created_at: now,
            updated_at: now,
            state_id: state_id.into(),
            name: name.into(),
        }
    }
}

/// A bookable feature (wifi, pool, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub name: String,
}

impl Amenity {
    pub fn new(name: impl Into<String>) -> Self {
        let now = timestamp::now();
        Self {
            id: fresh_id(),
            created_at: now,
            updated_at: now,
            name: name.into(),
        }
    }
}

/// A rentable listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub city_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub number_rooms: i64,
    #[serde(default)]
    pub number_bathrooms: i64,
    #[serde(default)]
    pub max_guest: i64,
    #[serde(default)]
    pub price_by_night: i64,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub amenity_ids: Vec<String>,
}

impl Place {
    pub fn new(
        city_id: impl Into<String>,
        user_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let now = timestamp::now();
        Self {
            id: fresh_id(),
            created_at: now,
            updated_at: now,
            city_id: city_id.into(),
            user_id: user_id.into(),
            name: name.into(),
            description: String::new(),
            number_rooms: 0,
            number_bathrooms: 0,
            max_guest: 0,
            price_by_night: 0,
            latitude: 0.0,
            longitude: 0.0,
            amenity_ids: Vec::new(),
        }
    }
}

/// A user's review of a place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub text: String,
}

impl Review {
    pub fn new(
        place_id: impl Into<String>,
        user_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let now = timestamp::now();
        Self {
            id: fresh_id(),
            created_at: now,
            updated_at: now,
            place_id: place_id.into(),
            user_id: user_id.into(),
            text: text.into(),
        }
    }
}
