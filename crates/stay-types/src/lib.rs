//! Entity model for Stay.
//!
//! This crate provides the catalog's record types and the serialization
//! rules they share. Every other Stay crate depends on `stay-types`.
//!
//! # Key Types
//!
//! - [`Record`] — internally-tagged enum over every concrete model; the
//!   serde tag is the snapshot format's `__class__` marker
//! - [`EntityKind`] — the per-record variant discriminator
//! - [`User`], [`Place`], [`Review`], [`Amenity`], [`City`], [`State`],
//!   [`BaseModel`] — the concrete models
//! - [`timestamp`] — the naive-UTC microsecond wire format for
//!   `created_at` / `updated_at`

pub mod error;
pub mod kind;
pub mod models;
pub mod record;
pub mod timestamp;

pub use error::ModelError;
pub use kind::EntityKind;
pub use models::{fresh_id, Amenity, BaseModel, City, Place, Review, State, User};
pub use record::{Record, RESERVED_FIELDS};
