//! Snapshot-persisted object storage for Stay.
//!
//! This crate implements the catalog's single authoritative registry of
//! live records: an in-memory table keyed by `"<TypeName>.<id>"`, backed by
//! a whole-file JSON snapshot. Queries are class-scoped; persistence is
//! all-or-nothing per [`FileStore::save`], and [`FileStore::reload`] merges
//! the snapshot back additively.
//!
//! # Design Rules
//!
//! 1. The in-memory table is the single source of truth while the process
//!    is alive; the snapshot file is only read on an explicit reload.
//! 2. Key uniqueness is implicit in the composite-key derivation; duplicate
//!    inserts silently overwrite.
//! 3. Every save serializes the entire table; there is no partial
//!    persistence and no dirty-tracking.
//! 4. The store contains no locking. Callers serialize access; the HTTP
//!    layer does so with one external mutex.
//! 5. A missing snapshot is never an error. A corrupt one is reported, with
//!    the table left untouched.

pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{composite_key, FileStore, KindFilter};
