//! The snapshot-persisted record table.
//!
//! [`FileStore`] owns a single in-memory mapping from composite key
//! (`"<TypeName>.<id>"`) to live [`Record`], plus the path of its JSON
//! snapshot file. While the process is alive the table is the single source
//! of truth; the snapshot is only consulted on an explicit [`reload`].
//!
//! The store performs no synchronization of its own: callers are expected
//! to serialize access (the HTTP layer holds one external mutex). Saves
//! write the snapshot in place with no temp-file rename or partial-write
//! protection.
//!
//! [`reload`]: FileStore::reload

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use stay_types::{EntityKind, Record};

use crate::error::{StoreError, StoreResult};

/// Derive the table key for a kind + identifier pair.
///
/// Key uniqueness is implicit in this derivation; it is never checked
/// separately, so inserting a second record with the same kind and id
/// silently overwrites the first.
pub fn composite_key(kind: EntityKind, id: &str) -> String {
    format!("{}.{}", kind.as_str(), id)
}

/// A class filter: either a kind value or a class-name string.
///
/// Name strings exist for callers that carry the class name rather than the
/// enum (route segments, snapshot markers). An unrecognized name resolves to
/// no kind and therefore matches nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KindFilter {
    Kind(EntityKind),
    Name(String),
}

impl KindFilter {
    /// The kind this filter selects, if the name is recognized.
    pub fn resolve(&self) -> Option<EntityKind> {
        match self {
            Self::Kind(kind) => Some(*kind),
            Self::Name(name) => EntityKind::from_name(name),
        }
    }
}

impl From<EntityKind> for KindFilter {
    fn from(kind: EntityKind) -> Self {
        Self::Kind(kind)
    }
}

impl From<&str> for KindFilter {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for KindFilter {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// In-memory record table backed by a whole-file JSON snapshot.
pub struct FileStore {
    objects: HashMap<String, Record>,
    path: PathBuf,
}

impl FileStore {
    /// Create a cold store over `path`: empty table, nothing loaded.
    ///
    /// The snapshot file is not touched until [`save`] or [`reload`].
    ///
    /// [`save`]: FileStore::save
    /// [`reload`]: FileStore::reload
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            objects: HashMap::new(),
            path: path.into(),
        }
    }

    /// The snapshot file path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The entire table, keyed by composite key.
    ///
    /// This is the backing structure itself, not a copy.
    pub fn all(&self) -> &HashMap<String, Record> {
        &self.objects
    }

    /// A new mapping holding only the records matching `filter`.
    ///
    /// Empty when nothing matches, including for unrecognized name filters.
    pub fn all_of(&self, filter: impl Into<KindFilter>) -> HashMap<String, &Record> {
        let Some(kind) = filter.into().resolve() else {
            return HashMap::new();
        };
        self.objects
            .iter()
            .filter(|(_, record)| record.kind() == kind)
            .map(|(key, record)| (key.clone(), record))
            .collect()
    }

    /// Look up one record by kind and id.
    ///
    /// Returns `None` for an unrecognized name filter or a missing id. The
    /// lookup is a linear scan over the matching class; there is no
    /// secondary index.
    pub fn get(&self, filter: impl Into<KindFilter>, id: &str) -> Option<&Record> {
        let kind = filter.into().resolve()?;
        self.objects
            .values()
            .find(|record| record.kind() == kind && record.id() == id)
    }

    /// Mutable variant of [`get`], for update-in-place.
    ///
    /// [`get`]: FileStore::get
    pub fn get_mut(&mut self, filter: impl Into<KindFilter>, id: &str) -> Option<&mut Record> {
        let kind = filter.into().resolve()?;
        self.objects
            .values_mut()
            .find(|record| record.kind() == kind && record.id() == id)
    }

    /// Number of records in the table, every kind counted.
    pub fn count(&self) -> usize {
        self.objects.len()
    }

    /// Number of records matching `filter`.
    pub fn count_of(&self, filter: impl Into<KindFilter>) -> usize {
        self.all_of(filter).len()
    }

    /// Insert `record` under its composite key, overwriting any holder of
    /// that key. Never persists to disk.
    pub fn add(&mut self, record: Record) {
        let key = composite_key(record.kind(), record.id());
        self.objects.insert(key, record);
    }

    /// Remove the entry under `record`'s composite key.
    ///
    /// Silently a no-op when the key is absent.
    pub fn remove(&mut self, record: &Record) {
        let key = composite_key(record.kind(), record.id());
        self.objects.remove(&key);
    }

    /// Serialize the whole table into the snapshot file.
    ///
    /// The snapshot is one JSON object keyed like the table, each value the
    /// record's attribute map with its `__class__` marker. Any prior file
    /// content is truncated. Serialization and write failures propagate.
    pub fn save(&self) -> StoreResult<()> {
        let mut snapshot = Map::with_capacity(self.objects.len());
        for (key, record) in &self.objects {
            snapshot.insert(key.clone(), record.to_attrs()?);
        }
        let payload = serde_json::to_string(&Value::Object(snapshot))
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, payload)?;
        tracing::info!(
            path = %self.path.display(),
            records = self.objects.len(),
            "saved snapshot"
        );
        Ok(())
    }

    /// Merge the snapshot file's records into the table.
    ///
    /// Additive: existing entries stay unless the snapshot holds the same
    /// composite key, so local mutations survive a reload except where the
    /// file overwrites them. Returns the number of records merged.
    ///
    /// A missing file is not an error — the table is left as it was and
    /// `Ok(0)` is returned. An unreadable or unparseable file is reported
    /// as an error with the table untouched. Entries whose `__class__` is
    /// unrecognized (or whose fields fail to decode) are skipped with a
    /// warning; the rest of the file still loads.
    pub fn reload(&mut self) -> StoreResult<usize> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no snapshot file, nothing to reload");
                return Ok(0);
            }
            Err(e) => return Err(StoreError::Io(e)),
        };
        let entries: Map<String, Value> =
            serde_json::from_str(&raw).map_err(|e| StoreError::CorruptSnapshot {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        let mut merged = 0;
        for (key, attrs) in entries {
            match Record::from_attrs(attrs) {
                Ok(record) => {
                    self.objects.insert(key, record);
                    merged += 1;
                }
                Err(e) => {
                    tracing::warn!(%key, error = %e, "skipping undecodable snapshot entry");
                }
            }
        }
        tracing::info!(
            path = %self.path.display(),
            records = merged,
            "reloaded snapshot"
        );
        Ok(merged)
    }

    /// Teardown hook: resynchronize from disk before handoff.
    ///
    /// An alias for [`reload`].
    ///
    /// [`reload`]: FileStore::reload
    pub fn close(&mut self) -> StoreResult<usize> {
        self.reload()
    }
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore")
            .field("path", &self.path)
            .field("record_count", &self.objects.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stay_types::{Amenity, Place, State, User};
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("file.json"));
        (dir, store)
    }

    fn user(id: &str, name: &str) -> Record {
        let mut user = User::new(name);
        user.id = id.to_string();
        Record::from(user)
    }

    fn place(id: &str, name: &str) -> Record {
        let mut place = Place::new("c1", "u1", name);
        place.id = id.to_string();
        Record::from(place)
    }

    // -----------------------------------------------------------------------
    // Table operations
    // -----------------------------------------------------------------------

    #[test]
    fn add_then_get_returns_the_stored_record() {
        let (_dir, mut store) = temp_store();
        store.add(user("1", "Alice"));

        let found = store.get(EntityKind::User, "1").expect("should exist");
        assert_eq!(found.id(), "1");
        assert_eq!(found.kind(), EntityKind::User);
    }

    #[test]
    fn get_missing_id_on_empty_table_is_none() {
        let (_dir, store) = temp_store();
        assert!(store.get(EntityKind::User, "missing-id").is_none());
    }

    #[test]
    fn get_accepts_class_name_strings() {
        let (_dir, mut store) = temp_store();
        store.add(user("1", "Alice"));

        assert!(store.get("User", "1").is_some());
        assert!(store.get("Booking", "1").is_none());
    }

    #[test]
    fn duplicate_add_silently_overwrites() {
        let (_dir, mut store) = temp_store();
        store.add(user("1", "Alice"));
        store.add(user("1", "Alicia"));

        assert_eq!(store.count(), 1);
        match store.get(EntityKind::User, "1").unwrap() {
            Record::User(u) => assert_eq!(u.name, "Alicia"),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn remove_then_get_is_none() {
        let (_dir, mut store) = temp_store();
        let record = user("1", "Alice");
        store.add(record.clone());
        store.remove(&record);

        assert!(store.get(EntityKind::User, "1").is_none());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn remove_of_never_inserted_record_is_a_noop() {
        let (_dir, mut store) = temp_store();
        store.add(user("1", "Alice"));
        store.remove(&user("2", "Bob"));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let (_dir, mut store) = temp_store();
        store.add(user("1", "Alice"));

        if let Some(Record::User(u)) = store.get_mut(EntityKind::User, "1") {
            u.name = "Alicia".to_string();
        } else {
            panic!("record missing");
        }
        match store.get(EntityKind::User, "1").unwrap() {
            Record::User(u) => assert_eq!(u.name, "Alicia"),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // Filters and counts
    // -----------------------------------------------------------------------

    #[test]
    fn all_of_never_leaks_other_kinds() {
        let (_dir, mut store) = temp_store();
        store.add(user("1", "Alice"));
        store.add(place("1", "Loft"));
        store.add(Record::from(State::new("Oregon")));

        let users = store.all_of(EntityKind::User);
        assert_eq!(users.len(), 1);
        assert!(users.values().all(|r| r.kind() == EntityKind::User));
    }

    #[test]
    fn all_of_unrecognized_name_is_empty() {
        let (_dir, mut store) = temp_store();
        store.add(user("1", "Alice"));
        assert!(store.all_of("Booking").is_empty());
    }

    #[test]
    fn count_totals_every_kind() {
        let (_dir, mut store) = temp_store();
        store.add(user("1", "Alice"));
        store.add(place("1", "Loft"));
        store.add(Record::from(Amenity::new("wifi")));

        assert_eq!(store.count(), 3);
        assert_eq!(store.count(), store.all().len());
        assert_eq!(store.count_of(EntityKind::User), 1);
        assert_eq!(store.count_of(EntityKind::Review), 0);
    }

    #[test]
    fn same_id_across_kinds_does_not_collide() {
        let (_dir, mut store) = temp_store();
        store.add(user("5", "Alice"));
        store.add(place("5", "Loft"));

        assert_eq!(store.count(), 2);
        assert_eq!(store.get(EntityKind::User, "5").unwrap().kind(), EntityKind::User);
        assert_eq!(store.get(EntityKind::Place, "5").unwrap().kind(), EntityKind::Place);
    }

    #[test]
    fn composite_key_format() {
        assert_eq!(composite_key(EntityKind::User, "1"), "User.1");
        assert_eq!(composite_key(EntityKind::BaseModel, "x-y"), "BaseModel.x-y");
    }

    // -----------------------------------------------------------------------
    // Snapshot persistence
    // -----------------------------------------------------------------------

    #[test]
    fn save_then_fresh_store_reload_roundtrips() {
        let (_dir, mut store) = temp_store();
        store.add(user("1", "Alice"));
        store.add(place("p1", "Loft"));
        store.save().unwrap();

        let mut fresh = FileStore::new(store.path());
        let merged = fresh.reload().unwrap();
        assert_eq!(merged, 2);

        let reloaded = fresh.get(EntityKind::User, "1").expect("should exist");
        assert_eq!(
            reloaded.to_attrs().unwrap(),
            store.get(EntityKind::User, "1").unwrap().to_attrs().unwrap()
        );
        match reloaded {
            Record::User(u) => assert_eq!(u.name, "Alice"),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn snapshot_keys_are_composite_keys_with_class_markers() {
        let (_dir, mut store) = temp_store();
        store.add(user("1", "Alice"));
        store.save().unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let parsed: Map<String, Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["User.1"]["__class__"], "User");
        assert_eq!(parsed["User.1"]["name"], "Alice");
    }

    #[test]
    fn save_truncates_prior_snapshot() {
        let (_dir, mut store) = temp_store();
        let alice = user("1", "Alice");
        store.add(alice.clone());
        store.add(user("2", "Bob"));
        store.save().unwrap();

        store.remove(&alice);
        store.save().unwrap();

        let mut fresh = FileStore::new(store.path());
        fresh.reload().unwrap();
        assert_eq!(fresh.count(), 1);
        assert!(fresh.get(EntityKind::User, "1").is_none());
    }

    #[test]
    fn reload_missing_file_is_an_ok_noop() {
        let (_dir, mut store) = temp_store();
        store.add(user("1", "Alice"));

        let merged = store.reload().unwrap();
        assert_eq!(merged, 0);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn reload_corrupt_file_errors_and_leaves_table_untouched() {
        let (_dir, mut store) = temp_store();
        store.add(user("1", "Alice"));
        std::fs::write(store.path(), "{not json").unwrap();

        let err = store.reload().unwrap_err();
        assert!(matches!(err, StoreError::CorruptSnapshot { .. }));
        assert_eq!(store.count(), 1);
        assert!(store.get(EntityKind::User, "1").is_some());
    }

    #[test]
    fn reload_skips_unknown_class_entries() {
        let (_dir, mut store) = temp_store();
        std::fs::write(
            store.path(),
            r#"{
                "User.1": {
                    "__class__": "User",
                    "id": "1",
                    "created_at": "2017-09-28T21:03:54.052298",
                    "updated_at": "2017-09-28T21:03:54.052298",
                    "name": "Alice"
                },
                "Booking.9": {"__class__": "Booking", "id": "9"}
            }"#,
        )
        .unwrap();

        let merged = store.reload().unwrap();
        assert_eq!(merged, 1);
        assert!(store.get(EntityKind::User, "1").is_some());
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn reload_is_additive_and_preserves_local_mutations() {
        let (_dir, mut store) = temp_store();
        store.add(user("1", "Alice"));
        store.save().unwrap();

        // Mutate locally after the save: a reload must not revert this,
        // except where the snapshot holds the same key.
        store.add(user("2", "Bob"));
        if let Some(Record::User(u)) = store.get_mut(EntityKind::User, "1") {
            u.name = "Alicia".to_string();
        }

        store.reload().unwrap();
        assert_eq!(store.count(), 2);
        assert!(store.get(EntityKind::User, "2").is_some());
        match store.get(EntityKind::User, "1").unwrap() {
            // Key User.1 exists in the snapshot, so the reload overwrote it.
            Record::User(u) => assert_eq!(u.name, "Alice"),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn close_is_a_reload_alias() {
        let (_dir, mut store) = temp_store();
        store.add(user("1", "Alice"));
        store.save().unwrap();

        let mut fresh = FileStore::new(store.path());
        let merged = fresh.close().unwrap();
        assert_eq!(merged, 1);
        assert!(fresh.get(EntityKind::User, "1").is_some());
    }

    #[test]
    fn debug_format() {
        let (_dir, mut store) = temp_store();
        store.add(user("1", "Alice"));
        let debug = format!("{store:?}");
        assert!(debug.contains("FileStore"));
        assert!(debug.contains("record_count"));
    }
}
