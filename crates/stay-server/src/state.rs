use std::sync::{Arc, Mutex};

use stay_store::FileStore;

/// Shared handler state.
///
/// The store itself contains no synchronization; this mutex is the single
/// external lock that serializes every handler's access to it, including
/// the snapshot-file writes done inside `save()`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<FileStore>>,
}

impl AppState {
    pub fn new(store: FileStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}
