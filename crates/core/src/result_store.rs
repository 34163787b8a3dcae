use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::artist::ArtistKey;
use crate::lookup::{LookupOutcome, LookupStatus, ResultEntry};

/// Process-wide map from normalized artist name to lookup state.
///
/// Thread-safe via interior `RwLock`; wrap in `Arc` and share through the
/// application state. Entries are never evicted.
pub struct ResultStore {
    entries: RwLock<HashMap<ArtistKey, ResultEntry>>,
}

impl ResultStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Start (or restart) a lookup cycle for `key`.
    ///
    /// Overwrites whatever was stored before, including resolved results.
    pub async fn mark_pending(&self, key: &ArtistKey) {
        let entry = ResultEntry::Pending {
            since: chrono::Utc::now(),
        };
        self.entries.write().await.insert(key.clone(), entry);
    }

    /// Store a terminal outcome for `key`.
    ///
    /// Writes through whether or not a pending entry exists. Returns the
    /// status that was replaced, if any.
    pub async fn resolve(&self, key: &ArtistKey, outcome: LookupOutcome) -> Option<LookupStatus> {
        let entry = ResultEntry::Resolved {
            outcome,
            resolved_at: chrono::Utc::now(),
        };
        self.entries
            .write()
            .await
            .insert(key.clone(), entry)
            .map(|previous| previous.status())
    }

    /// Current entry for `key`, if a lookup was ever triggered or resolved.
    pub async fn get(&self, key: &ArtistKey) -> Option<ResultEntry> {
        self.entries.read().await.get(key).cloned()
    }

    /// Number of keys held.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new()
    }
}
