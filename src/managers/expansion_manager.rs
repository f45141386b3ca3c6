//! Expansion Manager.
//!
//! Tracks which folders are expanded. The set is the source of truth for
//! expansion state and is written back in full after every mutation under the
//! `openFolder` key.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::database::key_value::{get_json, keys, set_json, SharedStore};
use crate::types::errors::StoreError;

/// Trait defining expansion state operations.
pub trait ExpansionManagerTrait {
    fn is_expanded(&self, folder_id: &str) -> bool;
    fn expand(&mut self, folder_id: &str) -> Result<(), StoreError>;
    fn collapse(&mut self, folder_id: &str) -> Result<(), StoreError>;
    /// Empties the set with a single write.
    fn collapse_all(&mut self) -> Result<(), StoreError>;
    fn expanded_ids(&self) -> Vec<String>;
}

/// Expansion set backed by a shared key/value store.
pub struct ExpansionManager {
    store: SharedStore,
    open_folders: BTreeSet<String>,
}

impl ExpansionManager {
    /// Restores the set persisted in `store`.
    ///
    /// A missing key yields an empty set. A value that does not parse as a list
    /// of IDs is discarded with a warning and also yields an empty set.
    pub fn load(store: SharedStore) -> Self {
        let open_folders = match get_json::<Vec<String>>(store.as_ref(), keys::OPEN_FOLDER) {
            Ok(Some(ids)) => ids.into_iter().collect(),
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                warn!(error = %e, "discarding unreadable expansion state");
                BTreeSet::new()
            }
        };
        debug!(count = open_folders.len(), "restored expansion state");
        Self {
            store,
            open_folders,
        }
    }

    /// Persists `next` and adopts it only once the write succeeded.
    fn commit(&mut self, next: BTreeSet<String>) -> Result<(), StoreError> {
        let ids: Vec<&String> = next.iter().collect();
        set_json(self.store.as_ref(), keys::OPEN_FOLDER, &ids)?;
        self.open_folders = next;
        Ok(())
    }
}

impl ExpansionManagerTrait for ExpansionManager {
    fn is_expanded(&self, folder_id: &str) -> bool {
        self.open_folders.contains(folder_id)
    }

    fn expand(&mut self, folder_id: &str) -> Result<(), StoreError> {
        let mut next = self.open_folders.clone();
        next.insert(folder_id.to_string());
        self.commit(next)
    }

    fn collapse(&mut self, folder_id: &str) -> Result<(), StoreError> {
        let mut next = self.open_folders.clone();
        next.remove(folder_id);
        self.commit(next)
    }

    fn collapse_all(&mut self) -> Result<(), StoreError> {
        self.commit(BTreeSet::new())
    }

    fn expanded_ids(&self) -> Vec<String> {
        self.open_folders.iter().cloned().collect()
    }
}
