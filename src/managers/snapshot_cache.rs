//! Snapshot Cache.
//!
//! Stores the last fetched bookmark tree together with its freshness marker
//! under two keys: `bookmarks` (the tree, as the host returns it) and
//! `dateOfLastBookmark` (the capture timestamp). Unreadable values behave as
//! if they were absent.

use tracing::{debug, warn};

use crate::database::key_value::{get_json, keys, set_json, SharedStore};
use crate::types::bookmark::{BookmarkNode, BookmarkSnapshot};
use crate::types::errors::StoreError;

/// Trait defining snapshot cache operations.
pub trait SnapshotCacheTrait {
    /// Whether a tree is stored, without parsing it.
    fn has_snapshot(&self) -> bool;
    /// The stored capture timestamp, if present and readable.
    fn captured_at(&self) -> Option<i64>;
    /// The stored snapshot, if both keys are present and readable.
    fn load(&self) -> Option<BookmarkSnapshot>;
    /// Overwrites the tree, then the timestamp.
    fn save(&self, snapshot: &BookmarkSnapshot) -> Result<(), StoreError>;
    fn invalidate(&self) -> Result<(), StoreError>;
}

pub struct SnapshotCache {
    store: SharedStore,
}

impl SnapshotCache {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    fn load_root(&self) -> Option<BookmarkNode> {
        match get_json::<Vec<BookmarkNode>>(self.store.as_ref(), keys::BOOKMARKS) {
            Ok(Some(mut roots)) if !roots.is_empty() => Some(roots.swap_remove(0)),
            Ok(Some(_)) => {
                warn!("cached bookmark tree has no root node");
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable cached bookmark tree");
                None
            }
        }
    }
}

impl SnapshotCacheTrait for SnapshotCache {
    fn has_snapshot(&self) -> bool {
        matches!(self.store.get(keys::BOOKMARKS), Ok(Some(_)))
    }

    fn captured_at(&self) -> Option<i64> {
        match get_json::<i64>(self.store.as_ref(), keys::DATE_OF_LAST_BOOKMARK) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable cache timestamp");
                None
            }
        }
    }

    fn load(&self) -> Option<BookmarkSnapshot> {
        let captured_at = self.captured_at()?;
        let root = self.load_root()?;
        debug!(captured_at, "loaded cached bookmark tree");
        Some(BookmarkSnapshot::new(root, Some(captured_at)))
    }

    fn save(&self, snapshot: &BookmarkSnapshot) -> Result<(), StoreError> {
        set_json(
            self.store.as_ref(),
            keys::BOOKMARKS,
            std::slice::from_ref(&snapshot.root),
        )?;
        match snapshot.captured_at {
            Some(ts) => set_json(self.store.as_ref(), keys::DATE_OF_LAST_BOOKMARK, &ts),
            // Without a marker the next load is stale and refetches.
            None => self.store.clear(keys::DATE_OF_LAST_BOOKMARK),
        }
    }

    fn invalidate(&self) -> Result<(), StoreError> {
        self.store.clear(keys::BOOKMARKS)?;
        self.store.clear(keys::DATE_OF_LAST_BOOKMARK)
    }
}
