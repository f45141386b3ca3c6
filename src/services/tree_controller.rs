//! Tree Controller: loads, renders and drives the bookmark tree of the page.
//!
//! A load cycle starts in [`TreeState::Loading`]. It serves the cached snapshot
//! when the freshness check passes and fetches from the bookmark source
//! otherwise. Folder clicks and "collapse all" then update the expansion set
//! and the displayed folders without re-rendering.

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use crate::database::key_value::SharedStore;
use crate::managers::expansion_manager::{ExpansionManager, ExpansionManagerTrait};
use crate::managers::snapshot_cache::{SnapshotCache, SnapshotCacheTrait};
use crate::services::bookmark_source::BookmarkSource;
use crate::services::freshness_oracle::{Freshness, FreshnessOracle};
use crate::services::tree_renderer::{self, RenderSink};
use crate::types::bookmark::BookmarkSnapshot;
use crate::types::errors::{SourceError, TreeError};
use crate::types::visual::VisualTree;

/// Default bound on each bookmark source query.
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the displayed snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Cache,
    Source,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeState {
    Loading,
    Rendered { origin: LoadOrigin },
    /// The bookmark source failed; `refresh` starts a new attempt.
    Failed { reason: String },
}

/// Bounds a source query by `limit`.
async fn with_timeout<T, F>(limit: Duration, query: F) -> Result<T, SourceError>
where
    F: Future<Output = Result<T, SourceError>>,
{
    tokio::time::timeout(limit, query)
        .await
        .map_err(|_| SourceError::Timeout(limit))?
}

pub struct TreeController<B: BookmarkSource> {
    source: B,
    cache: SnapshotCache,
    expansion: ExpansionManager,
    visual: VisualTree,
    snapshot: Option<BookmarkSnapshot>,
    state: TreeState,
    timeout: Duration,
}

impl<B: BookmarkSource> TreeController<B> {
    /// Creates a controller in the `Loading` state.
    ///
    /// The expansion set is restored from `store` immediately.
    pub fn new(source: B, store: SharedStore, timeout: Duration) -> Self {
        Self {
            source,
            cache: SnapshotCache::new(store.clone()),
            expansion: ExpansionManager::load(store),
            visual: VisualTree::new(),
            snapshot: None,
            state: TreeState::Loading,
            timeout,
        }
    }

    /// Runs one load cycle and renders the resulting snapshot.
    ///
    /// # Errors
    /// Returns `TreeError::Source` when the bookmark source fails or times out;
    /// the controller is then in `TreeState::Failed`. Cache problems never
    /// surface: they fall back to fetching.
    pub async fn init(&mut self) -> Result<LoadOrigin, TreeError> {
        self.state = TreeState::Loading;
        match self.load_snapshot().await {
            Ok((snapshot, origin)) => {
                self.render(snapshot);
                self.state = TreeState::Rendered { origin };
                Ok(origin)
            }
            Err(e) => {
                warn!(error = %e, "bookmark tree could not be loaded");
                self.state = TreeState::Failed {
                    reason: e.to_string(),
                };
                Err(TreeError::Source(e))
            }
        }
    }

    /// Starts a new load cycle, e.g. after a manual refresh of the page.
    pub async fn refresh(&mut self) -> Result<LoadOrigin, TreeError> {
        self.init().await
    }

    async fn load_snapshot(&self) -> Result<(BookmarkSnapshot, LoadOrigin), SourceError> {
        let freshness = {
            let oracle = FreshnessOracle::new(&self.source, &self.cache);
            with_timeout(self.timeout, oracle.check()).await?
        };

        match freshness {
            Freshness::Fresh { captured_at } => match self.cache.load() {
                Some(snapshot) => {
                    info!(captured_at, "serving bookmark tree from cache");
                    return Ok((snapshot, LoadOrigin::Cache));
                }
                None => warn!("cached bookmark tree is unreadable, refetching"),
            },
            Freshness::Stale { reason, .. } => {
                info!(?reason, "refreshing bookmark tree from source");
            }
        }

        let root = with_timeout(self.timeout, self.source.get_tree()).await?;
        let snapshot = BookmarkSnapshot::new(root, freshness.live_timestamp());
        if let Err(e) = self.cache.save(&snapshot) {
            warn!(error = %e, "failed to cache bookmark tree");
        }
        Ok((snapshot, LoadOrigin::Source))
    }

    fn render(&mut self, snapshot: BookmarkSnapshot) {
        self.visual.clear();
        let container = self.visual.container();
        tree_renderer::render(&snapshot.root, &self.expansion, &mut self.visual, container);
        self.snapshot = Some(snapshot);
    }

    /// Handles a click on the label of the folder `folder_id`.
    ///
    /// Returns whether the folder is now open. Every displayed copy of a
    /// repeated ID follows the clicked one.
    pub fn toggle_folder(&mut self, folder_id: &str) -> Result<bool, TreeError> {
        if !matches!(self.state, TreeState::Rendered { .. }) {
            return Err(TreeError::NotRendered);
        }
        let handle = self
            .visual
            .find_folder(folder_id)
            .ok_or_else(|| TreeError::FolderNotFound(folder_id.to_string()))?;
        let open =
            tree_renderer::toggle_folder(&mut self.visual, handle, folder_id, &mut self.expansion)?;
        let copies = self.visual.folder_copies(folder_id).to_vec();
        for copy in copies {
            self.visual.set_open(copy, open);
        }
        Ok(open)
    }

    /// Empties the expansion set, then closes every displayed folder.
    pub fn collapse_all(&mut self) -> Result<(), TreeError> {
        self.expansion.collapse_all()?;
        let folders: Vec<_> = self.visual.folder_nodes().collect();
        for folder in folders {
            self.visual.set_open(folder, false);
        }
        Ok(())
    }

    pub fn state(&self) -> &TreeState {
        &self.state
    }

    pub fn visual(&self) -> &VisualTree {
        &self.visual
    }

    pub fn expansion(&self) -> &ExpansionManager {
        &self.expansion
    }

    /// The snapshot currently displayed.
    pub fn snapshot(&self) -> Option<&BookmarkSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn source(&self) -> &B {
        &self.source
    }
}
