//! Freshness Oracle: decides whether the cached snapshot may be shown.
//!
//! The cached tree is fresh when its capture timestamp equals the live
//! most-recent-bookmark timestamp. Only new bookmarks change that timestamp, so
//! deletions, moves and renames after the capture go unnoticed.

use tracing::debug;

use crate::managers::snapshot_cache::SnapshotCacheTrait;
use crate::services::bookmark_source::BookmarkSource;
use crate::types::errors::SourceError;

/// Outcome of a freshness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// The cache matches the live collection.
    Fresh { captured_at: i64 },
    /// The cache is missing or outdated. `live` is the timestamp observed
    /// during the check, reused as the marker of the next snapshot.
    Stale {
        live: Option<i64>,
        reason: StaleReason,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    NoSnapshot,
    NoMarker,
    Mismatch,
}

impl Freshness {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Freshness::Fresh { .. })
    }

    /// Live most-recent timestamp seen by the check.
    pub fn live_timestamp(&self) -> Option<i64> {
        match self {
            Freshness::Fresh { captured_at } => Some(*captured_at),
            Freshness::Stale { live, .. } => *live,
        }
    }
}

/// Exact-equality comparison of cached and live timestamps.
pub fn timestamps_match(cached: Option<i64>, live: Option<i64>) -> bool {
    matches!((cached, live), (Some(c), Some(l)) if c == l)
}

pub struct FreshnessOracle<'a, B: BookmarkSource, C: SnapshotCacheTrait> {
    source: &'a B,
    cache: &'a C,
}

impl<'a, B: BookmarkSource, C: SnapshotCacheTrait> FreshnessOracle<'a, B, C> {
    pub fn new(source: &'a B, cache: &'a C) -> Self {
        Self { source, cache }
    }

    /// Queries the source once and classifies the cache.
    pub async fn check(&self) -> Result<Freshness, SourceError> {
        let live = self.source.most_recent_timestamp().await?;
        let cached = self.cache.captured_at();

        let freshness = match (self.cache.has_snapshot(), cached) {
            (false, _) => Freshness::Stale {
                live,
                reason: StaleReason::NoSnapshot,
            },
            (true, None) => Freshness::Stale {
                live,
                reason: StaleReason::NoMarker,
            },
            (true, Some(captured_at)) if timestamps_match(cached, live) => {
                Freshness::Fresh { captured_at }
            }
            (true, Some(_)) => Freshness::Stale {
                live,
                reason: StaleReason::Mismatch,
            },
        };
        debug!(?cached, ?live, ?freshness, "checked cache freshness");
        Ok(freshness)
    }

    pub async fn is_fresh(&self) -> Result<bool, SourceError> {
        Ok(self.check().await?.is_fresh())
    }
}
