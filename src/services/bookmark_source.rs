//! Bookmark Source: read-only access to the host browser's bookmark tree.
//!
//! [`ChromiumBookmarksFile`] reads the `Bookmarks` JSON file kept in a
//! Chromium-family profile directory and presents it the way the extension
//! bookmarks API does: a root folder with id `0` holding the bar, "other" and
//! mobile folders, with timestamps in epoch milliseconds.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::types::bookmark::{BookmarkFolder, BookmarkLink, BookmarkNode, ROOT_ID};
use crate::types::errors::SourceError;

/// Host API exposing the bookmark tree.
///
/// Both calls may suspend; callers await them one at a time.
#[allow(async_fn_in_trait)]
pub trait BookmarkSource {
    /// The full tree, rooted at the node with id [`ROOT_ID`].
    async fn get_tree(&self) -> Result<BookmarkNode, SourceError>;
    /// `date_added` of the most recently created bookmark, or `None` when the
    /// collection holds no bookmarks.
    async fn most_recent_timestamp(&self) -> Result<Option<i64>, SourceError>;
}

/// Milliseconds between 1601-01-01 (Chromium's epoch) and 1970-01-01.
const WINDOWS_EPOCH_OFFSET_MS: i64 = 11_644_473_600_000;

/// Converts a Chromium timestamp (microseconds since 1601, as a decimal
/// string) to epoch milliseconds.
pub fn chromium_time_to_epoch_ms(raw: &str) -> Option<i64> {
    let micros: i64 = raw.trim().parse().ok()?;
    if micros <= 0 {
        return None;
    }
    Some(micros / 1000 - WINDOWS_EPOCH_OFFSET_MS)
}

#[derive(Debug, Deserialize)]
struct ChromiumFile {
    roots: ChromiumRoots,
}

#[derive(Debug, Deserialize)]
struct ChromiumRoots {
    bookmark_bar: Option<ChromiumNode>,
    other: Option<ChromiumNode>,
    synced: Option<ChromiumNode>,
}

#[derive(Debug, Deserialize)]
struct ChromiumNode {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    kind: String,
    url: Option<String>,
    #[serde(default)]
    children: Vec<ChromiumNode>,
    date_added: Option<String>,
}

impl ChromiumNode {
    fn into_bookmark(self) -> BookmarkNode {
        let title = if self.name.is_empty() { None } else { Some(self.name) };
        let date_added = self.date_added.as_deref().and_then(chromium_time_to_epoch_ms);
        match self.url {
            Some(url) if self.kind != "folder" => BookmarkNode::Link(BookmarkLink {
                id: self.id,
                title,
                url,
                date_added,
            }),
            _ => BookmarkNode::Folder(BookmarkFolder {
                id: self.id,
                title,
                children: self
                    .children
                    .into_iter()
                    .map(ChromiumNode::into_bookmark)
                    .collect(),
                date_added,
            }),
        }
    }
}

/// Parses the contents of a Chromium `Bookmarks` file into a rooted tree.
pub fn parse_chromium_bookmarks(content: &str) -> Result<BookmarkNode, SourceError> {
    let file: ChromiumFile =
        serde_json::from_str(content).map_err(|e| SourceError::Malformed(e.to_string()))?;
    let children = [file.roots.bookmark_bar, file.roots.other, file.roots.synced]
        .into_iter()
        .flatten()
        .map(ChromiumNode::into_bookmark)
        .collect();
    Ok(BookmarkNode::Folder(BookmarkFolder {
        id: ROOT_ID.to_string(),
        title: None,
        children,
        date_added: None,
    }))
}

/// Bookmark source reading a Chromium profile's `Bookmarks` file.
pub struct ChromiumBookmarksFile {
    path: PathBuf,
}

impl ChromiumBookmarksFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<BookmarkNode, SourceError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SourceError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;
        parse_chromium_bookmarks(&content)
    }
}

impl BookmarkSource for ChromiumBookmarksFile {
    async fn get_tree(&self) -> Result<BookmarkNode, SourceError> {
        debug!(path = %self.path.display(), "reading bookmark tree");
        self.read().await
    }

    async fn most_recent_timestamp(&self) -> Result<Option<i64>, SourceError> {
        Ok(self.read().await?.most_recent_link_timestamp())
    }
}
