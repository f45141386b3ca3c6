use serde::{Deserialize, Serialize};

/// Identifier reserved by the host for the root of the bookmark tree.
pub const ROOT_ID: &str = "0";

/// A node of the host bookmark tree.
///
/// On the wire a node keeps the host shape (`url` present means link, anything
/// else is a folder); in memory the two kinds are distinct variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawBookmarkNode", into = "RawBookmarkNode")]
pub enum BookmarkNode {
    Link(BookmarkLink),
    Folder(BookmarkFolder),
}

/// A navigable bookmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkLink {
    pub id: String,
    pub title: Option<String>,
    pub url: String,
    /// Creation time in epoch milliseconds, when the host reports it.
    pub date_added: Option<i64>,
}

/// A folder holding an ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkFolder {
    pub id: String,
    pub title: Option<String>,
    pub children: Vec<BookmarkNode>,
    pub date_added: Option<i64>,
}

/// Host representation of a node, as returned by `bookmarks.getTree()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBookmarkNode {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<BookmarkNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_added: Option<i64>,
}

impl From<RawBookmarkNode> for BookmarkNode {
    fn from(raw: RawBookmarkNode) -> Self {
        match raw.url {
            Some(url) => BookmarkNode::Link(BookmarkLink {
                id: raw.id,
                title: raw.title,
                url,
                date_added: raw.date_added,
            }),
            None => BookmarkNode::Folder(BookmarkFolder {
                id: raw.id,
                title: raw.title,
                children: raw.children.unwrap_or_default(),
                date_added: raw.date_added,
            }),
        }
    }
}

impl From<BookmarkNode> for RawBookmarkNode {
    fn from(node: BookmarkNode) -> Self {
        match node {
            BookmarkNode::Link(link) => RawBookmarkNode {
                id: link.id,
                title: link.title,
                url: Some(link.url),
                children: None,
                date_added: link.date_added,
            },
            BookmarkNode::Folder(folder) => RawBookmarkNode {
                id: folder.id,
                title: folder.title,
                url: None,
                children: Some(folder.children),
                date_added: folder.date_added,
            },
        }
    }
}

impl BookmarkNode {
    /// Convenience constructor for a link node.
    pub fn link(id: &str, title: Option<&str>, url: &str) -> Self {
        BookmarkNode::Link(BookmarkLink {
            id: id.to_string(),
            title: title.map(str::to_string),
            url: url.to_string(),
            date_added: None,
        })
    }

    /// Convenience constructor for a folder node.
    pub fn folder(id: &str, title: Option<&str>, children: Vec<BookmarkNode>) -> Self {
        BookmarkNode::Folder(BookmarkFolder {
            id: id.to_string(),
            title: title.map(str::to_string),
            children,
            date_added: None,
        })
    }

    pub fn id(&self) -> &str {
        match self {
            BookmarkNode::Link(link) => &link.id,
            BookmarkNode::Folder(folder) => &folder.id,
        }
    }

    /// Ids of every folder in the subtree, in pre-order.
    pub fn folder_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        self.collect_folder_ids(&mut ids);
        ids
    }

    fn collect_folder_ids(&self, ids: &mut Vec<String>) {
        if let BookmarkNode::Folder(folder) = self {
            ids.push(folder.id.clone());
            for child in &folder.children {
                child.collect_folder_ids(ids);
            }
        }
    }

    /// Latest `date_added` among the links of the subtree.
    ///
    /// Folders are ignored, matching the host's "recent bookmarks" query.
    pub fn most_recent_link_timestamp(&self) -> Option<i64> {
        match self {
            BookmarkNode::Link(link) => link.date_added,
            BookmarkNode::Folder(folder) => folder
                .children
                .iter()
                .filter_map(BookmarkNode::most_recent_link_timestamp)
                .max(),
        }
    }
}

/// A point-in-time capture of the bookmark tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkSnapshot {
    pub root: BookmarkNode,
    /// `date_added` of the newest bookmark when the tree was captured.
    pub captured_at: Option<i64>,
}

impl BookmarkSnapshot {
    pub fn new(root: BookmarkNode, captured_at: Option<i64>) -> Self {
        Self { root, captured_at }
    }
}
