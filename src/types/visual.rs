//! Retained visual tree produced by rendering a bookmark snapshot.
//!
//! Nodes live in an arena and refer to their children by index. Index `0` is the
//! top-level container that the caller hands to the renderer.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{json, Value};

use crate::services::tree_renderer::RenderSink;

/// Handle to a node of a [`VisualTree`].
pub type NodeIndex = usize;

/// What a visual node displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisualKind {
    /// The caller-supplied top-level container.
    Container,
    /// A collapsible folder with a clickable label.
    Folder {
        folder_id: String,
        label: String,
        open: bool,
    },
    /// A navigable link.
    Leaf { label: String, target: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualNode {
    pub kind: VisualKind,
    pub children: Vec<NodeIndex>,
}

/// In-memory rendering sink and display state.
#[derive(Debug, Clone)]
pub struct VisualTree {
    nodes: Vec<VisualNode>,
    folders: HashMap<String, Vec<NodeIndex>>,
}

impl Default for VisualTree {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualTree {
    /// Creates a tree holding only the empty top-level container.
    pub fn new() -> Self {
        Self {
            nodes: vec![VisualNode {
                kind: VisualKind::Container,
                children: Vec::new(),
            }],
            folders: HashMap::new(),
        }
    }

    /// The top-level container.
    pub fn container(&self) -> NodeIndex {
        0
    }

    /// Drops every rendered node, keeping an empty container.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    pub fn node(&self, index: NodeIndex) -> Option<&VisualNode> {
        self.nodes.get(index)
    }

    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        self.nodes
            .get(index)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Display text of a folder or leaf.
    pub fn label(&self, index: NodeIndex) -> Option<&str> {
        match &self.nodes.get(index)?.kind {
            VisualKind::Folder { label, .. } | VisualKind::Leaf { label, .. } => Some(label),
            VisualKind::Container => None,
        }
    }

    /// Labels of the direct children of `index`, in display order.
    pub fn child_labels(&self, index: NodeIndex) -> Vec<&str> {
        self.children(index)
            .iter()
            .filter_map(|&child| self.label(child))
            .collect()
    }

    /// Node displaying the folder with the given bookmark ID.
    ///
    /// If a snapshot repeats an ID, the first rendered occurrence is returned.
    pub fn find_folder(&self, folder_id: &str) -> Option<NodeIndex> {
        self.folder_copies(folder_id).first().copied()
    }

    /// Every node displaying the folder with the given bookmark ID, in render
    /// order.
    pub fn folder_copies(&self, folder_id: &str) -> &[NodeIndex] {
        self.folders
            .get(folder_id)
            .map(|copies| copies.as_slice())
            .unwrap_or(&[])
    }

    /// Every folder node, in render order.
    pub fn folder_nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| matches!(n.kind, VisualKind::Folder { .. }))
            .map(|(i, _)| i)
    }

    /// Folder IDs whose visual flag is currently open.
    pub fn open_folder_ids(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|n| match &n.kind {
                VisualKind::Folder {
                    folder_id,
                    open: true,
                    ..
                } => Some(folder_id.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Nested JSON form of the tree, used by the RPC bridge.
    pub fn to_json(&self) -> Value {
        self.node_json(self.container())
    }

    fn node_json(&self, index: NodeIndex) -> Value {
        let children: Vec<Value> = self
            .children(index)
            .iter()
            .map(|&c| self.node_json(c))
            .collect();
        match &self.nodes[index].kind {
            VisualKind::Container => json!({ "kind": "container", "children": children }),
            VisualKind::Folder {
                folder_id,
                label,
                open,
            } => json!({
                "kind": "folder",
                "id": folder_id,
                "label": label,
                "open": open,
                "children": children,
            }),
            VisualKind::Leaf { label, target } => {
                json!({ "kind": "leaf", "label": label, "target": target })
            }
        }
    }

    fn push(&mut self, parent: NodeIndex, kind: VisualKind) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(VisualNode {
            kind,
            children: Vec::new(),
        });
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(index);
        }
        index
    }
}

impl RenderSink for VisualTree {
    type Handle = NodeIndex;

    fn create_leaf(&mut self, parent: NodeIndex, label: &str, target: &str) -> NodeIndex {
        self.push(
            parent,
            VisualKind::Leaf {
                label: label.to_string(),
                target: target.to_string(),
            },
        )
    }

    fn create_folder(
        &mut self,
        parent: NodeIndex,
        folder_id: &str,
        label: &str,
        initially_open: bool,
    ) -> NodeIndex {
        let index = self.push(
            parent,
            VisualKind::Folder {
                folder_id: folder_id.to_string(),
                label: label.to_string(),
                open: initially_open,
            },
        );
        self.folders
            .entry(folder_id.to_string())
            .or_default()
            .push(index);
        index
    }

    fn is_open(&self, folder: NodeIndex) -> bool {
        matches!(
            self.nodes.get(folder).map(|n| &n.kind),
            Some(VisualKind::Folder { open: true, .. })
        )
    }

    fn set_open(&mut self, folder: NodeIndex, value: bool) {
        if let Some(VisualKind::Folder { open, .. }) = self.nodes.get_mut(folder).map(|n| &mut n.kind) {
            *open = value;
        }
    }
}
