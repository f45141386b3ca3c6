//! Tree Renderer: turns a bookmark tree into nested visual elements.
//!
//! The renderer knows nothing about the presentation layer: it drives a
//! [`RenderSink`], which builds whatever elements it likes and reports the
//! open/closed flag of the folders it created.

use crate::managers::expansion_manager::ExpansionManagerTrait;
use crate::types::bookmark::{BookmarkFolder, BookmarkLink, BookmarkNode, ROOT_ID};
use crate::types::errors::StoreError;

/// Label shown for the reserved root folder.
pub const ROOT_LABEL: &str = "Root";
/// Label shown for folders without a title.
pub const UNNAMED_FOLDER_LABEL: &str = "Unnamed folder";

/// Presentation backend receiving rendered elements.
///
/// Folder handles returned by `create_folder` are registered by the sink so a
/// click on the folder label can be routed to [`toggle_folder`].
pub trait RenderSink {
    type Handle: Copy;

    /// Appends a link element to `parent`.
    fn create_leaf(&mut self, parent: Self::Handle, label: &str, target: &str) -> Self::Handle;
    /// Appends a collapsible folder element to `parent`.
    fn create_folder(
        &mut self,
        parent: Self::Handle,
        folder_id: &str,
        label: &str,
        initially_open: bool,
    ) -> Self::Handle;
    /// Current visual open/closed flag of a folder.
    fn is_open(&self, folder: Self::Handle) -> bool;
    fn set_open(&mut self, folder: Self::Handle, open: bool);
}

fn non_empty(title: &Option<String>) -> Option<&str> {
    title.as_deref().filter(|t| !t.is_empty())
}

/// Text displayed for a link: its title, or the URL when untitled.
pub fn leaf_label(link: &BookmarkLink) -> &str {
    non_empty(&link.title).unwrap_or(&link.url)
}

/// Text displayed on a folder's clickable label.
pub fn folder_label(folder: &BookmarkFolder) -> &str {
    if folder.id == ROOT_ID {
        return ROOT_LABEL;
    }
    non_empty(&folder.title).unwrap_or(UNNAMED_FOLDER_LABEL)
}

/// Renders `node` and its descendants into `container`, in pre-order.
///
/// Folders start open when `expansion` lists them. Children keep their
/// snapshot order. Persisted state is only read.
pub fn render<S, E>(node: &BookmarkNode, expansion: &E, sink: &mut S, container: S::Handle)
where
    S: RenderSink,
    E: ExpansionManagerTrait + ?Sized,
{
    match node {
        BookmarkNode::Link(link) => {
            sink.create_leaf(container, leaf_label(link), &link.url);
        }
        BookmarkNode::Folder(folder) => {
            let handle = sink.create_folder(
                container,
                &folder.id,
                folder_label(folder),
                expansion.is_expanded(&folder.id),
            );
            for child in &folder.children {
                render(child, expansion, sink, handle);
            }
        }
    }
}

/// Click handler of a folder label.
///
/// Reads the folder's current visual flag, records the opposite in the
/// expansion set, then flips the flag. Returns the new flag. When persisting
/// fails the visual flag is left untouched.
pub fn toggle_folder<S, E>(
    sink: &mut S,
    folder: S::Handle,
    folder_id: &str,
    expansion: &mut E,
) -> Result<bool, StoreError>
where
    S: RenderSink,
    E: ExpansionManagerTrait + ?Sized,
{
    let open = sink.is_open(folder);
    if open {
        expansion.collapse(folder_id)?;
    } else {
        expansion.expand(folder_id)?;
    }
    sink.set_open(folder, !open);
    Ok(!open)
}
