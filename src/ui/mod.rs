//! Presentation layer.
//!
//! The page is plain HTML: folders are `<details>`/`<summary>` pairs and links
//! are anchors, mirroring the rendered [`VisualTree`](crate::types::visual::VisualTree).
//! Clicks travel back to the controller through the host IPC bridge, which
//! `webview_app` provides when the `gui` feature is enabled.

pub mod page;

#[cfg(feature = "gui")]
pub mod webview_app;
