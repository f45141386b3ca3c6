//! newtab-tree: a new-tab page showing the browser's bookmark tree.
//!
//! The tree is cached between page loads and only refetched when a bookmark was
//! added since the cached capture. Expanded folders are remembered.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
pub mod ui;
