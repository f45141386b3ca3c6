//! Database layer.
//!
//! Provides SQLite connection management, schema migrations and the
//! string-keyed store the page persists its state in.
//!
//! # Usage
//!
//! ```no_run
//! use newtab_tree::database::{Database, KeyValueStore};
//!
//! let db = Database::open("newtab.db").expect("failed to open database");
//! db.set("openFolder", "[]").expect("failed to write");
//! ```

pub mod connection;
pub mod key_value;
pub mod migrations;

pub use connection::Database;
pub use key_value::{KeyValueStore, MemoryStore, SharedStore};
