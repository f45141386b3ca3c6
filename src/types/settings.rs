use serde::{Deserialize, Serialize};

/// Top-level new-tab settings container.
///
/// Every section falls back to its defaults, so a config file only needs the
/// values it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct NewTabSettings {
    pub source: SourceSettings,
    pub storage: StorageSettings,
    pub page: PageSettings,
    pub logging: LoggingSettings,
}

/// Where bookmarks are read from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceSettings {
    pub browser: BrowserKind,
    /// Explicit path to a `Bookmarks` file; overrides the profile lookup.
    pub bookmarks_file: Option<String>,
    /// Upper bound for each host query, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            browser: BrowserKind::Chrome,
            bookmarks_file: None,
            timeout_ms: 5000,
        }
    }
}

/// Chromium-family browsers whose profile layout is known.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    Chrome,
    Chromium,
    Brave,
    Edge,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct StorageSettings {
    /// Explicit SQLite path; defaults to `newtab.db` in the data directory.
    pub database_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageSettings {
    pub title: String,
    pub output_path: Option<String>,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            title: "New tab".to_string(),
            output_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing-subscriber` filter directive, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
