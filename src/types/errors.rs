use std::fmt;
use std::time::Duration;

// === StoreError ===

/// Errors raised by the persistent key/value store.
#[derive(Debug)]
pub enum StoreError {
    /// Database operation failed.
    DatabaseError(String),
    /// A stored value could not be serialized or parsed.
    SerializationError(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DatabaseError(msg) => write!(f, "Store database error: {}", msg),
            StoreError::SerializationError(msg) => {
                write!(f, "Store serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::DatabaseError(e.to_string())
    }
}

// === SourceError ===

/// Errors raised while querying the host bookmark source.
#[derive(Debug)]
pub enum SourceError {
    /// The host bookmark store could not be reached or read.
    Unavailable(String),
    /// The host returned data in an unexpected shape.
    Malformed(String),
    /// The host did not answer within the configured timeout.
    Timeout(Duration),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Unavailable(msg) => write!(f, "Bookmark source unavailable: {}", msg),
            SourceError::Malformed(msg) => write!(f, "Malformed bookmark data: {}", msg),
            SourceError::Timeout(after) => {
                write!(f, "Bookmark source timed out after {} ms", after.as_millis())
            }
        }
    }
}

impl std::error::Error for SourceError {}

// === TreeError ===

/// Errors surfaced by the tree controller.
#[derive(Debug)]
pub enum TreeError {
    /// The bookmark source failed; the tree could not be loaded.
    Source(SourceError),
    /// Persisting expansion state failed.
    Store(StoreError),
    /// No rendered folder carries the given ID.
    FolderNotFound(String),
    /// The operation needs a rendered tree.
    NotRendered,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::Source(e) => write!(f, "Failed to load bookmark tree: {}", e),
            TreeError::Store(e) => write!(f, "Failed to persist tree state: {}", e),
            TreeError::FolderNotFound(id) => write!(f, "Folder not found: {}", id),
            TreeError::NotRendered => write!(f, "Bookmark tree is not rendered"),
        }
    }
}

impl std::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TreeError::Source(e) => Some(e),
            TreeError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SourceError> for TreeError {
    fn from(e: SourceError) -> Self {
        TreeError::Source(e)
    }
}

impl From<StoreError> for TreeError {
    fn from(e: StoreError) -> Self {
        TreeError::Store(e)
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
