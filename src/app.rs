//! App Core.
//!
//! Wires settings, the SQLite store, the bookmark source and the tree
//! controller together for the binaries.

use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use crate::database::connection::Database;
use crate::database::key_value::SharedStore;
use crate::platform;
use crate::services::bookmark_source::ChromiumBookmarksFile;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::tree_controller::TreeController;
use crate::types::settings::NewTabSettings;
use crate::ui::page;

/// File name of the SQLite store inside the data directory.
pub const DATABASE_FILE: &str = "newtab.db";
/// File name of the generated page inside the data directory.
pub const PAGE_FILE: &str = "newtab.html";

/// Central application struct holding the settings and the controller, which
/// owns the store.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub controller: TreeController<ChromiumBookmarksFile>,
}

impl App {
    /// Loads settings from `config_path` (or the platform default), opens the
    /// store and prepares a controller in the `Loading` state.
    pub fn new(config_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = SettingsEngine::new(config_path);
        let settings = settings_engine.load()?;

        let db_path = Self::database_path(&settings);
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let store: SharedStore = Rc::new(Database::open(&db_path)?);

        let source = ChromiumBookmarksFile::new(Self::bookmarks_path(&settings));
        let controller = TreeController::new(
            source,
            store,
            Duration::from_millis(settings.source.timeout_ms),
        );

        Ok(Self {
            settings_engine,
            controller,
        })
    }

    pub fn database_path(settings: &NewTabSettings) -> PathBuf {
        settings
            .storage
            .database_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| platform::get_data_dir().join(DATABASE_FILE))
    }

    pub fn bookmarks_path(settings: &NewTabSettings) -> PathBuf {
        settings
            .source
            .bookmarks_file
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| platform::chromium_bookmarks_path(settings.source.browser))
    }

    pub fn page_path(settings: &NewTabSettings) -> PathBuf {
        settings
            .page
            .output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| platform::get_data_dir().join(PAGE_FILE))
    }

    pub fn settings(&self) -> &NewTabSettings {
        self.settings_engine.get_settings()
    }

    /// The full page for the currently displayed tree.
    pub fn page_html(&self) -> String {
        page::render_page(self.controller.visual(), &self.settings().page.title)
    }
}
