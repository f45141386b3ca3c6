// Platform paths for macOS
// Config: ~/Library/Application Support/NewTabTree
// Data:   ~/Library/Application Support/NewTabTree
// Browser profiles live under ~/Library/Application Support

use std::env;
use std::path::PathBuf;

use crate::types::settings::BrowserKind;

fn application_support() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
        .join("Library")
        .join("Application Support")
}

/// `~/Library/Application Support/NewTabTree`
pub fn get_config_dir() -> PathBuf {
    application_support().join("NewTabTree")
}

/// `~/Library/Application Support/NewTabTree`
pub fn get_data_dir() -> PathBuf {
    get_config_dir()
}

pub fn browser_user_data_dir(browser: BrowserKind) -> PathBuf {
    let base = application_support();
    match browser {
        BrowserKind::Chrome => base.join("Google").join("Chrome"),
        BrowserKind::Chromium => base.join("Chromium"),
        BrowserKind::Brave => base.join("BraveSoftware").join("Brave-Browser"),
        BrowserKind::Edge => base.join("Microsoft Edge"),
    }
}
