// Platform paths for Linux
// Config: ~/.config/newtab-tree
// Data:   ~/.local/share/newtab-tree
// Browser profiles live under ~/.config

use std::env;
use std::path::PathBuf;

use crate::types::settings::BrowserKind;

const APP_DIR: &str = "newtab-tree";

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// `$XDG_CONFIG_HOME`, or `~/.config` when unset.
fn xdg_config_home() -> PathBuf {
    env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns the configuration directory on Linux.
pub fn get_config_dir() -> PathBuf {
    xdg_config_home().join(APP_DIR)
}

/// Returns the data directory on Linux.
/// Uses `$XDG_DATA_HOME/newtab-tree` if set, otherwise `~/.local/share/newtab-tree`.
pub fn get_data_dir() -> PathBuf {
    env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local").join("share"))
        .join(APP_DIR)
}

pub fn browser_user_data_dir(browser: BrowserKind) -> PathBuf {
    let base = xdg_config_home();
    match browser {
        BrowserKind::Chrome => base.join("google-chrome"),
        BrowserKind::Chromium => base.join("chromium"),
        BrowserKind::Brave => base.join("BraveSoftware").join("Brave-Browser"),
        BrowserKind::Edge => base.join("microsoft-edge"),
    }
}
