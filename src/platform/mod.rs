// Platform abstraction
// Provides platform-specific paths for Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

use crate::types::settings::BrowserKind;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Name of the profile holding a browser's default bookmarks.
pub const DEFAULT_PROFILE: &str = "Default";

/// Returns the platform-specific configuration directory.
///
/// - **Linux**: `~/.config/newtab-tree` (or `$XDG_CONFIG_HOME/newtab-tree`)
/// - **macOS**: `~/Library/Application Support/NewTabTree`
/// - **Windows**: `%APPDATA%/NewTabTree`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the platform-specific data directory, home of `newtab.db`.
///
/// - **Linux**: `~/.local/share/newtab-tree` (or `$XDG_DATA_HOME/newtab-tree`)
/// - **macOS**: `~/Library/Application Support/NewTabTree`
/// - **Windows**: `%APPDATA%/NewTabTree`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}

/// Returns the user-data directory of a Chromium-family browser.
pub fn browser_user_data_dir(browser: BrowserKind) -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::browser_user_data_dir(browser)
    }
    #[cfg(target_os = "macos")]
    {
        macos::browser_user_data_dir(browser)
    }
    #[cfg(target_os = "windows")]
    {
        windows::browser_user_data_dir(browser)
    }
}

/// Returns the `Bookmarks` file of the browser's default profile.
pub fn chromium_bookmarks_path(browser: BrowserKind) -> PathBuf {
    browser_user_data_dir(browser)
        .join(DEFAULT_PROFILE)
        .join("Bookmarks")
}
