// Platform paths for Windows
// Config: %APPDATA%/NewTabTree
// Data:   %APPDATA%/NewTabTree
// Browser profiles live under %LOCALAPPDATA%/<vendor>/User Data

use std::env;
use std::path::PathBuf;

use crate::types::settings::BrowserKind;

/// `%APPDATA%/NewTabTree`
pub fn get_config_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("NewTabTree")
}

/// `%APPDATA%/NewTabTree`
pub fn get_data_dir() -> PathBuf {
    get_config_dir()
}

pub fn browser_user_data_dir(browser: BrowserKind) -> PathBuf {
    let local_appdata = PathBuf::from(
        env::var("LOCALAPPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Local")),
    );
    let vendor = match browser {
        BrowserKind::Chrome => local_appdata.join("Google").join("Chrome"),
        BrowserKind::Chromium => local_appdata.join("Chromium"),
        BrowserKind::Brave => local_appdata.join("BraveSoftware").join("Brave-Browser"),
        BrowserKind::Edge => local_appdata.join("Microsoft").join("Edge"),
    };
    vendor.join("User Data")
}
