//! newtab-view: shows the new-tab page in a native webview window.
//!
//! Folder clicks and "collapse all" are persisted through the page's IPC
//! bridge. Set `NEWTAB_CONFIG` to use a settings file other than the platform
//! default.

use newtab_tree::logging;
use newtab_tree::ui::webview_app;
use tracing::error;

fn main() {
    let config_path = std::env::var("NEWTAB_CONFIG").ok();
    if let Err(e) = webview_app::run(config_path) {
        logging::init("error");
        error!(error = %e, "newtab-view failed");
        std::process::exit(1);
    }
}
