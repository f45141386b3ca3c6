//! RPC method handler for the new-tab JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches page events (folder clicks, collapse-all,
//! reloads) to the tree controller held by the `App`. `handle_page_message`
//! accepts the raw messages the page posts to a webview host.

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::expansion_manager::ExpansionManagerTrait;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::services::tree_controller::{LoadOrigin, TreeState};
use crate::ui::page;

fn origin_name(origin: LoadOrigin) -> &'static str {
    match origin {
        LoadOrigin::Cache => "cache",
        LoadOrigin::Source => "source",
    }
}

/// JSON form of the controller state.
pub fn state_json(state: &TreeState) -> Value {
    match state {
        TreeState::Loading => json!({"status": "loading"}),
        TreeState::Rendered { origin } => {
            json!({"status": "rendered", "origin": origin_name(*origin)})
        }
        TreeState::Failed { reason } => json!({"status": "failed", "reason": reason}),
    }
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &mut App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── Tree ───
        "tree.init" | "tree.refresh" => {
            let origin = app.controller.refresh().await.map_err(|e| e.to_string())?;
            Ok(json!({
                "origin": origin_name(origin),
                "tree": app.controller.visual().to_json(),
            }))
        }
        "tree.get" => Ok(json!({
            "state": state_json(app.controller.state()),
            "tree": app.controller.visual().to_json(),
            "expanded": app.controller.expansion().expanded_ids(),
        })),
        "tree.html" => Ok(json!({"html": page::render_fragment(app.controller.visual())})),
        "tree.collapse_all" => {
            app.controller.collapse_all().map_err(|e| e.to_string())?;
            Ok(json!({"collapsed": true}))
        }

        // ─── Folders ───
        "folder.toggle" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let open = app.controller.toggle_folder(id).map_err(|e| e.to_string())?;
            Ok(json!({"id": id, "open": open}))
        }

        // ─── Settings ───
        "settings.get" => serde_json::to_value(app.settings_engine.get_settings())
            .map_err(|e| e.to_string()),
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            app.settings_engine
                .set_value(key, value)
                .map_err(|e| e.to_string())?;
            // Source and storage settings apply on the next start.
            Ok(json!({"key": key, "saved": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}

/// Dispatch one message posted by the new-tab page.
///
/// The page sends `{"method": ..., "params": {...}}` through
/// `window.ipc.postMessage`; `params` may be omitted.
pub async fn handle_page_message(app: &mut App, message: &str) -> Result<Value, String> {
    let msg: Value =
        serde_json::from_str(message).map_err(|e| format!("parse error: {}", e))?;
    let method = msg
        .get("method")
        .and_then(|v| v.as_str())
        .ok_or("missing method")?;
    let params = msg.get("params").cloned().unwrap_or_else(|| json!({}));
    handle_method(app, method, &params).await
}
