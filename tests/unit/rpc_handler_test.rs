//! Unit tests for the JSON-RPC method dispatch.
//!
//! Each test builds a full `App` against a temporary settings file, SQLite
//! store and Chromium `Bookmarks` file.

use std::fs;
use std::future::Future;
use std::path::PathBuf;

use newtab_tree::app::App;
use newtab_tree::rpc_handler::{handle_method, handle_page_message, state_json};
use newtab_tree::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use newtab_tree::managers::expansion_manager::ExpansionManagerTrait;
use newtab_tree::services::tree_controller::{LoadOrigin, TreeState};
use serde_json::{json, Value};
use tempfile::TempDir;

const BOOKMARKS_FILE: &str = r#"{
    "roots": {
        "bookmark_bar": {
            "id": "1", "name": "Bookmarks bar", "type": "folder",
            "children": [
                {"id": "5", "name": "Rust", "type": "url", "url": "https://rust-lang.org",
                 "date_added": "13253932800000000"},
                {"id": "6", "name": "Docs", "type": "folder",
                 "children": [
                    {"id": "7", "name": "docs.rs", "type": "url", "url": "https://docs.rs",
                     "date_added": "13253932900000000"}
                 ]}
            ]
        },
        "other": {"id": "2", "name": "Other bookmarks", "type": "folder", "children": []}
    },
    "version": 1
}"#;

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

/// Writes a settings file pointing at a bookmarks file and database inside
/// `dir`, and returns the settings path.
fn write_config(dir: &TempDir, with_bookmarks: bool) -> String {
    let bookmarks = dir.path().join("Bookmarks");
    if with_bookmarks {
        fs::write(&bookmarks, BOOKMARKS_FILE).unwrap();
    }
    let config = dir.path().join("settings.json").to_string_lossy().to_string();
    let mut engine = SettingsEngine::new(Some(config.clone()));
    engine
        .set_value(
            "source.bookmarks_file",
            json!(bookmarks.to_string_lossy().to_string()),
        )
        .unwrap();
    engine
        .set_value(
            "storage.database_path",
            json!(dir.path().join("newtab.db").to_string_lossy().to_string()),
        )
        .unwrap();
    config
}

fn setup() -> (TempDir, App) {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, true);
    let app = App::new(Some(config)).unwrap();
    (dir, app)
}

fn call(app: &mut App, method: &str, params: Value) -> Result<Value, String> {
    block_on(handle_method(app, method, &params))
}

#[test]
fn test_state_json_shapes() {
    assert_eq!(state_json(&TreeState::Loading), json!({"status": "loading"}));
    assert_eq!(
        state_json(&TreeState::Rendered {
            origin: LoadOrigin::Cache
        }),
        json!({"status": "rendered", "origin": "cache"})
    );
    assert_eq!(
        state_json(&TreeState::Failed {
            reason: "boom".to_string()
        }),
        json!({"status": "failed", "reason": "boom"})
    );
}

#[test]
fn test_app_uses_configured_paths() {
    let (dir, app) = setup();
    assert_eq!(App::database_path(app.settings()), dir.path().join("newtab.db"));
    assert_eq!(App::bookmarks_path(app.settings()), dir.path().join("Bookmarks"));
    assert!(dir.path().join("newtab.db").exists());
}

#[test]
fn test_tree_get_before_init_reports_loading() {
    let (_dir, mut app) = setup();
    let result = call(&mut app, "tree.get", json!({})).unwrap();
    assert_eq!(result["state"]["status"], "loading");
    assert_eq!(result["tree"], json!({"kind": "container", "children": []}));
}

#[test]
fn test_init_then_refresh_hits_cache() {
    let (_dir, mut app) = setup();

    let first = call(&mut app, "tree.init", json!({})).unwrap();
    assert_eq!(first["origin"], "source");
    let root = &first["tree"]["children"][0];
    assert_eq!(root["id"], "0");
    assert_eq!(root["label"], "Root");
    assert_eq!(root["children"][0]["label"], "Bookmarks bar");

    let second = call(&mut app, "tree.refresh", json!({})).unwrap();
    assert_eq!(second["origin"], "cache");
    assert_eq!(second["tree"], first["tree"]);
}

#[test]
fn test_folder_toggle_round_trip() {
    let (_dir, mut app) = setup();
    call(&mut app, "tree.init", json!({})).unwrap();

    let opened = call(&mut app, "folder.toggle", json!({"id": "6"})).unwrap();
    assert_eq!(opened, json!({"id": "6", "open": true}));

    let state = call(&mut app, "tree.get", json!({})).unwrap();
    assert_eq!(state["expanded"], json!(["6"]));

    let closed = call(&mut app, "folder.toggle", json!({"id": "6"})).unwrap();
    assert_eq!(closed["open"], false);
}

#[test]
fn test_expansion_survives_restart() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, true);
    {
        let mut app = App::new(Some(config.clone())).unwrap();
        call(&mut app, "tree.init", json!({})).unwrap();
        call(&mut app, "folder.toggle", json!({"id": "6"})).unwrap();
    }

    let mut app = App::new(Some(config)).unwrap();
    let result = call(&mut app, "tree.init", json!({})).unwrap();
    assert_eq!(result["origin"], "cache");
    assert_eq!(app.controller.visual().open_folder_ids(), vec!["6"]);
}

#[test]
fn test_folder_toggle_errors() {
    let (_dir, mut app) = setup();

    let err = call(&mut app, "folder.toggle", json!({"id": "6"})).unwrap_err();
    assert_eq!(err, "Bookmark tree is not rendered");

    call(&mut app, "tree.init", json!({})).unwrap();
    assert_eq!(
        call(&mut app, "folder.toggle", json!({})).unwrap_err(),
        "missing id"
    );
    assert_eq!(
        call(&mut app, "folder.toggle", json!({"id": "404"})).unwrap_err(),
        "Folder not found: 404"
    );
}

#[test]
fn test_collapse_all_clears_expansion() {
    let (_dir, mut app) = setup();
    call(&mut app, "tree.init", json!({})).unwrap();
    call(&mut app, "folder.toggle", json!({"id": "0"})).unwrap();
    call(&mut app, "folder.toggle", json!({"id": "6"})).unwrap();

    let result = call(&mut app, "tree.collapse_all", json!({})).unwrap();
    assert_eq!(result, json!({"collapsed": true}));

    let state = call(&mut app, "tree.get", json!({})).unwrap();
    assert_eq!(state["expanded"], json!([]));
    assert!(app.controller.visual().open_folder_ids().is_empty());
}

#[test]
fn test_tree_html_renders_fragment() {
    let (_dir, mut app) = setup();
    call(&mut app, "tree.init", json!({})).unwrap();

    let result = call(&mut app, "tree.html", json!({})).unwrap();
    let html = result["html"].as_str().unwrap();
    assert!(html.starts_with("<ul>"));
    assert!(html.contains("<summary data-folder-id=\"6\">Docs</summary>"));
    assert!(html.contains("href=\"https://docs.rs\""));
}

#[test]
fn test_missing_bookmarks_file_fails_load() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, false);
    let mut app = App::new(Some(config)).unwrap();

    let err = call(&mut app, "tree.init", json!({})).unwrap_err();
    assert!(err.contains("unavailable"), "unexpected error: {}", err);

    let state = call(&mut app, "tree.get", json!({})).unwrap();
    assert_eq!(state["state"]["status"], "failed");

    fs::write(dir.path().join("Bookmarks"), BOOKMARKS_FILE).unwrap();
    let result = call(&mut app, "tree.refresh", json!({})).unwrap();
    assert_eq!(result["origin"], "source");
}

#[test]
fn test_settings_get_and_set() {
    let (_dir, mut app) = setup();

    let settings = call(&mut app, "settings.get", json!({})).unwrap();
    assert_eq!(settings["source"]["timeout_ms"], 5000);

    let saved = call(
        &mut app,
        "settings.set",
        json!({"key": "page.title", "value": "Start"}),
    )
    .unwrap();
    assert_eq!(saved, json!({"key": "page.title", "saved": true}));
    assert_eq!(app.settings().page.title, "Start");

    let err = call(&mut app, "settings.set", json!({"key": "page.nope", "value": 1})).unwrap_err();
    assert!(err.contains("page.nope"));
    assert_eq!(
        call(&mut app, "settings.set", json!({"value": 1})).unwrap_err(),
        "missing key"
    );
}

#[test]
fn test_unknown_method() {
    let (_dir, mut app) = setup();
    assert_eq!(
        call(&mut app, "tree.explode", json!({})).unwrap_err(),
        "unknown method: tree.explode"
    );
}

#[test]
fn test_page_path_prefers_configured_output() {
    let (dir, mut app) = setup();
    let out: PathBuf = dir.path().join("page.html");
    app.settings_engine
        .set_value("page.output_path", json!(out.to_string_lossy().to_string()))
        .unwrap();
    assert_eq!(App::page_path(app.settings()), out);
}

#[test]
fn test_page_messages_reach_the_controller() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, true);
    {
        let mut app = App::new(Some(config.clone())).unwrap();
        call(&mut app, "tree.init", json!({})).unwrap();

        // Exactly what the page script posts for a click on "Docs"
        let result = block_on(handle_page_message(
            &mut app,
            r#"{"method":"folder.toggle","params":{"id":"6"}}"#,
        ))
        .unwrap();
        assert_eq!(result, json!({"id": "6", "open": true}));
    }

    let mut app = App::new(Some(config)).unwrap();
    call(&mut app, "tree.init", json!({})).unwrap();
    assert_eq!(app.controller.visual().open_folder_ids(), vec!["6"]);

    let result = block_on(handle_page_message(&mut app, r#"{"method":"tree.collapse_all"}"#)).unwrap();
    assert_eq!(result, json!({"collapsed": true}));
    assert!(app.controller.expansion().expanded_ids().is_empty());
}

#[test]
fn test_bad_page_messages_are_rejected() {
    let (_dir, mut app) = setup();

    let err = block_on(handle_page_message(&mut app, "{not json")).unwrap_err();
    assert!(err.starts_with("parse error"));
    assert_eq!(
        block_on(handle_page_message(&mut app, r#"{"params":{}}"#)).unwrap_err(),
        "missing method"
    );
}
