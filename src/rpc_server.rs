//! newtab-tree RPC Server: JSON-RPC over stdin/stdout for the new-tab page host.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"folder.toggle", "params":{"id":"42"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use std::io::{self, Write};

use newtab_tree::app::App;
use newtab_tree::logging;
use newtab_tree::rpc_handler::handle_method;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

fn respond(value: &Value) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", value);
    let _ = stdout.flush();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // NEWTAB_CONFIG overrides the platform settings path
    let config_path = std::env::var("NEWTAB_CONFIG").ok();

    let mut app = match App::new(config_path) {
        Ok(app) => app,
        Err(e) => {
            logging::init("error");
            error!(error = %e, "failed to initialize");
            respond(&json!({"event": "fatal", "error": e.to_string()}));
            std::process::exit(1);
        }
    };
    logging::init(&app.settings().logging.filter);

    respond(&json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));
    info!(
        bookmarks = %app.controller.source().path().display(),
        "rpc server ready"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(l)) => l,
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "stdin closed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                respond(&json!({"id": null, "error": format!("parse error: {}", e)}));
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&mut app, method, &params).await {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        respond(&response);
    }
}
