//! newtab-tree: writes the bookmark new-tab page.
//!
//! Usage:
//!   newtab-tree [--config PATH] [--out PATH] [render | toggle <folder-id> | collapse-all]
//!
//! Every command loads the tree (from cache when fresh), applies the requested
//! folder action and writes the resulting page.

use std::fs;
use std::path::PathBuf;
use std::process;

use newtab_tree::app::App;
use newtab_tree::logging;
use tracing::{error, info};

#[derive(Debug, PartialEq)]
enum Command {
    Render,
    Toggle(String),
    CollapseAll,
}

struct Options {
    config: Option<String>,
    out: Option<PathBuf>,
    command: Command,
}

const USAGE: &str =
    "usage: newtab-tree [--config PATH] [--out PATH] [render | toggle <folder-id> | collapse-all]";

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options, String> {
    let mut config = None;
    let mut out = None;
    let mut positional = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(args.next().ok_or("--config needs a path")?),
            "--out" => out = Some(PathBuf::from(args.next().ok_or("--out needs a path")?)),
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ => positional.push(arg),
        }
    }

    let command = match positional.as_slice() {
        [] => Command::Render,
        [cmd] if cmd == "render" => Command::Render,
        [cmd] if cmd == "collapse-all" => Command::CollapseAll,
        [cmd, id] if cmd == "toggle" => Command::Toggle(id.clone()),
        _ => return Err(USAGE.to_string()),
    };

    Ok(Options {
        config,
        out,
        command,
    })
}

async fn run(options: Options) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut app = App::new(options.config)?;
    logging::init(&app.settings().logging.filter);

    app.controller.init().await?;
    match &options.command {
        Command::Render => {}
        Command::Toggle(id) => {
            let open = app.controller.toggle_folder(id)?;
            info!(folder = %id, open, "toggled folder");
        }
        Command::CollapseAll => app.controller.collapse_all()?,
    }

    let out = options
        .out
        .unwrap_or_else(|| App::page_path(app.settings()));
    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&out, app.page_html())?;
    Ok(out)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(o) => o,
        Err(msg) => {
            eprintln!("{}", msg);
            process::exit(2);
        }
    };

    match run(options).await {
        Ok(path) => println!("{}", path.display()),
        Err(e) => {
            logging::init("error");
            error!(error = %e, "newtab-tree failed");
            process::exit(1);
        }
    }
}
