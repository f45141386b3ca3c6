//! HTML adapter for the rendered bookmark tree.
//!
//! The page reports folder clicks and the collapse-all control to its host as
//! JSON messages `{"method": ..., "params": {...}}` sent through
//! `window.ipc.postMessage`. The `newtab-view` webview (feature `gui`) provides
//! that global and hands each message to
//! [`handle_page_message`](crate::rpc_handler::handle_page_message). Any other
//! embedding host must do the same, for example by forwarding each message as
//! the `method`/`params` of a `newtab-rpc` request. Opened without a host, the
//! folders still open and close but nothing is persisted.

use crate::types::visual::{NodeIndex, VisualKind, VisualTree};

/// Script posting folder clicks and the collapse-all control to the host.
///
/// The `<details>` element toggles itself; the message keeps the persisted
/// expansion set in step with it.
const PAGE_JS: &str = r##"
function post(method, params) {
  var message = JSON.stringify({ method: method, params: params || {} });
  if (window.ipc && window.ipc.postMessage) {
    window.ipc.postMessage(message);
  } else {
    console.warn("newtab: no host bridge, not saved: " + message);
  }
}
document.querySelectorAll("summary[data-folder-id]").forEach(function (summary) {
  summary.addEventListener("click", function () {
    post("folder.toggle", { id: summary.dataset.folderId });
  });
});
document.querySelector("#js-reduce-folder").addEventListener("click", function () {
  document.querySelectorAll("details").forEach(function (d) { d.removeAttribute("open"); });
  post("tree.collapse_all");
});
"##;

const PAGE_CSS: &str = "body{font-family:-apple-system,BlinkMacSystemFont,\"Segoe UI\",Helvetica,Arial,sans-serif;margin:2rem}\
ul{list-style:none;padding-left:1.25rem;margin:0}\
summary{cursor:pointer;user-select:none}\
a{text-decoration:none}";

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the tree as an HTML fragment: one `<ul>` holding the top level.
pub fn render_fragment(tree: &VisualTree) -> String {
    let mut html = String::new();
    write_list(tree, tree.container(), &mut html);
    html
}

fn write_list(tree: &VisualTree, parent: NodeIndex, html: &mut String) {
    html.push_str("<ul>");
    for &child in tree.children(parent) {
        write_node(tree, child, html);
    }
    html.push_str("</ul>");
}

fn write_node(tree: &VisualTree, index: NodeIndex, html: &mut String) {
    let Some(node) = tree.node(index) else {
        return;
    };
    match &node.kind {
        VisualKind::Leaf { label, target } => {
            let target = escape_html(target);
            html.push_str(&format!(
                "<li class=\"link\"><a href=\"{target}\" title=\"{target}\">{}</a></li>",
                escape_html(label)
            ));
        }
        VisualKind::Folder {
            folder_id,
            label,
            open,
        } => {
            let id = escape_html(folder_id);
            html.push_str("<li class=\"folder\"><details");
            if *open {
                html.push_str(" open");
            }
            html.push_str(&format!(
                "><summary data-folder-id=\"{id}\">{}</summary>",
                escape_html(label)
            ));
            write_list(tree, index, html);
            html.push_str("</details></li>");
        }
        VisualKind::Container => write_list(tree, index, html),
    }
}

/// Renders a complete new-tab page around the tree.
pub fn render_page(tree: &VisualTree, title: &str) -> String {
    let fragment = render_fragment(tree);
    let mut html = String::with_capacity(fragment.len() + PAGE_JS.len() + PAGE_CSS.len() + 512);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><title>");
    html.push_str(&escape_html(title));
    html.push_str("</title><style>");
    html.push_str(PAGE_CSS);
    html.push_str("</style></head><body>");
    html.push_str("<button id=\"js-reduce-folder\" type=\"button\">Collapse all</button>");
    html.push_str("<main id=\"js-root-details\">");
    html.push_str(&fragment);
    html.push_str("</main><script>");
    html.push_str(PAGE_JS);
    html.push_str("</script></body></html>");
    html
}
