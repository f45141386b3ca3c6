//! Webview host for the new-tab page using `wry` + `tao`.
//!
//! - The page is served from the `newtab://` custom protocol and is rebuilt
//!   from the controller's visual tree on every load.
//! - IPC from JS → Rust via `window.ipc.postMessage()`, dispatched through
//!   [`handle_page_message`].
//! - A rejected message reloads the page so it matches the controller again.

use std::borrow::Cow;
use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder};
use tao::window::WindowBuilder;
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};
use wry::http::header::CONTENT_TYPE;
use wry::http::{HeaderValue, Request, Response};
use wry::WebViewBuilder;

use crate::app::App;
use crate::logging;
use crate::rpc_handler::handle_page_message;

const PAGE_URL: &str = "newtab://localhost/";

#[derive(Debug)]
enum UserEvent {
    Reload,
}

struct HostState {
    app: App,
    runtime: Runtime,
}

fn html_response(html: String) -> Response<Cow<'static, [u8]>> {
    let mut response = Response::new(Cow::Owned(html.into_bytes()));
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}

/// Handles one page message. Returns whether the page must be reloaded.
fn handle_ipc(state: &mut HostState, message: &str) -> bool {
    let HostState { app, runtime } = state;
    match runtime.block_on(handle_page_message(app, message)) {
        Ok(result) => {
            debug!(%result, "page message handled");
            false
        }
        Err(e) => {
            warn!(error = %e, "page message rejected");
            true
        }
    }
}

/// Opens the new-tab window and runs the event loop until it is closed.
///
/// Returns only when setup fails.
pub fn run(config_path: Option<String>) -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let mut app = App::new(config_path)?;
    logging::init(&app.settings().logging.filter);
    info!(
        bookmarks = %app.controller.source().path().display(),
        "opening new-tab window"
    );

    if let Err(e) = runtime.block_on(app.controller.init()) {
        error!(error = %e, "bookmark tree unavailable, showing an empty page");
    }
    let title = app.settings().page.title.clone();
    let state = Rc::new(RefCell::new(HostState { app, runtime }));

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title(title)
        .with_inner_size(tao::dpi::LogicalSize::new(960.0, 720.0))
        .build(&event_loop)?;

    let page_state = state.clone();
    let ipc_state = state;
    let builder = WebViewBuilder::new()
        .with_custom_protocol("newtab".into(), move |_wv_id, _request| {
            html_response(page_state.borrow().app.page_html())
        })
        .with_url(PAGE_URL)
        .with_ipc_handler(move |request: Request<String>| {
            if handle_ipc(&mut ipc_state.borrow_mut(), request.body()) {
                let _ = proxy.send_event(UserEvent::Reload);
            }
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox().ok_or("window has no GTK container")?;
        builder.build_gtk(vbox)?
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window)?;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => *control_flow = ControlFlow::Exit,
            Event::UserEvent(UserEvent::Reload) => {
                if let Err(e) = webview.load_url(PAGE_URL) {
                    warn!(error = %e, "failed to reload page");
                }
            }
            _ => {}
        }
    })
}
