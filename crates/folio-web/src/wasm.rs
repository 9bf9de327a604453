#![forbid(unsafe_code)]

//! `wasm-bindgen` entry point and the host pump.
//!
//! Browser callbacks never touch the program directly. They push into an
//! inbox and call [`pump`], which steps the program until the inbox is dry
//! and executes whatever the step produced. A callback that fires while a
//! pump is already on the stack (focus, synchronous measurement) leaves its
//! input in the inbox for that pump to pick up.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use folio_core::view::Node;
use folio_core::{Event, NavSource, Size};
use folio_runtime::{MemoryStorage, StepProgram, StorageBackend, SubChange};
use folio_site::boundary::recovery_panel;
use folio_site::{AppEffect, AppModel, AppMsg, HostEnv, SiteConfig, deliver};
use tracing::Level;
use tracing_subscriber::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

use crate::canvas::Surface;
use crate::console_log::{ConsoleLayer, parse_level};
use crate::dom::{self, Delegates};
use crate::relay::FetchRelay;
use crate::storage::LocalStorage;
use crate::timers::{Handles, viewport};

enum Input {
    Event(Event),
    Msg(AppMsg),
}

struct Host {
    program: StepProgram<AppModel>,
    window: Window,
    document: Document,
    mount: Element,
    handles: Handles,
    surface: Surface,
    delegates: Option<Delegates>,
    popstate: Option<Closure<dyn FnMut()>>,
}

struct Shared {
    inbox: RefCell<VecDeque<Input>>,
    host: RefCell<Host>,
}

fn enqueue(weak: &Weak<Shared>, input: Input) {
    if let Some(shared) = weak.upgrade() {
        shared.inbox.borrow_mut().push_back(input);
        pump(&shared);
    }
}

fn emitter(weak: &Weak<Shared>) -> impl Fn(Event) + Clone + 'static {
    let weak = weak.clone();
    move |event| enqueue(&weak, Input::Event(event))
}

fn pump(shared: &Rc<Shared>) {
    let Ok(mut host) = shared.host.try_borrow_mut() else {
        return;
    };
    loop {
        let batch: Vec<Input> = shared.inbox.borrow_mut().drain(..).collect();
        if batch.is_empty() && host.program.pending() == 0 {
            break;
        }
        for input in batch {
            match input {
                Input::Event(event) => host.program.push_event(event),
                Input::Msg(msg) => host.program.push_message(msg),
            }
        }
        host.program.step();
        host.flush(shared);
    }
}

impl Host {
    /// Apply patches, honor subscription changes, then run effects.
    fn flush(&mut self, shared: &Rc<Shared>) {
        let outputs = self.program.take_outputs();

        if let Err(err) = dom::apply(&self.document, &self.mount, &outputs.patches) {
            tracing::warn!(error = %err, "patch failed; rebuilding from the current view");
            if let Some(view) = self.program.current_view()
                && let Err(err) = dom::rebuild(&self.document, &self.mount, view)
            {
                tracing::error!(error = %err, "rebuild failed");
            }
        }

        let weak = Rc::downgrade(shared);
        for change in outputs.sub_changes {
            match change {
                SubChange::Start(sub) => self.handles.start(&self.window, sub, emitter(&weak)),
                SubChange::Stop(id) => self.handles.stop(&self.window, id),
            }
        }

        for effect in outputs.effects {
            self.run(effect, shared);
        }
    }

    fn run(&mut self, effect: AppEffect, shared: &Rc<Shared>) {
        let answer = |event: Event| shared.inbox.borrow_mut().push_back(Input::Event(event));
        match effect {
            AppEffect::PushHistory(path) => {
                let pushed = self
                    .window
                    .history()
                    .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(&path)));
                if let Err(err) = pushed {
                    tracing::warn!(path = %path, error = ?err, "history push failed");
                }
            }
            AppEffect::SetDocumentTitle(title) => self.document.set_title(&title),
            AppEffect::Reload => {
                if let Err(err) = self.window.location().reload() {
                    tracing::error!(error = ?err, "reload failed");
                }
            }
            AppEffect::MeasureSurface => answer(self.surface.measure(&self.mount)),
            AppEffect::MeasureViewport => {
                let (width, height) = viewport(&self.window);
                answer(Event::Resize { width, height });
            }
            AppEffect::Paint(ops) => self.surface.paint(&ops),
            AppEffect::SendMessage { ticket, request } => {
                let weak = Rc::downgrade(shared);
                wasm_bindgen_futures::spawn_local(async move {
                    let msg = deliver(&FetchRelay, ticket, request).await;
                    enqueue(&weak, Input::Msg(msg));
                });
            }
            AppEffect::FocusField(field) => dom::focus_field(&self.mount, field),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Process-wide setup
// ─────────────────────────────────────────────────────────────────────────────

fn init_logging(level: &str) {
    let layer = ConsoleLayer::new(|level, line: &str| {
        let line = JsValue::from_str(line);
        match level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            _ => web_sys::console::log_1(&line),
        }
    });
    // A second mount in the same page keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(layer.with_filter(parse_level(level)))
        .try_init();
}

/// Panics abort on wasm, so the render boundary never sees them. The hook
/// paints the same recovery panel straight into the mount element.
fn install_panic_hook(mount_id: &str) {
    let mount_id = mount_id.to_string();
    std::panic::set_hook(Box::new(move |info| {
        web_sys::console::error_1(&JsValue::from_str(&format!("folio panicked: {info}")));
        let mount = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(&mount_id));
        let Some(mount) = mount else {
            return;
        };
        mount.set_inner_html(&Node::from(recovery_panel()).to_html());
        if let Ok(Some(button)) = mount.query_selector("[data-action=\"reload\"]") {
            let _ = button.set_attribute("onclick", "location.reload()");
        }
    }));
}

fn open_storage() -> Box<dyn StorageBackend> {
    match LocalStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(err) => {
            tracing::warn!(error = %err, "preferences will not persist");
            Box::new(MemoryStorage::new())
        }
    }
}

fn host_env(window: &Window) -> HostEnv {
    let (width, height) = viewport(window);
    HostEnv {
        seed: (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64,
        year: js_sys::Date::new_0().get_full_year() as i32,
        initial_path: window.location().pathname().unwrap_or_else(|_| "/".into()),
        viewport: Size::new(width, height),
    }
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// JS surface
// ─────────────────────────────────────────────────────────────────────────────

/// The mounted site.
#[wasm_bindgen]
pub struct FolioWeb {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl FolioWeb {
    /// Mount the site into the element with id `mount_id`.
    ///
    /// `config_json` is a `SiteConfig` document; an empty string uses the
    /// defaults. Fails on invalid configuration or a missing mount element.
    #[wasm_bindgen(constructor)]
    pub fn new(mount_id: &str, config_json: &str) -> Result<FolioWeb, JsValue> {
        let config = if config_json.trim().is_empty() {
            SiteConfig::default()
        } else {
            SiteConfig::from_json(config_json).map_err(js_err)?
        };
        init_logging(&config.log_level);
        install_panic_hook(mount_id);

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;
        let mount = document
            .get_element_by_id(mount_id)
            .ok_or_else(|| js_err(format!("no element with id {mount_id:?}")))?;

        let env = host_env(&window);
        let model = AppModel::new(config, open_storage(), env).map_err(js_err)?;
        let shared = Rc::new(Shared {
            inbox: RefCell::new(VecDeque::new()),
            host: RefCell::new(Host {
                program: StepProgram::new(model),
                window: window.clone(),
                document,
                mount: mount.clone(),
                handles: Handles::default(),
                surface: Surface::default(),
                delegates: None,
                popstate: None,
            }),
        });

        let weak = Rc::downgrade(&shared);
        let delegates = Delegates::attach(&mount, emitter(&weak)).map_err(js_err)?;
        let popstate = {
            let emit = emitter(&weak);
            let reader = window.clone();
            Closure::<dyn FnMut()>::new(move || {
                let path = reader.location().pathname().unwrap_or_else(|_| "/".into());
                emit(Event::Navigate {
                    path,
                    source: NavSource::History,
                });
            })
        };
        window.add_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref())?;

        {
            let mut host = shared.host.borrow_mut();
            host.delegates = Some(delegates);
            host.popstate = Some(popstate);
            host.program.init();
            host.flush(&shared);
        }
        pump(&shared);
        tracing::info!(mount = mount_id, "site mounted");
        Ok(FolioWeb { shared })
    }

    /// Number of live timer and listener handles.
    #[wasm_bindgen(js_name = liveHandles)]
    pub fn live_handles(&self) -> usize {
        self.shared
            .host
            .try_borrow()
            .map(|host| host.handles.len())
            .unwrap_or(0)
    }

    /// Release every handle and listener and clear the mount element.
    pub fn destroy(&mut self) {
        let Ok(mut host) = self.shared.host.try_borrow_mut() else {
            return;
        };
        host.program.shutdown();
        host.flush(&self.shared);

        let delegates = host.delegates.take();
        if let Some(mut delegates) = delegates {
            delegates.detach(&host.mount);
        }
        if let Some(popstate) = host.popstate.take() {
            let _ = host
                .window
                .remove_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref());
        }
        host.mount.set_text_content(None);
        tracing::info!("site destroyed");
    }
}
