//! Headless host used by the integration tests.
//!
//! Plays the browser's part: answers measurement effects with events, runs
//! relay sends through a [`MockRelay`], mirrors the host's live
//! subscription handles and keeps an applied copy of the DOM.

#![allow(dead_code)]

use std::collections::BTreeMap;

use folio_core::diff::apply;
use folio_core::view::Node;
use folio_core::Event;
use folio_runtime::{MemoryStorage, StepProgram, Sub, SubChange, SubId, SubKind};
use folio_site::{AppEffect, AppModel, HostEnv, MockRelay, SiteConfig, deliver};

pub const SURFACE: (f64, f64) = (640.0, 360.0);

pub fn configured() -> SiteConfig {
    let mut config = SiteConfig::default();
    config.relay.service_id = "service_test".into();
    config.relay.template_id = "template_test".into();
    config.relay.public_key = "public_test".into();
    config.rain.seed = Some(42);
    config
}

pub struct Host {
    pub program: StepProgram<AppModel>,
    pub relay: MockRelay,
    pub dom: Option<Node>,
    pub handles: BTreeMap<SubId, Sub>,
    pub history: Vec<String>,
    pub titles: Vec<String>,
    pub focused: Vec<&'static str>,
    pub paints: usize,
    pub reloads: usize,
    pub surface_measures: usize,
    /// Answer `MeasureSurface` with `SurfaceLost` instead of a size.
    pub lose_surface: bool,
    pub viewport: (f64, f64),
}

impl Host {
    pub fn new(config: SiteConfig, path: &str, relay: MockRelay) -> Self {
        let env = HostEnv {
            seed: 7,
            year: 2026,
            initial_path: path.to_string(),
            viewport: folio_core::Size::new(1280.0, 800.0),
        };
        let model = AppModel::new(config, Box::new(MemoryStorage::new()), env)
            .expect("route table is valid");
        let mut host = Self {
            program: StepProgram::new(model),
            relay,
            dom: None,
            handles: BTreeMap::new(),
            history: Vec::new(),
            titles: Vec::new(),
            focused: Vec::new(),
            paints: 0,
            reloads: 0,
            surface_measures: 0,
            lose_surface: false,
            viewport: (1280.0, 800.0),
        };
        host.program.init();
        host.flush();
        host
    }

    pub fn boot(path: &str) -> Self {
        Self::new(configured(), path, MockRelay::succeeding())
    }

    /// Step until the program has nothing left to do.
    pub fn flush(&mut self) {
        for _ in 0..32 {
            let outputs = self.program.take_outputs();
            if outputs.is_empty() && self.program.pending() == 0 {
                return;
            }
            let dom = self.dom.get_or_insert_with(|| Node::Text(String::new()));
            apply(dom, &outputs.patches).expect("patches apply to the mirrored DOM");
            for change in outputs.sub_changes {
                match change {
                    SubChange::Start(sub) => {
                        assert!(self.handles.insert(sub.id, sub).is_none(), "double start {}", sub.id);
                    }
                    SubChange::Stop(id) => {
                        assert!(self.handles.remove(&id).is_some(), "stop of unknown {id}");
                    }
                }
            }
            for effect in outputs.effects {
                self.run(effect);
            }
            self.program.step();
        }
        panic!("program did not settle");
    }

    fn run(&mut self, effect: AppEffect) {
        match effect {
            AppEffect::PushHistory(path) => self.history.push(path),
            AppEffect::SetDocumentTitle(title) => self.titles.push(title),
            AppEffect::Reload => self.reloads += 1,
            AppEffect::MeasureSurface => {
                self.surface_measures += 1;
                let event = if self.lose_surface {
                    Event::SurfaceLost
                } else {
                    Event::SurfaceMeasured {
                        width: SURFACE.0,
                        height: SURFACE.1,
                    }
                };
                self.program.push_event(event);
            }
            AppEffect::MeasureViewport => self.program.push_event(Event::Resize {
                width: self.viewport.0,
                height: self.viewport.1,
            }),
            AppEffect::Paint(_) => self.paints += 1,
            AppEffect::SendMessage { ticket, request } => {
                let msg = pollster::block_on(deliver(&self.relay, ticket, request));
                self.program.push_message(msg);
            }
            AppEffect::FocusField(field) => self.focused.push(field),
        }
    }

    pub fn send(&mut self, event: Event) {
        self.program.push_event(event);
        self.program.step();
        self.flush();
    }

    /// Resize the window: every live resize listener delivers its own event.
    pub fn resize_window(&mut self, width: f64, height: f64) {
        self.viewport = (width, height);
        for _ in 0..self.listeners(folio_runtime::Listener::Resize) {
            self.program.push_event(Event::Resize { width, height });
        }
        self.program.step();
        self.flush();
    }

    pub fn click_link(&mut self, path: &str) {
        self.send(Event::link(path));
    }

    pub fn click(&mut self, action: &str) {
        self.send(Event::action(action));
    }

    pub fn type_into(&mut self, field: &str, value: &str) {
        self.send(Event::input(field, value));
    }

    /// Fire every live interval timer once.
    pub fn tick_all(&mut self) {
        let timers: Vec<SubId> = self
            .handles
            .values()
            .filter(|s| matches!(s.kind, SubKind::Interval(_)))
            .map(|s| s.id)
            .collect();
        for id in timers {
            self.program.push_event(Event::Timer(id));
        }
        self.program.step();
        self.flush();
    }

    pub fn dom(&self) -> &Node {
        self.dom.as_ref().expect("first frame rendered")
    }

    pub fn text(&self) -> String {
        self.dom().text_content()
    }

    pub fn header_class(&self) -> String {
        self.dom()
            .find(&|e| e.tag == "header")
            .and_then(|e| e.get_attr("class"))
            .unwrap_or_default()
            .to_string()
    }

    pub fn field_value(&self, field: &str) -> Option<String> {
        self.dom()
            .find(&|e| e.get_attr("data-field") == Some(field) && e.get_attr("type") != Some("radio"))
            .and_then(|e| e.get_attr("value"))
            .map(str::to_string)
    }

    pub fn timers(&self) -> usize {
        self.handles
            .values()
            .filter(|s| matches!(s.kind, SubKind::Interval(_)))
            .count()
    }

    pub fn listeners(&self, listener: folio_runtime::Listener) -> usize {
        self.handles
            .values()
            .filter(|s| s.kind == SubKind::Listen(listener))
            .count()
    }
}
