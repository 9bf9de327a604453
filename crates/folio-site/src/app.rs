#![forbid(unsafe_code)]

//! Application model: router, layout shell and the mounted page.
//!
//! # Navigation
//!
//! Every `Navigate` event runs the same sequence inside one update:
//!
//! 1. Close the mobile menu.
//! 2. Resolve the path (`Matched` or `NotFound`).
//! 3. If the path is unchanged and a page is mounted, stop here.
//! 4. Unmount the old page, then construct and mount the new one.
//! 5. Emit a history push (link navigations only) and the document title.
//!
//! Because the old page is unmounted before the new one mounts and page
//! subscriptions are recomputed after the update, at most one page holds
//! timers or listeners at any time.
//!
//! # Failure
//!
//! The shell render runs inside an [`ErrorBoundary`]. Once it has captured
//! a panic the model ignores everything except the `reload` action and
//! declares no subscriptions, so the host releases every handle on the next
//! step.

use folio_core::geometry::Size;
use folio_core::nav::{RouteError, RouteState, RouteTable};
use folio_core::rng::Lcg;
use folio_core::theme::{ThemeContext, ThemeMode};
use folio_core::view::{Element, Node};
use folio_core::{Event, NavSource};
use folio_runtime::{Cmd, Model, StorageBackend, Sub, SubIds, load_parsed};

use crate::boundary::ErrorBoundary;
use crate::chrome::{Chrome, ChromeView, footer};
use crate::config::SiteConfig;
use crate::content::SkillCategory;
use crate::pages::experience::{ExperienceTab, ProjectFilter};
use crate::pages::{self, Page, PageCtx, PageKind};
use crate::rain::DrawOp;
use crate::relay::{RelayFailure, RelayRequest};

// ─────────────────────────────────────────────────────────────────────────────
// Messages and effects
// ─────────────────────────────────────────────────────────────────────────────

/// Application message.
#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    /// A host event.
    Event(Event),
    /// A relay call started by [`AppEffect::SendMessage`] finished.
    RelayFinished {
        ticket: u64,
        outcome: Result<(), RelayFailure>,
    },
}

impl From<Event> for AppMsg {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

/// Requests for the host.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEffect {
    /// Push a history entry for `path`.
    PushHistory(String),
    SetDocumentTitle(String),
    /// Full page reload.
    Reload,
    /// Measure the decorative canvas. Answered with `SurfaceMeasured` or
    /// `SurfaceLost`.
    MeasureSurface,
    /// Measure the viewport. Answered with `Resize`.
    MeasureViewport,
    /// Replay these operations on the decorative canvas.
    Paint(Vec<DrawOp>),
    /// Send `request` and answer with [`AppMsg::RelayFinished`].
    SendMessage { ticket: u64, request: RelayRequest },
    /// Focus the control whose `data-field` is this value.
    FocusField(&'static str),
}

pub type AppCmd = Cmd<AppMsg, AppEffect>;

/// Typed form of a `data-action` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    MenuToggle,
    ThemeToggle,
    Reload,
    ContactSubmit,
    SkillsCategory(SkillCategory),
    ExperienceTab(ExperienceTab),
    ExperienceFilter(ProjectFilter),
    ExperienceProject(String),
}

impl Action {
    pub fn parse(raw: &str) -> Option<Self> {
        let action = match raw {
            "menu:toggle" => Self::MenuToggle,
            "theme:toggle" => Self::ThemeToggle,
            "reload" => Self::Reload,
            "contact:submit" => Self::ContactSubmit,
            _ => {
                let (scope, arg) = raw.rsplit_once(':')?;
                match scope {
                    "skills:category" => Self::SkillsCategory(SkillCategory::parse(arg)?),
                    "experience:tab" => Self::ExperienceTab(ExperienceTab::parse(arg)?),
                    "experience:filter" => Self::ExperienceFilter(ProjectFilter::parse(arg)?),
                    "experience:project" if !arg.is_empty() => {
                        Self::ExperienceProject(arg.to_string())
                    }
                    _ => return None,
                }
            }
        };
        Some(action)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Model
// ─────────────────────────────────────────────────────────────────────────────

/// What the host knows at boot.
#[derive(Debug, Clone)]
pub struct HostEnv {
    /// Seed for decorative randomness when the config does not fix one.
    pub seed: u64,
    /// Current calendar year, for the footer.
    pub year: i32,
    /// Location path at load time.
    pub initial_path: String,
    pub viewport: Size,
}

impl Default for HostEnv {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            year: 2026,
            initial_path: "/".to_string(),
            viewport: Size::new(1280.0, 800.0),
        }
    }
}

/// Page mount bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MountStats {
    pub mounted: u64,
    pub unmounted: u64,
}

impl MountStats {
    /// Pages currently mounted.
    pub fn live(&self) -> u64 {
        self.mounted - self.unmounted
    }
}

pub struct AppModel {
    config: SiteConfig,
    routes: RouteTable<PageKind>,
    route: RouteState<PageKind>,
    theme: ThemeContext,
    storage: Box<dyn StorageBackend>,
    chrome: Chrome,
    page: Option<Box<dyn Page>>,
    boundary: ErrorBoundary,
    ids: SubIds,
    viewport: Size,
    seeds: Lcg,
    year: i32,
    initial_path: String,
    stats: MountStats,
}

impl AppModel {
    pub fn new(
        config: SiteConfig,
        storage: Box<dyn StorageBackend>,
        env: HostEnv,
    ) -> Result<Self, RouteError> {
        let routes = pages::routes()?;
        let preference = load_parsed::<ThemeMode>(storage.as_ref(), &config.theme.storage_key)
            .unwrap_or(config.theme.default_mode);
        let mut ids = SubIds::new();
        let chrome = Chrome::new(&config.shell, &mut ids);
        let seeds = Lcg::new(config.rain.seed.unwrap_or(env.seed));
        tracing::debug!(
            preference = %preference,
            storage = storage.name(),
            path = %env.initial_path,
            "app model created"
        );
        Ok(Self {
            config,
            routes,
            route: RouteState::Unresolved,
            theme: ThemeContext::new(preference),
            storage,
            chrome,
            page: None,
            boundary: ErrorBoundary::new(),
            ids,
            viewport: env.viewport,
            seeds,
            year: env.year,
            initial_path: env.initial_path,
            stats: MountStats::default(),
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn route(&self) -> &RouteState<PageKind> {
        &self.route
    }

    pub fn theme(&self) -> &ThemeContext {
        &self.theme
    }

    pub fn chrome(&self) -> &Chrome {
        &self.chrome
    }

    /// Kind of the mounted page.
    pub fn page_kind(&self) -> Option<PageKind> {
        self.page.as_ref().map(|p| p.kind())
    }

    /// The mounted page.
    pub fn page(&self) -> Option<&dyn Page> {
        self.page.as_deref()
    }

    pub fn mount_stats(&self) -> MountStats {
        self.stats
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn is_failed(&self) -> bool {
        self.boundary.is_failed()
    }

    /// Run `f` against the mounted page with a fresh context.
    fn with_page<R>(
        &mut self,
        f: impl FnOnce(&mut dyn Page, &mut PageCtx<'_>) -> R,
    ) -> Option<R> {
        let page = self.page.as_deref_mut()?;
        let mut ctx = PageCtx {
            config: &self.config,
            theme: &mut self.theme,
            ids: &mut self.ids,
            viewport: self.viewport,
            seeds: &mut self.seeds,
        };
        Some(f(page, &mut ctx))
    }

    fn navigate(&mut self, raw: &str, source: NavSource) -> AppCmd {
        self.chrome.close_menu();

        let next = RouteState::resolve(&self.routes, raw);
        if next.path() == self.route.path() && self.page.is_some() {
            tracing::debug!(path = ?next.path(), "navigation to current path; page kept");
            return Cmd::none();
        }
        let kind = next.page().unwrap_or(PageKind::NotFound);
        let path = next.path().unwrap_or("/").to_string();

        if let Some(old) = self.with_page(|page, ctx| {
            page.unmount(ctx);
            page.kind()
        }) {
            self.stats.unmounted += 1;
            tracing::debug!(page = old.title(), "page unmounted");
        }
        self.page = Some(pages::create(kind));
        self.route = next;
        let mounted = self.with_page(|page, ctx| page.mount(ctx)).unwrap_or_default();
        self.stats.mounted += 1;
        tracing::info!(path = %path, page = kind.title(), source = ?source, "navigated");

        let mut cmds = vec![mounted];
        if source == NavSource::Link {
            cmds.push(Cmd::effect(AppEffect::PushHistory(path)));
        }
        cmds.push(Cmd::effect(AppEffect::SetDocumentTitle(format!(
            "{} | {}",
            kind.title(),
            self.config.owner.name
        ))));
        Cmd::batch(cmds)
    }

    fn on_action(&mut self, raw: &str) -> AppCmd {
        let Some(action) = Action::parse(raw) else {
            tracing::debug!(action = raw, "unknown action");
            return Cmd::none();
        };
        match action {
            Action::MenuToggle => {
                self.chrome.toggle_menu();
                Cmd::none()
            }
            Action::ThemeToggle => {
                let preference = self.theme.toggle();
                if let Err(err) = self
                    .storage
                    .store(&self.config.theme.storage_key, preference.as_str())
                {
                    tracing::warn!(
                        backend = self.storage.name(),
                        error = %err,
                        "theme preference not saved"
                    );
                }
                Cmd::none()
            }
            Action::Reload => Cmd::effect(AppEffect::Reload),
            other => self
                .with_page(|page, ctx| page.on_action(&other, ctx))
                .unwrap_or_default(),
        }
    }

    fn on_event(&mut self, event: Event) -> AppCmd {
        match event {
            Event::Navigate { path, source } => self.navigate(&path, source),
            Event::Scroll { y } => {
                self.chrome.on_scroll(y);
                Cmd::none()
            }
            Event::Action(raw) => self.on_action(&raw),
            Event::Resize { width, height } => {
                self.viewport = Size::new(width, height);
                self.forward(&event)
            }
            other => self.forward(&other),
        }
    }

    fn forward(&mut self, event: &Event) -> AppCmd {
        self.with_page(|page, ctx| page.on_event(event, ctx))
            .unwrap_or_else(|| {
                tracing::trace!(kind = event.kind(), "event with no page mounted");
                Cmd::none()
            })
    }

    fn render_shell(&self) -> Element {
        let chrome_view = ChromeView {
            config: &self.config,
            routes: &self.routes,
            route: &self.route,
            theme: self.theme.effective(),
            year: self.year,
        };
        let main = Element::new("main")
            .class("main")
            .child_opt(self.page.as_ref().map(|p| p.view(&self.config)));
        Element::new("div")
            .class(format!("app {}", self.theme.effective().css_class()))
            .child(self.chrome.header(&chrome_view))
            .child(main)
            .child(footer(&chrome_view))
    }
}

impl std::fmt::Debug for AppModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppModel")
            .field("route", &self.route)
            .field("theme", &self.theme)
            .field("page", &self.page_kind())
            .field("failed", &self.is_failed())
            .finish_non_exhaustive()
    }
}

impl Model for AppModel {
    type Message = AppMsg;
    type Effect = AppEffect;

    fn init(&mut self) -> AppCmd {
        let path = std::mem::take(&mut self.initial_path);
        self.navigate(&path, NavSource::Initial)
    }

    fn update(&mut self, msg: AppMsg) -> AppCmd {
        if self.boundary.is_failed() {
            return match msg {
                AppMsg::Event(Event::Action(raw)) if raw == "reload" => {
                    Cmd::effect(AppEffect::Reload)
                }
                _ => Cmd::none(),
            };
        }
        match msg {
            AppMsg::Event(event) => self.on_event(event),
            AppMsg::RelayFinished { ticket, outcome } => {
                match self.with_page(|page, ctx| page.on_relay_finished(ticket, outcome, ctx)) {
                    Some(Some(cmd)) => cmd,
                    _ => {
                        tracing::debug!(ticket, "relay result with no contact page mounted");
                        Cmd::none()
                    }
                }
            }
        }
    }

    fn view(&self) -> Node {
        let page = self.page_kind().unwrap_or(PageKind::NotFound).title();
        Node::from(self.boundary.render(page, || self.render_shell()))
    }

    fn subscriptions(&self) -> Vec<Sub> {
        if self.boundary.is_failed() {
            return Vec::new();
        }
        let mut subs = self.chrome.subscriptions();
        if let Some(page) = &self.page {
            subs.extend(page.subscriptions());
        }
        subs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_runtime::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn model() -> AppModel {
        AppModel::new(
            SiteConfig::default(),
            Box::new(MemoryStorage::new()),
            HostEnv::default(),
        )
        .unwrap()
    }

    #[test]
    fn action_parsing() {
        assert_eq!(Action::parse("menu:toggle"), Some(Action::MenuToggle));
        assert_eq!(Action::parse("reload"), Some(Action::Reload));
        assert_eq!(
            Action::parse("skills:category:tools"),
            Some(Action::SkillsCategory(SkillCategory::Tools))
        );
        assert_eq!(
            Action::parse("experience:filter:all"),
            Some(Action::ExperienceFilter(ProjectFilter::All))
        );
        assert_eq!(
            Action::parse("experience:project:harbor"),
            Some(Action::ExperienceProject("harbor".into()))
        );
        assert_eq!(Action::parse("experience:project:"), None);
        assert_eq!(Action::parse("skills:category:cooking"), None);
        assert_eq!(Action::parse("launch"), None);
    }

    #[test]
    fn init_mounts_initial_route_without_history_push() {
        let mut m = model();
        let effects = m.init().into_effects();
        assert_eq!(m.page_kind(), Some(PageKind::Home));
        assert!(!effects.iter().any(|e| matches!(e, AppEffect::PushHistory(_))));
        assert!(effects.contains(&AppEffect::SetDocumentTitle("Home | Avery Quinn".into())));
    }

    #[test]
    fn link_navigation_pushes_history_and_swaps_page() {
        let mut m = model();
        m.init();
        let effects = m.update(Event::link("/about/").into()).into_effects();
        assert_eq!(
            effects,
            vec![
                AppEffect::PushHistory("/about".into()),
                AppEffect::SetDocumentTitle("About | Avery Quinn".into()),
            ]
        );
        assert_eq!(m.page_kind(), Some(PageKind::About));
        assert_eq!(m.mount_stats(), MountStats { mounted: 2, unmounted: 1 });
    }

    #[test]
    fn same_path_keeps_page_but_closes_menu() {
        let mut m = model();
        m.init();
        m.update(Event::action("menu:toggle").into());
        assert!(m.chrome().is_menu_open());
        let effects = m.update(Event::link("/").into()).into_effects();
        assert!(effects.is_empty());
        assert!(!m.chrome().is_menu_open());
        assert_eq!(m.mount_stats().mounted, 1);
    }

    #[test]
    fn history_navigation_does_not_push() {
        let mut m = model();
        m.init();
        let effects = m
            .update(
                Event::Navigate {
                    path: "/skills".into(),
                    source: NavSource::History,
                }
                .into(),
            )
            .into_effects();
        assert!(!effects.iter().any(|e| matches!(e, AppEffect::PushHistory(_))));
        assert_eq!(m.page_kind(), Some(PageKind::Skills));
    }

    #[test]
    fn theme_toggle_persists_preference() {
        let storage = std::rc::Rc::new(MemoryStorage::new());
        struct Shared(std::rc::Rc<MemoryStorage>);
        impl StorageBackend for Shared {
            fn name(&self) -> &str {
                "Shared"
            }
            fn load(&self, key: &str) -> folio_runtime::StorageResult<Option<String>> {
                self.0.load(key)
            }
            fn store(&self, key: &str, value: &str) -> folio_runtime::StorageResult<()> {
                self.0.store(key, value)
            }
            fn remove(&self, key: &str) -> folio_runtime::StorageResult<()> {
                self.0.remove(key)
            }
        }
        let mut m = AppModel::new(
            SiteConfig::default(),
            Box::new(Shared(storage.clone())),
            HostEnv {
                initial_path: "/about".into(),
                ..HostEnv::default()
            },
        )
        .unwrap();
        m.init();
        assert_eq!(m.theme().effective(), ThemeMode::Light);
        m.update(Event::action("theme:toggle").into());
        assert_eq!(m.theme().effective(), ThemeMode::Dark);
        assert_eq!(storage.get("folio.theme"), Some("dark".into()));
    }

    #[test]
    fn stored_preference_is_loaded() {
        let m = AppModel::new(
            SiteConfig::default(),
            Box::new(MemoryStorage::with_entry("folio.theme", "dark")),
            HostEnv::default(),
        )
        .unwrap();
        assert_eq!(m.theme().preference(), ThemeMode::Dark);

        let m = AppModel::new(
            SiteConfig::default(),
            Box::new(MemoryStorage::with_entry("folio.theme", "sepia")),
            HostEnv::default(),
        )
        .unwrap();
        assert_eq!(m.theme().preference(), ThemeMode::Light);
    }

    #[test]
    fn view_wraps_page_in_shell() {
        let mut m = model();
        m.init();
        let view = m.view();
        let root = view.as_element().unwrap();
        assert_eq!(root.get_attr("class"), Some("app theme-dark"));
        assert!(view.find(&|e| e.tag == "header").is_some());
        assert!(view.find(&|e| e.tag == "main").is_some());
        assert!(view.find(&|e| e.tag == "footer").is_some());
    }

    #[test]
    fn relay_result_without_contact_page_is_ignored() {
        let mut m = model();
        m.init();
        let cmd = m.update(AppMsg::RelayFinished {
            ticket: 99,
            outcome: Ok(()),
        });
        assert!(cmd.is_none());
    }
}
