#![forbid(unsafe_code)]

//! Pages and the contract the shell mounts them through.
//!
//! Exactly one page is mounted at a time. The shell calls
//! [`Page::unmount`] on the old page before [`Page::mount`] on the new one,
//! and every timer or listener a page owns is declared through
//! [`Page::subscriptions`], so dropping the page releases them on the next
//! reconcile.

use std::collections::BTreeSet;
use std::fmt;

use folio_core::geometry::Size;
use folio_core::nav::{Route, RouteError, RouteTable};
use folio_core::rng::Lcg;
use folio_core::theme::ThemeContext;
use folio_core::view::Element;
use folio_core::Event;
use folio_runtime::{Cmd, Sub, SubIds};

use crate::app::{Action, AppCmd};
use crate::config::SiteConfig;
use crate::relay::RelayFailure;

pub mod about;
pub mod contact;
pub mod experience;
pub mod home;
pub mod not_found;
pub mod skills;

/// Page bound to a route, plus the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Home,
    About,
    Skills,
    Experience,
    Contact,
    NotFound,
}

impl PageKind {
    /// Title used in the document title and in logs.
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Skills => "Skills",
            Self::Experience => "Experience",
            Self::Contact => "Contact",
            Self::NotFound => "Page Not Found",
        }
    }
}

/// The site's route table, in navigation order.
pub fn routes() -> Result<RouteTable<PageKind>, RouteError> {
    RouteTable::new(vec![
        Route { name: "Home", path: "/", page: PageKind::Home },
        Route { name: "About", path: "/about", page: PageKind::About },
        Route { name: "Skills", path: "/skills", page: PageKind::Skills },
        Route { name: "Experience", path: "/experience", page: PageKind::Experience },
        Route { name: "Contact", path: "/contact", page: PageKind::Contact },
    ])
}

/// Shared state a page may touch while handling a lifecycle call.
pub struct PageCtx<'a> {
    pub config: &'a SiteConfig,
    pub theme: &'a mut ThemeContext,
    pub ids: &'a mut SubIds,
    pub viewport: Size,
    /// Seed source for decorative randomness.
    pub seeds: &'a mut Lcg,
}

/// A mountable page.
pub trait Page: fmt::Debug {
    fn kind(&self) -> PageKind;

    /// Called once after construction.
    fn mount(&mut self, _ctx: &mut PageCtx<'_>) -> AppCmd {
        Cmd::none()
    }

    /// Called once before the page is dropped. Must release anything
    /// registered on shared state (theme overrides).
    fn unmount(&mut self, _ctx: &mut PageCtx<'_>) {}

    /// Host events routed to the page (timers, surfaces, inputs, asset
    /// failures, resizes).
    fn on_event(&mut self, _event: &Event, _ctx: &mut PageCtx<'_>) -> AppCmd {
        Cmd::none()
    }

    /// Page-level actions. Actions meant for another page are ignored.
    fn on_action(&mut self, _action: &Action, _ctx: &mut PageCtx<'_>) -> AppCmd {
        Cmd::none()
    }

    /// Outcome of a relay call. `None` when the page never sends messages.
    fn on_relay_finished(
        &mut self,
        _ticket: u64,
        _outcome: Result<(), RelayFailure>,
        _ctx: &mut PageCtx<'_>,
    ) -> Option<AppCmd> {
        None
    }

    fn view(&self, config: &SiteConfig) -> Element;

    fn subscriptions(&self) -> Vec<Sub> {
        Vec::new()
    }
}

/// Construct the page for `kind`. The caller mounts it.
pub fn create(kind: PageKind) -> Box<dyn Page> {
    match kind {
        PageKind::Home => Box::new(home::HomePage::new()),
        PageKind::About => Box::new(about::AboutPage::new()),
        PageKind::Skills => Box::new(skills::SkillsPage::new()),
        PageKind::Experience => Box::new(experience::ExperiencePage::new()),
        PageKind::Contact => Box::new(contact::ContactPage::new()),
        PageKind::NotFound => Box::new(not_found::NotFoundPage),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared view helpers
// ─────────────────────────────────────────────────────────────────────────────

/// In-app link. The host turns clicks on `data-link` anchors into
/// navigation events instead of page loads.
pub fn link(path: &str, label: &str) -> Element {
    Element::new("a")
        .attr("href", path)
        .attr("data-link", "")
        .text(label)
}

/// Résumé download link.
pub fn resume_link(config: &SiteConfig, class: &str) -> Element {
    Element::new("a")
        .class(class.to_string())
        .attr("href", config.assets.resume_path.clone())
        .attr("download", config.assets.resume_file_name.clone())
        .text("Download Resume")
}

/// Images whose load failed, keyed by their `data-asset` value.
#[derive(Debug, Clone, Default)]
pub struct AssetFallbacks {
    failed: BTreeSet<String>,
}

impl AssetFallbacks {
    /// Record a failure. Returns `false` if it was already recorded.
    pub fn mark(&mut self, asset: &str) -> bool {
        let fresh = self.failed.insert(asset.to_string());
        if fresh {
            tracing::debug!(asset, "image failed to load; using fallback");
        }
        fresh
    }

    pub fn is_failed(&self, asset: &str) -> bool {
        self.failed.contains(asset)
    }

    /// Handle an `AssetError` event. Returns `true` if it was one.
    pub fn handle(&mut self, event: &Event) -> bool {
        match event {
            Event::AssetError { asset } => {
                self.mark(asset);
                true
            }
            _ => false,
        }
    }

    /// The image, or `fallback` once it failed.
    pub fn image(&self, asset: &str, src: &str, alt: &str, fallback: Element) -> Element {
        if self.is_failed(asset) {
            return fallback;
        }
        Element::new("img")
            .attr("src", src)
            .attr("alt", alt)
            .attr("loading", "lazy")
            .attr("data-asset", asset)
    }
}

/// Asset key of a project's image.
pub fn project_asset(id: &str) -> String {
    format!("project:{id}")
}

/// Placeholder shown when a project image is missing.
pub fn image_placeholder(title: &str) -> Element {
    Element::new("div")
        .class("image-placeholder")
        .attr("role", "img")
        .attr("aria-label", title)
        .text(title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::nav::RouteMatch;
    use folio_core::view::Node;

    #[test]
    fn route_table_binds_every_page() {
        let table = routes().unwrap();
        assert_eq!(table.routes().len(), 5);
        assert_eq!(table.resolve("/"), RouteMatch::Matched(PageKind::Home));
        assert_eq!(table.resolve("/contact/"), RouteMatch::Matched(PageKind::Contact));
        assert_eq!(table.resolve("/skills?tab=mobile"), RouteMatch::Matched(PageKind::Skills));
        assert_eq!(table.resolve("/nope"), RouteMatch::NotFound);
        for route in table.routes() {
            assert_eq!(create(route.page).kind(), route.page);
            assert_eq!(route.name, route.page.title());
        }
        assert_eq!(create(PageKind::NotFound).kind(), PageKind::NotFound);
    }

    #[test]
    fn asset_fallback_swaps_image() {
        let mut assets = AssetFallbacks::default();
        let fallback = || image_placeholder("Harbor");
        let img = Node::from(assets.image("project:harbor", "/h.jpg", "Harbor", fallback()));
        assert_eq!(img.as_element().map(|e| e.tag), Some("img"));

        assert!(assets.handle(&Event::AssetError {
            asset: "project:harbor".into()
        }));
        assert!(!assets.mark("project:harbor"));
        assert!(!assets.handle(&Event::SurfaceLost));
        let img = assets.image("project:harbor", "/h.jpg", "Harbor", fallback());
        assert_eq!(img, fallback());
    }

    #[test]
    fn links_are_intercepted() {
        let a = link("/about", "About");
        assert_eq!(a.get_attr("data-link"), Some(""));
        assert_eq!(a.get_attr("href"), Some("/about"));
    }
}
