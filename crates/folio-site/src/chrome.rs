#![forbid(unsafe_code)]

//! Persistent header and footer.
//!
//! The chrome outlives every page. It owns two bits of state:
//!
//! - `scrolled`: the window is scrolled past the configured threshold. It
//!   flips once per crossing, not on every scroll event.
//! - `menu_open`: the mobile menu is expanded. The shell closes it on every
//!   navigation, before the new page mounts.
//!
//! The header is opaque while either bit is set.

use folio_core::nav::{RouteState, RouteTable};
use folio_core::theme::ThemeMode;
use folio_core::view::Element;
use folio_core::SubId;
use folio_runtime::{Listener, Sub, SubIds};

use crate::config::{ShellConfig, SiteConfig};
use crate::pages::{PageKind, link};

pub const HEADER_OPAQUE: &str = "header header--opaque";
pub const HEADER_TRANSPARENT: &str = "header header--transparent";

/// Everything the chrome reads but does not own.
pub struct ChromeView<'a> {
    pub config: &'a SiteConfig,
    pub routes: &'a RouteTable<PageKind>,
    pub route: &'a RouteState<PageKind>,
    pub theme: ThemeMode,
    pub year: i32,
}

#[derive(Debug, Clone)]
pub struct Chrome {
    threshold: f64,
    scrolled: bool,
    menu_open: bool,
    scroll_sub: SubId,
}

impl Chrome {
    pub fn new(config: &ShellConfig, ids: &mut SubIds) -> Self {
        Self {
            threshold: config.scroll_threshold,
            scrolled: false,
            menu_open: false,
            scroll_sub: ids.next_id(),
        }
    }

    /// Record a scroll offset. Returns `true` when the header state flipped.
    pub fn on_scroll(&mut self, y: f64) -> bool {
        let scrolled = y > self.threshold;
        if scrolled == self.scrolled {
            return false;
        }
        self.scrolled = scrolled;
        tracing::debug!(y, scrolled, "header state changed");
        true
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
        tracing::debug!(open = self.menu_open, "mobile menu toggled");
    }

    /// Close the mobile menu. Returns `true` if it was open.
    pub fn close_menu(&mut self) -> bool {
        std::mem::replace(&mut self.menu_open, false)
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn header_class(&self) -> &'static str {
        if self.scrolled || self.menu_open {
            HEADER_OPAQUE
        } else {
            HEADER_TRANSPARENT
        }
    }

    /// The scroll listener. Held for the life of the shell.
    pub fn subscriptions(&self) -> Vec<Sub> {
        vec![Sub::listen(self.scroll_sub, Listener::Scroll)]
    }

    pub fn header(&self, v: &ChromeView<'_>) -> Element {
        let (toggle_label, toggle_icon) = match v.theme {
            ThemeMode::Light => ("Switch to dark mode", "☾"),
            ThemeMode::Dark => ("Switch to light mode", "☀"),
        };
        let bar = Element::new("div")
            .class("header__bar")
            .child(
                Element::new("a")
                    .class("header__brand")
                    .attr("href", "/")
                    .attr("data-link", "")
                    .text(v.config.owner.name.clone()),
            )
            .child(
                Element::new("nav")
                    .class("header__nav")
                    .attr("aria-label", "Primary")
                    .children(nav_links(v)),
            )
            .child(
                Element::new("div")
                    .class("header__actions")
                    .child(
                        Element::new("button")
                            .attr("type", "button")
                            .class("theme-toggle")
                            .attr("data-action", "theme:toggle")
                            .attr("aria-label", toggle_label)
                            .text(toggle_icon),
                    )
                    .child(link("/contact", "Let's Talk").class("button button--primary header__cta"))
                    .child(
                        Element::new("button")
                            .attr("type", "button")
                            .class("menu-toggle")
                            .attr("data-action", "menu:toggle")
                            .attr("aria-expanded", self.menu_open.to_string())
                            .attr("aria-label", if self.menu_open { "Close menu" } else { "Open menu" })
                            .text(if self.menu_open { "✕" } else { "☰" }),
                    ),
            );

        let mobile = self.menu_open.then(|| {
            Element::new("nav")
                .class("mobile-menu")
                .attr("aria-label", "Mobile")
                .children(nav_links(v))
                .child(link("/contact", "Let's Talk").class("button button--primary"))
        });

        Element::new("header")
            .class(self.header_class())
            .child(bar)
            .child_opt(mobile)
    }
}

fn nav_links(v: &ChromeView<'_>) -> Vec<Element> {
    v.routes
        .routes()
        .iter()
        .map(|route| {
            let active = v.route.is_active(route.path);
            link(route.path, route.name)
                .class(if active { "nav-link nav-link--active" } else { "nav-link" })
                .attr_if(active, "aria-current", "page")
        })
        .collect()
}

/// Site footer.
pub fn footer(v: &ChromeView<'_>) -> Element {
    let owner = &v.config.owner;
    let social = v.config.contact.social.iter().map(|s| {
        Element::new("a")
            .class("footer__social")
            .attr("href", s.url.clone())
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer")
            .text(s.label.clone())
    });
    Element::new("footer")
        .class("footer")
        .child(
            Element::new("div")
                .class("footer__brand")
                .child(Element::new("strong").text(owner.name.clone()))
                .child(Element::new("p").text(owner.title.clone())),
        )
        .child(
            Element::new("nav")
                .class("footer__nav")
                .attr("aria-label", "Footer")
                .children(v.routes.routes().iter().map(|r| link(r.path, r.name))),
        )
        .child(Element::new("div").class("footer__social-links").children(social))
        .child(
            Element::new("p")
                .class("footer__copyright")
                .text(format!("© {} {}. All rights reserved.", v.year, owner.name)),
        )
}
