#![forbid(unsafe_code)]

//! Landing page.
//!
//! Forces the configured home color mode for as long as it is mounted and
//! hosts the animated background behind the hero.

use folio_core::view::Element;
use folio_core::Event;
use folio_runtime::{Cmd, Sub};

use super::{AssetFallbacks, Page, PageCtx, PageKind, image_placeholder, link, project_asset, resume_link};
use crate::app::AppCmd;
use crate::config::SiteConfig;
use crate::content::{TECH_STACK, featured_projects};
use crate::rain::Rain;

/// Owner key of the home page's theme override.
pub const THEME_OWNER: &str = "home";

#[derive(Debug, Default)]
pub struct HomePage {
    rain: Option<Rain>,
    assets: AssetFallbacks,
}

impl HomePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rain(&self) -> Option<&Rain> {
        self.rain.as_ref()
    }

    fn hero(&self, config: &SiteConfig) -> Element {
        let owner = &config.owner;
        Element::new("section")
            .class("hero")
            .child_opt(self.rain.as_ref().map(Rain::view))
            .child(
                Element::new("div")
                    .class("hero__content")
                    .child(Element::new("p").class("hero__eyebrow").text("Hello, I'm"))
                    .child(Element::new("h1").class("hero__name").text(owner.name.clone()))
                    .child(Element::new("h2").class("hero__title").text(owner.title.clone()))
                    .child(Element::new("p").class("hero__tagline").text(owner.tagline.clone()))
                    .child(
                        Element::new("div")
                            .class("hero__actions")
                            .child(link("/contact", "Let's Work Together").class("button button--primary"))
                            .child(resume_link(config, "button button--secondary")),
                    )
                    .child(
                        Element::new("ul")
                            .class("tech-stack")
                            .children(TECH_STACK.iter().map(|t| Element::new("li").text(*t))),
                    ),
            )
    }

    fn featured(&self) -> Element {
        let cards = featured_projects().map(|p| {
            let asset = project_asset(p.id);
            Element::new("article")
                .class("project-card")
                .attr("data-project", p.id)
                .child(self.assets.image(&asset, p.image, p.title, image_placeholder(p.title)))
                .child(Element::new("h3").text(p.title))
                .child(Element::new("p").text(p.description))
                .child(
                    Element::new("ul")
                        .class("tags")
                        .children(p.technologies.iter().map(|t| Element::new("li").text(*t))),
                )
        });
        Element::new("section")
            .class("featured")
            .child(Element::new("h2").text("Featured Projects"))
            .child(Element::new("div").class("project-grid").children(cards))
            .child(link("/experience", "View All Projects").class("button button--ghost"))
    }
}

impl Page for HomePage {
    fn kind(&self) -> PageKind {
        PageKind::Home
    }

    fn mount(&mut self, ctx: &mut PageCtx<'_>) -> AppCmd {
        ctx.theme
            .set_is_home_page(THEME_OWNER, true, ctx.config.theme.home_mode);
        let (rain, cmd) = Rain::mount(&ctx.config.rain, ctx.seeds.next_u64(), ctx.ids);
        self.rain = Some(rain);
        cmd
    }

    fn unmount(&mut self, ctx: &mut PageCtx<'_>) {
        ctx.theme
            .set_is_home_page(THEME_OWNER, false, ctx.config.theme.home_mode);
        self.rain = None;
    }

    fn on_event(&mut self, event: &Event, _ctx: &mut PageCtx<'_>) -> AppCmd {
        if self.assets.handle(event) {
            return Cmd::none();
        }
        match self.rain.as_mut() {
            Some(rain) => rain.handle(event),
            None => Cmd::none(),
        }
    }

    fn view(&self, config: &SiteConfig) -> Element {
        Element::new("div")
            .class("page page--home")
            .child(self.hero(config))
            .child(self.featured())
    }

    fn subscriptions(&self) -> Vec<Sub> {
        self.rain.as_ref().map(Rain::subscriptions).unwrap_or_default()
    }
}
