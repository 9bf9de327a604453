#![forbid(unsafe_code)]

//! Biography, quick stats and interests.

use folio_core::view::Element;
use folio_core::Event;
use folio_runtime::Cmd;

use super::{AssetFallbacks, Page, PageCtx, PageKind, resume_link};
use crate::app::AppCmd;
use crate::config::SiteConfig;
use crate::content::{BIO, INTERESTS, STATS};

/// Asset key of the profile photo.
pub const PROFILE_ASSET: &str = "profile";

#[derive(Debug, Default)]
pub struct AboutPage {
    assets: AssetFallbacks,
}

impl AboutPage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Page for AboutPage {
    fn kind(&self) -> PageKind {
        PageKind::About
    }

    fn on_event(&mut self, event: &Event, _ctx: &mut PageCtx<'_>) -> AppCmd {
        self.assets.handle(event);
        Cmd::none()
    }

    fn view(&self, config: &SiteConfig) -> Element {
        let owner = &config.owner;
        let initials = Element::new("div")
            .class("profile__initials")
            .attr("aria-label", owner.name.clone())
            .text(owner.initials());
        let photo = self.assets.image(
            PROFILE_ASSET,
            &config.assets.profile_image,
            &owner.name,
            initials,
        );

        Element::new("div")
            .class("page page--about")
            .child(
                Element::new("section")
                    .class("about__intro")
                    .child(Element::new("div").class("profile").child(photo))
                    .child(
                        Element::new("div")
                            .class("about__bio")
                            .child(Element::new("h1").text("About Me"))
                            .children(BIO.iter().map(|p| Element::new("p").text(*p)))
                            .child(resume_link(config, "button button--primary")),
                    ),
            )
            .child(
                Element::new("dl").class("stats").children(STATS.iter().flat_map(|(label, value)| {
                    [
                        Element::new("dt").text(*value),
                        Element::new("dd").text(*label),
                    ]
                })),
            )
            .child(
                Element::new("section")
                    .class("interests")
                    .child(Element::new("h2").text("When I'm not coding"))
                    .child(
                        Element::new("ul")
                            .children(INTERESTS.iter().map(|i| Element::new("li").text(*i))),
                    ),
            )
    }
}
