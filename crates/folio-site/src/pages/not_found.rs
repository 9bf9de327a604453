#![forbid(unsafe_code)]

//! Fallback for paths with no route.

use folio_core::view::Element;

use super::{Page, PageKind, link};
use crate::config::SiteConfig;

#[derive(Debug, Default)]
pub struct NotFoundPage;

impl Page for NotFoundPage {
    fn kind(&self) -> PageKind {
        PageKind::NotFound
    }

    fn view(&self, _config: &SiteConfig) -> Element {
        Element::new("div")
            .class("page page--not-found")
            .child(Element::new("p").class("not-found__code").text("404"))
            .child(Element::new("h1").text("Page Not Found"))
            .child(Element::new("p").text("The page you're looking for doesn't exist."))
            .child(link("/", "Go Home").class("button button--primary"))
    }
}
