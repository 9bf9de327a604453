#![forbid(unsafe_code)]

//! Skills by category.
//!
//! Tracks the viewport width through its own resize listener and switches
//! to a compact layout (no descriptions, category picker as a select) below
//! the mobile breakpoint. The animated background sits behind the header.

use folio_core::view::Element;
use folio_core::{Event, SubId};
use folio_runtime::{Cmd, Listener, Sub, SubKind};

use super::{Page, PageCtx, PageKind};
use crate::app::{Action, AppCmd, AppEffect};
use crate::config::SiteConfig;
use crate::content::{MAX_LEVEL, Skill, SkillCategory};
use crate::rain::Rain;

#[derive(Debug, Default)]
pub struct SkillsPage {
    category: SkillCategory,
    width: f64,
    breakpoint: f64,
    resize_sub: Option<SubId>,
    rain: Option<Rain>,
}

impl SkillsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> SkillCategory {
        self.category
    }

    pub fn is_mobile(&self) -> bool {
        self.width < self.breakpoint
    }

    fn tabs(&self) -> Element {
        if self.is_mobile() {
            let options = SkillCategory::ALL.iter().map(|c| {
                Element::new("option")
                    .attr("value", format!("skills:category:{}", c.as_str()))
                    .flag("selected", *c == self.category)
                    .text(c.label())
            });
            return Element::new("select")
                .class("skills__picker")
                .attr("data-action-select", "")
                .attr("aria-label", "Skill category")
                .children(options);
        }
        let buttons = SkillCategory::ALL.iter().map(|c| {
            let active = *c == self.category;
            Element::new("button")
                .attr("type", "button")
                .class(if active { "tab tab--active" } else { "tab" })
                .attr("role", "tab")
                .attr("aria-selected", active.to_string())
                .attr("data-action", format!("skills:category:{}", c.as_str()))
                .text(c.label())
        });
        Element::new("div")
            .class("skills__tabs")
            .attr("role", "tablist")
            .children(buttons)
    }

    fn skill_row(&self, skill: &Skill) -> Element {
        let dots = (1..=MAX_LEVEL).map(|n| {
            Element::new("span").class(if n <= skill.level { "dot dot--on" } else { "dot" })
        });
        let row = Element::new("li")
            .class("skill")
            .child(Element::new("span").class("skill__name").text(skill.name))
            .child(
                Element::new("span")
                    .class("skill__level")
                    .attr("aria-label", format!("{} out of {MAX_LEVEL}", skill.level))
                    .children(dots),
            );
        if self.is_mobile() {
            row
        } else {
            row.child(Element::new("p").class("skill__description").text(skill.description))
        }
    }
}

impl Page for SkillsPage {
    fn kind(&self) -> PageKind {
        PageKind::Skills
    }

    fn mount(&mut self, ctx: &mut PageCtx<'_>) -> AppCmd {
        self.width = ctx.viewport.width;
        self.breakpoint = ctx.config.shell.mobile_breakpoint;
        self.resize_sub = Some(ctx.ids.next_id());
        let (rain, cmd) = Rain::mount(&ctx.config.rain, ctx.seeds.next_u64(), ctx.ids);
        self.rain = Some(rain);
        Cmd::batch(vec![cmd, Cmd::effect(AppEffect::MeasureViewport)])
    }

    fn unmount(&mut self, _ctx: &mut PageCtx<'_>) {
        self.resize_sub = None;
        self.rain = None;
    }

    fn on_event(&mut self, event: &Event, _ctx: &mut PageCtx<'_>) -> AppCmd {
        if let Event::Resize { width, .. } = event {
            let was_mobile = self.is_mobile();
            self.width = *width;
            if was_mobile != self.is_mobile() {
                tracing::debug!(width, mobile = self.is_mobile(), "skills layout changed");
            }
        }
        match self.rain.as_mut() {
            Some(rain) => rain.handle(event),
            None => Cmd::none(),
        }
    }

    fn on_action(&mut self, action: &Action, _ctx: &mut PageCtx<'_>) -> AppCmd {
        if let Action::SkillsCategory(category) = action {
            self.category = *category;
        }
        Cmd::none()
    }

    fn view(&self, _config: &SiteConfig) -> Element {
        let list = Element::new("ul")
            .class("skills__list")
            .children(self.category.skills().iter().map(|s| self.skill_row(s)));
        Element::new("div")
            .class(if self.is_mobile() {
                "page page--skills skills--compact"
            } else {
                "page page--skills"
            })
            .child(
                Element::new("section")
                    .class("skills__header")
                    .child_opt(self.rain.as_ref().map(Rain::view))
                    .child(Element::new("h1").text("Skills & Expertise")),
            )
            .child(self.tabs())
            .child(list)
    }

    fn subscriptions(&self) -> Vec<Sub> {
        let mut subs: Vec<Sub> = self
            .resize_sub
            .map(|id| Sub::listen(id, Listener::Resize))
            .into_iter()
            .collect();
        // Resize already reaches the background through this page's listener.
        if let Some(rain) = &self.rain {
            subs.extend(
                rain.subscriptions()
                    .into_iter()
                    .filter(|s| s.kind != SubKind::Listen(Listener::Resize)),
            );
        }
        subs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::geometry::Size;
    use folio_core::rng::Lcg;
    use folio_core::theme::ThemeContext;
    use folio_core::view::Node;
    use folio_runtime::SubIds;

    struct Harness {
        config: SiteConfig,
        theme: ThemeContext,
        ids: SubIds,
        seeds: Lcg,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                config: SiteConfig::default(),
                theme: ThemeContext::default(),
                ids: SubIds::new(),
                seeds: Lcg::new(9),
            }
        }

        fn ctx(&mut self, width: f64) -> PageCtx<'_> {
            PageCtx {
                config: &self.config,
                theme: &mut self.theme,
                ids: &mut self.ids,
                viewport: Size::new(width, 800.0),
                seeds: &mut self.seeds,
            }
        }
    }

    #[test]
    fn mount_requests_measurements_and_listens_for_resize() {
        let mut h = Harness::new();
        let mut page = SkillsPage::new();
        let effects = page.mount(&mut h.ctx(1280.0)).into_effects();
        assert_eq!(
            effects,
            vec![AppEffect::MeasureSurface, AppEffect::MeasureViewport]
        );
        assert!(!page.is_mobile());
        // Rain waits for its surface; only the page's own listener is live.
        assert_eq!(page.subscriptions().len(), 1);

        page.unmount(&mut h.ctx(1280.0));
        assert!(page.subscriptions().is_empty());
    }

    #[test]
    fn active_background_adds_only_its_timer() {
        let mut h = Harness::new();
        let mut page = SkillsPage::new();
        page.mount(&mut h.ctx(1280.0));
        page.on_event(
            &Event::SurfaceMeasured {
                width: 640.0,
                height: 360.0,
            },
            &mut h.ctx(1280.0),
        );
        let subs = page.subscriptions();
        let resize = subs
            .iter()
            .filter(|s| s.kind == SubKind::Listen(Listener::Resize))
            .count();
        let timers = subs
            .iter()
            .filter(|s| matches!(s.kind, SubKind::Interval(_)))
            .count();
        assert_eq!((resize, timers), (1, 1));

        let effects = page
            .on_event(
                &Event::Resize {
                    width: 1024.0,
                    height: 700.0,
                },
                &mut h.ctx(1024.0),
            )
            .into_effects();
        assert_eq!(effects, vec![AppEffect::MeasureSurface]);
    }

    #[test]
    fn resize_switches_layout() {
        let mut h = Harness::new();
        let mut page = SkillsPage::new();
        page.mount(&mut h.ctx(1280.0));
        let wide = Node::from(page.view(&h.config));
        assert!(wide.find_by_attr("class", "skills__tabs").is_some());
        assert!(wide.find_by_attr("class", "skill__description").is_some());

        page.on_event(
            &Event::Resize {
                width: 400.0,
                height: 800.0,
            },
            &mut h.ctx(400.0),
        );
        assert!(page.is_mobile());
        let narrow = Node::from(page.view(&h.config));
        assert!(narrow.find_by_attr("class", "skills__picker").is_some());
        assert!(narrow.find_by_attr("class", "skill__description").is_none());
    }

    #[test]
    fn category_action_switches_list() {
        let mut h = Harness::new();
        let mut page = SkillsPage::new();
        page.mount(&mut h.ctx(1280.0));
        assert_eq!(page.category(), SkillCategory::Frontend);
        page.on_action(&Action::SkillsCategory(SkillCategory::Databases), &mut h.ctx(1280.0));
        assert_eq!(page.category(), SkillCategory::Databases);
        let view = Node::from(page.view(&h.config));
        assert!(view.text_content().contains("PostgreSQL"));
        let active = view.find_by_attr("aria-selected", "true");
        assert_eq!(
            active.and_then(|e| e.get_attr("data-action")),
            Some("skills:category:databases")
        );
    }
}
