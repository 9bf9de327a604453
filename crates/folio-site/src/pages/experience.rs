#![forbid(unsafe_code)]

//! Career timeline and project portfolio.

use folio_core::view::Element;
use folio_core::Event;
use folio_runtime::Cmd;

use super::{AssetFallbacks, Page, PageCtx, PageKind, image_placeholder, project_asset};
use crate::app::{Action, AppCmd};
use crate::config::SiteConfig;
use crate::content::{PROJECTS, Project, ProjectCategory, TIMELINE, TimelineEntry, project};

/// Technologies shown on a collapsed project card before "+N more".
const TECH_PREVIEW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExperienceTab {
    #[default]
    Timeline,
    Projects,
}

impl ExperienceTab {
    pub const ALL: [ExperienceTab; 2] = [Self::Timeline, Self::Projects];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeline => "timeline",
            Self::Projects => "projects",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Timeline => "Professional Timeline",
            Self::Projects => "Featured Projects",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Project list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectFilter {
    #[default]
    All,
    Category(ProjectCategory),
}

impl ProjectFilter {
    pub fn parse(s: &str) -> Option<Self> {
        if s == "all" {
            return Some(Self::All);
        }
        ProjectCategory::parse(s).map(Self::Category)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Category(c) => c.as_str(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Projects",
            Self::Category(c) => c.label(),
        }
    }

    pub fn matches(self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Category(c) => project.category == c,
        }
    }

    /// Number of projects passing the filter.
    pub fn count(self) -> usize {
        PROJECTS.iter().filter(|p| self.matches(p)).count()
    }

    fn every() -> impl Iterator<Item = ProjectFilter> {
        std::iter::once(Self::All).chain(ProjectCategory::ALL.into_iter().map(Self::Category))
    }
}

#[derive(Debug, Default)]
pub struct ExperiencePage {
    tab: ExperienceTab,
    filter: ProjectFilter,
    expanded: Option<&'static str>,
    assets: AssetFallbacks,
}

impl ExperiencePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> ExperienceTab {
        self.tab
    }

    pub fn filter(&self) -> ProjectFilter {
        self.filter
    }

    /// Id of the expanded project card.
    pub fn expanded(&self) -> Option<&'static str> {
        self.expanded
    }

    /// Projects visible under the current filter.
    pub fn visible(&self) -> impl Iterator<Item = &'static Project> + '_ {
        PROJECTS.iter().filter(|p| self.filter.matches(p))
    }

    fn tabs(&self) -> Element {
        Element::new("div")
            .class("experience__tabs")
            .attr("role", "tablist")
            .children(ExperienceTab::ALL.iter().map(|t| {
                let active = *t == self.tab;
                Element::new("button")
                    .attr("type", "button")
                    .class(if active { "tab tab--active" } else { "tab" })
                    .attr("role", "tab")
                    .attr("aria-selected", active.to_string())
                    .attr("data-action", format!("experience:tab:{}", t.as_str()))
                    .text(t.label())
            }))
    }

    fn timeline(&self) -> Element {
        Element::new("ol")
            .class("timeline")
            .children(TIMELINE.iter().map(timeline_entry))
    }

    fn projects(&self) -> Element {
        let filters = ProjectFilter::every().map(|f| {
            let active = f == self.filter;
            Element::new("button")
                .attr("type", "button")
                .class(if active { "filter filter--active" } else { "filter" })
                .attr("aria-pressed", active.to_string())
                .attr("data-action", format!("experience:filter:{}", f.as_str()))
                .text(format!("{} ({})", f.label(), f.count()))
        });
        Element::new("section")
            .class("portfolio")
            .child(Element::new("div").class("portfolio__filters").children(filters))
            .child(
                Element::new("div")
                    .class("project-grid")
                    .children(self.visible().map(|p| self.project_card(p))),
            )
    }

    fn project_card(&self, p: &Project) -> Element {
        let expanded = self.expanded == Some(p.id);
        let asset = project_asset(p.id);
        let techs: Vec<&str> = if expanded {
            p.technologies.to_vec()
        } else {
            p.technologies.iter().take(TECH_PREVIEW).copied().collect()
        };
        let hidden = p.technologies.len() - techs.len();
        let metrics = p.metrics.entries();

        let mut card = Element::new("article")
            .class(if expanded { "project-card project-card--expanded" } else { "project-card" })
            .attr("data-project", p.id)
            .child(self.assets.image(&asset, p.image, p.title, image_placeholder(p.title)))
            .child(Element::new("span").class("project-card__platform").text(p.platform))
            .child(Element::new("h3").text(p.title))
            .child(Element::new("p").text(p.description))
            .child(
                Element::new("ul")
                    .class("tags")
                    .children(techs.into_iter().map(|t| Element::new("li").text(t)))
                    .child_opt((hidden > 0).then(|| {
                        Element::new("li").class("tags__more").text(format!("+{hidden} more"))
                    })),
            );
        if !metrics.is_empty() {
            card = card.child(Element::new("dl").class("metrics").children(
                metrics.into_iter().flat_map(|(label, value)| {
                    [Element::new("dt").text(label), Element::new("dd").text(value)]
                }),
            ));
        }
        if expanded {
            let links = [("Live Demo", p.live_url), ("Source", p.source_url)]
                .into_iter()
                .filter_map(|(label, url)| {
                    url.map(|u| {
                        Element::new("a")
                            .attr("href", u)
                            .attr("target", "_blank")
                            .attr("rel", "noopener noreferrer")
                            .text(label)
                    })
                });
            card = card
                .child(Element::new("p").class("project-card__details").text(p.details))
                .child(Element::new("div").class("project-card__links").children(links));
        }
        card.child(
            Element::new("button")
                .attr("type", "button")
                .class("link-button")
                .attr("aria-expanded", expanded.to_string())
                .attr("data-action", format!("experience:project:{}", p.id))
                .text(if expanded { "Show less" } else { "Learn more" }),
        )
    }
}

fn timeline_entry(entry: &TimelineEntry) -> Element {
    Element::new("li")
        .class(format!("timeline__entry timeline__entry--{}", entry.kind.as_str()))
        .child(Element::new("h3").text(entry.title))
        .child(
            Element::new("p")
                .class("timeline__meta")
                .text(format!("{} · {} · {}", entry.company, entry.location, entry.period)),
        )
        .child(Element::new("p").text(entry.description))
        .child(
            Element::new("ul")
                .class("timeline__achievements")
                .children(entry.achievements.iter().map(|a| Element::new("li").text(*a))),
        )
        .child(
            Element::new("ul")
                .class("tags")
                .children(entry.technologies.iter().map(|t| Element::new("li").text(*t))),
        )
}

impl Page for ExperiencePage {
    fn kind(&self) -> PageKind {
        PageKind::Experience
    }

    fn on_event(&mut self, event: &Event, _ctx: &mut PageCtx<'_>) -> AppCmd {
        self.assets.handle(event);
        Cmd::none()
    }

    fn on_action(&mut self, action: &Action, _ctx: &mut PageCtx<'_>) -> AppCmd {
        match action {
            Action::ExperienceTab(tab) => self.tab = *tab,
            Action::ExperienceFilter(filter) => {
                self.filter = *filter;
                if let Some(id) = self.expanded
                    && !project(id).is_some_and(|p| filter.matches(p))
                {
                    self.expanded = None;
                }
            }
            Action::ExperienceProject(id) => match project(id) {
                Some(p) if self.expanded == Some(p.id) => self.expanded = None,
                Some(p) => self.expanded = Some(p.id),
                None => tracing::debug!(id = %id, "unknown project"),
            },
            _ => {}
        }
        Cmd::none()
    }

    fn view(&self, _config: &SiteConfig) -> Element {
        Element::new("div")
            .class("page page--experience")
            .child(Element::new("h1").text("Experience"))
            .child(self.tabs())
            .child(match self.tab {
                ExperienceTab::Timeline => self.timeline(),
                ExperienceTab::Projects => self.projects(),
            })
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
    use pretty_assertions::assert_eq;

    fn act(page: &mut ExperiencePage, action: Action) {
        let config = SiteConfig::default();
        let mut theme = ThemeContext::default();
        let mut ids = SubIds::new();
        let mut seeds = Lcg::new(0);
        let mut ctx = PageCtx {
            config: &config,
            theme: &mut theme,
            ids: &mut ids,
            viewport: Size::ZERO,
            seeds: &mut seeds,
        };
        page.on_action(&action, &mut ctx);
    }

    #[test]
    fn filter_counts_add_up() {
        let total: usize = ProjectCategory::ALL
            .into_iter()
            .map(|c| ProjectFilter::Category(c).count())
            .sum();
        assert_eq!(ProjectFilter::All.count(), total);
        assert_eq!(ProjectFilter::parse("mobile"), Some(ProjectFilter::Category(ProjectCategory::Mobile)));
        assert_eq!(ProjectFilter::parse("all"), Some(ProjectFilter::All));
        assert_eq!(ProjectFilter::parse("desktop"), None);
    }

    #[test]
    fn timeline_is_default_tab() {
        let page = ExperiencePage::new();
        let view = Node::from(page.view(&SiteConfig::default()));
        assert!(view.find_by_attr("class", "timeline").is_some());
        assert!(view.text_content().contains(TIMELINE[0].company));
    }

    #[test]
    fn filtering_and_expansion() {
        let mut page = ExperiencePage::new();
        act(&mut page, Action::ExperienceTab(ExperienceTab::Projects));
        act(&mut page, Action::ExperienceProject("harbor".into()));
        assert_eq!(page.expanded(), Some("harbor"));

        act(&mut page, Action::ExperienceFilter(ProjectFilter::Category(ProjectCategory::Mobile)));
        assert_eq!(page.expanded(), None);
        assert!(page.visible().all(|p| p.category == ProjectCategory::Mobile));

        let view = Node::from(page.view(&SiteConfig::default()));
        let cards = view.find_all(&|e| e.get_attr("data-project").is_some());
        assert_eq!(cards.len(), ProjectFilter::Category(ProjectCategory::Mobile).count());
        assert!(view.text_content().contains("Mobile Apps (2)"));

        act(&mut page, Action::ExperienceProject("trailmate".into()));
        act(&mut page, Action::ExperienceProject("trailmate".into()));
        assert_eq!(page.expanded(), None);
        act(&mut page, Action::ExperienceProject("missing".into()));
        assert_eq!(page.expanded(), None);
    }

    #[test]
    fn collapsed_card_truncates_technologies() {
        let mut page = ExperiencePage::new();
        act(&mut page, Action::ExperienceTab(ExperienceTab::Projects));
        let view = Node::from(page.view(&SiteConfig::default()));
        // Harbor lists five technologies.
        assert!(view.text_content().contains("+2 more"));

        act(&mut page, Action::ExperienceProject("harbor".into()));
        let view = Node::from(page.view(&SiteConfig::default()));
        let harbor = view.find_by_attr("data-project", "harbor").cloned().map(Node::from);
        let text = harbor.map(|n| n.text_content()).unwrap_or_default();
        assert!(text.contains("Redis"));
        assert!(!text.contains("+2 more"));
    }
}
