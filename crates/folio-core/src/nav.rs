#![forbid(unsafe_code)]

//! Route table and route resolution.
//!
//! A [`RouteTable`] is the ordered list of named routes. The same table feeds
//! the header/footer link lists and the path-to-page binding, so the two can
//! never disagree.
//!
//! Route resolution is a small state machine:
//!
//! ```text
//! Unresolved ──navigate──▶ Matched(page)
//!      │                      ▲   │
//!      └──navigate──▶ NotFound ◀──┘ (any further navigate re-resolves)
//! ```

use std::fmt;

/// A named route binding a path to a page key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route<P> {
    /// Human-readable link label.
    pub name: &'static str,
    /// Normalized absolute path (`/`, `/about`, ...).
    pub path: &'static str,
    /// Page bound to this path.
    pub page: P,
}

/// Errors detected while building a [`RouteTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Two routes share the same path.
    DuplicatePath(&'static str),
    /// A route path is not in normalized form.
    NotNormalized(&'static str),
    /// No route is bound to `/`.
    MissingRoot,
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicatePath(p) => write!(f, "duplicate route path: {p}"),
            Self::NotNormalized(p) => write!(f, "route path is not normalized: {p}"),
            Self::MissingRoot => write!(f, "no route is bound to the root path"),
        }
    }
}

impl std::error::Error for RouteError {}

/// Result of resolving a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch<P> {
    /// A route matched.
    Matched(P),
    /// Nothing matched.
    NotFound,
}

/// Immutable, validated list of routes.
#[derive(Debug, Clone)]
pub struct RouteTable<P> {
    routes: Vec<Route<P>>,
}

impl<P: Copy + PartialEq> RouteTable<P> {
    /// Build a table. Paths must be unique and normalized, and `/` must be
    /// present.
    pub fn new(routes: Vec<Route<P>>) -> Result<Self, RouteError> {
        for (i, route) in routes.iter().enumerate() {
            if normalize_path(route.path) != route.path {
                return Err(RouteError::NotNormalized(route.path));
            }
            if routes[..i].iter().any(|r| r.path == route.path) {
                return Err(RouteError::DuplicatePath(route.path));
            }
        }
        if !routes.iter().any(|r| r.path == "/") {
            return Err(RouteError::MissingRoot);
        }
        Ok(Self { routes })
    }

    /// Routes in display order.
    pub fn routes(&self) -> &[Route<P>] {
        &self.routes
    }

    /// Resolve a raw path.
    pub fn resolve(&self, raw: &str) -> RouteMatch<P> {
        let path = normalize_path(raw);
        self.routes
            .iter()
            .find(|r| r.path == path)
            .map_or(RouteMatch::NotFound, |r| RouteMatch::Matched(r.page))
    }

    /// Route bound to `page`, if any.
    pub fn route_for(&self, page: P) -> Option<&Route<P>> {
        self.routes.iter().find(|r| r.page == page)
    }
}

/// Normalize a raw location path.
///
/// Strips the query string and fragment, ensures a leading `/`, collapses
/// repeated slashes and drops trailing slashes (the root stays `/`).
pub fn normalize_path(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let mut out = String::with_capacity(end + 1);
    for segment in raw[..end].split('/').filter(|s| !s.is_empty()) {
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Route resolution state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RouteState<P> {
    /// Nothing resolved yet.
    #[default]
    Unresolved,
    /// A page is bound to the current path.
    Matched {
        /// Normalized path.
        path: String,
        /// Bound page.
        page: P,
    },
    /// No route matched the current path.
    NotFound {
        /// Normalized path.
        path: String,
    },
}

impl<P: Copy + PartialEq> RouteState<P> {
    /// Resolve `raw` against `table` and produce the next state.
    pub fn resolve(table: &RouteTable<P>, raw: &str) -> Self {
        let path = normalize_path(raw);
        match table.resolve(&path) {
            RouteMatch::Matched(page) => Self::Matched { path, page },
            RouteMatch::NotFound => Self::NotFound { path },
        }
    }

    /// Normalized path of the current state (`None` while unresolved).
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Unresolved => None,
            Self::Matched { path, .. } | Self::NotFound { path } => Some(path),
        }
    }

    /// Bound page, if matched.
    pub fn page(&self) -> Option<P> {
        match self {
            Self::Matched { page, .. } => Some(*page),
            _ => None,
        }
    }

    /// Whether the current path is `path` (normalized comparison).
    pub fn is_active(&self, path: &str) -> bool {
        self.path() == Some(normalize_path(path).as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Page {
        Home,
        About,
    }

    fn table() -> RouteTable<Page> {
        RouteTable::new(vec![
            Route {
                name: "Home",
                path: "/",
                page: Page::Home,
            },
            Route {
                name: "About",
                path: "/about",
                page: Page::About,
            },
        ])
        .unwrap()
    }

    #[test]
    fn normalization_cases() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("about"), "/about");
        assert_eq!(normalize_path("/about/"), "/about");
        assert_eq!(normalize_path("//about//team/"), "/about/team");
        assert_eq!(normalize_path("/about?x=1#top"), "/about");
        assert_eq!(normalize_path("/?x=1"), "/");
        assert_eq!(normalize_path("#frag"), "/");
    }

    #[test]
    fn resolve_matches_and_misses() {
        let t = table();
        assert_eq!(t.resolve("/about/"), RouteMatch::Matched(Page::About));
        assert_eq!(t.resolve("/"), RouteMatch::Matched(Page::Home));
        assert_eq!(t.resolve("/unknown-path"), RouteMatch::NotFound);
    }

    #[test]
    fn construction_errors() {
        let dup = RouteTable::new(vec![
            Route {
                name: "Home",
                path: "/",
                page: Page::Home,
            },
            Route {
                name: "Again",
                path: "/",
                page: Page::About,
            },
        ]);
        assert_eq!(dup.unwrap_err(), RouteError::DuplicatePath("/"));

        let rootless = RouteTable::new(vec![Route {
            name: "About",
            path: "/about",
            page: Page::About,
        }]);
        assert_eq!(rootless.unwrap_err(), RouteError::MissingRoot);

        let messy = RouteTable::new(vec![Route {
            name: "About",
            path: "/about/",
            page: Page::About,
        }]);
        assert_eq!(messy.unwrap_err(), RouteError::NotNormalized("/about/"));
    }

    #[test]
    fn state_transitions() {
        let t = table();
        let state: RouteState<Page> = RouteState::default();
        assert_eq!(state.path(), None);

        let state = RouteState::resolve(&t, "/about?ref=nav");
        assert_eq!(state.page(), Some(Page::About));
        assert!(state.is_active("/about/"));

        let state = RouteState::resolve(&t, "/nope");
        assert_eq!(
            state,
            RouteState::NotFound {
                path: "/nope".into()
            }
        );
        assert_eq!(state.page(), None);
    }
}
