#![forbid(unsafe_code)]

//! Canonical host events.
//!
//! The host owns every browser API. It observes DOM activity and pushes the
//! matching [`Event`] into the program; the model never sees a raw DOM event.
//!
//! # Design Notes
//!
//! - Clicks are delivered as opaque action strings taken from the clicked
//!   element's `data-action` attribute. Interpreting them is the model's job.
//! - `Scroll` and `Resize` are delivered while a subscription for the
//!   matching listener is active. `Resize` also answers a viewport
//!   measurement request from the model.
//! - `Timer` carries the id of the interval subscription that fired.

/// Identifier of a subscription (timer or listener).
pub type SubId = u64;

/// Where a navigation request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavSource {
    /// Path present at load time.
    Initial,
    /// An in-app link or a programmatic request. The host must push a
    /// history entry.
    Link,
    /// Back/forward traversal. The history entry already exists.
    History,
}

/// Canonical host event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Request to show the page at `path`.
    Navigate {
        /// Raw path as reported by the host (may carry a query or fragment).
        path: String,
        /// Origin of the request.
        source: NavSource,
    },

    /// The window scrolled. `y` is the vertical offset in CSS pixels.
    Scroll {
        /// Vertical scroll offset.
        y: f64,
    },

    /// The viewport was resized.
    Resize {
        /// Viewport width in CSS pixels.
        width: f64,
        /// Viewport height in CSS pixels.
        height: f64,
    },

    /// The drawing surface of a decorative canvas was measured.
    SurfaceMeasured {
        /// Surface width in CSS pixels.
        width: f64,
        /// Surface height in CSS pixels.
        height: f64,
    },

    /// The host could not acquire a 2D context for the drawing surface.
    SurfaceLost,

    /// An interval subscription fired.
    Timer(SubId),

    /// An element carrying `data-action` was activated.
    Action(String),

    /// A form control carrying `data-field` changed its value.
    Input {
        /// Value of the control's `data-field` attribute.
        field: String,
        /// Current control value.
        value: String,
    },

    /// An image carrying `data-asset` failed to load.
    AssetError {
        /// Value of the image's `data-asset` attribute.
        asset: String,
    },
}

impl Event {
    /// Convenience constructor for link navigation.
    pub fn link(path: impl Into<String>) -> Self {
        Self::Navigate {
            path: path.into(),
            source: NavSource::Link,
        }
    }

    /// Convenience constructor for an action click.
    pub fn action(action: impl Into<String>) -> Self {
        Self::Action(action.into())
    }

    /// Convenience constructor for a field edit.
    pub fn input(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Input {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Short, stable label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Navigate { .. } => "navigate",
            Self::Scroll { .. } => "scroll",
            Self::Resize { .. } => "resize",
            Self::SurfaceMeasured { .. } => "surface_measured",
            Self::SurfaceLost => "surface_lost",
            Self::Timer(_) => "timer",
            Self::Action(_) => "action",
            Self::Input { .. } => "input",
            Self::AssetError { .. } => "asset_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_fill_fields() {
        assert_eq!(
            Event::link("/about"),
            Event::Navigate {
                path: "/about".into(),
                source: NavSource::Link
            }
        );
        assert_eq!(
            Event::input("email", "a@b.co"),
            Event::Input {
                field: "email".into(),
                value: "a@b.co".into()
            }
        );
    }

    #[test]
    fn kinds_are_distinct() {
        let events = [
            Event::link("/"),
            Event::Scroll { y: 0.0 },
            Event::Resize {
                width: 1.0,
                height: 1.0,
            },
            Event::SurfaceMeasured {
                width: 1.0,
                height: 1.0,
            },
            Event::SurfaceLost,
            Event::Timer(1),
            Event::action("x"),
            Event::input("a", "b"),
            Event::AssetError { asset: "p".into() },
        ];
        let mut kinds: Vec<_> = events.iter().map(Event::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), events.len());
    }
}
