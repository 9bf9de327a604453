#![forbid(unsafe_code)]

//! Render error boundary.
//!
//! Wraps the whole shell render. The first panic is captured and the
//! boundary latches into the failed state: every later render returns the
//! recovery panel, whose only control asks the host for a full reload. The
//! failed subtree is never rendered again in this session.

use std::cell::RefCell;
use std::panic::{AssertUnwindSafe, catch_unwind};

use folio_core::view::Element;

/// Captured error from a render panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedError {
    /// Message extracted from the panic payload.
    pub message: String,
    /// Name of the page that was rendering.
    pub page: &'static str,
}

impl CapturedError {
    fn from_panic(payload: Box<dyn std::any::Any + Send>, page: &'static str) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        Self { message, page }
    }
}

pub const RECOVERY_TITLE: &str = "Something went wrong";
pub const RECOVERY_BODY: &str = "Please refresh the page to try again.";
pub const RELOAD_LABEL: &str = "Refresh Page";

/// Latching panic boundary.
///
/// Rendering takes `&self`, so the captured state sits in a `RefCell`.
#[derive(Debug, Default)]
pub struct ErrorBoundary {
    failure: RefCell<Option<CapturedError>>,
}

impl ErrorBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `f`, or the recovery panel if `f` panics now or panicked before.
    pub fn render(&self, page: &'static str, f: impl FnOnce() -> Element) -> Element {
        if self.is_failed() {
            return recovery_panel();
        }
        match catch_unwind(AssertUnwindSafe(f)) {
            Ok(view) => view,
            Err(payload) => {
                let captured = CapturedError::from_panic(payload, page);
                tracing::error!(page, message = %captured.message, "render panicked; showing recovery panel");
                *self.failure.borrow_mut() = Some(captured);
                recovery_panel()
            }
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure.borrow().is_some()
    }

    /// The captured error, if any.
    pub fn error(&self) -> Option<CapturedError> {
        self.failure.borrow().clone()
    }
}

/// Full-screen recovery panel. Its button carries the `reload` action.
pub fn recovery_panel() -> Element {
    Element::new("div").class("app recovery").child(
        Element::new("div")
            .class("recovery__panel")
            .attr("role", "alert")
            .child(Element::new("h1").text(RECOVERY_TITLE))
            .child(Element::new("p").text(RECOVERY_BODY))
            .child(
                Element::new("button")
                    .attr("type", "button")
                    .class("button button--primary")
                    .attr("data-action", "reload")
                    .text(RELOAD_LABEL),
            ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::view::Node;

    #[test]
    fn healthy_render_passes_through() {
        let boundary = ErrorBoundary::new();
        let view = boundary.render("home", || Element::new("main").text("ok"));
        assert_eq!(Node::from(view).text_content(), "ok");
        assert!(!boundary.is_failed());
    }

    #[test]
    fn panic_latches_recovery_panel() {
        let boundary = ErrorBoundary::new();
        let view = boundary.render("skills", || panic!("bad level {}", 9));
        let node = Node::from(view);
        assert!(node.text_content().contains(RECOVERY_TITLE));
        assert!(node.find_by_attr("data-action", "reload").is_some());
        assert_eq!(
            boundary.error(),
            Some(CapturedError {
                message: "bad level 9".into(),
                page: "skills"
            })
        );

        // No retry without a reload.
        let mut called = false;
        let again = boundary.render("home", || {
            called = true;
            Element::new("main")
        });
        assert!(!called);
        assert_eq!(again, recovery_panel());
    }

    #[test]
    fn static_str_payload() {
        let boundary = ErrorBoundary::new();
        boundary.render("about", || panic!("plain"));
        assert_eq!(boundary.error().map(|e| e.message), Some("plain".into()));
    }
}
