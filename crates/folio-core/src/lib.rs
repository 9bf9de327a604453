#![forbid(unsafe_code)]

//! Core: host events, geometry, theme context, routing, and view trees.
//!
//! Nothing in this crate touches the browser. The host (see `folio-web`)
//! translates DOM activity into [`event::Event`] values and applies the
//! [`diff::Patch`] lists produced from [`view::Node`] trees.

pub mod diff;
pub mod event;
pub mod geometry;
pub mod nav;
pub mod rng;
pub mod theme;
pub mod view;

pub use event::{Event, NavSource, SubId};
pub use geometry::Size;
