#![forbid(unsafe_code)]

//! Folio Site
//!
//! The portfolio application: routed pages inside a persistent header and
//! footer, a decorative falling-glyph background and a contact form that
//! forwards inquiries to an external relay.
//!
//! # Key Components
//!
//! - [`AppModel`] - Router, layout shell and page lifecycle
//! - [`SiteConfig`] - Host-supplied configuration (JSON)
//! - [`rain`] - Background animation state and component
//! - [`contact`] - Form validation and submission state machine
//! - [`Relay`] - Contract for delivering contact messages
//!
//! # How it fits in the system
//! `folio-site` is pure Rust with no browser dependency. It runs under
//! `folio_runtime::StepProgram`; the `folio-web` host feeds it events and
//! executes the [`AppEffect`]s it emits. Everything here is exercised
//! natively in tests.

pub mod app;
pub mod boundary;
pub mod chrome;
pub mod config;
pub mod contact;
pub mod content;
pub mod pages;
pub mod rain;
pub mod relay;

pub use app::{Action, AppCmd, AppEffect, AppModel, AppMsg, HostEnv, MountStats};
pub use config::{ConfigError, SiteConfig};
pub use pages::PageKind;
pub use rain::{DrawOp, RainConfig};
pub use relay::{MockRelay, Relay, RelayFailure, RelayRequest, deliver};
