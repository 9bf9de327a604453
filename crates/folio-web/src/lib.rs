#![forbid(unsafe_code)]

//! Browser host for the folio site.
//!
//! Owns every browser API the site touches and nothing else. The
//! application itself is `folio_site::AppModel` running under a
//! `folio_runtime::StepProgram`; this crate
//! - translates DOM activity into `folio_core::Event`s (delegated clicks,
//!   inputs, image errors, popstate),
//! - applies the program's DOM patches under the mount element,
//! - honors subscription changes with `setInterval` and window listeners,
//! - executes effects: history, document title, canvas painting, relay
//!   sends through `fetch`, focus and reload,
//! - persists the theme preference in `localStorage`,
//! - routes `tracing` output to the browser console.
//!
//! JavaScript mounts the site with `new FolioWeb("app", configJson)`.

pub mod console_log;

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod relay;
#[cfg(target_arch = "wasm32")]
mod storage;
#[cfg(target_arch = "wasm32")]
mod timers;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::FolioWeb;

/// Placeholder for non-wasm targets so the workspace builds and the
/// console layer can be tested natively.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct FolioWeb;
