#![forbid(unsafe_code)]

//! The console layer wired to the real application model.
//!
//! Runs natively: the layer's sink is an in-memory buffer instead of the
//! browser console, everything else is what the wasm host installs.
//!
//! Run: `cargo test -p folio-web --test console_logging`

use std::sync::{Arc, Mutex};

use folio_core::Event;
use folio_runtime::{MemoryStorage, StepProgram, StorageBackend, StorageError, StorageResult};
use folio_site::{AppModel, HostEnv, SiteConfig};
use folio_web::console_log::{ConsoleLayer, parse_level};
use tracing::Level;
use tracing_subscriber::prelude::*;

type Lines = Arc<Mutex<Vec<(Level, String)>>>;

fn with_console<T>(level: &str, f: impl FnOnce() -> T) -> (T, Vec<(Level, String)>) {
    let lines: Lines = Arc::default();
    let sink = Arc::clone(&lines);
    let layer = ConsoleLayer::new(move |level, line: &str| {
        sink.lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((level, line.to_string()));
    });
    let subscriber = tracing_subscriber::registry().with(layer.with_filter(parse_level(level)));
    let out = tracing::subscriber::with_default(subscriber, f);
    let captured = lines.lock().unwrap_or_else(|e| e.into_inner()).clone();
    (out, captured)
}

fn program(storage: Box<dyn StorageBackend>) -> StepProgram<AppModel> {
    let env = HostEnv {
        initial_path: "/about".into(),
        ..HostEnv::default()
    };
    let model = AppModel::new(SiteConfig::default(), storage, env).expect("routes are valid");
    StepProgram::new(model)
}

#[test]
fn navigation_is_logged_at_info_with_path() {
    let (_, lines) = with_console("info", || {
        let mut program = program(Box::new(MemoryStorage::new()));
        program.init();
        program.push_event(Event::link("/contact"));
        program.step();
    });

    let navigations: Vec<&str> = lines
        .iter()
        .filter(|(level, line)| *level == Level::INFO && line.contains("navigated"))
        .map(|(_, line)| line.as_str())
        .collect();
    assert_eq!(navigations.len(), 2, "{lines:#?}");
    assert!(navigations[0].starts_with("INFO folio_site::app: navigated"));
    assert!(navigations[0].contains("path=/about"));
    assert!(navigations[1].contains("path=/contact"));
    assert!(navigations[1].contains("source=Link"));
    assert!(lines.iter().all(|(level, _)| *level <= Level::INFO));
}

struct Broken;

impl StorageBackend for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    fn load(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unavailable("denied".into()))
    }

    fn store(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Backend("quota".into()))
    }

    fn remove(&self, _key: &str) -> StorageResult<()> {
        Ok(())
    }
}

#[test]
fn storage_failures_surface_as_warnings() {
    let (effective, lines) = with_console("warn", || {
        let mut program = program(Box::new(Broken));
        program.init();
        program.push_event(Event::action("theme:toggle"));
        program.step();
        program.model().theme().effective()
    });

    // The toggle still took effect in memory.
    assert_eq!(effective.as_str(), "dark");
    let warnings: Vec<&String> = lines
        .iter()
        .filter(|(level, _)| *level == Level::WARN)
        .map(|(_, line)| line)
        .collect();
    assert!(warnings.iter().any(|l| l.contains("backend=broken")), "{warnings:#?}");
    assert!(warnings.iter().any(|l| l.contains("quota")), "{warnings:#?}");
}
