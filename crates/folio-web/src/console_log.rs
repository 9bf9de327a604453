#![forbid(unsafe_code)]

//! Tracing layer that writes one line per event to a console sink.
//!
//! Lines read `LEVEL target: message key=value ...`. The browser host
//! routes them to `console.error` / `console.warn` / `console.log` by level;
//! tests capture them in memory.
//!
//! ```
//! use folio_web::console_log::{ConsoleLayer, parse_level};
//! use tracing_subscriber::prelude::*;
//!
//! let layer = ConsoleLayer::new(|_level, _line: &str| {});
//! let subscriber = tracing_subscriber::registry().with(layer.with_filter(parse_level("debug")));
//! tracing::subscriber::with_default(subscriber, || tracing::info!("hello"));
//! ```

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::Context;

/// Destination for formatted lines.
pub type Sink = Box<dyn Fn(Level, &str) + Send + Sync>;

/// Parse a configured level name. Unknown names fall back to `info`.
pub fn parse_level(name: &str) -> LevelFilter {
    name.parse().unwrap_or(LevelFilter::INFO)
}

fn level_str(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARN",
        Level::INFO => "INFO",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

/// Collects the message and structured fields of one event.
#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = Some(rendered);
        } else {
            self.fields.push((field.name(), rendered));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push((field.name(), value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.push((field.name(), value.to_string()));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.push((field.name(), value.to_string()));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.push((field.name(), value.to_string()));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.push((field.name(), value.to_string()));
    }
}

/// Formats events and hands each line to a [`Sink`].
pub struct ConsoleLayer {
    sink: Sink,
}

impl ConsoleLayer {
    pub fn new(sink: impl Fn(Level, &str) + Send + Sync + 'static) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }

    fn format(event: &Event<'_>) -> String {
        let metadata = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let mut line = String::new();
        let _ = write!(
            line,
            "{} {}: {}",
            level_str(*metadata.level()),
            metadata.target(),
            visitor.message.unwrap_or_default()
        );
        for (name, value) in &visitor.fields {
            let _ = write!(line, " {name}={value}");
        }
        line
    }
}

impl<S> Layer<S> for ConsoleLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let line = Self::format(event);
        (self.sink)(*event.metadata().level(), &line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::prelude::*;

    fn capture(level: &str, f: impl FnOnce()) -> Vec<(Level, String)> {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lines);
        let layer = ConsoleLayer::new(move |level, line: &str| {
            sink.lock()
                .unwrap_or_else(|e| e.into_inner())
                .push((level, line.to_string()));
        });
        let subscriber = tracing_subscriber::registry().with(layer.with_filter(parse_level(level)));
        tracing::subscriber::with_default(subscriber, f);
        let out = lines.lock().unwrap_or_else(|e| e.into_inner()).clone();
        out
    }

    #[test]
    fn formats_level_target_message_and_fields() {
        let lines = capture("info", || {
            tracing::info!(target: "folio", path = "/about", page = "About", "navigated");
        });
        assert_eq!(
            lines,
            vec![(
                Level::INFO,
                "INFO folio: navigated path=/about page=About".to_string()
            )]
        );
    }

    #[test]
    fn numeric_and_display_fields() {
        let err = "boom";
        let lines = capture("debug", || {
            tracing::warn!(target: "relay", ticket = 7u64, retry = false, error = %err, "failed");
        });
        assert_eq!(lines[0].1, "WARN relay: failed ticket=7 retry=false error=boom");
    }

    #[test]
    fn level_filter_drops_quieter_events() {
        let lines = capture("warn", || {
            tracing::debug!("noise");
            tracing::info!("still noise");
            tracing::error!("kept");
        });
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::ERROR);
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(parse_level("verbose"), LevelFilter::INFO);
        assert_eq!(parse_level("trace"), LevelFilter::TRACE);
        assert_eq!(parse_level("off"), LevelFilter::OFF);
    }
}
