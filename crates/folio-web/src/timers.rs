#![forbid(unsafe_code)]

//! Live host handles for the program's subscriptions.
//!
//! Every `SubChange::Start` acquires exactly one handle (an interval or a
//! window listener) keyed by the subscription id; every `SubChange::Stop`
//! releases it. Callbacks only push an event and pump, so they hold a weak
//! reference to the host.

use std::collections::HashMap;

use folio_core::{Event, SubId};
use folio_runtime::{Listener, Sub, SubKind};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

enum Handle {
    Interval {
        id: i32,
        _callback: Closure<dyn FnMut()>,
    },
    Listener {
        event: &'static str,
        callback: Closure<dyn FnMut()>,
    },
}

fn event_name(listener: Listener) -> &'static str {
    match listener {
        Listener::Scroll => "scroll",
        Listener::Resize => "resize",
    }
}

/// Read the window state a listener reports.
pub(crate) fn window_event(window: &Window, listener: Listener) -> Event {
    match listener {
        Listener::Scroll => Event::Scroll {
            y: window.scroll_y().unwrap_or(0.0),
        },
        Listener::Resize => {
            let (width, height) = viewport(window);
            Event::Resize { width, height }
        }
    }
}

pub(crate) fn viewport(window: &Window) -> (f64, f64) {
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    (read(window.inner_width()), read(window.inner_height()))
}

#[derive(Default)]
pub(crate) struct Handles {
    live: HashMap<SubId, Handle>,
}

impl Handles {
    /// Acquire the handle for `sub`. `emit` is called from the browser
    /// whenever it fires.
    pub(crate) fn start(&mut self, window: &Window, sub: Sub, emit: impl Fn(Event) + 'static) {
        if self.live.contains_key(&sub.id) {
            tracing::warn!(id = sub.id, "subscription already live; ignoring start");
            return;
        }
        let handle = match sub.kind {
            SubKind::Interval(period) => {
                let id = sub.id;
                let callback = Closure::<dyn FnMut()>::new(move || emit(Event::Timer(id)));
                let millis = i32::try_from(period.as_millis()).unwrap_or(i32::MAX);
                match window.set_interval_with_callback_and_timeout_and_arguments_0(
                    callback.as_ref().unchecked_ref(),
                    millis,
                ) {
                    Ok(id) => Handle::Interval {
                        id,
                        _callback: callback,
                    },
                    Err(err) => {
                        tracing::error!(id = sub.id, error = ?err, "setInterval failed");
                        return;
                    }
                }
            }
            SubKind::Listen(listener) => {
                let reader = window.clone();
                let callback =
                    Closure::<dyn FnMut()>::new(move || emit(window_event(&reader, listener)));
                let event = event_name(listener);
                if let Err(err) = window
                    .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
                {
                    tracing::error!(id = sub.id, event, error = ?err, "addEventListener failed");
                    return;
                }
                Handle::Listener { event, callback }
            }
        };
        tracing::debug!(id = sub.id, "subscription started");
        self.live.insert(sub.id, handle);
    }

    pub(crate) fn stop(&mut self, window: &Window, id: SubId) {
        match self.live.remove(&id) {
            Some(Handle::Interval { id: handle, .. }) => window.clear_interval_with_handle(handle),
            Some(Handle::Listener { event, callback }) => {
                let _ = window
                    .remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
            }
            None => {
                tracing::warn!(id, "stop for unknown subscription");
                return;
            }
        }
        tracing::debug!(id, "subscription stopped");
    }

    pub(crate) fn len(&self) -> usize {
        self.live.len()
    }
}
