#![forbid(unsafe_code)]

//! Step-based program runner.
//!
//! [`StepProgram`] drives a [`Model`] through init / event / update / view
//! cycles without threads or blocking. The host controls the event loop:
//!
//! 1. Push events via [`StepProgram::push_event`] (or finished async work
//!    via [`StepProgram::push_message`]).
//! 2. Call [`StepProgram::step`] to process the queue and render.
//! 3. Drain [`StepProgram::take_outputs`] and apply the patches, execute the
//!    effects and honor the subscription changes.
//!
//! # Example
//!
//! ```ignore
//! use folio_core::Event;
//! use folio_runtime::StepProgram;
//!
//! let mut prog = StepProgram::new(MyModel::default());
//! prog.init();
//!
//! prog.push_event(Event::link("/about"));
//! let result = prog.step();
//!
//! if result.rendered {
//!     let outputs = prog.take_outputs();
//!     // Apply outputs.patches to the DOM...
//! }
//! ```

use std::collections::VecDeque;

use folio_core::Event;
use folio_core::diff::{Patch, diff};
use folio_core::view::Node;

use crate::program::{Cmd, Model};
use crate::subscription::{SubChange, SubscriptionSet};

/// Result of a single [`StepProgram::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the program is still running (false after shutdown).
    pub running: bool,
    /// Whether a frame was rendered during this step.
    pub rendered: bool,
    /// Number of queued events and messages processed during this step.
    pub events_processed: u32,
    /// Current frame index (monotonically increasing).
    pub frame_idx: u64,
}

/// Everything the host must act on after a step.
#[derive(Debug)]
pub struct ProgramOutputs<E> {
    /// DOM patches, in application order.
    pub patches: Vec<Patch>,
    /// Effects, in emission order.
    pub effects: Vec<E>,
    /// Subscription handles to acquire or release, in order.
    pub sub_changes: Vec<SubChange>,
}

impl<E> Default for ProgramOutputs<E> {
    fn default() -> Self {
        Self {
            patches: Vec::new(),
            effects: Vec::new(),
            sub_changes: Vec::new(),
        }
    }
}

impl<E> ProgramOutputs<E> {
    /// Whether there is nothing to do.
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty() && self.effects.is_empty() && self.sub_changes.is_empty()
    }
}

enum Pending<M> {
    Event(Event),
    Msg(M),
}

/// Host-driven, non-blocking program runner.
///
/// # Lifecycle
///
/// 1. [`StepProgram::new`]: wrap the model.
/// 2. [`StepProgram::init`]: call once to initialize the model and render the first frame.
/// 3. [`StepProgram::step`]: call whenever the host has queued work.
/// 4. [`StepProgram::shutdown`]: release every subscription when the host unmounts.
pub struct StepProgram<M: Model> {
    model: M,
    queue: VecDeque<Pending<M::Message>>,
    subs: SubscriptionSet,
    outputs: ProgramOutputs<M::Effect>,
    running: bool,
    initialized: bool,
    dirty: bool,
    frame_idx: u64,
    prev_view: Option<Node>,
}

impl<M: Model> StepProgram<M> {
    /// Create a new step program around `model`.
    #[must_use]
    pub fn new(model: M) -> Self {
        Self {
            model,
            queue: VecDeque::new(),
            subs: SubscriptionSet::new(),
            outputs: ProgramOutputs::default(),
            running: true,
            initialized: false,
            dirty: true,
            frame_idx: 0,
            prev_view: None,
        }
    }

    /// Initialize the model and render the first frame.
    ///
    /// Must be called exactly once before [`step`](Self::step). The first
    /// frame is emitted as a replacement of the root node.
    pub fn init(&mut self) {
        assert!(!self.initialized, "StepProgram::init() called twice");
        self.initialized = true;
        let cmd = self.model.init();
        self.execute_cmd(cmd);
        self.reconcile();
        self.render_frame();
    }

    /// Process every queued event and message, then render if anything changed.
    pub fn step(&mut self) -> StepResult {
        assert!(self.initialized, "StepProgram::step() called before init()");

        if !self.running {
            return StepResult {
                running: false,
                rendered: false,
                events_processed: 0,
                frame_idx: self.frame_idx,
            };
        }

        let mut events_processed: u32 = 0;
        while let Some(pending) = self.queue.pop_front() {
            events_processed += 1;
            match pending {
                Pending::Event(event) => self.handle_event(event),
                Pending::Msg(msg) => self.handle_message(msg),
            }
        }

        let rendered = if self.dirty {
            self.render_frame();
            true
        } else {
            false
        };

        StepResult {
            running: self.running,
            rendered,
            events_processed,
            frame_idx: self.frame_idx,
        }
    }

    /// Queue a host event for the next [`step`](Self::step).
    pub fn push_event(&mut self, event: Event) {
        if self.running {
            self.queue.push_back(Pending::Event(event));
        }
    }

    /// Queue a model message, typically the result of asynchronous work the
    /// host ran on behalf of an effect.
    pub fn push_message(&mut self, msg: M::Message) {
        if self.running {
            self.queue.push_back(Pending::Msg(msg));
        }
    }

    /// Stop every subscription and refuse further work.
    ///
    /// The resulting [`SubChange::Stop`]s are left in the outputs for the
    /// host to release. Idempotent.
    pub fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.queue.clear();
        let stops = self.subs.stop_all();
        tracing::debug!(stopped = stops.len(), "program shut down");
        self.outputs.sub_changes.extend(stops);
    }

    /// Take the accumulated outputs, leaving empty defaults.
    pub fn take_outputs(&mut self) -> ProgramOutputs<M::Effect> {
        std::mem::take(&mut self.outputs)
    }

    /// Read the accumulated outputs without consuming them.
    pub fn outputs(&self) -> &ProgramOutputs<M::Effect> {
        &self.outputs
    }

    /// Access the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutably access the model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Subscriptions the host currently holds handles for.
    pub fn active_subscriptions(&self) -> &SubscriptionSet {
        &self.subs
    }

    /// The last rendered view tree.
    pub fn current_view(&self) -> Option<&Node> {
        self.prev_view.as_ref()
    }

    /// Number of queued events and messages.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Whether the program is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the program has been initialized.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Current frame index.
    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    // --- Private helpers ---

    fn handle_event(&mut self, event: Event) {
        // A timer may fire once more after its stop was emitted but before
        // the host released the handle.
        if let Event::Timer(id) = event
            && !self.subs.is_active(id)
        {
            tracing::trace!(sub_id = id, "dropping tick from stopped timer");
            return;
        }
        tracing::trace!(kind = event.kind(), "event");
        self.handle_message(M::Message::from(event));
    }

    fn handle_message(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.dirty = true;
        self.execute_cmd(cmd);
        self.reconcile();
    }

    fn reconcile(&mut self) {
        let declared = self.model.subscriptions();
        let changes = self.subs.reconcile(declared);
        self.outputs.sub_changes.extend(changes);
    }

    fn render_frame(&mut self) {
        let view = self.model.view();
        let patches = match &self.prev_view {
            Some(prev) => diff(prev, &view),
            None => vec![Patch::Replace {
                path: Vec::new(),
                node: view.clone(),
            }],
        };
        tracing::trace!(frame = self.frame_idx, patches = patches.len(), "rendered");
        self.outputs.patches.extend(patches);
        self.prev_view = Some(view);
        self.dirty = false;
        self.frame_idx += 1;
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message, M::Effect>) {
        match cmd {
            Cmd::None => {}
            Cmd::Msg(m) => {
                let cmd = self.model.update(m);
                self.execute_cmd(cmd);
            }
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute_cmd(c);
                }
            }
            Cmd::Effect(e) => self.outputs.effects.push(e),
        }
    }
}
