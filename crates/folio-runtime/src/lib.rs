#![forbid(unsafe_code)]

//! Folio Runtime
//!
//! Elm-style application runtime driven entirely by the host.
//!
//! # Key Components
//!
//! - [`Model`] - Trait for application state and behavior
//! - [`Cmd`] - Commands for side effects
//! - [`Sub`] - Declarative timers and window listeners
//! - [`StepProgram`] - Non-blocking runner the host steps from its event loop
//! - [`StorageBackend`] - Key/value persistence for user preferences
//!
//! # How it fits in the system
//! The host (browser glue in `folio-web`) pushes `folio_core::Event`s, calls
//! [`StepProgram::step`], then drains [`ProgramOutputs`]: DOM patches to
//! apply, effects to execute and subscription changes to honor.

pub mod program;
pub mod state_persistence;
pub mod step_program;
pub mod subscription;

pub use program::{Cmd, Model};
pub use state_persistence::{MemoryStorage, StorageBackend, StorageError, StorageResult, load_parsed};
pub use step_program::{ProgramOutputs, StepProgram, StepResult};
pub use subscription::{Listener, Sub, SubChange, SubIds, SubKind, SubscriptionSet};

pub use folio_core::SubId;
