#![forbid(unsafe_code)]

//! Elm-style model contract.
//!
//! A [`Model`] owns all application state. The runtime feeds it messages,
//! asks it for a view tree after every update and collects the [`Cmd`]s it
//! returns. Side effects never happen inside `update`: the model describes
//! them as effect values and the host executes them.
//!
//! # Example
//!
//! ```
//! use folio_core::Event;
//! use folio_core::view::{Element, Node};
//! use folio_runtime::{Cmd, Model};
//!
//! struct Counter {
//!     count: i32,
//! }
//!
//! enum Msg {
//!     Increment,
//!     Ignore,
//! }
//!
//! impl From<Event> for Msg {
//!     fn from(event: Event) -> Self {
//!         match event {
//!             Event::Action(a) if a == "inc" => Msg::Increment,
//!             _ => Msg::Ignore,
//!         }
//!     }
//! }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!     type Effect = ();
//!
//!     fn update(&mut self, msg: Msg) -> Cmd<Msg, ()> {
//!         if let Msg::Increment = msg {
//!             self.count += 1;
//!         }
//!         Cmd::none()
//!     }
//!
//!     fn view(&self) -> Node {
//!         Element::new("p").text(self.count.to_string()).into()
//!     }
//! }
//! ```

use folio_core::Event;
use folio_core::view::Node;

use crate::subscription::Sub;

/// The Model trait defines application state and behavior.
pub trait Model: Sized {
    /// The message type for this model.
    ///
    /// Must be convertible from host events.
    type Message: From<Event>;

    /// Host requests produced by this model (navigation, painting, network).
    type Effect;

    /// Initialize the model with startup commands.
    ///
    /// Called once, before the first render.
    fn init(&mut self) -> Cmd<Self::Message, Self::Effect> {
        Cmd::none()
    }

    /// Update the model in response to a message.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message, Self::Effect>;

    /// Build the current view tree.
    fn view(&self) -> Node;

    /// Declare active subscriptions.
    ///
    /// Called after every update. Subscriptions that disappear from the
    /// returned set are stopped in the same step.
    fn subscriptions(&self) -> Vec<Sub> {
        Vec::new()
    }
}

/// Commands returned by [`Model::update`].
#[derive(Debug, PartialEq)]
pub enum Cmd<M, E> {
    /// No operation.
    None,
    /// Feed a message back into the model immediately.
    Msg(M),
    /// Execute several commands in order.
    Batch(Vec<Cmd<M, E>>),
    /// Hand an effect to the host.
    Effect(E),
}

impl<M, E> Default for Cmd<M, E> {
    fn default() -> Self {
        Self::None
    }
}

impl<M, E> Cmd<M, E> {
    /// Create a no-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a message command.
    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Create an effect command.
    #[inline]
    pub fn effect(e: E) -> Self {
        Self::Effect(e)
    }

    /// Create a batch of commands, dropping no-ops.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or(Self::None),
            _ => Self::Batch(cmds),
        }
    }

    /// Whether this is [`Cmd::None`].
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Return a stable name for tracing.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Msg(_) => "Msg",
            Self::Batch(_) => "Batch",
            Self::Effect(_) => "Effect",
        }
    }

    /// Transform the message type, e.g. to lift a child component's
    /// commands into its parent's message space.
    pub fn map_msg<N>(self, f: &impl Fn(M) -> N) -> Cmd<N, E> {
        match self {
            Self::None => Cmd::None,
            Self::Msg(m) => Cmd::Msg(f(m)),
            Self::Batch(cmds) => Cmd::Batch(cmds.into_iter().map(|c| c.map_msg(f)).collect()),
            Self::Effect(e) => Cmd::Effect(e),
        }
    }

    /// Flatten into the effects it carries, in execution order, discarding
    /// messages. Used by tests and by components that never emit messages.
    pub fn into_effects(self) -> Vec<E> {
        let mut out = Vec::new();
        self.collect_effects(&mut out);
        out
    }

    fn collect_effects(self, out: &mut Vec<E>) {
        match self {
            Self::None | Self::Msg(_) => {}
            Self::Batch(cmds) => cmds.into_iter().for_each(|c| c.collect_effects(out)),
            Self::Effect(e) => out.push(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    type C = Cmd<u8, &'static str>;

    #[test]
    fn batch_collapses_trivial_cases() {
        assert_eq!(C::batch(vec![]), Cmd::None);
        assert_eq!(C::batch(vec![Cmd::None, Cmd::None]), Cmd::None);
        assert_eq!(C::batch(vec![Cmd::None, Cmd::msg(1)]), Cmd::Msg(1));
        assert_eq!(
            C::batch(vec![Cmd::msg(1), Cmd::None, Cmd::effect("x")]),
            Cmd::Batch(vec![Cmd::Msg(1), Cmd::Effect("x")])
        );
    }

    #[test]
    fn type_names() {
        assert_eq!(C::none().type_name(), "None");
        assert_eq!(C::msg(0).type_name(), "Msg");
        assert_eq!(C::effect("e").type_name(), "Effect");
        assert_eq!(C::Batch(vec![]).type_name(), "Batch");
    }

    #[test]
    fn map_msg_preserves_structure() {
        let cmd = C::Batch(vec![Cmd::msg(2), Cmd::effect("paint")]);
        let mapped: Cmd<u16, &str> = cmd.map_msg(&|m| u16::from(m) * 100);
        assert_eq!(
            mapped,
            Cmd::Batch(vec![Cmd::Msg(200), Cmd::Effect("paint")])
        );
    }

    #[test]
    fn into_effects_flattens_in_order() {
        let cmd = C::Batch(vec![
            Cmd::effect("a"),
            Cmd::msg(1),
            Cmd::Batch(vec![Cmd::effect("b"), Cmd::effect("c")]),
        ]);
        assert_eq!(cmd.into_effects(), vec!["a", "b", "c"]);
    }
}
