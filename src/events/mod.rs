//! Logical events emitted by transitions.
//!
//! A transition reports *what* happened (a card was swapped, a slot was
//! peeked) and leaves the *how* to the View. Events that the View is
//! expected to animate are flagged by [`GameEvent::needs_presentation`];
//! with the presentation gate enabled the session waits for the View to
//! acknowledge them.

mod event;
mod queue;

pub use event::GameEvent;
pub use queue::EventQueue;
