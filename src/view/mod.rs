//! What the View sees.
//!
//! The View is whatever draws the table: a terminal UI, a web page, a test
//! harness. It receives a freshly derived [`Presentation`] plus the events
//! of the last transition, and raises intents back into the session. It
//! never changes game state itself.

mod presentation;
mod prompt;

pub use presentation::{Control, HandView, Presentation, ScoreLine, Screen, SlotView};
pub use prompt::{render_prompt, PromptTemplates};

use crate::events::GameEvent;

/// Renders the table.
pub trait View {
    fn present(&mut self, presentation: &Presentation, events: &[GameEvent]);
}
