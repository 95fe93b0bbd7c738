use super::GameEvent;

/// Ordered events collected while one intent is applied.
#[derive(Debug, Default)]
pub struct EventQueue {
    queue: Vec<GameEvent>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        log::trace!("event: {event}");
        self.queue.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        for event in events {
            self.push(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Whether any queued event has to be shown before play continues.
    #[must_use]
    pub fn needs_presentation(&self) -> bool {
        self.queue.iter().any(GameEvent::needs_presentation)
    }

    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.queue.drain(..)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<GameEvent> {
        self.queue
    }
}
