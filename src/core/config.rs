//! Game configuration.
//!
//! `GameConfig` carries every table rule that is a number rather than a
//! phase: seat bounds, hand size, how many cards are revealed, the round
//! count, when Stop unlocks, how many extra draws card `A` grants, and the
//! deck composition. It also holds the View-facing knobs (presentation gate,
//! prompt templates).
//!
//! Defaults reproduce the table game. Configs can be built with the `with_*`
//! methods or loaded from JSON; missing JSON fields fall back to defaults.
//!
//! ```
//! use cardstop::core::GameConfig;
//!
//! let config = GameConfig::new().with_rounds(3).with_seed(11);
//! assert!(config.validate().is_ok());
//!
//! let loaded = GameConfig::from_json(r#"{ "rounds": 3 }"#).unwrap();
//! assert_eq!(loaded.rounds, 3);
//! assert_eq!(loaded.hand_size, 4);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::DeckComposition;
use crate::view::PromptTemplates;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub min_players: usize,
    pub max_players: usize,

    /// Slots dealt to every player each round.
    pub hand_size: usize,

    /// Own cards each player looks at during the reveal phase.
    pub reveal_count: usize,

    /// Rounds per game.
    pub rounds: u8,

    /// Stop unlocks once the full-rotation counter exceeds this.
    pub stop_after_turns: u32,

    /// Draws granted by card `A`.
    pub extra_draws: u8,

    pub deck: DeckComposition,

    /// Fixed seed for reproducible games, `None` for entropy.
    pub seed: Option<u64>,

    /// Block intents after an animated transition until the View sends
    /// `PresentationComplete`.
    pub await_presentation: bool,

    pub prompts: PromptTemplates,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 4,
            hand_size: 4,
            reveal_count: 2,
            rounds: 6,
            stop_after_turns: 1,
            extra_draws: 2,
            deck: DeckComposition::default(),
            seed: None,
            await_presentation: false,
            prompts: PromptTemplates::default(),
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_players(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    #[must_use]
    pub fn with_reveal_count(mut self, reveal_count: usize) -> Self {
        self.reveal_count = reveal_count;
        self
    }

    #[must_use]
    pub fn with_rounds(mut self, rounds: u8) -> Self {
        self.rounds = rounds;
        self
    }

    #[must_use]
    pub fn with_stop_after_turns(mut self, turns: u32) -> Self {
        self.stop_after_turns = turns;
        self
    }

    #[must_use]
    pub fn with_extra_draws(mut self, draws: u8) -> Self {
        self.extra_draws = draws;
        self
    }

    #[must_use]
    pub fn with_deck(mut self, deck: DeckComposition) -> Self {
        self.deck = deck;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_presentation_gate(mut self, enabled: bool) -> Self {
        self.await_presentation = enabled;
        self
    }

    #[must_use]
    pub fn with_prompts(mut self, prompts: PromptTemplates) -> Self {
        self.prompts = prompts;
        self
    }

    /// Check that a game with this config can always be dealt and scored.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players < 2 || self.max_players < self.min_players || self.max_players > 8 {
            return Err(ConfigError::Invalid(format!(
                "player bounds {}..={} must lie within 2..=8",
                self.min_players, self.max_players
            )));
        }
        if self.hand_size == 0 {
            return Err(ConfigError::Invalid("hand size must be at least 1".into()));
        }
        if self.reveal_count == 0 || self.reveal_count > self.hand_size {
            return Err(ConfigError::Invalid(format!(
                "reveal count {} must be within 1..={}",
                self.reveal_count, self.hand_size
            )));
        }
        if self.rounds == 0 {
            return Err(ConfigError::Invalid("at least one round is required".into()));
        }
        if self.extra_draws == 0 {
            return Err(ConfigError::Invalid("card A must grant at least one draw".into()));
        }
        if self.deck.numeric_total() == 0 {
            return Err(ConfigError::Invalid("deck needs numeric cards to score".into()));
        }
        let dealt = self.hand_size * self.max_players;
        if self.deck.total() <= dealt {
            return Err(ConfigError::Invalid(format!(
                "deck of {} cards can't deal {} and keep a draw pile",
                self.deck.total(),
                dealt
            )));
        }
        Ok(())
    }
}
