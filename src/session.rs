//! The game session: one table, from the menu to the final score.
//!
//! `GameSession` owns the rules, the RNG that seeds every game and the game
//! in progress, if any. It is the single entry point for the View:
//!
//! - [`GameSession::dispatch`] applies an intent and reports rejections
//! - [`GameSession::handle`] is the View boundary; rejections become a
//!   logged no-op
//! - [`GameSession::presentation`] derives what to show
//!
//! ```
//! use cardstop::{GameConfig, GameSession, Intent, Phase};
//!
//! let mut session = GameSession::new(GameConfig::new().with_seed(7)).unwrap();
//! session
//!     .dispatch(Intent::StartGame { names: vec!["Ada".into(), "Grace".into()] })
//!     .unwrap();
//! assert_eq!(session.game().unwrap().phase(), Phase::Reveal);
//! ```

use crate::cards::Deck;
use crate::core::{ConfigError, GameConfig, GameRng, GameState, Intent, PlayerId, RulesError};
use crate::events::{EventQueue, GameEvent};
use crate::rules::{RulesEngine, StopRules};
use crate::view::{Presentation, View};

pub struct GameSession {
    rules: StopRules,
    /// Seeds each new game.
    seeds: GameRng,
    game: Option<GameState>,
    awaiting_presentation: bool,
    /// Set by a fatal error; only restart or exit get through.
    halted: Option<RulesError>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seeds = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Ok(Self {
            rules: StopRules::new(config),
            seeds,
            game: None,
            awaiting_presentation: false,
            halted: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        self.rules.config()
    }

    #[must_use]
    pub fn rules(&self) -> &StopRules {
        &self.rules
    }

    #[must_use]
    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    #[must_use]
    pub fn is_awaiting_presentation(&self) -> bool {
        self.awaiting_presentation
    }

    #[must_use]
    pub fn halted(&self) -> Option<&RulesError> {
        self.halted.as_ref()
    }

    /// Apply an intent.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Vec<GameEvent>, RulesError> {
        if self.awaiting_presentation && intent != Intent::PresentationComplete {
            return Err(RulesError::AwaitingPresentation);
        }
        if self.halted.is_some() && !matches!(intent, Intent::RestartGame | Intent::ExitToMenu) {
            return Err(RulesError::Halted);
        }

        if !intent.is_session_level() {
            return self.play(&intent);
        }
        match intent {
            Intent::StartGame { names } => self.start_game(&names),
            Intent::RestartGame => self.restart(),
            Intent::ExitToMenu => self.exit_to_menu(),
            _ => self.presentation_complete(),
        }
    }

    /// Apply an intent from the View. Rejections are logged and ignored.
    pub fn handle(&mut self, intent: Intent) -> Vec<GameEvent> {
        let kind = intent.kind();
        match self.dispatch(intent) {
            Ok(events) => events,
            Err(err) => {
                log::debug!("ignored {kind}: {err}");
                Vec::new()
            }
        }
    }

    /// [`GameSession::handle`], then show the result on `view`.
    pub fn handle_with_view(&mut self, intent: Intent, view: &mut impl View) -> Vec<GameEvent> {
        let events = self.handle(intent);
        view.present(&self.presentation(), &events);
        events
    }

    #[must_use]
    pub fn presentation(&self) -> Presentation {
        match &self.game {
            Some(state) => Presentation::build(
                &self.rules,
                state,
                self.awaiting_presentation,
                self.halted.is_some(),
            ),
            None => Presentation::menu(&self.rules),
        }
    }

    /// Start a game whose first round is dealt from `deck` as given.
    pub fn start_game_with_deck(
        &mut self,
        names: &[String],
        deck: Deck,
        starting_player: PlayerId,
    ) -> Result<Vec<GameEvent>, RulesError> {
        if self.game.is_some() {
            return Err(RulesError::GameInProgress);
        }
        let rng = GameRng::new(self.seeds.next_u64());
        let (state, events) = self.rules.new_game_with_deck(names, deck, starting_player, rng)?;
        self.game = Some(state);
        Ok(events)
    }

    fn start_game(&mut self, names: &[String]) -> Result<Vec<GameEvent>, RulesError> {
        if self.game.is_some() {
            return Err(RulesError::GameInProgress);
        }
        let rng = GameRng::new(self.seeds.next_u64());
        let (state, events) = self.rules.new_game(names, rng)?;
        self.game = Some(state);
        Ok(events)
    }

    fn restart(&mut self) -> Result<Vec<GameEvent>, RulesError> {
        let Some(state) = self.game.take() else {
            return Err(RulesError::NoGame);
        };
        let names: Vec<String> = state.players.values().map(|record| record.name.clone()).collect();
        self.halted = None;
        self.awaiting_presentation = false;
        log::info!("restarting game for {}", names.join(", "));
        self.start_game(&names)
    }

    fn exit_to_menu(&mut self) -> Result<Vec<GameEvent>, RulesError> {
        if self.game.take().is_none() {
            return Err(RulesError::NoGame);
        }
        self.halted = None;
        self.awaiting_presentation = false;
        Ok(vec![GameEvent::ReturnedToMenu])
    }

    fn presentation_complete(&mut self) -> Result<Vec<GameEvent>, RulesError> {
        let Some(state) = self.game.as_mut() else {
            return Err(RulesError::NoGame);
        };
        if !self.awaiting_presentation {
            return Err(RulesError::IllegalAction {
                intent: Intent::PresentationComplete.kind(),
                phase: state.phase(),
            });
        }
        self.awaiting_presentation = false;
        Ok(state.conceal_temporary())
    }

    fn play(&mut self, intent: &Intent) -> Result<Vec<GameEvent>, RulesError> {
        let Some(state) = self.game.as_mut() else {
            return Err(RulesError::NoGame);
        };
        let mut events = EventQueue::new();
        match self.rules.apply(state, intent) {
            Ok(applied) => events.extend(applied),
            Err(err) => {
                if err.is_fatal() {
                    log::error!("game halted in round {}: {err}", state.round.number);
                    self.halted = Some(err.clone());
                }
                return Err(err);
            }
        }

        // without the gate a reveal lasts exactly one transition
        if !self.rules.config().await_presentation {
            events.extend(state.conceal_temporary());
        } else if events.needs_presentation() {
            self.awaiting_presentation = true;
        }
        Ok(events.into_vec())
    }
}
