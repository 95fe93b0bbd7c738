//! Automatic players.
//!
//! A policy picks the next intent for whoever is to move. The random policy
//! drives soak tests, property tests and benchmarks.

use crate::core::{GameRng, GameState, Intent, RulesError};
use crate::rules::{GameResult, RulesEngine};

pub trait Policy<E: RulesEngine> {
    /// Pick the next intent, `None` when nothing is legal.
    fn choose(&self, engine: &E, state: &GameState, rng: &mut GameRng) -> Option<Intent>;
}

/// Uniform over the legal intents.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPolicy;

impl<E: RulesEngine> Policy<E> for RandomPolicy {
    fn choose(&self, engine: &E, state: &GameState, rng: &mut GameRng) -> Option<Intent> {
        let intents = engine.legal_intents(state);
        rng.choose(&intents).cloned()
    }
}

/// Play until the game ends or `max_steps` intents were applied.
///
/// Returns the result, or `None` when the step limit was hit first. A fatal
/// rules error (the deck running dry while scoring) ends the playout with
/// that error.
pub fn playout<E: RulesEngine, P: Policy<E>>(
    engine: &E,
    state: &mut GameState,
    policy: &P,
    rng: &mut GameRng,
    max_steps: usize,
) -> Result<Option<GameResult>, RulesError> {
    for _ in 0..max_steps {
        if let Some(result) = engine.is_terminal(state) {
            return Ok(Some(result));
        }
        let Some(intent) = policy.choose(engine, state, rng) else {
            return Ok(None);
        };
        engine.apply(state, &intent)?;
    }
    Ok(engine.is_terminal(state))
}
