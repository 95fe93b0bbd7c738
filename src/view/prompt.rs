//! Prompt text shown above the table.

use serde::{Deserialize, Serialize};

/// Templates for every prompt. `{name}` is replaced by the player's name,
/// `{count}` by the number of cards involved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptTemplates {
    pub menu: String,
    pub reveal: String,
    pub draw: String,
    pub final_move: String,
    pub swap: String,
    pub extra_draw: String,
    pub peek: String,
    pub blind_swap: String,
    pub round_over: String,
    pub winner: String,
    pub winners: String,
    pub tie: String,
    pub halted: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            menu: "Enter the player names to start".into(),
            reveal: "{name}, select {count} cards".into(),
            draw: "{name}, it's your turn".into(),
            final_move: "{name}, last move!".into(),
            swap: "{name}, choose where the card goes".into(),
            extra_draw: "{name}, draw up to {count} extra cards".into(),
            peek: "{name}, pick a card to look at".into(),
            blind_swap: "{name}, pick two cards of two players to swap".into(),
            round_over: "Start the next round".into(),
            winner: "{name} has won!".into(),
            winners: "{name} share the win!".into(),
            tie: "It is a tie!".into(),
            halted: "The deck ran out. Restart or exit.".into(),
        }
    }
}

/// Fill in a template.
///
/// ```
/// use cardstop::view::render_prompt;
///
/// assert_eq!(render_prompt("{name}, select {count} cards", "Ada", 2), "Ada, select 2 cards");
/// ```
#[must_use]
pub fn render_prompt(template: &str, name: &str, count: usize) -> String {
    template.replace("{name}", name).replace("{count}", &count.to_string())
}
