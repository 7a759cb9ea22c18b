use thiserror::Error;

use crate::ai::Completion;
use crate::dice;
use crate::error::{AIError, GameError};
use crate::events;
use crate::persona::Persona;
use crate::session::SessionState;

// Routing keywords, matched by containment against the lower-cased input.
// Combat takes precedence over items; everything else narrates.
const COMBAT_KEYWORDS: [&str; 7] = [
    "attack", "defend", "monster", "fight", "battle", "combat", "enemy",
];
const ITEM_KEYWORDS: [&str; 7] = [
    "item", "chest", "reward", "loot", "inventory", "collect", "treasure",
];

/// Fixed marker prefixing every user-visible error reply.
pub const ERROR_MARKER: &str = "❌ Error:";

/// Everything a turn can fail with. The `Display` text is what the player
/// sees after the error marker.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("{0}")]
    Model(#[from] AIError),

    #[error("{0}")]
    Tool(#[from] GameError),
}

/// The reply for one completed turn, plus the persona switch (if any) so the
/// transport can show its cosmetic notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub reply: String,
    pub switched_to: Option<Persona>,
}

/// Deterministic formatting of a failed turn for display.
pub fn error_reply(error: &TurnError) -> String {
    format!("{ERROR_MARKER} {error}")
}

/// Select the persona for a user message. First matching keyword set wins;
/// unrecognized input is never an error and falls to the Narrator.
pub fn route(input: &str) -> Persona {
    let input = input.to_lowercase();
    if COMBAT_KEYWORDS.iter().any(|word| input.contains(word)) {
        Persona::Combat
    } else if ITEM_KEYWORDS.iter().any(|word| input.contains(word)) {
        Persona::Item
    } else {
        Persona::Narrator
    }
}

/// First recognized scene label in the input, scanning labels in table order
/// rather than by position in the text.
fn find_context(input: &str) -> Option<&'static str> {
    let input = input.to_lowercase();
    events::CONTEXT_LABELS
        .iter()
        .copied()
        .find(|label| input.contains(label))
}

/// Process one user-message-in, reply-out turn against the session.
///
/// The user message is appended to history (original casing) before anything
/// can fail and is never rolled back. Combat turns and label-matched item
/// turns resolve locally without touching the model; every other turn
/// forwards the full history plus the active persona's instructions and
/// waits for one complete text result.
pub async fn process_turn(
    session: &mut SessionState,
    input: &str,
    model: &dyn Completion,
) -> Result<TurnOutcome, TurnError> {
    session.push_user(input);

    let persona = route(input);
    let switched_to = (persona != session.active_persona).then_some(persona);
    session.active_persona = persona;
    log::debug!("turn routed to {persona}");

    let reply = match persona {
        Persona::Combat => {
            // Local dice roll; the persona's model binding stays unused here.
            let roll = dice::roll(dice::DEFAULT_SIDES)?;
            dice::combat_reply(roll)
        }
        Persona::Item => match find_context(input) {
            Some(context) => format!("🎁 You discover:\n\n{}", events::next_event(context)),
            None => model.complete(persona.instructions(), &session.history).await?,
        },
        Persona::Narrator | Persona::Orchestrator => {
            model.complete(persona.instructions(), &session.history).await?
        }
    };

    session.push_assistant(reply.clone());
    Ok(TurnOutcome { reply, switched_to })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combat_keywords_win_over_item_keywords() {
        assert_eq!(route("I attack the treasure chest"), Persona::Combat);
        assert_eq!(route("fight for the loot"), Persona::Combat);
    }

    #[test]
    fn item_keywords_route_to_the_item_persona() {
        assert_eq!(route("open the chest"), Persona::Item);
        assert_eq!(route("check my INVENTORY"), Persona::Item);
    }

    #[test]
    fn anything_else_narrates() {
        assert_eq!(route("hello there"), Persona::Narrator);
        assert_eq!(route(""), Persona::Narrator);
        assert_eq!(route("delegate"), Persona::Narrator);
    }

    #[test]
    fn keywords_match_inside_larger_words() {
        // Containment, not tokenization: "combative" contains "combat",
        // and "handoff_to_monster" contains "monster".
        assert_eq!(route("I feel combative today"), Persona::Combat);
        assert_eq!(route("handoff_to_monster"), Persona::Combat);
    }

    #[test]
    fn context_scan_follows_table_order_not_text_position() {
        // "village" appears first in the text, but "dungeon" comes first in
        // the label table.
        assert_eq!(find_context("the village dungeon"), Some("dungeon"));
        assert_eq!(find_context("a quiet Village square"), Some("village"));
        assert_eq!(find_context("the open sea"), None);
    }

    #[test]
    fn error_reply_carries_the_fixed_marker() {
        let error = TurnError::Tool(GameError::InvalidDiceSides(0));
        let reply = error_reply(&error);
        assert!(reply.starts_with(ERROR_MARKER));
        assert!(reply.contains("side"));
    }
}
