use strum_macros::Display;

// Instruction preambles for each conversational role. These are static
// configuration: personas carry no runtime state of their own.

pub const NARRATOR_INSTRUCTIONS: &str = "Narrate the fantasy adventure based on player \
decisions. Use vivid descriptions and advance the story.";

pub const COMBAT_INSTRUCTIONS: &str = "Control monster behavior during combat. Ask the user \
what action they take (attack, defend, run), then narrate the outcome using a dice roll.";

pub const ITEM_INSTRUCTIONS: &str = "Describe items found by the player and manage inventory. \
Assign rewards after events or combat.";

pub const ORCHESTRATOR_INSTRUCTIONS: &str = r#"You are a fantasy adventure game master that orchestrates an epic quest.

You have access to three specialized personas:
1. Narrator - for story narration and adventure progression
2. Combat - for combat encounters and dice-based battles
3. Item - for inventory management and reward distribution

Use the appropriate handoff tool when:
- User wants to explore, move, or progress story -> use handoff_to_narrator
- User wants to fight, attack, or engage in combat -> use handoff_to_monster
- User wants to check inventory, collect items, or get rewards -> use handoff_to_item

Create an immersive fantasy experience and guide players through their adventure!"#;

/// The closed set of conversational roles. Routing always resolves to one of
/// these; there is no name-keyed lookup anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Persona {
    Narrator,
    Combat,
    Item,
    Orchestrator,
}

/// A declared delegation from the Orchestrator to another persona. Kept as
/// static configuration only: the dispatcher routes by keyword and never
/// consults these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handoff {
    pub target: Persona,
    pub tool_name: &'static str,
    pub description: &'static str,
}

const ORCHESTRATOR_HANDOFFS: [Handoff; 3] = [
    Handoff {
        target: Persona::Narrator,
        tool_name: "handoff_to_narrator",
        description: "Handoff to the Narrator for story progression",
    },
    Handoff {
        target: Persona::Combat,
        tool_name: "handoff_to_monster",
        description: "Handoff to the Combat persona for combat encounters",
    },
    Handoff {
        target: Persona::Item,
        tool_name: "handoff_to_item",
        description: "Handoff to the Item persona for inventory and rewards",
    },
];

impl Persona {
    pub fn instructions(self) -> &'static str {
        match self {
            Persona::Narrator => NARRATOR_INSTRUCTIONS,
            Persona::Combat => COMBAT_INSTRUCTIONS,
            Persona::Item => ITEM_INSTRUCTIONS,
            Persona::Orchestrator => ORCHESTRATOR_INSTRUCTIONS,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Persona::Narrator => "📖",
            Persona::Combat => "⚔️",
            Persona::Item => "🎁",
            Persona::Orchestrator => "🤖",
        }
    }

    fn blurb(self) -> &'static str {
        match self {
            Persona::Narrator => "I'll narrate your adventure and guide you through the story!",
            Persona::Combat => "I'll handle combat encounters and dice-based battles!",
            Persona::Item => "I'll manage your inventory and distribute rewards!",
            Persona::Orchestrator => "I'll help you with your adventure!",
        }
    }

    /// Cosmetic notice shown when routing lands on a different persona than
    /// the previous turn. Never part of the model context.
    pub fn switch_notice(self) -> String {
        format!("{} Switching to {}\n{}", self.emoji(), self, self.blurb())
    }

    /// Delegation declarations. Only the Orchestrator declares any.
    pub fn handoffs(self) -> &'static [Handoff] {
        match self {
            Persona::Orchestrator => &ORCHESTRATOR_HANDOFFS,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_variant_names() {
        assert_eq!(Persona::Narrator.to_string(), "Narrator");
        assert_eq!(Persona::Combat.to_string(), "Combat");
    }

    #[test]
    fn only_the_orchestrator_declares_handoffs() {
        assert!(Persona::Narrator.handoffs().is_empty());
        assert!(Persona::Combat.handoffs().is_empty());
        assert!(Persona::Item.handoffs().is_empty());

        let handoffs = Persona::Orchestrator.handoffs();
        assert_eq!(handoffs.len(), 3);
        assert_eq!(handoffs[0].target, Persona::Narrator);
        assert_eq!(handoffs[1].tool_name, "handoff_to_monster");
        assert_eq!(handoffs[2].target, Persona::Item);
    }

    #[test]
    fn switch_notice_names_the_persona() {
        let notice = Persona::Item.switch_notice();
        assert!(notice.contains("Switching to Item"));
        assert!(notice.contains("inventory"));
    }
}
