use rand::seq::IndexedRandom;

/// Known scene contexts, in the fixed order the dispatcher scans them.
pub const CONTEXT_LABELS: [&str; 3] = ["forest", "dungeon", "village"];

/// Returned for any context outside the table.
pub const FALLBACK_EVENT: &str = "Nothing unusual happens...";

pub const FOREST_EVENTS: [&str; 3] = [
    "You hear rustling in the bushes. A goblin appears!",
    "You find an ancient tree with glowing runes.",
    "A traveling merchant offers you a mysterious potion.",
];

pub const DUNGEON_EVENTS: [&str; 3] = [
    "A trap triggers beneath your feet!",
    "A skeleton warrior blocks your path.",
    "You discover a chest filled with gold... or is it a mimic?",
];

pub const VILLAGE_EVENTS: [&str; 3] = [
    "A child runs up to you, asking for help.",
    "The blacksmith offers to upgrade your weapon.",
    "You overhear talk of a dragon nearby.",
];

fn candidates(context: &str) -> Option<&'static [&'static str]> {
    match context.to_lowercase().as_str() {
        "forest" => Some(&FOREST_EVENTS),
        "dungeon" => Some(&DUNGEON_EVENTS),
        "village" => Some(&VILLAGE_EVENTS),
        _ => None,
    }
}

/// Pick one event for the given scene context, uniformly at random.
/// Lookup is case-insensitive; unknown contexts get the fixed fallback.
pub fn next_event(context: &str) -> String {
    let mut rng = rand::rng();
    candidates(context)
        .and_then(|events| events.choose(&mut rng).copied())
        .unwrap_or(FALLBACK_EVENT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        for _ in 0..20 {
            let event = next_event("Forest");
            assert!(FOREST_EVENTS.contains(&event.as_str()));
            let event = next_event("forest");
            assert!(FOREST_EVENTS.contains(&event.as_str()));
        }
    }

    #[test]
    fn known_contexts_draw_from_their_own_lists() {
        for _ in 0..20 {
            assert!(DUNGEON_EVENTS.contains(&next_event("dungeon").as_str()));
            assert!(VILLAGE_EVENTS.contains(&next_event("VILLAGE").as_str()));
        }
    }

    #[test]
    fn unknown_context_always_falls_back() {
        for _ in 0..20 {
            assert_eq!(next_event("swamp"), FALLBACK_EVENT);
        }
    }

    #[test]
    fn every_candidate_is_eventually_drawn() {
        let mut seen = [false; 3];
        for _ in 0..500 {
            let event = next_event("forest");
            let index = FOREST_EVENTS
                .iter()
                .position(|candidate| *candidate == event)
                .unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|drawn| *drawn));
    }
}
