use rand::Rng;

use crate::error::GameError;

/// The default die for combat turns.
pub const DEFAULT_SIDES: u32 = 20;

// Tier thresholds on the default d20.
const STRONG_HIT_OVER: u32 = 15;
const WEAK_HIT_UNDER: u32 = 5;

/// Roll one die, uniformly distributed over `[1, sides]` inclusive.
/// A die with no sides is rejected rather than left undefined.
pub fn roll(sides: u32) -> Result<u32, GameError> {
    if sides < 1 {
        return Err(GameError::InvalidDiceSides(sides));
    }
    let mut rng = rand::rng();
    Ok(rng.random_range(1..=sides))
}

/// The three fixed outcome tiers of a combat roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    Strong,
    Neutral,
    Weak,
}

impl AttackOutcome {
    pub fn classify(roll: u32) -> Self {
        if roll > STRONG_HIT_OVER {
            AttackOutcome::Strong
        } else if roll < WEAK_HIT_UNDER {
            AttackOutcome::Weak
        } else {
            AttackOutcome::Neutral
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AttackOutcome::Strong => "🗡️ Critical Hit!",
            AttackOutcome::Weak => "💢 Weak strike...",
            AttackOutcome::Neutral => "⚔️ You strike the enemy.",
        }
    }
}

/// Compose the combat reply for a finished roll.
pub fn combat_reply(roll: u32) -> String {
    format!("You rolled a {}.\n{}", roll, AttackOutcome::classify(roll).label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolls_stay_within_inclusive_bounds() {
        for sides in [1, 2, 6, 20, 100] {
            for _ in 0..200 {
                let result = roll(sides).unwrap();
                assert!((1..=sides).contains(&result), "{result} out of 1..={sides}");
            }
        }
    }

    #[test]
    fn a_one_sided_die_always_rolls_one() {
        for _ in 0..10 {
            assert_eq!(roll(1).unwrap(), 1);
        }
    }

    #[test]
    fn zero_sides_is_rejected() {
        assert!(matches!(roll(0), Err(GameError::InvalidDiceSides(0))));
    }

    #[test]
    fn distribution_is_roughly_uniform() {
        let mut counts = [0u32; 6];
        let trials: u32 = 60_000;
        for _ in 0..trials {
            counts[(roll(6).unwrap() - 1) as usize] += 1;
        }
        let expected = trials / 6;
        for (face, count) in counts.iter().enumerate() {
            assert!(
                (expected * 8 / 10..=expected * 12 / 10).contains(count),
                "face {} drawn {count} times, expected around {expected}",
                face + 1
            );
        }
    }

    #[test]
    fn tiers_split_at_the_documented_thresholds() {
        assert_eq!(AttackOutcome::classify(20), AttackOutcome::Strong);
        assert_eq!(AttackOutcome::classify(16), AttackOutcome::Strong);
        assert_eq!(AttackOutcome::classify(15), AttackOutcome::Neutral);
        assert_eq!(AttackOutcome::classify(5), AttackOutcome::Neutral);
        assert_eq!(AttackOutcome::classify(4), AttackOutcome::Weak);
        assert_eq!(AttackOutcome::classify(1), AttackOutcome::Weak);
    }

    #[test]
    fn combat_reply_embeds_roll_and_tier() {
        let reply = combat_reply(18);
        assert!(reply.contains("18"));
        assert!(reply.contains("Critical Hit!"));

        let reply = combat_reply(3);
        assert!(reply.contains("You rolled a 3."));
        assert!(reply.contains("Weak strike"));
    }
}
