//! The result roll.
//!
//! The battle winner rolls 2d6. The battle tier and the result tier each
//! contribute an offset (0, 1 or 2) and their sum picks a slot on the
//! winner's ladder. Snake eyes force slot 0, boxcars force slot 4.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ladder::{Ladder, LAST_POSITION};
use super::outcome::Outcome;
use crate::dice::{roll_pair, DicePair, DieSource, HIGHEST_SUM, LOWEST_SUM};
use crate::tier::{Tier, TierConfig};

/// A result roll that overrode the normal position formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Critical {
    Low,
    High,
}

impl Critical {
    pub fn detect(dice: DicePair) -> Option<Critical> {
        match dice.sum() {
            LOWEST_SUM => Some(Critical::Low),
            HIGHEST_SUM => Some(Critical::High),
            _ => None,
        }
    }
}

/// Where a result roll lands, before any ladder is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub battle_offset: u8,
    /// Nominal tier: weak on snake eyes, strong on boxcars.
    pub result_tier: Tier,
    pub result_offset: u8,
    pub position: usize,
    pub critical: Option<Critical>,
}

/// Full trace of a result roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultOutcome {
    pub ladder: String,
    pub battle_tier: Tier,
    pub dice: DicePair,
    pub roll: u8,
    pub battle_offset: u8,
    pub result_tier: Tier,
    pub result_offset: u8,
    pub position: usize,
    pub outcome: Outcome,
    pub label: String,
    pub critical: Option<Critical>,
}

/// Computes the ladder position for a battle tier and a result roll.
pub fn place(battle_tier: Tier, dice: DicePair, tiers: &TierConfig) -> Placement {
    let battle_offset = battle_tier.offset();
    let critical = Critical::detect(dice);

    let (result_tier, position) = match critical {
        Some(Critical::Low) => (Tier::Weak, 0),
        Some(Critical::High) => (Tier::Strong, LAST_POSITION),
        None => {
            let result_tier = tiers.classify(i32::from(dice.sum()));
            let raw = usize::from(battle_offset + result_tier.offset());
            debug_assert!(
                raw <= LAST_POSITION,
                "ladder position {raw} out of range for {battle_tier}/{result_tier}"
            );
            (result_tier, raw.min(LAST_POSITION))
        }
    };

    Placement {
        battle_offset,
        result_tier,
        result_offset: result_tier.offset(),
        position,
        critical,
    }
}

/// Resolves a result roll on `ladder`, rolling fresh dice unless `dice` is
/// supplied.
pub fn resolve_result<S: DieSource + ?Sized>(
    source: &mut S,
    battle_tier: Tier,
    dice: Option<DicePair>,
    ladder: &Ladder,
    tiers: &TierConfig,
) -> ResultOutcome {
    let dice = match dice {
        Some(dice) => dice,
        None => roll_pair(source),
    };
    let placement = place(battle_tier, dice, tiers);
    let outcome = ladder.at(placement.position);

    debug!(
        ladder = %ladder.name,
        %dice,
        %battle_tier,
        result_tier = %placement.result_tier,
        position = placement.position,
        critical = ?placement.critical,
        %outcome,
        "result resolved"
    );

    ResultOutcome {
        ladder: ladder.name.clone(),
        battle_tier,
        dice,
        roll: dice.sum(),
        battle_offset: placement.battle_offset,
        result_tier: placement.result_tier,
        result_offset: placement.result_offset,
        position: placement.position,
        outcome,
        label: ladder.label_of(outcome).to_string(),
        critical: placement.critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::LoadedDice;

    fn fixed(battle_tier: Tier, dice: DicePair, ladder: &Ladder) -> ResultOutcome {
        let mut unused = LoadedDice::new([0u8; 0]);
        resolve_result(&mut unused, battle_tier, Some(dice), ladder, &TierConfig::standard())
    }

    #[test]
    fn solid_plus_solid_is_the_middle_slot() {
        let ladder = Ladder::batter();
        let r = fixed(Tier::Solid, DicePair(3, 5), &ladder);
        assert_eq!(r.position, 2);
        assert_eq!(r.outcome, ladder.outcomes[2]);
        assert_eq!(r.label, "Single");
        assert_eq!(r.critical, None);
    }

    #[test]
    fn snake_eyes_force_the_worst_slot() {
        for tier in Tier::ALL {
            let r = fixed(tier, DicePair(1, 1), &Ladder::pitcher());
            assert_eq!(r.position, 0);
            assert_eq!(r.outcome, Outcome::Walk);
            assert_eq!(r.critical, Some(Critical::Low));
            assert_eq!(r.result_tier, Tier::Weak);
            assert_eq!(r.battle_offset, tier.offset());
        }
    }

    #[test]
    fn boxcars_force_the_best_slot() {
        let r = fixed(Tier::Weak, DicePair(6, 6), &Ladder::batter());
        assert_eq!(r.position, LAST_POSITION);
        assert_eq!(r.outcome, Outcome::HomeRun);
        assert_eq!(r.result_offset, 2);
        assert_eq!(r.critical, Some(Critical::High));
    }

    #[test]
    fn strong_plus_strong_reaches_the_top_without_a_critical() {
        let r = fixed(Tier::Strong, DicePair(5, 6), &Ladder::pitcher());
        assert_eq!(r.position, 4);
        assert_eq!(r.outcome, Outcome::DoublePlay);
        assert_eq!(r.critical, None);
    }

    #[test]
    fn rolls_fresh_dice_when_none_given() {
        let mut dice = LoadedDice::new([2, 2]);
        let r = resolve_result(
            &mut dice,
            Tier::Weak,
            None,
            &Ladder::batter(),
            &TierConfig::standard(),
        );
        assert_eq!(r.dice, DicePair(2, 2));
        assert_eq!(r.position, 0);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn placement_ignores_the_ladder() {
        let tiers = TierConfig::standard();
        for battle in Tier::ALL {
            for dice in DicePair::all() {
                let p = place(battle, dice, &tiers);
                assert!(p.position <= LAST_POSITION);
            }
        }
    }
}
