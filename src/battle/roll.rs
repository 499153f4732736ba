//! The battle roll.
//!
//! Both sides roll 2d6 plus their modifier. Criticals are checked before
//! totals: a lone snake eyes loses outright and hands the opponent a strong
//! win, a lone boxcars wins outright at the tier of its own total. Anything
//! else goes to the higher total. Double snake eyes and equal totals are
//! rerolled from scratch, up to [`BattleLimits::max_attempts`] times.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::Side;
use crate::dice::{roll_pair, DicePair, DieSource};
use crate::tier::{Tier, TierConfig};

/// Default cap on battle attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Errors from the battle resolver.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BattleError {
    #[error("battle still undecided after {attempts} attempts")]
    RerollLimit { attempts: u32 },
}

/// Guards against configurations that never produce a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLimits {
    pub max_attempts: u32,
}

impl Default for BattleLimits {
    fn default() -> Self {
        BattleLimits {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// One side's roll in a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideRoll {
    pub dice: DicePair,
    pub modifier: i32,
    pub total: i32,
    pub low_extremal: bool,
    pub high_extremal: bool,
}

impl SideRoll {
    pub fn new(dice: DicePair, modifier: i32) -> Self {
        SideRoll {
            dice,
            modifier,
            total: i32::from(dice.sum()) + modifier,
            low_extremal: dice.is_low_extremal(),
            high_extremal: dice.is_high_extremal(),
        }
    }
}

/// What settled a decided battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecidedBy {
    Totals,
    LowCritical,
    HighCritical,
}

/// The result of judging one pair of side rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Decided {
        winner: Side,
        tier: Tier,
        by: DecidedBy,
    },
    Reroll,
}

/// A decided battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub a: SideRoll,
    pub b: SideRoll,
    pub winner: Side,
    pub tier: Tier,
    pub decided_by: DecidedBy,
    /// Attempts discarded before this one.
    pub rerolls: u32,
}

impl BattleOutcome {
    pub fn roll_of(&self, side: Side) -> &SideRoll {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    pub fn winning_total(&self) -> i32 {
        self.roll_of(self.winner).total
    }
}

/// Pure total comparison: the strictly higher total wins at the tier of its
/// own total. Equal totals return `None`.
pub fn compare_totals(total_a: i32, total_b: i32, tiers: &TierConfig) -> Option<(Side, Tier)> {
    if total_a > total_b {
        Some((Side::A, tiers.classify(total_a)))
    } else if total_b > total_a {
        Some((Side::B, tiers.classify(total_b)))
    } else {
        None
    }
}

/// Judges one attempt with the full live rules, criticals included.
pub fn decide(a: &SideRoll, b: &SideRoll, tiers: &TierConfig) -> Verdict {
    match (a.low_extremal, b.low_extremal) {
        (true, true) => return Verdict::Reroll,
        (true, false) => {
            return Verdict::Decided {
                winner: Side::B,
                tier: Tier::Strong,
                by: DecidedBy::LowCritical,
            }
        }
        (false, true) => {
            return Verdict::Decided {
                winner: Side::A,
                tier: Tier::Strong,
                by: DecidedBy::LowCritical,
            }
        }
        (false, false) => {}
    }

    match (a.high_extremal, b.high_extremal) {
        (true, false) => {
            return Verdict::Decided {
                winner: Side::A,
                tier: tiers.classify(a.total),
                by: DecidedBy::HighCritical,
            }
        }
        (false, true) => {
            return Verdict::Decided {
                winner: Side::B,
                tier: tiers.classify(b.total),
                by: DecidedBy::HighCritical,
            }
        }
        _ => {}
    }

    match compare_totals(a.total, b.total, tiers) {
        Some((winner, tier)) => Verdict::Decided {
            winner,
            tier,
            by: DecidedBy::Totals,
        },
        None => Verdict::Reroll,
    }
}

/// Rolls a battle with the default attempt cap.
pub fn roll_battle<S: DieSource + ?Sized>(
    source: &mut S,
    mod_a: i32,
    mod_b: i32,
    tiers: &TierConfig,
) -> Result<BattleOutcome, BattleError> {
    roll_battle_with_limits(source, mod_a, mod_b, tiers, &BattleLimits::default())
}

/// Rolls until the battle is decided or `limits` is exhausted. Side A's
/// pair is rolled before side B's on every attempt.
pub fn roll_battle_with_limits<S: DieSource + ?Sized>(
    source: &mut S,
    mod_a: i32,
    mod_b: i32,
    tiers: &TierConfig,
    limits: &BattleLimits,
) -> Result<BattleOutcome, BattleError> {
    for attempt in 0..limits.max_attempts {
        let a = SideRoll::new(roll_pair(source), mod_a);
        let b = SideRoll::new(roll_pair(source), mod_b);

        match decide(&a, &b, tiers) {
            Verdict::Decided { winner, tier, by } => {
                debug!(
                    dice_a = %a.dice,
                    dice_b = %b.dice,
                    total_a = a.total,
                    total_b = b.total,
                    ?winner,
                    %tier,
                    ?by,
                    rerolls = attempt,
                    "battle decided"
                );
                return Ok(BattleOutcome {
                    a,
                    b,
                    winner,
                    tier,
                    decided_by: by,
                    rerolls: attempt,
                });
            }
            Verdict::Reroll => {
                trace!(
                    attempt,
                    total_a = a.total,
                    total_b = b.total,
                    "battle undecided, rerolling"
                );
            }
        }
    }

    warn!(
        attempts = limits.max_attempts,
        mod_a, mod_b, "battle reroll limit reached"
    );
    Err(BattleError::RerollLimit {
        attempts: limits.max_attempts,
    })
}
