//! Commit phase: turning matchup outcomes into dice modifiers.
//!
//! Both sides commit a strategy and a stance. Side A is the stance reader,
//! side B the actor. Each matchup outcome is mapped through a [`Reward`]
//! table and the two contributions are summed per side.

use std::ops::Add;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matchup::stance::{self, StanceOutcome, StanceSet};
use crate::matchup::strategy::{self, StrategyOutcome, StrategySet};

/// Largest modifier magnitude accepted for either side of a battle.
pub const MODIFIER_LIMIT: i32 = 100;

/// Largest magnitude of any single reward entry. Two matchups stack, so a
/// commit total stays within [`MODIFIER_LIMIT`].
pub const REWARD_LIMIT: i32 = MODIFIER_LIMIT / 2;

/// True when `modifier` is within `-MODIFIER_LIMIT..=MODIFIER_LIMIT`.
pub fn modifier_in_range(modifier: i32) -> bool {
    (-MODIFIER_LIMIT..=MODIFIER_LIMIT).contains(&modifier)
}

/// Modifier awarded to the winner, the loser, and both sides on a tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub win: i32,
    pub lose: i32,
    pub tie: i32,
}

impl Reward {
    /// Winner `+n`, loser `-n`.
    pub const fn symmetric(n: i32) -> Self {
        Reward {
            win: n,
            lose: -n,
            tie: 0,
        }
    }

    /// Winner `+n`, loser unchanged.
    pub const fn winner_only(n: i32) -> Self {
        Reward {
            win: n,
            lose: 0,
            tie: 0,
        }
    }

    pub const fn neutral() -> Self {
        Reward {
            win: 0,
            lose: 0,
            tie: 0,
        }
    }

    /// The first entry whose magnitude exceeds [`REWARD_LIMIT`].
    pub fn out_of_range(&self) -> Option<i32> {
        [self.win, self.lose, self.tie]
            .into_iter()
            .find(|v| !(-REWARD_LIMIT..=REWARD_LIMIT).contains(v))
    }
}

/// Reward tables for both matchups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardConfig {
    pub strategy: Reward,
    pub stance: Reward,
}

impl RewardConfig {
    /// +1/-1 for both matchups.
    pub const fn symmetric() -> Self {
        RewardConfig {
            strategy: Reward::symmetric(1),
            stance: Reward::symmetric(1),
        }
    }

    /// +1/-1 strategy, +1 to the stance winner only.
    pub const fn winner_only_stance() -> Self {
        RewardConfig {
            strategy: Reward::symmetric(1),
            stance: Reward::winner_only(1),
        }
    }

    /// Strategy winner gets `bonus`; stance is ignored.
    pub const fn strategy_only(bonus: i32) -> Self {
        RewardConfig {
            strategy: Reward::winner_only(bonus),
            stance: Reward::neutral(),
        }
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        RewardConfig::symmetric()
    }
}

/// One side's hidden choices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment {
    pub strategy: String,
    pub stance: String,
}

impl Commitment {
    pub fn new(strategy: &str, stance: &str) -> Self {
        Commitment {
            strategy: strategy.to_string(),
            stance: stance.to_string(),
        }
    }
}

/// A signed modifier for each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierPair {
    pub a: i32,
    pub b: i32,
}

impl ModifierPair {
    pub const fn new(a: i32, b: i32) -> Self {
        ModifierPair { a, b }
    }
}

impl Add for ModifierPair {
    type Output = ModifierPair;

    fn add(self, rhs: ModifierPair) -> ModifierPair {
        ModifierPair::new(self.a + rhs.a, self.b + rhs.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyResolution {
    /// From side A's perspective.
    pub outcome: StrategyOutcome,
    pub explanation: String,
    pub modifiers: ModifierPair,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StanceResolution {
    pub outcome: StanceOutcome,
    pub explanation: String,
    pub modifiers: ModifierPair,
}

/// Full trace of a commit phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitResult {
    pub a: Commitment,
    pub b: Commitment,
    pub strategy: StrategyResolution,
    pub stance: StanceResolution,
    pub totals: ModifierPair,
}

/// Maps a strategy outcome (side A's view) to both sides' contributions.
pub fn strategy_modifiers(outcome: StrategyOutcome, reward: &Reward) -> ModifierPair {
    match outcome {
        StrategyOutcome::Win => ModifierPair::new(reward.win, reward.lose),
        StrategyOutcome::Lose => ModifierPair::new(reward.lose, reward.win),
        StrategyOutcome::Tie => ModifierPair::new(reward.tie, reward.tie),
    }
}

/// Maps a stance outcome to both sides' contributions. Side A reads.
pub fn stance_modifiers(outcome: StanceOutcome, reward: &Reward) -> ModifierPair {
    match outcome {
        StanceOutcome::Reader => ModifierPair::new(reward.win, reward.lose),
        StanceOutcome::Actor => ModifierPair::new(reward.lose, reward.win),
        StanceOutcome::Miss => ModifierPair::new(reward.tie, reward.tie),
    }
}

/// Resolves both matchups and sums each side's modifier.
pub fn resolve_commit(
    a: &Commitment,
    b: &Commitment,
    strategy_set: &StrategySet,
    stance_set: &StanceSet,
    rewards: &RewardConfig,
) -> CommitResult {
    let (strategy_outcome, strategy_text) = strategy::explain(&a.strategy, &b.strategy, strategy_set);
    let strategy_mods = strategy_modifiers(strategy_outcome, &rewards.strategy);

    let (stance_outcome, stance_text) = stance::explain(&a.stance, &b.stance, stance_set);
    let stance_mods = stance_modifiers(stance_outcome, &rewards.stance);

    let totals = strategy_mods + stance_mods;
    debug!(
        a.strategy = %a.strategy,
        a.stance = %a.stance,
        b.strategy = %b.strategy,
        b.stance = %b.stance,
        ?strategy_outcome,
        ?stance_outcome,
        mod_a = totals.a,
        mod_b = totals.b,
        "commit resolved"
    );

    CommitResult {
        a: a.clone(),
        b: b.clone(),
        strategy: StrategyResolution {
            outcome: strategy_outcome,
            explanation: strategy_text,
            modifiers: strategy_mods,
        },
        stance: StanceResolution {
            outcome: stance_outcome,
            explanation: stance_text.to_string(),
            modifiers: stance_mods,
        },
        totals,
    }
}
