//! Exact enumeration.
//!
//! Every report walks the full dice space (36 ordered pairs for one roll,
//! 1296 for two) and divides by that fixed size. Tallies that do not cover
//! the space exactly are a bug and trip a debug assertion.

pub mod battles;
pub mod curve;
pub mod results;

use serde::{Deserialize, Serialize};

use crate::tier::Tier;

pub use battles::{
    enumerate_battles, enumerate_live_battles, enumerate_modifier_grid, BattleEnumeration,
    LiveBattleEnumeration, BATTLE_COMBINATIONS,
};
pub use curve::{tier_distribution, TierDistribution};
pub use results::{enumerate_all_results, enumerate_results, ResultEnumeration};

/// Percentage of `count` over a fixed denominator.
pub fn pct(count: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    f64::from(count) * 100.0 / f64::from(denominator)
}

/// Count per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub weak: u32,
    pub solid: u32,
    pub strong: u32,
}

impl TierCounts {
    pub fn add(&mut self, tier: Tier) {
        *self.get_mut(tier) += 1;
    }

    pub fn get(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Weak => self.weak,
            Tier::Solid => self.solid,
            Tier::Strong => self.strong,
        }
    }

    fn get_mut(&mut self, tier: Tier) -> &mut u32 {
        match tier {
            Tier::Weak => &mut self.weak,
            Tier::Solid => &mut self.solid,
            Tier::Strong => &mut self.strong,
        }
    }

    pub fn total(&self) -> u32 {
        self.weak + self.solid + self.strong
    }

    /// Percentages over a fixed denominator.
    pub fn shares(&self, denominator: u32) -> TierShares {
        TierShares {
            weak: pct(self.weak, denominator),
            solid: pct(self.solid, denominator),
            strong: pct(self.strong, denominator),
        }
    }
}

/// Percentage per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TierShares {
    pub weak: f64,
    pub solid: f64,
    pub strong: f64,
}
