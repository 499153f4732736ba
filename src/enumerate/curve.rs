//! How a modifier shifts the 2d6 bell curve across tiers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{TierCounts, TierShares};
use crate::dice::{DicePair, PAIR_COMBINATIONS};
use crate::tier::TierConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierDistribution {
    pub modifier: i32,
    pub total: u32,
    /// Combinations producing each modified roll value.
    pub value_counts: BTreeMap<i32, u32>,
    pub tier_counts: TierCounts,
    pub tier_pct: TierShares,
}

/// Exact tier shares of `2d6 + modifier`.
pub fn tier_distribution(modifier: i32, tiers: &TierConfig) -> TierDistribution {
    let mut value_counts: BTreeMap<i32, u32> = BTreeMap::new();
    let mut tier_counts = TierCounts::default();

    for dice in DicePair::all() {
        let value = i32::from(dice.sum()) + modifier;
        *value_counts.entry(value).or_default() += 1;
        tier_counts.add(tiers.classify(value));
    }

    debug_assert_eq!(tier_counts.total(), PAIR_COMBINATIONS);

    TierDistribution {
        modifier,
        total: PAIR_COMBINATIONS,
        value_counts,
        tier_counts,
        tier_pct: tier_counts.shares(PAIR_COMBINATIONS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmodified_curve() {
        let d = tier_distribution(0, &TierConfig::standard());
        assert_eq!(d.tier_counts.weak, 15);
        assert_eq!(d.tier_counts.solid, 15);
        assert_eq!(d.tier_counts.strong, 6);
        assert_eq!(d.value_counts[&7], 6);
        assert_eq!(d.value_counts.len(), 11);
    }

    #[test]
    fn plus_three_shifts_everything_up() {
        let d = tier_distribution(3, &TierConfig::standard());
        assert_eq!(d.tier_counts.weak, 3);
        assert_eq!(d.tier_counts.solid, 12);
        assert_eq!(d.tier_counts.strong, 21);
        assert_eq!(d.value_counts.keys().next(), Some(&5));
    }
}
