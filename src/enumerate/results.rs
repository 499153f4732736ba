//! Result enumeration over the 36 ordered result rolls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::pct;
use crate::dice::{DicePair, PAIR_COMBINATIONS};
use crate::result::{place, Critical, Ladder, Outcome, LADDER_SLOTS};
use crate::tier::{Tier, TierConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnumeration {
    pub ladder: String,
    pub battle_tier: Tier,
    pub total: u32,
    pub outcome_counts: BTreeMap<Outcome, u32>,
    pub outcome_pct: BTreeMap<Outcome, f64>,
    pub position_counts: [u32; LADDER_SLOTS],
    pub low_criticals: u32,
    pub high_criticals: u32,
}

impl ResultEnumeration {
    pub fn count(&self, outcome: Outcome) -> u32 {
        self.outcome_counts.get(&outcome).copied().unwrap_or(0)
    }
}

/// Walks every result roll through the same placement as live play,
/// criticals included.
pub fn enumerate_results(battle_tier: Tier, ladder: &Ladder, tiers: &TierConfig) -> ResultEnumeration {
    let mut outcome_counts: BTreeMap<Outcome, u32> = BTreeMap::new();
    let mut position_counts = [0u32; LADDER_SLOTS];
    let mut low_criticals = 0;
    let mut high_criticals = 0;

    for dice in DicePair::all() {
        let placement = place(battle_tier, dice, tiers);
        *outcome_counts.entry(ladder.at(placement.position)).or_default() += 1;
        position_counts[placement.position] += 1;
        match placement.critical {
            Some(Critical::Low) => low_criticals += 1,
            Some(Critical::High) => high_criticals += 1,
            None => {}
        }
    }

    debug_assert_eq!(outcome_counts.values().sum::<u32>(), PAIR_COMBINATIONS);
    debug_assert_eq!(position_counts.iter().sum::<u32>(), PAIR_COMBINATIONS);

    let outcome_pct = outcome_counts
        .iter()
        .map(|(&outcome, &count)| (outcome, pct(count, PAIR_COMBINATIONS)))
        .collect();

    ResultEnumeration {
        ladder: ladder.name.clone(),
        battle_tier,
        total: PAIR_COMBINATIONS,
        outcome_counts,
        outcome_pct,
        position_counts,
        low_criticals,
        high_criticals,
    }
}

/// One report per battle tier, weakest first.
pub fn enumerate_all_results(ladder: &Ladder, tiers: &TierConfig) -> Vec<ResultEnumeration> {
    Tier::ALL
        .iter()
        .map(|&tier| enumerate_results(tier, ladder, tiers))
        .collect()
}
