//! Battle enumeration over all 1296 combinations of two dice pairs.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{pct, TierCounts, TierShares};
use crate::battle::{compare_totals, decide, DecidedBy, Side, SideRoll, Verdict};
use crate::dice::{DicePair, PAIR_COMBINATIONS};
use crate::tier::TierConfig;

/// Ordered outcomes of two independent pairs.
pub const BATTLE_COMBINATIONS: u32 = PAIR_COMBINATIONS * PAIR_COMBINATIONS;

/// Pure total-comparison distribution. Ties are counted, not rerolled, and
/// criticals are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleEnumeration {
    pub mod_a: i32,
    pub mod_b: i32,
    pub total: u32,
    pub a_wins: u32,
    pub b_wins: u32,
    pub ties: u32,
    /// Winner's tier over all decisive combinations.
    pub tier_wins: TierCounts,
    pub a_tiers: TierCounts,
    pub b_tiers: TierCounts,
    pub a_win_pct: f64,
    pub b_win_pct: f64,
    pub tie_pct: f64,
    pub tier_pct: TierShares,
}

pub fn enumerate_battles(mod_a: i32, mod_b: i32, tiers: &TierConfig) -> BattleEnumeration {
    let mut a_wins = 0;
    let mut b_wins = 0;
    let mut ties = 0;
    let mut tier_wins = TierCounts::default();
    let mut a_tiers = TierCounts::default();
    let mut b_tiers = TierCounts::default();

    for pair_a in DicePair::all() {
        let total_a = i32::from(pair_a.sum()) + mod_a;
        for pair_b in DicePair::all() {
            let total_b = i32::from(pair_b.sum()) + mod_b;
            match compare_totals(total_a, total_b, tiers) {
                Some((Side::A, tier)) => {
                    a_wins += 1;
                    tier_wins.add(tier);
                    a_tiers.add(tier);
                }
                Some((Side::B, tier)) => {
                    b_wins += 1;
                    tier_wins.add(tier);
                    b_tiers.add(tier);
                }
                None => ties += 1,
            }
        }
    }

    debug_assert_eq!(a_wins + b_wins + ties, BATTLE_COMBINATIONS);
    debug_assert_eq!(tier_wins.total(), a_wins + b_wins);

    BattleEnumeration {
        mod_a,
        mod_b,
        total: BATTLE_COMBINATIONS,
        a_wins,
        b_wins,
        ties,
        tier_wins,
        a_tiers,
        b_tiers,
        a_win_pct: pct(a_wins, BATTLE_COMBINATIONS),
        b_win_pct: pct(b_wins, BATTLE_COMBINATIONS),
        tie_pct: pct(ties, BATTLE_COMBINATIONS),
        tier_pct: tier_wins.shares(BATTLE_COMBINATIONS),
    }
}

/// Distribution under the live rules, criticals included. Combinations that
/// live play would reroll are counted separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveBattleEnumeration {
    pub mod_a: i32,
    pub mod_b: i32,
    pub total: u32,
    pub a_wins: u32,
    pub b_wins: u32,
    pub rerolls: u32,
    pub by_totals: u32,
    pub by_low_critical: u32,
    pub by_high_critical: u32,
    pub tier_wins: TierCounts,
    pub a_win_pct: f64,
    pub b_win_pct: f64,
    pub reroll_pct: f64,
    /// Side A's chance of winning a live battle once rerolls are redrawn.
    pub a_live_win_pct: f64,
}

pub fn enumerate_live_battles(mod_a: i32, mod_b: i32, tiers: &TierConfig) -> LiveBattleEnumeration {
    let mut a_wins = 0;
    let mut b_wins = 0;
    let mut rerolls = 0;
    let mut by_totals = 0;
    let mut by_low_critical = 0;
    let mut by_high_critical = 0;
    let mut tier_wins = TierCounts::default();

    for pair_a in DicePair::all() {
        let a = SideRoll::new(pair_a, mod_a);
        for pair_b in DicePair::all() {
            let b = SideRoll::new(pair_b, mod_b);
            match decide(&a, &b, tiers) {
                Verdict::Decided { winner, tier, by } => {
                    match winner {
                        Side::A => a_wins += 1,
                        Side::B => b_wins += 1,
                    }
                    match by {
                        DecidedBy::Totals => by_totals += 1,
                        DecidedBy::LowCritical => by_low_critical += 1,
                        DecidedBy::HighCritical => by_high_critical += 1,
                    }
                    tier_wins.add(tier);
                }
                Verdict::Reroll => rerolls += 1,
            }
        }
    }

    debug_assert_eq!(a_wins + b_wins + rerolls, BATTLE_COMBINATIONS);
    debug_assert_eq!(by_totals + by_low_critical + by_high_critical, a_wins + b_wins);

    LiveBattleEnumeration {
        mod_a,
        mod_b,
        total: BATTLE_COMBINATIONS,
        a_wins,
        b_wins,
        rerolls,
        by_totals,
        by_low_critical,
        by_high_critical,
        tier_wins,
        a_win_pct: pct(a_wins, BATTLE_COMBINATIONS),
        b_win_pct: pct(b_wins, BATTLE_COMBINATIONS),
        reroll_pct: pct(rerolls, BATTLE_COMBINATIONS),
        a_live_win_pct: pct(a_wins, a_wins + b_wins),
    }
}

/// Enumerates every `(mod_a, mod_b)` pair in parallel, in row-major order.
pub fn enumerate_modifier_grid(
    mods_a: &[i32],
    mods_b: &[i32],
    tiers: &TierConfig,
) -> Vec<BattleEnumeration> {
    let cells: Vec<(i32, i32)> = mods_a
        .iter()
        .flat_map(|&a| mods_b.iter().map(move |&b| (a, b)))
        .collect();
    cells
        .into_par_iter()
        .map(|(a, b)| enumerate_battles(a, b, tiers))
        .collect()
}
