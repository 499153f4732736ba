//! Challenge roll: an unmodified opposed 2d6 roll for secondary contests,
//! such as a runner trying to take an extra base. The challenger is side A
//! and wins ties.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::roll::DecidedBy;
use super::Side;
use crate::dice::{roll_pair, DicePair, DieSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeOutcome {
    pub challenger: DicePair,
    pub defender: DicePair,
    pub winner: Side,
    pub decided_by: DecidedBy,
}

/// Judges a challenge from fixed dice.
///
/// Criticals are checked in a fixed order: defender snake eyes, challenger
/// snake eyes, defender boxcars, challenger boxcars. Otherwise the defender
/// needs a strictly higher sum.
pub fn judge_challenge(challenger: DicePair, defender: DicePair) -> (Side, DecidedBy) {
    if defender.is_low_extremal() {
        (Side::A, DecidedBy::LowCritical)
    } else if challenger.is_low_extremal() {
        (Side::B, DecidedBy::LowCritical)
    } else if defender.is_high_extremal() {
        (Side::B, DecidedBy::HighCritical)
    } else if challenger.is_high_extremal() {
        (Side::A, DecidedBy::HighCritical)
    } else if defender.sum() > challenger.sum() {
        (Side::B, DecidedBy::Totals)
    } else {
        (Side::A, DecidedBy::Totals)
    }
}

/// Rolls a challenge. The challenger's pair is drawn first.
pub fn challenge_roll<S: DieSource + ?Sized>(source: &mut S) -> ChallengeOutcome {
    let challenger = roll_pair(source);
    let defender = roll_pair(source);
    let (winner, decided_by) = judge_challenge(challenger, defender);
    debug!(%challenger, %defender, ?winner, ?decided_by, "challenge decided");
    ChallengeOutcome {
        challenger,
        defender,
        winner,
        decided_by,
    }
}
