//! Opposed dice rolls.

pub mod challenge;
pub mod roll;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use challenge::{challenge_roll, judge_challenge, ChallengeOutcome};
pub use roll::{
    compare_totals, decide, roll_battle, roll_battle_with_limits, BattleError, BattleLimits,
    BattleOutcome, DecidedBy, SideRoll, Verdict, DEFAULT_MAX_ATTEMPTS,
};

/// One of the two contestants. Side A reads the stance and bats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    pub const fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Side::A => "a",
            Side::B => "b",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
