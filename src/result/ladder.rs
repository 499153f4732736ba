//! Five-slot outcome ladders.
//!
//! Position 0 is the worst slot for the ladder's controller and position 4
//! the best. The resolver never looks at the controller; which ladder is
//! passed in decides whose perspective applies.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::outcome::Outcome;
use crate::battle::Side;
use crate::tier::{Tier, TierConfig};

/// Slots on every ladder.
pub const LADDER_SLOTS: usize = 5;

/// Highest ladder position.
pub const LAST_POSITION: usize = LADDER_SLOTS - 1;

/// Keys accepted by [`Ladder::by_key`].
pub const SHIPPED_LADDERS: [&str; 5] = [
    "batter",
    "batter-r3",
    "pitcher",
    "pitcher-2walk",
    "pitcher-3walk",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ladder {
    pub name: String,
    /// Role that benefits from high positions. Informational only.
    pub controller: String,
    pub outcomes: [Outcome; LADDER_SLOTS],
    /// Per-ladder label overrides.
    #[serde(default)]
    pub labels: BTreeMap<Outcome, String>,
}

impl Ladder {
    pub fn new(name: &str, controller: &str, outcomes: [Outcome; LADDER_SLOTS]) -> Self {
        Ladder {
            name: name.to_string(),
            controller: controller.to_string(),
            outcomes,
            labels: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, outcome: Outcome, label: &str) -> Self {
        self.labels.insert(outcome, label.to_string());
        self
    }

    /// OUT, OUT, 1B, 2B, HR.
    pub fn batter() -> Self {
        Ladder::new(
            "Batter Controls",
            "batter",
            [
                Outcome::Out,
                Outcome::Out,
                Outcome::Single,
                Outcome::Double,
                Outcome::HomeRun,
            ],
        )
    }

    /// OUT, BB, 1B, 2B, HR. Used with a runner on third.
    pub fn batter_r3_pressure() -> Self {
        Ladder::new(
            "Batter Controls (R3 Pressure)",
            "batter",
            [
                Outcome::Out,
                Outcome::Walk,
                Outcome::Single,
                Outcome::Double,
                Outcome::HomeRun,
            ],
        )
    }

    /// BB, O-RA, O-RC, O-RF, DP.
    pub fn pitcher() -> Self {
        Ladder::new(
            "Pitcher Controls",
            "pitcher",
            [
                Outcome::Walk,
                Outcome::OutRunnersAdvance,
                Outcome::OutRunnerChallenge,
                Outcome::OutRunnersFreeze,
                Outcome::DoublePlay,
            ],
        )
    }

    /// BB, BB, O-RC, O-RF, DP.
    pub fn pitcher_two_walk() -> Self {
        Ladder::new(
            "Pitcher Controls (2 Walk)",
            "pitcher",
            [
                Outcome::Walk,
                Outcome::Walk,
                Outcome::OutRunnerChallenge,
                Outcome::OutRunnersFreeze,
                Outcome::DoublePlay,
            ],
        )
    }

    /// BB, BB, BB, O-RF, DP.
    pub fn pitcher_three_walk() -> Self {
        Ladder::new(
            "Pitcher Controls (3 Walk)",
            "pitcher",
            [
                Outcome::Walk,
                Outcome::Walk,
                Outcome::Walk,
                Outcome::OutRunnersFreeze,
                Outcome::DoublePlay,
            ],
        )
    }

    /// Looks up a shipped ladder by its short key.
    pub fn by_key(key: &str) -> Option<Ladder> {
        match key {
            "batter" => Some(Ladder::batter()),
            "batter-r3" => Some(Ladder::batter_r3_pressure()),
            "pitcher" => Some(Ladder::pitcher()),
            "pitcher-2walk" => Some(Ladder::pitcher_two_walk()),
            "pitcher-3walk" => Some(Ladder::pitcher_three_walk()),
            _ => None,
        }
    }

    /// Outcome at `position`. Panics past the last slot.
    pub fn at(&self, position: usize) -> Outcome {
        self.outcomes[position]
    }

    /// This ladder's label for `outcome`, falling back to the canonical one.
    pub fn label_of(&self, outcome: Outcome) -> &str {
        self.labels
            .get(&outcome)
            .map(String::as_str)
            .unwrap_or_else(|| outcome.label())
    }

    pub fn rules_text(&self) -> String {
        let mut out = format!("{} Result Ladder\nPosition -> Outcome\n", self.name);
        for (i, outcome) in self.outcomes.iter().enumerate() {
            let note = match i {
                0 => " (worst)",
                LAST_POSITION => " (best)",
                _ => "",
            };
            let _ = writeln!(
                out,
                "  {}: {:<5} {}{}",
                i,
                outcome.code().to_uppercase(),
                self.label_of(*outcome),
                note
            );
        }
        out
    }

    /// The battle-tier by result-tier table, without criticals.
    pub fn table_text(&self, tiers: &TierConfig) -> String {
        let headers = [
            format!("Weak(<={})", tiers.weak_max),
            format!("Solid({}-{})", tiers.weak_max.saturating_add(1), tiers.solid_max),
            format!("Strong({}+)", tiers.solid_max.saturating_add(1)),
        ];
        let mut out = format!("{} Result Table\n{:<8}", self.name, "");
        for header in &headers {
            let _ = write!(out, " | {:<12}", header);
        }
        out.push('\n');
        for battle in Tier::ALL {
            let _ = write!(out, "{:<8}", battle.as_str());
            for result in Tier::ALL {
                let position = usize::from(battle.offset() + result.offset());
                let _ = write!(out, " | {:<12}", self.at(position).code().to_uppercase());
            }
            out.push('\n');
        }
        let _ = writeln!(out, "Snake eyes (2) -> position 0");
        let _ = writeln!(out, "Boxcars (12) -> position {}", LAST_POSITION);
        out
    }
}

/// The two ladders of a contest. The battle winner controls the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ladders {
    pub batting: Ladder,
    pub pitching: Ladder,
}

impl Ladders {
    pub fn baseball() -> Self {
        Ladders {
            batting: Ladder::batter(),
            pitching: Ladder::pitcher(),
        }
    }

    /// Side A bats, side B pitches.
    pub fn for_winner(&self, winner: Side) -> &Ladder {
        match winner {
            Side::A => &self.batting,
            Side::B => &self.pitching,
        }
    }
}

impl Default for Ladders {
    fn default() -> Self {
        Ladders::baseball()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_resolves() {
        for key in SHIPPED_LADDERS {
            assert!(Ladder::by_key(key).is_some(), "{key}");
        }
        assert!(Ladder::by_key("umpire").is_none());
    }

    #[test]
    fn controllers_are_mirrored() {
        let batter = Ladder::batter();
        let pitcher = Ladder::pitcher();
        assert_eq!(batter.at(LAST_POSITION), Outcome::HomeRun);
        assert_eq!(pitcher.at(0), Outcome::Walk);
        assert_eq!(pitcher.at(LAST_POSITION), Outcome::DoublePlay);
        assert_eq!(batter.at(0).outs(), 1);
    }

    #[test]
    fn labels_fall_back_to_canonical() {
        let ladder = Ladder::batter().with_label(Outcome::HomeRun, "Dinger");
        assert_eq!(ladder.label_of(Outcome::HomeRun), "Dinger");
        assert_eq!(ladder.label_of(Outcome::Single), "Single");
    }

    #[test]
    fn winner_picks_the_ladder() {
        let ladders = Ladders::baseball();
        assert_eq!(ladders.for_winner(Side::A).controller, "batter");
        assert_eq!(ladders.for_winner(Side::B).controller, "pitcher");
    }

    #[test]
    fn table_uses_offsets() {
        let text = Ladder::pitcher().table_text(&TierConfig::standard());
        let strong_row = text.lines().find(|l| l.starts_with("strong")).unwrap();
        assert!(strong_row.contains("O-RC"));
        assert!(strong_row.trim_end().ends_with("DP"));
    }

    #[test]
    fn ladder_json_uses_codes() {
        let json = serde_json::to_value(Ladder::pitcher_two_walk()).unwrap();
        assert_eq!(json["outcomes"][1], "bb");
        let back: Ladder = serde_json::from_value(json).unwrap();
        assert_eq!(back, Ladder::pitcher_two_walk());
    }
}
