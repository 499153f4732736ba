//! Contest outcomes and their scorebook codes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Final discrete result of a contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "out")]
    Out,
    #[serde(rename = "k")]
    Strikeout,
    #[serde(rename = "1b")]
    Single,
    #[serde(rename = "2b")]
    Double,
    #[serde(rename = "3b")]
    Triple,
    #[serde(rename = "hr")]
    HomeRun,
    #[serde(rename = "bb")]
    Walk,
    #[serde(rename = "o-ra")]
    OutRunnersAdvance,
    #[serde(rename = "o-rc")]
    OutRunnerChallenge,
    #[serde(rename = "o-rf")]
    OutRunnersFreeze,
    #[serde(rename = "dp")]
    DoublePlay,
}

impl Outcome {
    pub const ALL: [Outcome; 11] = [
        Outcome::Out,
        Outcome::Strikeout,
        Outcome::Single,
        Outcome::Double,
        Outcome::Triple,
        Outcome::HomeRun,
        Outcome::Walk,
        Outcome::OutRunnersAdvance,
        Outcome::OutRunnerChallenge,
        Outcome::OutRunnersFreeze,
        Outcome::DoublePlay,
    ];

    /// Short scorebook code, as used in ladder files.
    pub const fn code(self) -> &'static str {
        match self {
            Outcome::Out => "out",
            Outcome::Strikeout => "k",
            Outcome::Single => "1b",
            Outcome::Double => "2b",
            Outcome::Triple => "3b",
            Outcome::HomeRun => "hr",
            Outcome::Walk => "bb",
            Outcome::OutRunnersAdvance => "o-ra",
            Outcome::OutRunnerChallenge => "o-rc",
            Outcome::OutRunnersFreeze => "o-rf",
            Outcome::DoublePlay => "dp",
        }
    }

    /// Canonical human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Outcome::Out => "Out",
            Outcome::Strikeout => "Strikeout",
            Outcome::Single => "Single",
            Outcome::Double => "Double",
            Outcome::Triple => "Triple",
            Outcome::HomeRun => "Home Run",
            Outcome::Walk => "Walk",
            Outcome::OutRunnersAdvance => "Out (Runners Advance)",
            Outcome::OutRunnerChallenge => "Out (Runner Challenge)",
            Outcome::OutRunnersFreeze => "Out (Runners Freeze)",
            Outcome::DoublePlay => "Double Play",
        }
    }

    pub fn from_code(code: &str) -> Option<Outcome> {
        Outcome::ALL.into_iter().find(|o| o.code() == code)
    }

    pub const fn is_hit(self) -> bool {
        matches!(
            self,
            Outcome::Single | Outcome::Double | Outcome::Triple | Outcome::HomeRun
        )
    }

    /// Outs recorded on the play.
    pub const fn outs(self) -> u8 {
        match self {
            Outcome::Out
            | Outcome::Strikeout
            | Outcome::OutRunnersAdvance
            | Outcome::OutRunnerChallenge
            | Outcome::OutRunnersFreeze => 1,
            Outcome::DoublePlay => 2,
            Outcome::Single
            | Outcome::Double
            | Outcome::Triple
            | Outcome::HomeRun
            | Outcome::Walk => 0,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
