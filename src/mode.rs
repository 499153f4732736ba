//! Game modes: a complete, serializable contest configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::battle::{roll_battle_with_limits, BattleError, BattleLimits, BattleOutcome};
use crate::commit::{resolve_commit, CommitResult, Commitment, RewardConfig, REWARD_LIMIT};
use crate::dice::DieSource;
use crate::matchup::{StanceSet, StrategySet};
use crate::result::{resolve_result, Ladders, ResultOutcome};
use crate::tier::TierConfig;

/// Errors in a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("tier thresholds inverted: weak_max {weak_max} must be below solid_max {solid_max}")]
    TierThresholds { weak_max: i32, solid_max: i32 },
    #[error("tier threshold {value} is outside -{limit}..={limit}")]
    TierRange { value: i32, limit: i32 },
    #[error("{set} has no choices")]
    EmptyChoices { set: String },
    #[error("{set} has {count} choices, at most {limit} are allowed")]
    TooManyChoices {
        set: String,
        count: usize,
        limit: usize,
    },
    #[error("{set} lists '{choice}' more than once")]
    DuplicateChoice { set: String, choice: String },
    #[error("{set} refers to unknown choice '{choice}'")]
    UnknownChoice { set: String, choice: String },
    #[error("'{choice}' beats itself")]
    SelfBeat { choice: String },
    #[error("'{a}' and '{b}' beat each other")]
    MutualBeat { a: String, b: String },
    #[error("neither '{a}' nor '{b}' beats the other")]
    Unrelated { a: String, b: String },
    #[error("'{choice}' beats {beats} and loses to {beaten_by} choices, expected one each")]
    CycleDegree {
        choice: String,
        beats: usize,
        beaten_by: usize,
    },
    #[error("axis '{axis}' has two identical members")]
    DegenerateAxis { axis: String },
    #[error("stance choice '{choice}' is on both '{first_axis}' and '{second_axis}'")]
    SharedChoice {
        choice: String,
        first_axis: String,
        second_axis: String,
    },
    #[error("reroll limit must allow at least one attempt")]
    ZeroRerollLimit,
    #[error("{matchup} reward {value} is outside -{limit}..={limit}")]
    RewardRange {
        matchup: &'static str,
        value: i32,
        limit: i32,
    },
    #[error("modifier {value} is outside -{limit}..={limit}")]
    ModifierRange { value: i32, limit: i32 },
    #[error("reading mode file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing mode file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything a contest needs besides the dice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    pub name: String,
    pub strategy: StrategySet,
    pub stance: StanceSet,
    pub rewards: RewardConfig,
    pub tiers: TierConfig,
    pub ladders: Ladders,
    #[serde(default)]
    pub limits: BattleLimits,
}

/// Full trace of one contest, commit to final outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestTrace {
    pub commit: CommitResult,
    pub battle: BattleOutcome,
    /// Role that controlled the result ladder.
    pub controller: String,
    pub result: ResultOutcome,
}

impl Mode {
    /// Approach cycle, two-plane zone read, symmetric rewards.
    pub fn baseball() -> Self {
        Mode {
            name: "Baseball".to_string(),
            strategy: StrategySet::baseball(),
            stance: StanceSet::baseball_zone(),
            rewards: RewardConfig::symmetric(),
            tiers: TierConfig::standard(),
            ladders: Ladders::baseball(),
            limits: BattleLimits::default(),
        }
    }

    /// Elemental cycle with a coin call, stance rewarding the winner only.
    pub fn elemental() -> Self {
        Mode {
            name: "Elemental".to_string(),
            strategy: StrategySet::elemental(),
            stance: StanceSet::coin(),
            rewards: RewardConfig::winner_only_stance(),
            tiers: TierConfig::standard(),
            ladders: Ladders::baseball(),
            limits: BattleLimits::default(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Mode, ConfigError> {
        let mode: Mode = serde_json::from_str(json)?;
        mode.validate()?;
        Ok(mode)
    }

    /// Loads and validates a mode file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Mode, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mode = Mode::from_json_str(&text)?;
        info!(path = %path.display(), mode = %mode.name, "loaded mode");
        Ok(mode)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.strategy.validate()?;
        self.stance.validate()?;
        self.tiers.validate()?;
        if self.limits.max_attempts == 0 {
            return Err(ConfigError::ZeroRerollLimit);
        }
        let rewards = [("strategy", &self.rewards.strategy), ("stance", &self.rewards.stance)];
        for (matchup, reward) in rewards {
            if let Some(value) = reward.out_of_range() {
                return Err(ConfigError::RewardRange {
                    matchup,
                    value,
                    limit: REWARD_LIMIT,
                });
            }
        }
        Ok(())
    }

    pub fn commit(&self, a: &Commitment, b: &Commitment) -> CommitResult {
        resolve_commit(a, b, &self.strategy, &self.stance, &self.rewards)
    }

    /// Runs commit, battle and result. The battle winner rolls on its own
    /// ladder.
    pub fn play<S: DieSource + ?Sized>(
        &self,
        source: &mut S,
        a: &Commitment,
        b: &Commitment,
    ) -> Result<ContestTrace, BattleError> {
        let commit = self.commit(a, b);
        let battle = roll_battle_with_limits(
            source,
            commit.totals.a,
            commit.totals.b,
            &self.tiers,
            &self.limits,
        )?;
        let ladder = self.ladders.for_winner(battle.winner);
        let result = resolve_result(source, battle.tier, None, ladder, &self.tiers);
        Ok(ContestTrace {
            commit,
            battle,
            controller: ladder.controller.clone(),
            result,
        })
    }

    /// Human-readable rules for every part of the mode.
    pub fn rules_text(&self) -> String {
        let r = &self.rewards;
        let mut out = format!("== {} ==\n", self.name);
        out.push_str(&self.strategy.rules_text());
        out.push_str(&format!(
            "  reward: win {:+}, lose {:+}, tie {:+}\n",
            r.strategy.win, r.strategy.lose, r.strategy.tie
        ));
        out.push_str(&self.stance.rules_text());
        out.push_str(&format!(
            "  reward: win {:+}, lose {:+}, miss {:+}\n",
            r.stance.win, r.stance.lose, r.stance.tie
        ));
        out.push_str(&self.tiers.rules_text());
        for ladder in [&self.ladders.batting, &self.ladders.pitching] {
            out.push_str(&ladder.rules_text());
            out.push_str(&ladder.table_text(&self.tiers));
        }
        out
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::baseball()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::Side;
    use crate::dice::LoadedDice;
    use crate::result::Outcome;
    use crate::tier::Tier;

    #[test]
    fn shipped_modes_validate() {
        assert!(Mode::baseball().validate().is_ok());
        assert!(Mode::elemental().validate().is_ok());
    }

    #[test]
    fn oversized_rewards_are_rejected() {
        let mut mode = Mode::baseball();
        mode.rewards.stance.win = i32::MAX;
        assert!(matches!(
            mode.validate(),
            Err(ConfigError::RewardRange {
                matchup: "stance",
                value: i32::MAX,
                ..
            })
        ));
        mode.rewards.stance.win = REWARD_LIMIT;
        assert!(mode.validate().is_ok());
    }

    #[test]
    fn json_round_trip_validates() {
        let json = serde_json::to_string(&Mode::baseball()).unwrap();
        assert_eq!(Mode::from_json_str(&json).unwrap(), Mode::baseball());
    }

    #[test]
    fn limits_default_when_absent() {
        let mut value = serde_json::to_value(Mode::elemental()).unwrap();
        value.as_object_mut().unwrap().remove("limits");
        let mode = Mode::from_json_str(&value.to_string()).unwrap();
        assert_eq!(mode.limits, BattleLimits::default());
    }

    #[test]
    fn invalid_modes_are_rejected() {
        let mut mode = Mode::baseball();
        mode.tiers = TierConfig::new(9, 6);
        let json = serde_json::to_string(&mode).unwrap();
        assert!(matches!(
            Mode::from_json_str(&json),
            Err(ConfigError::TierThresholds { .. })
        ));
        assert!(matches!(Mode::from_json_str("{"), Err(ConfigError::Json(_))));
        assert!(matches!(
            Mode::from_json_file("/nonexistent/strikezone-mode.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn contest_from_commit_to_outcome() {
        let mode = Mode::baseball();
        // A: 3+3+2 = 8, B: 4+4-2 = 6, then a result roll of 8
        let mut dice = LoadedDice::new([3, 3, 4, 4, 4, 4]);
        let trace = mode
            .play(
                &mut dice,
                &Commitment::new("power", "up"),
                &Commitment::new("balance", "up"),
            )
            .unwrap();
        assert_eq!(trace.commit.totals.a, 2);
        assert_eq!(trace.battle.winner, Side::A);
        assert_eq!(trace.battle.tier, Tier::Solid);
        assert_eq!(trace.controller, "batter");
        assert_eq!(trace.result.position, 2);
        assert_eq!(trace.result.outcome, Outcome::Single);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn pitcher_win_uses_pitching_ladder() {
        let mode = Mode::baseball();
        let mut dice = LoadedDice::new([2, 2, 5, 5, 1, 1]);
        let trace = mode
            .play(
                &mut dice,
                &Commitment::new("power", "up"),
                &Commitment::new("power", "in"),
            )
            .unwrap();
        assert_eq!(trace.battle.winner, Side::B);
        assert_eq!(trace.controller, "pitcher");
        assert_eq!(trace.result.outcome, Outcome::Walk);
    }

    #[test]
    fn rules_mention_every_part() {
        let text = Mode::baseball().rules_text();
        assert!(text.contains("Approach Strategy Set"));
        assert!(text.contains("Zone Stance Set"));
        assert!(text.contains("Pitcher Controls Result Table"));
    }
}
