//! Session state.
//!
//! Holds the active game mode and the session's dice, and answers parsed
//! protocol commands. The dice here are the only long-lived randomness in
//! the process: `seed` and `random` swap them wholesale, and every resolver
//! borrows them for the duration of one command.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use crate::battle::{challenge_roll, roll_battle_with_limits, BattleError};
use crate::commit::{Commitment, Reward};
use crate::dice::Dice;
use crate::enumerate::{
    enumerate_all_results, enumerate_battles, enumerate_live_battles, enumerate_modifier_grid,
    enumerate_results, tier_distribution,
};
use crate::mode::{ConfigError, Mode};
use crate::protocol::Command;
use crate::result::{resolve_result, Ladder};

/// Widest modifier range `enumerate grid` accepts, as `max - min`.
pub const MAX_GRID_SPAN: i64 = 40;

/// Errors from executing a well-formed command.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("unknown strategy choice '{0}'")]
    UnknownStrategy(String),

    #[error("unknown stance choice '{0}'")]
    UnknownStance(String),

    #[error("unknown ladder '{0}'")]
    UnknownLadder(String),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option {name}")]
    InvalidOption { name: String, value: String },

    #[error("grid range {min}..={max} is empty")]
    EmptyGrid { min: i32, max: i32 },

    #[error("grid range {min}..={max} spans more than {limit} modifiers")]
    GridTooWide { min: i32, max: i32, limit: i64 },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error("encoding reply: {0}")]
    Json(#[from] serde_json::Error),
}

/// What the engine has to say about one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Answer to `isready`.
    Ready,
    /// `<kind> <json>`.
    Line { kind: &'static str, body: String },
    /// End of session.
    Quit,
}

fn line<T: Serialize>(kind: &'static str, body: &T) -> Result<Reply, EngineError> {
    Ok(Reply::Line {
        kind,
        body: serde_json::to_string(body)?,
    })
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub mode: Mode,
    dice: Dice,
}

impl Engine {
    /// Baseball mode on entropy dice.
    pub fn new() -> Self {
        Engine::with_dice(Mode::baseball(), Dice::from_entropy())
    }

    pub fn with_dice(mode: Mode, dice: Dice) -> Self {
        Engine { mode, dice }
    }

    pub fn seed(&self) -> Option<u64> {
        self.dice.seed()
    }

    /// Resolves a ladder name: `batting`/`pitching` for the mode's own
    /// ladders, otherwise a shipped ladder key.
    fn ladder(&self, name: &str) -> Result<Ladder, EngineError> {
        match name {
            "batting" => Ok(self.mode.ladders.batting.clone()),
            "pitching" => Ok(self.mode.ladders.pitching.clone()),
            other => Ladder::by_key(other).ok_or_else(|| EngineError::UnknownLadder(other.to_string())),
        }
    }

    fn check_commitment(&self, c: &Commitment) -> Result<(), EngineError> {
        if !self.mode.strategy.contains(&c.strategy) {
            return Err(EngineError::UnknownStrategy(c.strategy.clone()));
        }
        if self.mode.stance.find_axis(&c.stance).is_none() {
            return Err(EngineError::UnknownStance(c.stance.clone()));
        }
        Ok(())
    }

    /// Applies a named option to the active mode. The mode is left unchanged
    /// when the new value would make it invalid.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), EngineError> {
        let raw = value.unwrap_or("");
        let invalid = || EngineError::InvalidOption {
            name: name.to_string(),
            value: raw.to_string(),
        };

        let mut mode = self.mode.clone();
        match name {
            "WeakMax" => mode.tiers.weak_max = raw.parse().map_err(|_| invalid())?,
            "SolidMax" => mode.tiers.solid_max = raw.parse().map_err(|_| invalid())?,
            "StanceReward" => {
                mode.rewards.stance = match raw {
                    "symmetric" => Reward::symmetric(1),
                    "winner-only" => Reward::winner_only(1),
                    "none" => Reward::neutral(),
                    _ => return Err(invalid()),
                }
            }
            "RerollLimit" => mode.limits.max_attempts = raw.parse().map_err(|_| invalid())?,
            other => return Err(EngineError::UnknownOption(other.to_string())),
        }
        mode.validate()?;
        self.mode = mode;
        debug!(name, value = raw, "option set");
        Ok(())
    }

    /// Executes one command against the session.
    pub fn execute(&mut self, command: Command) -> Result<Reply, EngineError> {
        match command {
            Command::IsReady => Ok(Reply::Ready),
            Command::Quit => Ok(Reply::Quit),

            Command::Seed(seed) => {
                self.dice.reseed(seed);
                line("seed", &json!({ "seed": seed }))
            }
            Command::Random => {
                self.dice.reset_to_entropy();
                line("seed", &json!({ "seed": null }))
            }
            Command::SetOption { name, value } => {
                self.set_option(&name, value.as_deref())?;
                line("option", &json!({ "name": name, "value": value }))
            }
            Command::Mode { path } => {
                self.mode = Mode::from_json_file(&path)?;
                info!(mode = %self.mode.name, "mode switched");
                line("mode", &json!({ "name": self.mode.name }))
            }

            Command::Commit { a, b } => {
                self.check_commitment(&a)?;
                self.check_commitment(&b)?;
                line("commit", &self.mode.commit(&a, &b))
            }
            Command::Battle { mod_a, mod_b } => {
                let outcome = roll_battle_with_limits(
                    &mut self.dice,
                    mod_a,
                    mod_b,
                    &self.mode.tiers,
                    &self.mode.limits,
                )?;
                line("battle", &outcome)
            }
            Command::Result { tier, ladder, dice } => {
                let ladder = self.ladder(&ladder)?;
                let outcome = resolve_result(&mut self.dice, tier, dice, &ladder, &self.mode.tiers);
                line("result", &outcome)
            }
            Command::Contest { a, b } => {
                self.check_commitment(&a)?;
                self.check_commitment(&b)?;
                let trace = self.mode.play(&mut self.dice, &a, &b)?;
                line("contest", &trace)
            }
            Command::Challenge => line("challenge", &challenge_roll(&mut self.dice)),

            Command::EnumerateBattles { mod_a, mod_b } => {
                line("battles", &enumerate_battles(mod_a, mod_b, &self.mode.tiers))
            }
            Command::EnumerateLive { mod_a, mod_b } => {
                line("live", &enumerate_live_battles(mod_a, mod_b, &self.mode.tiers))
            }
            Command::EnumerateGrid { min, max } => {
                if min > max {
                    return Err(EngineError::EmptyGrid { min, max });
                }
                if i64::from(max) - i64::from(min) > MAX_GRID_SPAN {
                    return Err(EngineError::GridTooWide {
                        min,
                        max,
                        limit: MAX_GRID_SPAN,
                    });
                }
                let mods: Vec<i32> = (min..=max).collect();
                line("grid", &enumerate_modifier_grid(&mods, &mods, &self.mode.tiers))
            }
            Command::EnumerateResults { ladder, tier } => {
                let ladder = self.ladder(&ladder)?;
                match tier {
                    Some(tier) => line("results", &enumerate_results(tier, &ladder, &self.mode.tiers)),
                    None => line("results", &enumerate_all_results(&ladder, &self.mode.tiers)),
                }
            }
            Command::Curve { modifier } => {
                line("curve", &tier_distribution(modifier, &self.mode.tiers))
            }
            Command::Rules => line("rules", &json!({ "text": self.mode.rules_text() })),
        }
    }

    /// Executes `command` and writes its reply. Command failures are
    /// reported to the client as an `error` line. Returns `false` on `quit`.
    pub fn respond<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<bool> {
        match self.execute(command) {
            Ok(Reply::Ready) => writeln!(out, "readyok")?,
            Ok(Reply::Line { kind, body }) => writeln!(out, "{} {}", kind, body)?,
            Ok(Reply::Quit) => return Ok(false),
            Err(err) => write_error(out, &err.to_string())?,
        }
        out.flush()?;
        Ok(true)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

/// Writes an `error` line.
pub fn write_error<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "error {}", json!({ "message": message }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::Tier;

    fn seeded() -> Engine {
        Engine::with_dice(Mode::baseball(), Dice::seeded(7))
    }

    fn body(reply: Reply) -> serde_json::Value {
        match reply {
            Reply::Line { body, .. } => serde_json::from_str(&body).unwrap(),
            other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn isready_and_quit() {
        let mut engine = seeded();
        assert_eq!(engine.execute(Command::IsReady).unwrap(), Reply::Ready);
        assert_eq!(engine.execute(Command::Quit).unwrap(), Reply::Quit);
    }

    #[test]
    fn seed_makes_battles_reproducible() {
        let mut engine = seeded();
        engine.execute(Command::Seed(99)).unwrap();
        let first = engine.execute(Command::Battle { mod_a: 1, mod_b: 0 }).unwrap();
        engine.execute(Command::Seed(99)).unwrap();
        let second = engine.execute(Command::Battle { mod_a: 1, mod_b: 0 }).unwrap();
        assert_eq!(first, second);
        assert_eq!(engine.seed(), Some(99));

        engine.execute(Command::Random).unwrap();
        assert_eq!(engine.seed(), None);
    }

    #[test]
    fn commit_rejects_foreign_choices() {
        let mut engine = seeded();
        let err = engine
            .execute(Command::Commit {
                a: Commitment::new("power", "sideways"),
                b: Commitment::new("power", "up"),
            })
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownStance(ref s) if s == "sideways"));

        let err = engine
            .execute(Command::Contest {
                a: Commitment::new("bunt", "up"),
                b: Commitment::new("power", "up"),
            })
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownStrategy(_)));
    }

    #[test]
    fn result_with_fixed_dice() {
        let mut engine = seeded();
        let reply = engine
            .execute(Command::Result {
                tier: Tier::Solid,
                ladder: "batting".to_string(),
                dice: Some(crate::dice::DicePair(4, 4)),
            })
            .unwrap();
        let value = body(reply);
        assert_eq!(value["position"], 2);
        assert_eq!(value["outcome"], "1b");
        assert_eq!(value["label"], "Single");
    }

    #[test]
    fn unknown_ladder_is_an_error() {
        let mut engine = seeded();
        let err = engine
            .execute(Command::EnumerateResults {
                ladder: "umpire".to_string(),
                tier: None,
            })
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownLadder(_)));
    }

    #[test]
    fn options_update_the_mode() {
        let mut engine = seeded();
        engine.set_option("WeakMax", Some("5")).unwrap();
        assert_eq!(engine.mode.tiers.weak_max, 5);
        engine.set_option("StanceReward", Some("winner-only")).unwrap();
        assert_eq!(engine.mode.rewards.stance, Reward::winner_only(1));
        engine.set_option("RerollLimit", Some("10")).unwrap();
        assert_eq!(engine.mode.limits.max_attempts, 10);
    }

    #[test]
    fn invalid_options_leave_the_mode_alone() {
        let mut engine = seeded();
        assert!(matches!(
            engine.set_option("WeakMax", Some("12")),
            Err(EngineError::Config(ConfigError::TierThresholds { .. }))
        ));
        assert_eq!(engine.mode.tiers.weak_max, 6);
        assert!(matches!(
            engine.set_option("RerollLimit", Some("0")),
            Err(EngineError::Config(ConfigError::ZeroRerollLimit))
        ));
        assert!(matches!(
            engine.set_option("StanceReward", Some("double")),
            Err(EngineError::InvalidOption { .. })
        ));
        assert!(matches!(
            engine.set_option("Threads", Some("4")),
            Err(EngineError::UnknownOption(_))
        ));
    }

    #[test]
    fn respond_writes_one_line_per_command() {
        let mut engine = seeded();
        let mut out = Vec::new();
        assert!(engine.respond(Command::IsReady, &mut out).unwrap());
        assert!(engine
            .respond(Command::EnumerateBattles { mod_a: 0, mod_b: 0 }, &mut out)
            .unwrap());
        assert!(engine.respond(Command::Battle { mod_a: 0, mod_b: 0 }, &mut out).unwrap());
        assert!(engine
            .respond(Command::EnumerateGrid { min: 1, max: 0 }, &mut out)
            .unwrap());
        assert!(!engine.respond(Command::Quit, &mut out).unwrap());

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "readyok");
        assert!(lines[1].starts_with("battles {"));
        assert!(lines[2].starts_with("battle {"));
        assert!(lines[3].starts_with("error {"));
    }

    #[test]
    fn oversized_grid_is_refused() {
        let mut engine = seeded();
        let err = engine
            .execute(Command::EnumerateGrid {
                min: -100_000,
                max: 100_000,
            })
            .unwrap_err();
        assert!(matches!(err, EngineError::GridTooWide { .. }));

        let err = engine
            .execute(Command::EnumerateGrid {
                min: i32::MIN,
                max: i32::MAX,
            })
            .unwrap_err();
        assert!(matches!(err, EngineError::GridTooWide { .. }));

        let widest = engine
            .execute(Command::EnumerateGrid { min: -20, max: 20 })
            .unwrap();
        let cells = body(widest);
        assert_eq!(cells.as_array().unwrap().len(), 41 * 41);

        let mut out = Vec::new();
        assert!(engine
            .respond(Command::EnumerateGrid { min: 0, max: 41 }, &mut out)
            .unwrap());
        assert!(engine.respond(Command::IsReady, &mut out).unwrap());
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("error {"));
        assert_eq!(lines[1], "readyok");
    }

    #[test]
    fn extreme_thresholds_leave_the_mode_unchanged() {
        let mut engine = seeded();
        let err = engine
            .set_option("SolidMax", Some("2147483647"))
            .unwrap_err();
        assert!(matches!(err, EngineError::Config(ConfigError::TierRange { .. })));
        assert_eq!(engine.mode.tiers.solid_max, 9);
        assert!(engine.execute(Command::Rules).is_ok());
    }

    #[test]
    fn rules_fit_on_one_line() {
        let mut engine = seeded();
        let mut out = Vec::new();
        engine.respond(Command::Rules, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("rules {\"text\":"));
    }
}
