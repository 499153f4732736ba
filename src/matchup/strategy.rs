//! Strategy resolution.
//!
//! A strategy set is a small closed list of choices with a non-transitive
//! "beats" relation (rock-paper-scissors). The resolver is pure and total
//! over any configuration; legality of the cycle is checked by
//! [`StrategySet::validate`], not at resolution time.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::MAX_CHOICES;
use crate::mode::ConfigError;

/// Result of a strategy matchup from the first side's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyOutcome {
    Win,
    Lose,
    Tie,
}

impl StrategyOutcome {
    /// The same matchup seen from the other side.
    pub const fn reversed(self) -> Self {
        match self {
            StrategyOutcome::Win => StrategyOutcome::Lose,
            StrategyOutcome::Lose => StrategyOutcome::Win,
            StrategyOutcome::Tie => StrategyOutcome::Tie,
        }
    }
}

/// Flavor text for one ordered (winner, loser) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyExplanation {
    pub winner: String,
    pub loser: String,
    pub text: String,
}

/// A closed set of strategy choices and the relation between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategySet {
    pub name: String,
    pub choices: Vec<String>,
    /// Each choice mapped to the choices it beats.
    pub beats: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub explanations: Vec<StrategyExplanation>,
}

impl StrategySet {
    /// Builds a set from `(choice, beaten)` edges, in choice order.
    pub fn from_cycle(name: &str, edges: &[(&str, &str)]) -> Self {
        let choices = edges.iter().map(|(c, _)| c.to_string()).collect();
        let beats = edges
            .iter()
            .map(|(c, b)| (c.to_string(), vec![b.to_string()]))
            .collect();
        StrategySet {
            name: name.to_string(),
            choices,
            beats,
            explanations: Vec::new(),
        }
    }

    /// Registers flavor text for `winner` beating `loser`.
    pub fn with_explanation(mut self, winner: &str, loser: &str, text: &str) -> Self {
        self.explanations.push(StrategyExplanation {
            winner: winner.to_string(),
            loser: loser.to_string(),
            text: text.to_string(),
        });
        self
    }

    /// fire > grass > water > fire
    pub fn elemental() -> Self {
        StrategySet::from_cycle(
            "Elemental",
            &[("fire", "grass"), ("grass", "water"), ("water", "fire")],
        )
        .with_explanation("fire", "grass", "Fire burns grass")
        .with_explanation("grass", "water", "Grass drinks up water")
        .with_explanation("water", "fire", "Water puts out fire")
    }

    /// Batter approaches: power > balance > finesse > power.
    pub fn baseball() -> Self {
        StrategySet::from_cycle(
            "Approach",
            &[
                ("power", "balance"),
                ("finesse", "power"),
                ("balance", "finesse"),
            ],
        )
        .with_explanation("power", "balance", "Power overwhelms a balanced approach")
        .with_explanation("finesse", "power", "Finesse exploits an all-out power swing")
        .with_explanation("balance", "finesse", "Balance stays steady against finesse")
    }

    pub fn contains(&self, choice: &str) -> bool {
        self.choices.iter().any(|c| c == choice)
    }

    /// True when `a` is listed as beating `b`.
    pub fn beats(&self, a: &str, b: &str) -> bool {
        self.beats
            .get(a)
            .map_or(false, |beaten| beaten.iter().any(|c| c == b))
    }

    fn explanation(&self, winner: &str, loser: &str) -> Option<&str> {
        self.explanations
            .iter()
            .find(|e| e.winner == winner && e.loser == loser)
            .map(|e| e.text.as_str())
    }

    /// Checks that the relation is a legal non-transitive cycle: every
    /// distinct pair is decided in exactly one direction, and every choice
    /// beats exactly one other and loses to exactly one other.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.choices.is_empty() {
            return Err(ConfigError::EmptyChoices {
                set: self.name.clone(),
            });
        }
        if self.choices.len() > MAX_CHOICES {
            return Err(ConfigError::TooManyChoices {
                set: self.name.clone(),
                count: self.choices.len(),
                limit: MAX_CHOICES,
            });
        }
        for (i, choice) in self.choices.iter().enumerate() {
            if self.choices[..i].contains(choice) {
                return Err(ConfigError::DuplicateChoice {
                    set: self.name.clone(),
                    choice: choice.clone(),
                });
            }
        }
        for (choice, beaten) in &self.beats {
            for c in std::iter::once(choice).chain(beaten) {
                if !self.contains(c) {
                    return Err(ConfigError::UnknownChoice {
                        set: self.name.clone(),
                        choice: c.clone(),
                    });
                }
            }
            if beaten.contains(choice) {
                return Err(ConfigError::SelfBeat {
                    choice: choice.clone(),
                });
            }
        }

        for (i, a) in self.choices.iter().enumerate() {
            for b in &self.choices[i + 1..] {
                match (self.beats(a, b), self.beats(b, a)) {
                    (true, true) => {
                        return Err(ConfigError::MutualBeat {
                            a: a.clone(),
                            b: b.clone(),
                        })
                    }
                    (false, false) => {
                        return Err(ConfigError::Unrelated {
                            a: a.clone(),
                            b: b.clone(),
                        })
                    }
                    _ => {}
                }
            }
        }

        for choice in &self.choices {
            let beats = self.choices.iter().filter(|o| self.beats(choice, o)).count();
            let beaten_by = self.choices.iter().filter(|o| self.beats(o, choice)).count();
            if beats != 1 || beaten_by != 1 {
                return Err(ConfigError::CycleDegree {
                    choice: choice.clone(),
                    beats,
                    beaten_by,
                });
            }
        }
        Ok(())
    }

    pub fn rules_text(&self) -> String {
        let mut out = format!("{} Strategy Set\n", self.name);
        for choice in &self.choices {
            let beaten = self
                .beats
                .get(choice)
                .map(|b| b.join(", "))
                .unwrap_or_default();
            let _ = writeln!(out, "  {} beats {}", choice, beaten);
        }
        out
    }
}

/// Resolves `a` against `b` from `a`'s perspective.
///
/// Equal choices tie. Otherwise `a` wins if it beats `b`, and loses in
/// every other case.
pub fn resolve(a: &str, b: &str, set: &StrategySet) -> StrategyOutcome {
    if a == b {
        StrategyOutcome::Tie
    } else if set.beats(a, b) {
        StrategyOutcome::Win
    } else {
        StrategyOutcome::Lose
    }
}

/// Like [`resolve`], with a human-readable justification.
pub fn explain(a: &str, b: &str, set: &StrategySet) -> (StrategyOutcome, String) {
    let outcome = resolve(a, b, set);
    let text = match outcome {
        StrategyOutcome::Tie => format!("Both chose {} (tie)", a),
        StrategyOutcome::Win => set
            .explanation(a, b)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} beats {}", a, b)),
        StrategyOutcome::Lose => set
            .explanation(b, a)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} beats {}", b, a)),
    };
    (outcome, text)
}
