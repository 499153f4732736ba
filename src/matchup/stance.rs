//! Stance resolution.
//!
//! Stance choices are grouped into axes, each an opposing pair (up/down,
//! in/out). The reader tries to anticipate the actor: an exact match favors
//! the reader, the opposite choice on the same axis favors the actor, and
//! choices on different axes are a miss.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::MAX_CHOICES;
use crate::mode::ConfigError;

/// Who gained the stance advantage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StanceOutcome {
    Reader,
    Actor,
    Miss,
}

/// An opposing pair of stance choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    pub name: String,
    pub choices: [String; 2],
}

impl Axis {
    pub fn new(name: &str, a: &str, b: &str) -> Self {
        Axis {
            name: name.to_string(),
            choices: [a.to_string(), b.to_string()],
        }
    }

    pub fn contains(&self, choice: &str) -> bool {
        self.choices.iter().any(|c| c == choice)
    }

    /// The opposite member of the axis, if `choice` is on it.
    pub fn partner(&self, choice: &str) -> Option<&str> {
        if self.choices[0] == choice {
            Some(self.choices[1].as_str())
        } else if self.choices[1] == choice {
            Some(self.choices[0].as_str())
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StanceExplanations {
    pub matched: String,
    pub fooled: String,
    pub miss: String,
}

/// A stance space: roles, axes and flavor text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StanceSet {
    pub name: String,
    /// `[reader, actor]`, e.g. `["batter", "pitcher"]`.
    pub roles: [String; 2],
    pub axes: Vec<Axis>,
    pub explanations: StanceExplanations,
}

impl StanceSet {
    /// Batter reads the pitch location on two planes.
    pub fn baseball_zone() -> Self {
        StanceSet {
            name: "Zone".to_string(),
            roles: ["batter".to_string(), "pitcher".to_string()],
            axes: vec![
                Axis::new("vertical", "up", "down"),
                Axis::new("horizontal", "in", "out"),
            ],
            explanations: StanceExplanations {
                matched: "Batter sat on the pitch location".to_string(),
                fooled: "Pitcher deceived the batter on the same plane".to_string(),
                miss: "Different planes, no advantage either way".to_string(),
            },
        }
    }

    /// A single-axis coin call. A miss is impossible.
    pub fn coin() -> Self {
        StanceSet {
            name: "Coin".to_string(),
            roles: ["caller".to_string(), "flipper".to_string()],
            axes: vec![Axis::new("side", "heads", "tails")],
            explanations: StanceExplanations {
                matched: "Caller guessed correctly".to_string(),
                fooled: "Caller guessed wrong".to_string(),
                miss: "Impossible with a single axis".to_string(),
            },
        }
    }

    /// The axis `choice` belongs to.
    pub fn find_axis(&self, choice: &str) -> Option<&Axis> {
        self.axes.iter().find(|axis| axis.contains(choice))
    }

    /// Every choice, axis by axis.
    pub fn all_choices(&self) -> impl Iterator<Item = &str> + '_ {
        self.axes
            .iter()
            .flat_map(|axis| axis.choices.iter().map(String::as_str))
    }

    pub fn reader(&self) -> &str {
        &self.roles[0]
    }

    pub fn actor(&self) -> &str {
        &self.roles[1]
    }

    /// Checks that every axis has two distinct members and that no choice
    /// sits on more than one axis.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.axes.is_empty() {
            return Err(ConfigError::EmptyChoices {
                set: self.name.clone(),
            });
        }
        let count = self.axes.len() * 2;
        if count > MAX_CHOICES {
            return Err(ConfigError::TooManyChoices {
                set: self.name.clone(),
                count,
                limit: MAX_CHOICES,
            });
        }
        for (i, axis) in self.axes.iter().enumerate() {
            if axis.choices[0] == axis.choices[1] {
                return Err(ConfigError::DegenerateAxis {
                    axis: axis.name.clone(),
                });
            }
            for earlier in &self.axes[..i] {
                if let Some(shared) = axis.choices.iter().find(|c| earlier.contains(c)) {
                    return Err(ConfigError::SharedChoice {
                        choice: shared.clone(),
                        first_axis: earlier.name.clone(),
                        second_axis: axis.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn rules_text(&self) -> String {
        let mut out = format!(
            "{} Stance Set\nRoles: {} (reader) vs {} (actor)\nAxes:\n",
            self.name,
            self.reader(),
            self.actor()
        );
        for axis in &self.axes {
            let _ = writeln!(
                out,
                "  {}: {} <-> {}",
                axis.name, axis.choices[0], axis.choices[1]
            );
        }
        let _ = writeln!(
            out,
            "Match (same choice):       {} advantage. {}",
            self.reader(),
            self.explanations.matched
        );
        let _ = writeln!(
            out,
            "Fooled (same axis, other): {} advantage. {}",
            self.actor(),
            self.explanations.fooled
        );
        let _ = writeln!(
            out,
            "Miss (different axes):     neutral. {}",
            self.explanations.miss
        );
        out
    }
}

/// Looks up the axis of `choice`, panicking on a choice foreign to the set.
fn axis_of<'a>(choice: &str, set: &'a StanceSet) -> &'a Axis {
    match set.find_axis(choice) {
        Some(axis) => axis,
        None => panic!(
            "stance choice '{}' is not on any axis of the {} set",
            choice, set.name
        ),
    }
}

/// Resolves the reader's choice against the actor's.
///
/// # Panics
///
/// Panics if the choices differ and either one is not on an axis of `set`.
pub fn resolve(reader: &str, actor: &str, set: &StanceSet) -> StanceOutcome {
    if reader == actor {
        return StanceOutcome::Reader;
    }
    let reader_axis = axis_of(reader, set);
    let actor_axis = axis_of(actor, set);
    if std::ptr::eq(reader_axis, actor_axis) {
        StanceOutcome::Actor
    } else {
        StanceOutcome::Miss
    }
}

/// Like [`resolve`], with the set's explanation for the outcome.
pub fn explain<'a>(reader: &str, actor: &str, set: &'a StanceSet) -> (StanceOutcome, &'a str) {
    let outcome = resolve(reader, actor, set);
    let text = match outcome {
        StanceOutcome::Reader => set.explanations.matched.as_str(),
        StanceOutcome::Actor => set.explanations.fooled.as_str(),
        StanceOutcome::Miss => set.explanations.miss.as_str(),
    };
    (outcome, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_outcomes() {
        let set = StanceSet::baseball_zone();
        assert_eq!(resolve("up", "up", &set), StanceOutcome::Reader);
        assert_eq!(resolve("up", "down", &set), StanceOutcome::Actor);
        assert_eq!(resolve("in", "out", &set), StanceOutcome::Actor);
        assert_eq!(resolve("up", "in", &set), StanceOutcome::Miss);
        assert_eq!(resolve("out", "down", &set), StanceOutcome::Miss);
    }

    #[test]
    fn coin_never_misses() {
        let set = StanceSet::coin();
        for r in set.all_choices() {
            for a in set.all_choices() {
                assert_ne!(resolve(r, a, &set), StanceOutcome::Miss);
            }
        }
    }

    #[test]
    fn partner_is_the_other_member() {
        let axis = Axis::new("vertical", "up", "down");
        assert_eq!(axis.partner("up"), Some("down"));
        assert_eq!(axis.partner("down"), Some("up"));
        assert_eq!(axis.partner("in"), None);
    }

    #[test]
    fn find_axis_and_choices() {
        let set = StanceSet::baseball_zone();
        assert_eq!(set.find_axis("out").map(|a| a.name.as_str()), Some("horizontal"));
        assert!(set.find_axis("sideways").is_none());
        let all: Vec<&str> = set.all_choices().collect();
        assert_eq!(all, vec!["up", "down", "in", "out"]);
    }

    #[test]
    fn explanations_follow_outcome() {
        let set = StanceSet::coin();
        assert_eq!(explain("heads", "heads", &set).1, "Caller guessed correctly");
        assert_eq!(explain("heads", "tails", &set).1, "Caller guessed wrong");
    }

    #[test]
    #[should_panic(expected = "not on any axis")]
    fn foreign_choice_panics() {
        resolve("up", "sideways", &StanceSet::baseball_zone());
    }

    #[test]
    fn identical_foreign_choices_still_match() {
        assert_eq!(
            resolve("sideways", "sideways", &StanceSet::baseball_zone()),
            StanceOutcome::Reader
        );
    }

    #[test]
    fn validation() {
        assert!(StanceSet::baseball_zone().validate().is_ok());
        assert!(StanceSet::coin().validate().is_ok());

        let mut shared = StanceSet::baseball_zone();
        shared.axes.push(Axis::new("diagonal", "up", "left"));
        assert!(matches!(shared.validate(), Err(ConfigError::SharedChoice { .. })));

        let mut crowded = StanceSet::coin();
        crowded.axes = (0..128)
            .map(|i| Axis::new(&format!("axis{}", i), &format!("l{}", i), &format!("r{}", i)))
            .collect();
        assert!(matches!(
            crowded.validate(),
            Err(ConfigError::TooManyChoices { count: 256, limit: 255, .. })
        ));
        crowded.axes.pop();
        assert!(crowded.validate().is_ok());

        let mut degenerate = StanceSet::coin();
        degenerate.axes[0] = Axis::new("side", "heads", "heads");
        assert!(matches!(degenerate.validate(), Err(ConfigError::DegenerateAxis { .. })));
    }
}
