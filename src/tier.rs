//! Tier classification.
//!
//! A tier is a pure function of a roll value and a threshold configuration.
//! It never depends on which side produced the roll. The battle resolver,
//! the result resolver and the enumeration engine all classify through
//! [`TierConfig::classify`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mode::ConfigError;

/// Strength of a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Weak,
    Solid,
    Strong,
}

impl Tier {
    /// All tiers, weakest first.
    pub const ALL: [Tier; 3] = [Tier::Weak, Tier::Solid, Tier::Strong];

    /// Ladder offset: weak 0, solid 1, strong 2.
    pub const fn offset(self) -> u8 {
        match self {
            Tier::Weak => 0,
            Tier::Solid => 1,
            Tier::Strong => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Tier::Weak => "weak",
            Tier::Solid => "solid",
            Tier::Strong => "strong",
        }
    }

    /// Parses a lowercase tier name.
    pub fn from_name(name: &str) -> Option<Tier> {
        match name {
            "weak" => Some(Tier::Weak),
            "solid" => Some(Tier::Solid),
            "strong" => Some(Tier::Strong),
            _ => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Largest threshold magnitude a valid [`TierConfig`] may use.
pub const TIER_LIMIT: i32 = 1000;

/// Tier thresholds. A value `<= weak_max` is weak, `<= solid_max` is solid,
/// anything higher is strong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierConfig {
    pub weak_max: i32,
    pub solid_max: i32,
}

impl TierConfig {
    pub const fn new(weak_max: i32, solid_max: i32) -> Self {
        TierConfig {
            weak_max,
            solid_max,
        }
    }

    /// The shipped thresholds: 6 or less weak, 7-9 solid, 10+ strong.
    pub const fn standard() -> Self {
        TierConfig::new(6, 9)
    }

    /// Classifies a roll value.
    pub fn classify(&self, value: i32) -> Tier {
        if value <= self.weak_max {
            Tier::Weak
        } else if value <= self.solid_max {
            Tier::Solid
        } else {
            Tier::Strong
        }
    }

    /// Rejects thresholds that leave the solid band empty or sit outside
    /// `-TIER_LIMIT..=TIER_LIMIT`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for value in [self.weak_max, self.solid_max] {
            if !(-TIER_LIMIT..=TIER_LIMIT).contains(&value) {
                return Err(ConfigError::TierRange {
                    value,
                    limit: TIER_LIMIT,
                });
            }
        }
        if self.weak_max >= self.solid_max {
            return Err(ConfigError::TierThresholds {
                weak_max: self.weak_max,
                solid_max: self.solid_max,
            });
        }
        Ok(())
    }

    pub fn rules_text(&self) -> String {
        format!(
            "Tier thresholds (by roll value):\n  Weak:   <= {}\n  Solid:  {}-{}\n  Strong: {}+\n",
            self.weak_max,
            self.weak_max.saturating_add(1),
            self.solid_max,
            self.solid_max.saturating_add(1)
        )
    }
}

impl Default for TierConfig {
    fn default() -> Self {
        TierConfig::standard()
    }
}
