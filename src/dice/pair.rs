//! A pair of six-sided dice and the values derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Faces on each die of a pair.
pub const PAIR_SIDES: u8 = 6;

/// Number of ordered outcomes of one pair (6 x 6).
pub const PAIR_COMBINATIONS: u32 = 36;

/// Lowest possible pair sum (both dice show 1).
pub const LOWEST_SUM: u8 = 2;

/// Highest possible pair sum (both dice show 6).
pub const HIGHEST_SUM: u8 = 12;

/// Two independent six-sided dice, serialized as `[first, second]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DicePair(pub u8, pub u8);

impl DicePair {
    /// Creates a pair from two faces. Faces must be in `1..=6`.
    pub const fn new(first: u8, second: u8) -> Self {
        DicePair(first, second)
    }

    pub const fn faces(self) -> [u8; 2] {
        [self.0, self.1]
    }

    /// Sum of both faces, in `2..=12`.
    pub const fn sum(self) -> u8 {
        self.0 + self.1
    }

    /// Both dice show 1 ("snake eyes").
    pub const fn is_low_extremal(self) -> bool {
        self.0 == 1 && self.1 == 1
    }

    /// Both dice show 6 ("boxcars").
    pub const fn is_high_extremal(self) -> bool {
        self.0 == PAIR_SIDES && self.1 == PAIR_SIDES
    }

    /// Iterates all 36 ordered pairs in lexicographic order.
    pub fn all() -> impl Iterator<Item = DicePair> + Clone {
        (1..=PAIR_SIDES).flat_map(|a| (1..=PAIR_SIDES).map(move |b| DicePair(a, b)))
    }
}

impl fmt::Display for DicePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}+{}]", self.0, self.1)
    }
}
