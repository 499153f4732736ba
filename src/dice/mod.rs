//! Dice primitives.
//!
//! All randomness is built from one operation, rolling a single N-sided
//! die through a [`DieSource`]. A pair roll is two such draws, first die
//! first.

pub mod pair;
pub mod source;

pub use pair::{DicePair, HIGHEST_SUM, LOWEST_SUM, PAIR_COMBINATIONS, PAIR_SIDES};
pub use source::{Dice, DieSource, LoadedDice};

/// Rolls one die with `sides` faces.
pub fn roll<S: DieSource + ?Sized>(source: &mut S, sides: u8) -> u8 {
    source.roll(sides)
}

/// Rolls two independent six-sided dice.
pub fn roll_pair<S: DieSource + ?Sized>(source: &mut S) -> DicePair {
    let first = source.roll(PAIR_SIDES);
    let second = source.roll(PAIR_SIDES);
    DicePair(first, second)
}

pub fn sum(pair: DicePair) -> u8 {
    pair.sum()
}

pub fn is_low_extremal(pair: DicePair) -> bool {
    pair.is_low_extremal()
}

pub fn is_high_extremal(pair: DicePair) -> bool {
    pair.is_high_extremal()
}
