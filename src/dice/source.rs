//! Randomness sources.
//!
//! Every roll in the engine goes through [`DieSource`]. The live source is
//! [`Dice`], a seedable `SmallRng` handle; [`LoadedDice`] replays a fixed
//! face sequence so tests and replays can force exact rolls.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Something that can roll a single die.
///
/// Each call consumes exactly one draw, in call order.
pub trait DieSource {
    /// Rolls one die with `sides` faces and returns a value in `1..=sides`.
    /// `sides` must be at least 1.
    fn roll(&mut self, sides: u8) -> u8;
}

impl<S: DieSource + ?Sized> DieSource for &mut S {
    fn roll(&mut self, sides: u8) -> u8 {
        (**self).roll(sides)
    }
}

/// The engine's random number generator handle.
///
/// Reseeding or resetting replaces the generator wholesale; it is never
/// partially mutated.
pub struct Dice {
    rng: SmallRng,
    seed: Option<u64>,
}

impl Dice {
    /// Creates a deterministic generator. The same seed always yields the
    /// same roll sequence.
    pub fn seeded(seed: u64) -> Self {
        Dice {
            rng: SmallRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Creates a generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Dice {
            rng: SmallRng::from_entropy(),
            seed: None,
        }
    }

    /// Switches to a deterministic sequence starting from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        *self = Dice::seeded(seed);
    }

    /// Switches back to an entropy-seeded sequence.
    pub fn reset_to_entropy(&mut self) {
        *self = Dice::from_entropy();
    }

    /// The seed in effect, or `None` when running on entropy.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for Dice {
    fn default() -> Self {
        Dice::from_entropy()
    }
}

impl DieSource for Dice {
    fn roll(&mut self, sides: u8) -> u8 {
        self.rng.gen_range(1..=sides)
    }
}

/// Replays a predetermined sequence of faces.
///
/// A cycling source wraps around when it runs out; a one-shot source panics,
/// since rolling past the end means the caller loaded too few faces.
#[derive(Debug, Clone)]
pub struct LoadedDice {
    faces: Vec<u8>,
    next: usize,
    cycle: bool,
}

impl LoadedDice {
    /// Loads a one-shot face sequence.
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        LoadedDice {
            faces: faces.into_iter().collect(),
            next: 0,
            cycle: false,
        }
    }

    /// Loads a face sequence that repeats forever.
    pub fn cycling(faces: impl IntoIterator<Item = u8>) -> Self {
        LoadedDice {
            cycle: true,
            ..LoadedDice::new(faces)
        }
    }

    /// Loads the faces of each pair in order.
    pub fn pairs(pairs: &[super::DicePair]) -> Self {
        LoadedDice::new(pairs.iter().flat_map(|p| p.faces()))
    }

    /// Number of faces already consumed.
    pub fn consumed(&self) -> usize {
        self.next
    }

    /// Faces left before a one-shot source is exhausted.
    pub fn remaining(&self) -> usize {
        self.faces.len().saturating_sub(self.next)
    }
}

impl DieSource for LoadedDice {
    /// # Panics
    ///
    /// Panics when a one-shot source is exhausted, or when the sequence is
    /// empty.
    fn roll(&mut self, sides: u8) -> u8 {
        if self.next >= self.faces.len() {
            if self.cycle && !self.faces.is_empty() {
                self.next = 0;
            } else {
                panic!(
                    "loaded dice exhausted after {} rolls",
                    self.faces.len()
                );
            }
        }
        let face = self.faces[self.next];
        self.next += 1;
        debug_assert!(
            (1..=sides).contains(&face),
            "loaded face {} is not valid for a d{}",
            face,
            sides
        );
        face
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::DicePair;

    #[test]
    fn seeded_dice_are_reproducible() {
        let mut a = Dice::seeded(7);
        let mut b = Dice::seeded(7);
        let xs: Vec<u8> = (0..50).map(|_| a.roll(6)).collect();
        let ys: Vec<u8> = (0..50).map(|_| b.roll(6)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn reseed_restarts_the_sequence() {
        let mut dice = Dice::seeded(99);
        let first: Vec<u8> = (0..10).map(|_| dice.roll(20)).collect();
        dice.reset_to_entropy();
        assert_eq!(dice.seed(), None);
        dice.reseed(99);
        assert_eq!(dice.seed(), Some(99));
        let again: Vec<u8> = (0..10).map(|_| dice.roll(20)).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn rolls_stay_in_range() {
        let mut dice = Dice::seeded(1);
        for sides in [1u8, 2, 6, 20, 100] {
            for _ in 0..200 {
                let r = dice.roll(sides);
                assert!((1..=sides).contains(&r));
            }
        }
    }

    #[test]
    fn every_face_eventually_appears() {
        let mut dice = Dice::seeded(3);
        let mut seen = [false; 6];
        for _ in 0..500 {
            seen[(dice.roll(6) - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn loaded_dice_replay_in_order() {
        let mut dice = LoadedDice::pairs(&[DicePair(1, 2), DicePair(6, 5)]);
        assert_eq!(dice.remaining(), 4);
        assert_eq!(
            [dice.roll(6), dice.roll(6), dice.roll(6), dice.roll(6)],
            [1, 2, 6, 5]
        );
        assert_eq!(dice.consumed(), 4);
    }

    #[test]
    fn cycling_dice_wrap_around() {
        let mut dice = LoadedDice::cycling([3, 4]);
        let rolls: Vec<u8> = (0..5).map(|_| dice.roll(6)).collect();
        assert_eq!(rolls, vec![3, 4, 3, 4, 3]);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn one_shot_dice_panic_when_empty() {
        let mut dice = LoadedDice::new([2]);
        dice.roll(6);
        dice.roll(6);
    }
}
