//! Pre-roll matchup resolvers.
//!
//! Two structurally similar but independent relations decide who gets the
//! edge before any dice are rolled: a non-transitive strategy cycle and an
//! axis-based stance read. Both treat every label as configuration data.

pub mod stance;
pub mod strategy;

/// Largest number of choices in one set. Random commitments draw a choice
/// with a single die of that many sides.
pub const MAX_CHOICES: usize = u8::MAX as usize;

pub use stance::{Axis, StanceExplanations, StanceOutcome, StanceSet};
pub use strategy::{StrategyExplanation, StrategyOutcome, StrategySet};
