//! Result phase: from battle tier to a final outcome.

pub mod ladder;
pub mod outcome;
pub mod resolve;

pub use ladder::{Ladder, Ladders, LADDER_SLOTS, LAST_POSITION, SHIPPED_LADDERS};
pub use outcome::Outcome;
pub use resolve::{place, resolve_result, Critical, Placement, ResultOutcome};
