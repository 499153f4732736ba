//! Strikezone: a 2d6 contest resolution engine.
//!
//! Two sides commit a strategy and a stance, the matchups turn into dice
//! modifiers, an opposed battle roll picks a winner and a tier, and a result
//! roll places the outcome on the winner's five-slot ladder. The same rules
//! can be walked exhaustively for exact outcome probabilities.

pub mod battle;
pub mod commit;
pub mod dice;
pub mod engine;
pub mod enumerate;
pub mod matchup;
pub mod mode;
pub mod protocol;
pub mod result;
pub mod simulate;
pub mod tier;

/// Installs a stderr `tracing` subscriber filtered by `RUST_LOG`, defaulting
/// to `strikezone=info`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("strikezone=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
