//! Monte-Carlo contest simulation.
//!
//! Plays many independent contests and tallies what happened, so sampled
//! rates can be checked against exact enumeration. Every contest gets its
//! own generator seeded from `seed + index`, which makes a seeded run
//! produce the same summary regardless of thread count.

use std::collections::BTreeMap;
use std::sync::mpsc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::battle::{roll_battle_with_limits, BattleError, BattleOutcome, DecidedBy, Side};
use crate::commit::Commitment;
use crate::dice::{Dice, DieSource};
use crate::commit::{modifier_in_range, MODIFIER_LIMIT};
use crate::enumerate::{pct, TierCounts};
use crate::matchup::MAX_CHOICES;
use crate::mode::{ConfigError, Mode};
use crate::result::{resolve_result, Outcome, ResultOutcome};

/// How each contest's modifiers are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Matchup {
    /// Skip the commit phase and battle with fixed modifiers.
    Fixed { mod_a: i32, mod_b: i32 },
    /// Both sides commit uniformly random choices.
    RandomCommitments,
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub contests: usize,
    /// Worker threads. 1 runs on the calling thread.
    pub threads: usize,
    /// Base seed. `None` draws every contest's dice from entropy.
    pub seed: Option<u64>,
    pub matchup: Matchup,
    pub mode: Mode,
}

impl SimulationConfig {
    /// Checks the mode and, for a fixed matchup, both modifiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mode.validate()?;
        if let Matchup::Fixed { mod_a, mod_b } = self.matchup {
            if let Some(value) = [mod_a, mod_b].into_iter().find(|&m| !modifier_in_range(m)) {
                return Err(ConfigError::ModifierRange {
                    value,
                    limit: MODIFIER_LIMIT,
                });
            }
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            contests: 1000,
            threads: 1,
            seed: None,
            matchup: Matchup::RandomCommitments,
            mode: Mode::baseball(),
        }
    }
}

/// One simulated contest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestSample {
    pub index: usize,
    pub commitments: Option<(Commitment, Commitment)>,
    pub battle: BattleOutcome,
    pub result: ResultOutcome,
}

/// Aggregate counts over a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub contests: u32,
    pub a_wins: u32,
    pub b_wins: u32,
    /// Contests abandoned at the reroll limit.
    pub undecided: u32,
    pub tier_counts: TierCounts,
    pub outcome_counts: BTreeMap<Outcome, u32>,
    pub battle_low_criticals: u32,
    pub battle_high_criticals: u32,
    pub result_criticals: u32,
    pub total_rerolls: u64,
}

impl SimulationSummary {
    pub fn record(&mut self, sample: &Result<ContestSample, BattleError>) {
        self.contests += 1;
        let sample = match sample {
            Ok(sample) => sample,
            Err(_) => {
                self.undecided += 1;
                return;
            }
        };
        match sample.battle.winner {
            Side::A => self.a_wins += 1,
            Side::B => self.b_wins += 1,
        }
        match sample.battle.decided_by {
            DecidedBy::LowCritical => self.battle_low_criticals += 1,
            DecidedBy::HighCritical => self.battle_high_criticals += 1,
            DecidedBy::Totals => {}
        }
        if sample.result.critical.is_some() {
            self.result_criticals += 1;
        }
        self.tier_counts.add(sample.battle.tier);
        *self.outcome_counts.entry(sample.result.outcome).or_default() += 1;
        self.total_rerolls += u64::from(sample.battle.rerolls);
    }

    /// Side A's share of decided contests.
    pub fn a_win_pct(&self) -> f64 {
        pct(self.a_wins, self.a_wins + self.b_wins)
    }

    pub fn outcome_pct(&self, outcome: Outcome) -> f64 {
        let count = self.outcome_counts.get(&outcome).copied().unwrap_or(0);
        pct(count, self.contests - self.undecided)
    }
}

/// Picks one of `choices` with a single die roll. Sets larger than a die
/// can cover are rejected by `Mode::validate`; past that size only the
/// first `u8::MAX` choices are reachable.
fn pick<'a, S: DieSource + ?Sized>(source: &mut S, choices: &[&'a str]) -> &'a str {
    debug_assert!(!choices.is_empty() && choices.len() <= MAX_CHOICES);
    let sides = u8::try_from(choices.len()).unwrap_or(u8::MAX);
    let index = usize::from(source.roll(sides)) - 1;
    choices[index]
}

/// Draws a uniformly random commitment from the mode's choice sets.
pub fn random_commitment<S: DieSource + ?Sized>(mode: &Mode, source: &mut S) -> Commitment {
    let strategies: Vec<&str> = mode.strategy.choices.iter().map(String::as_str).collect();
    let stances: Vec<&str> = mode.stance.all_choices().collect();
    let strategy = pick(source, &strategies);
    let stance = pick(source, &stances);
    Commitment::new(strategy, stance)
}

/// Plays contest `index` with `source`.
pub fn simulate_contest<S: DieSource + ?Sized>(
    config: &SimulationConfig,
    index: usize,
    source: &mut S,
) -> Result<ContestSample, BattleError> {
    let mode = &config.mode;
    match config.matchup {
        Matchup::Fixed { mod_a, mod_b } => {
            let battle = roll_battle_with_limits(source, mod_a, mod_b, &mode.tiers, &mode.limits)?;
            let ladder = mode.ladders.for_winner(battle.winner);
            let result = resolve_result(source, battle.tier, None, ladder, &mode.tiers);
            Ok(ContestSample {
                index,
                commitments: None,
                battle,
                result,
            })
        }
        Matchup::RandomCommitments => {
            let a = random_commitment(mode, source);
            let b = random_commitment(mode, source);
            let trace = mode.play(source, &a, &b)?;
            Ok(ContestSample {
                index,
                commitments: Some((a, b)),
                battle: trace.battle,
                result: trace.result,
            })
        }
    }
}

fn contest_dice(config: &SimulationConfig, index: usize) -> Dice {
    match config.seed {
        Some(seed) => Dice::seeded(seed.wrapping_add(index as u64)),
        None => Dice::from_entropy(),
    }
}

/// Runs the simulation and returns its summary.
pub fn run_simulation(config: &SimulationConfig) -> SimulationSummary {
    let mut summary = SimulationSummary::default();
    run_simulation_with_callback(config, |sample| summary.record(&sample));
    info!(
        contests = summary.contests,
        a_wins = summary.a_wins,
        b_wins = summary.b_wins,
        undecided = summary.undecided,
        "simulation finished"
    );
    summary
}

/// Runs the simulation, handing each finished contest to `on_sample`.
///
/// With more than one thread, contests finish out of index order.
pub fn run_simulation_with_callback<F>(config: &SimulationConfig, on_sample: F)
where
    F: FnMut(Result<ContestSample, BattleError>) + Send,
{
    if config.threads > 1 {
        run_parallel(config, on_sample);
    } else {
        run_sequential(config, on_sample);
    }
}

fn run_sequential<F>(config: &SimulationConfig, mut on_sample: F)
where
    F: FnMut(Result<ContestSample, BattleError>),
{
    for index in 0..config.contests {
        let mut dice = contest_dice(config, index);
        on_sample(simulate_contest(config, index, &mut dice));
    }
}

fn run_parallel<F>(config: &SimulationConfig, mut on_sample: F)
where
    F: FnMut(Result<ContestSample, BattleError>) + Send,
{
    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool,
        Err(err) => {
            warn!(%err, "could not build thread pool, simulating sequentially");
            return run_sequential(config, on_sample);
        }
    };

    let (tx, rx) = mpsc::channel();
    std::thread::scope(|scope| {
        scope.spawn(|| {
            pool.install(|| {
                (0..config.contests)
                    .into_par_iter()
                    .for_each_with(tx, |tx, index| {
                        let mut dice = contest_dice(config, index);
                        let _ = tx.send(simulate_contest(config, index, &mut dice));
                    });
            });
        });

        for sample in rx {
            on_sample(sample);
        }
    });
}
