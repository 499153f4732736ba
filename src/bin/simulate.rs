//! Monte-Carlo contest simulation CLI.
//!
//! Plays many contests and prints a JSON summary on stdout. With fixed
//! modifiers the sampled win rate is checked against exact enumeration.
//!
//! Usage:
//!   cargo run --release --bin simulate -- [OPTIONS]
//!
//! Options:
//!   --contests N    Number of contests to play (default: 1000)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Base seed (default: entropy)
//!   --mods A B      Battle with fixed modifiers instead of random commitments
//!   --mode FILE     Load a mode file (default: built-in baseball)
//!   --quiet         Suppress the summary on stderr

use std::env;
use std::process;
use std::str::FromStr;
use std::time::Instant;

use strikezone::enumerate::enumerate_live_battles;
use strikezone::mode::Mode;
use strikezone::result::Outcome;
use strikezone::simulate::{self, Matchup, SimulationConfig};

fn value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|s| s.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("invalid {} value", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn main() {
    strikezone::init_tracing();

    let args: Vec<String> = env::args().collect();
    let mut config = SimulationConfig {
        threads: 4,
        ..SimulationConfig::default()
    };
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--contests" => {
                i += 1;
                config.contests = value(&args, i, "--contests");
            }
            "--threads" => {
                i += 1;
                config.threads = value(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = Some(value(&args, i, "--seed"));
            }
            "--mods" => {
                let mod_a = value(&args, i + 1, "--mods");
                let mod_b = value(&args, i + 2, "--mods");
                config.matchup = Matchup::Fixed { mod_a, mod_b };
                i += 2;
            }
            "--mode" => {
                i += 1;
                let path: String = value(&args, i, "--mode");
                config.mode = match Mode::from_json_file(&path) {
                    Ok(mode) => mode,
                    Err(err) => {
                        eprintln!("{}: {}", path, err);
                        process::exit(1);
                    }
                };
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if let Err(err) = config.validate() {
        eprintln!("invalid configuration: {}", err);
        process::exit(1);
    }

    if !quiet {
        let seed = config.seed.map_or_else(|| "entropy".to_string(), |s| s.to_string());
        eprintln!(
            "Simulating {} contests of {} on {} threads, seed {}",
            config.contests, config.mode.name, config.threads, seed
        );
    }

    let start = Instant::now();
    let summary = simulate::run_simulation(&config);
    let elapsed = start.elapsed();

    if !quiet {
        eprintln!(
            "Completed {} contests in {:.2}s ({} undecided)",
            summary.contests,
            elapsed.as_secs_f64(),
            summary.undecided
        );
        eprintln!("Side A wins {:.2}% of decided contests", summary.a_win_pct());
        if let Matchup::Fixed { mod_a, mod_b } = config.matchup {
            let exact = enumerate_live_battles(mod_a, mod_b, &config.mode.tiers);
            eprintln!("Exact live-play rate: {:.2}%", exact.a_live_win_pct);
        }
        for outcome in Outcome::ALL {
            if summary.outcome_counts.contains_key(&outcome) {
                eprintln!(
                    "  {:<24} {:>6.2}%",
                    outcome.label(),
                    summary.outcome_pct(outcome)
                );
            }
        }
    }

    match serde_json::to_string(&summary) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("failed to encode summary: {}", err);
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: simulate [--contests N] [--threads N] [--seed N] [--mods A B] [--mode FILE] [--quiet]");
}
