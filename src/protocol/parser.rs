//! Session command parser.
//!
//! Turns one line of client input into a structured `Command` that the
//! engine loop dispatches on. Choice and ladder names are passed through as
//! text; the engine checks them against the active mode.

use crate::commit::{modifier_in_range, Commitment, MODIFIER_LIMIT};
use crate::dice::{DicePair, PAIR_SIDES};
use crate::tier::Tier;

/// Errors for lines that cannot be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty line")]
    Empty,

    #[error("unknown command: '{0}'")]
    Unknown(String),

    #[error("malformed {command}: expected '{usage}'")]
    Usage {
        command: &'static str,
        usage: &'static str,
    },

    #[error("invalid number: '{0}'")]
    InvalidNumber(String),

    #[error("modifier {value} is outside -{limit}..={limit}")]
    ModifierRange { value: i32, limit: i32 },

    #[error("invalid tier: '{0}'")]
    InvalidTier(String),

    #[error("invalid die face: '{0}'")]
    InvalidDie(String),
}

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Reseed the session dice.
    Seed(u64),

    /// Return the session dice to entropy.
    Random,

    /// `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Load a mode file.
    Mode { path: String },

    Commit { a: Commitment, b: Commitment },

    Battle { mod_a: i32, mod_b: i32 },

    /// Result roll on a ladder, with optional fixed dice.
    Result {
        tier: Tier,
        ladder: String,
        dice: Option<DicePair>,
    },

    /// Commit, battle and result in one go.
    Contest { a: Commitment, b: Commitment },

    Challenge,

    EnumerateBattles { mod_a: i32, mod_b: i32 },

    EnumerateLive { mod_a: i32, mod_b: i32 },

    /// Every modifier pair in `min..=max` for both sides.
    EnumerateGrid { min: i32, max: i32 },

    EnumerateResults { ladder: String, tier: Option<Tier> },

    Curve { modifier: i32 },

    Rules,

    Quit,
}

/// Parses a single line of input into a `Command`.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = tokens.first() else {
        return Err(ParseError::Empty);
    };

    match head {
        "isready" => Ok(Command::IsReady),
        "random" => Ok(Command::Random),
        "challenge" => Ok(Command::Challenge),
        "rules" => Ok(Command::Rules),
        "quit" => Ok(Command::Quit),

        "seed" => parse_seed(&tokens),
        "setoption" => parse_setoption(&tokens),
        "mode" => parse_mode(&tokens),
        "commit" => parse_commitments(&tokens, "commit").map(|(a, b)| Command::Commit { a, b }),
        "contest" => parse_commitments(&tokens, "contest").map(|(a, b)| Command::Contest { a, b }),
        "battle" => parse_battle(&tokens),
        "result" => parse_result(&tokens),
        "enumerate" => parse_enumerate(&tokens),
        "curve" => parse_curve(&tokens),

        other => Err(ParseError::Unknown(other.to_string())),
    }
}

fn number<T: std::str::FromStr>(token: &str) -> Result<T, ParseError> {
    token
        .parse()
        .map_err(|_| ParseError::InvalidNumber(token.to_string()))
}

/// A battle modifier, bounded so totals never leave `i32`.
fn modifier(token: &str) -> Result<i32, ParseError> {
    let value = number(token)?;
    if modifier_in_range(value) {
        Ok(value)
    } else {
        Err(ParseError::ModifierRange {
            value,
            limit: MODIFIER_LIMIT,
        })
    }
}

fn tier(token: &str) -> Result<Tier, ParseError> {
    Tier::from_name(token).ok_or_else(|| ParseError::InvalidTier(token.to_string()))
}

fn die(token: &str) -> Result<u8, ParseError> {
    match token.parse::<u8>() {
        Ok(face) if (1..=PAIR_SIDES).contains(&face) => Ok(face),
        _ => Err(ParseError::InvalidDie(token.to_string())),
    }
}

/// Parses `seed <n>`.
fn parse_seed(tokens: &[&str]) -> Result<Command, ParseError> {
    match tokens {
        [_, n] => Ok(Command::Seed(number(n)?)),
        _ => Err(ParseError::Usage {
            command: "seed",
            usage: "seed <n>",
        }),
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Result<Command, ParseError> {
    const USAGE: ParseError = ParseError::Usage {
        command: "setoption",
        usage: "setoption name <id> [value <x>]",
    };
    if tokens.len() < 3 || tokens[1] != "name" {
        return Err(USAGE);
    }

    let (name_parts, value_parts) = match tokens.iter().position(|&t| t == "value") {
        Some(vi) => (&tokens[2..vi], &tokens[vi + 1..]),
        None => (&tokens[2..], &tokens[tokens.len()..]),
    };
    if name_parts.is_empty() {
        return Err(USAGE);
    }
    let value = if value_parts.is_empty() {
        None
    } else {
        Some(value_parts.join(" "))
    };

    Ok(Command::SetOption {
        name: name_parts.join(" "),
        value,
    })
}

/// Parses `mode <path>`. The path may contain spaces.
fn parse_mode(tokens: &[&str]) -> Result<Command, ParseError> {
    if tokens.len() < 2 {
        return Err(ParseError::Usage {
            command: "mode",
            usage: "mode <path>",
        });
    }
    Ok(Command::Mode {
        path: tokens[1..].join(" "),
    })
}

/// Parses `<cmd> <aStrategy> <aStance> <bStrategy> <bStance>`.
fn parse_commitments(
    tokens: &[&str],
    command: &'static str,
) -> Result<(Commitment, Commitment), ParseError> {
    match tokens {
        [_, a_strategy, a_stance, b_strategy, b_stance] => Ok((
            Commitment::new(a_strategy, a_stance),
            Commitment::new(b_strategy, b_stance),
        )),
        _ => Err(ParseError::Usage {
            command,
            usage: "<aStrategy> <aStance> <bStrategy> <bStance>",
        }),
    }
}

/// Parses `battle <modA> <modB>`.
fn parse_battle(tokens: &[&str]) -> Result<Command, ParseError> {
    match tokens {
        [_, a, b] => Ok(Command::Battle {
            mod_a: modifier(a)?,
            mod_b: modifier(b)?,
        }),
        _ => Err(ParseError::Usage {
            command: "battle",
            usage: "battle <modA> <modB>",
        }),
    }
}

/// Parses `result <tier> <ladder> [d1 d2]`.
fn parse_result(tokens: &[&str]) -> Result<Command, ParseError> {
    let (t, ladder, dice) = match tokens {
        [_, t, ladder] => (t, ladder, None),
        [_, t, ladder, d1, d2] => (t, ladder, Some(DicePair(die(d1)?, die(d2)?))),
        _ => {
            return Err(ParseError::Usage {
                command: "result",
                usage: "result <tier> <ladder> [d1 d2]",
            })
        }
    };
    Ok(Command::Result {
        tier: tier(t)?,
        ladder: ladder.to_string(),
        dice,
    })
}

/// Parses `enumerate battles|live <modA> <modB>`, `enumerate grid <min> <max>`
/// and `enumerate results <ladder> [tier]`.
fn parse_enumerate(tokens: &[&str]) -> Result<Command, ParseError> {
    match tokens {
        [_, "battles", a, b] => Ok(Command::EnumerateBattles {
            mod_a: modifier(a)?,
            mod_b: modifier(b)?,
        }),
        [_, "live", a, b] => Ok(Command::EnumerateLive {
            mod_a: modifier(a)?,
            mod_b: modifier(b)?,
        }),
        [_, "grid", min, max] => Ok(Command::EnumerateGrid {
            min: modifier(min)?,
            max: modifier(max)?,
        }),
        [_, "results", ladder] => Ok(Command::EnumerateResults {
            ladder: ladder.to_string(),
            tier: None,
        }),
        [_, "results", ladder, t] => Ok(Command::EnumerateResults {
            ladder: ladder.to_string(),
            tier: Some(tier(t)?),
        }),
        _ => Err(ParseError::Usage {
            command: "enumerate",
            usage: "enumerate battles|live <modA> <modB> | grid <min> <max> | results <ladder> [tier]",
        }),
    }
}

/// Parses `curve <mod>`.
fn parse_curve(tokens: &[&str]) -> Result<Command, ParseError> {
    match tokens {
        [_, m] => Ok(Command::Curve {
            modifier: modifier(m)?,
        }),
        _ => Err(ParseError::Usage {
            command: "curve",
            usage: "curve <mod>",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("isready"), Ok(Command::IsReady));
        assert_eq!(parse_command("random"), Ok(Command::Random));
        assert_eq!(parse_command("challenge"), Ok(Command::Challenge));
        assert_eq!(parse_command("rules"), Ok(Command::Rules));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
    }

    #[test]
    fn parse_empty_and_unknown() {
        assert_eq!(parse_command(""), Err(ParseError::Empty));
        assert_eq!(parse_command("   \t "), Err(ParseError::Empty));
        assert_eq!(
            parse_command("bunt now"),
            Err(ParseError::Unknown("bunt".to_string()))
        );
    }

    #[test]
    fn parse_seed() {
        assert_eq!(parse_command("seed 42"), Ok(Command::Seed(42)));
        assert_eq!(
            parse_command("seed -1"),
            Err(ParseError::InvalidNumber("-1".to_string()))
        );
        assert!(matches!(parse_command("seed"), Err(ParseError::Usage { .. })));
    }

    #[test]
    fn parse_setoption_with_value() {
        assert_eq!(
            parse_command("setoption name WeakMax value 5"),
            Ok(Command::SetOption {
                name: "WeakMax".to_string(),
                value: Some("5".to_string()),
            })
        );
    }

    #[test]
    fn parse_setoption_without_value() {
        assert_eq!(
            parse_command("setoption name RerollLimit"),
            Ok(Command::SetOption {
                name: "RerollLimit".to_string(),
                value: None,
            })
        );
    }

    #[test]
    fn parse_setoption_malformed() {
        assert!(parse_command("setoption").is_err());
        assert!(parse_command("setoption foo").is_err());
        assert!(parse_command("setoption name value 3").is_err());
    }

    #[test]
    fn parse_commit_and_contest() {
        let expected_a = Commitment::new("power", "up");
        let expected_b = Commitment::new("finesse", "in");
        assert_eq!(
            parse_command("commit power up finesse in"),
            Ok(Command::Commit {
                a: expected_a.clone(),
                b: expected_b.clone(),
            })
        );
        assert_eq!(
            parse_command("contest power up finesse in"),
            Ok(Command::Contest {
                a: expected_a,
                b: expected_b,
            })
        );
        assert!(parse_command("commit power up finesse").is_err());
    }

    #[test]
    fn parse_battle_signed_modifiers() {
        assert_eq!(
            parse_command("battle -2 3"),
            Ok(Command::Battle { mod_a: -2, mod_b: 3 })
        );
        assert_eq!(
            parse_command("battle x 3"),
            Err(ParseError::InvalidNumber("x".to_string()))
        );
    }

    #[test]
    fn modifiers_outside_the_limit_are_rejected() {
        assert_eq!(
            parse_command("battle 100 -100"),
            Ok(Command::Battle { mod_a: 100, mod_b: -100 })
        );
        let too_big = Err(ParseError::ModifierRange {
            value: i32::MAX,
            limit: MODIFIER_LIMIT,
        });
        assert_eq!(parse_command("battle 2147483647 0"), too_big);
        assert_eq!(parse_command("enumerate battles 2147483647 0"), too_big);
        assert_eq!(parse_command("enumerate live 0 2147483647"), too_big);
        assert_eq!(parse_command("curve 2147483647"), too_big);
        assert!(matches!(
            parse_command("enumerate grid -101 0"),
            Err(ParseError::ModifierRange { value: -101, .. })
        ));
        assert_eq!(
            parse_command("battle 99999999999 0"),
            Err(ParseError::InvalidNumber("99999999999".to_string()))
        );
    }

    #[test]
    fn parse_result_with_and_without_dice() {
        assert_eq!(
            parse_command("result solid batter"),
            Ok(Command::Result {
                tier: Tier::Solid,
                ladder: "batter".to_string(),
                dice: None,
            })
        );
        assert_eq!(
            parse_command("result strong pitcher 6 6"),
            Ok(Command::Result {
                tier: Tier::Strong,
                ladder: "pitcher".to_string(),
                dice: Some(DicePair(6, 6)),
            })
        );
        assert_eq!(
            parse_command("result strong pitcher 7 1"),
            Err(ParseError::InvalidDie("7".to_string()))
        );
        assert_eq!(
            parse_command("result mighty batter"),
            Err(ParseError::InvalidTier("mighty".to_string()))
        );
    }

    #[test]
    fn parse_enumerate_variants() {
        assert_eq!(
            parse_command("enumerate battles 1 0"),
            Ok(Command::EnumerateBattles { mod_a: 1, mod_b: 0 })
        );
        assert_eq!(
            parse_command("enumerate live 0 0"),
            Ok(Command::EnumerateLive { mod_a: 0, mod_b: 0 })
        );
        assert_eq!(
            parse_command("enumerate grid -2 2"),
            Ok(Command::EnumerateGrid { min: -2, max: 2 })
        );
        assert_eq!(
            parse_command("enumerate results pitcher-2walk weak"),
            Ok(Command::EnumerateResults {
                ladder: "pitcher-2walk".to_string(),
                tier: Some(Tier::Weak),
            })
        );
        assert!(parse_command("enumerate everything").is_err());
    }

    #[test]
    fn parse_mode_path_with_spaces() {
        assert_eq!(
            parse_command("mode /tmp/my modes/fast.json"),
            Ok(Command::Mode {
                path: "/tmp/my modes/fast.json".to_string(),
            })
        );
    }

    #[test]
    fn parse_with_leading_trailing_whitespace() {
        assert_eq!(parse_command("  isready  "), Ok(Command::IsReady));
        assert_eq!(parse_command("\tcurve  -1 "), Ok(Command::Curve { modifier: -1 }));
    }
}
