//! Strikezone -- a 2d6 contest engine speaking a line protocol.
//!
//! This binary reads commands from stdin and writes one reply line per
//! command to stdout. Logs go to stderr, filtered by `RUST_LOG`.

use std::io::{self, BufRead};

use strikezone::engine::{write_error, Engine};
use strikezone::protocol::{parse_command, ParseError};

/// Runs the main protocol loop, reading commands from stdin and writing
/// replies to stdout.
fn main() -> io::Result<()> {
    strikezone::init_tracing();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();
    tracing::info!(mode = %engine.mode.name, "engine ready");

    for line in stdin.lock().lines() {
        let line = line?;

        let command = match parse_command(&line) {
            Ok(c) => c,
            Err(ParseError::Empty) => continue,
            Err(err) => {
                tracing::debug!(%err, line = %line, "rejected command");
                write_error(&mut out, &err.to_string())?;
                io::Write::flush(&mut out)?;
                continue;
            }
        };

        if !engine.respond(command, &mut out)? {
            break;
        }
    }
    Ok(())
}
