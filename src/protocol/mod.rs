//! Session line protocol.
//!
//! Clients send one command per line on stdin. The engine answers each
//! command with one line on stdout, `<kind> <json>`, or `readyok` for
//! `isready`.

pub mod parser;

pub use parser::{parse_command, Command, ParseError};
