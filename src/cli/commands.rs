//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use log::{debug, info};

use crate::command::{CommandParser, Intent};
use crate::engine::validate_bpm;
use crate::favorites::{FavoritesRepository, UserId};
use crate::handler::{Reply, RequestHandler};
use crate::present::{render, HELP_TEXT, START_TEXT};

/// Inputs that end the interactive loop
const QUIT_COMMANDS: &[&str] = &["/quit", "quit", "exit"];

/// Print a reply; rejected input becomes a command error.
fn print_reply(reply: &Reply) -> Result<()> {
    if let Reply::Rejected { message, .. } = reply {
        bail!("{message}");
    }
    println!("{}", render(reply));
    Ok(())
}

/// Parse `input` and accept it only if it is a tempo.
fn tempo_intent(input: &str) -> Result<Intent> {
    match CommandParser::parse(input) {
        intent @ Intent::Calculate { .. } => Ok(intent),
        Intent::Unrecognized { reason } => bail!("{}", reason.to_error(input).friendly_message()),
        _ => bail!("'{input}' is not a tempo; send a BPM number, for example: 140"),
    }
}

/// Parse `command` and accept it only if it is a reverse calculation.
fn reverse_intent(command: &str) -> Result<Intent> {
    match CommandParser::parse(command) {
        intent @ Intent::ReverseCalculate { .. } => Ok(intent),
        Intent::Unrecognized { reason } => {
            bail!("{}", reason.to_error(command).friendly_message())
        }
        _ => bail!("'{command}' is not a reverse calculation, for example: ms 250 1/8"),
    }
}

/// Show the full table for a tempo.
pub fn calc<R: FavoritesRepository>(
    handler: &RequestHandler<R>,
    user: &UserId,
    bpm: &str,
    json: bool,
) -> Result<()> {
    info!("Calculating durations for: {bpm}");

    let reply = handler.dispatch(user, tempo_intent(bpm)?);
    match (&reply, json) {
        (Reply::Report(report), true) => {
            let content =
                serde_json::to_string_pretty(report).context("failed to serialize report")?;
            println!("{content}");
            Ok(())
        }
        _ => print_reply(&reply),
    }
}

/// Show the tempo for a note length.
pub fn reverse<R: FavoritesRepository>(
    handler: &RequestHandler<R>,
    user: &UserId,
    ms: &str,
    note: Option<&str>,
) -> Result<()> {
    let command = match note {
        Some(note) => format!("ms {ms} {note}"),
        None => format!("ms {ms}"),
    };
    info!("Reverse calculation: {command}");

    print_reply(&handler.dispatch(user, reverse_intent(&command)?))
}

fn checked_bpm(bpm: u32) -> Result<u32> {
    validate_bpm(f64::from(bpm)).with_context(|| format!("cannot save {bpm} as a favorite"))?;
    Ok(bpm)
}

/// Save a tempo for `user`.
pub fn favorite_add<R: FavoritesRepository>(store: &R, user: &UserId, bpm: u32) -> Result<()> {
    let bpm = checked_bpm(bpm)?;
    if store.add(user, bpm).context("failed to save favorite")? {
        println!("Added {bpm} BPM to favorites");
    } else {
        println!("{bpm} BPM is already a favorite");
    }
    Ok(())
}

/// Forget a tempo for `user`.
pub fn favorite_remove<R: FavoritesRepository>(store: &R, user: &UserId, bpm: u32) -> Result<()> {
    if store.remove(user, bpm).context("failed to remove favorite")? {
        println!("Removed {bpm} BPM from favorites");
    } else {
        println!("{bpm} BPM is not a favorite");
    }
    Ok(())
}

/// Toggle a tempo exactly like the result button does.
pub fn favorite_toggle<R: FavoritesRepository>(
    handler: &RequestHandler<R>,
    user: &UserId,
    bpm: u32,
) -> Result<()> {
    let bpm = checked_bpm(bpm)?;
    print_reply(&handler.handle(user, &format!("fav_{bpm}")))
}

/// List saved tempos.
pub fn favorite_list<R: FavoritesRepository>(
    handler: &RequestHandler<R>,
    user: &UserId,
) -> Result<()> {
    print_reply(&handler.handle(user, "/favorites"))
}

/// Answer stdin lines until EOF or a quit command.
///
/// Each line is handled like a chat message or a button payload.
pub fn run<R: FavoritesRepository>(handler: &RequestHandler<R>, user: &UserId) -> Result<()> {
    info!("Interactive mode for user {user}");
    println!("{START_TEXT}\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        debug!("input: {input}");

        let output = match input.to_lowercase().as_str() {
            "/start" => START_TEXT.to_string(),
            "/help" => HELP_TEXT.to_string(),
            command if QUIT_COMMANDS.contains(&command) => break,
            _ => render(&handler.handle(user, input)),
        };

        writeln!(stdout, "{output}\n").context("failed to write stdout")?;
        stdout.flush().context("failed to write stdout")?;
    }

    Ok(())
}
