//! CLI Module
//!
//! Command-line front end. One-shot subcommands for each operation, plus an
//! interactive loop that treats every stdin line like a chat message.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// BPM Calculator - note durations, delay times and LFO rates from a tempo
#[derive(Parser, Debug)]
#[command(name = "bpmcalc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Favorites store file
    #[arg(
        long,
        global = true,
        env = "BPMCALC_FAVORITES",
        default_value = "favorites.json"
    )]
    pub favorites: PathBuf,

    /// User whose favorites are read and changed
    #[arg(long, global = true, env = "BPMCALC_USER", default_value = "0")]
    pub user: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Note durations and LFO rates for a tempo
    #[command(name = "calc")]
    Calc {
        /// Tempo in BPM (a comma works as decimal separator)
        #[arg(allow_hyphen_values = true)]
        bpm: String,

        /// Print unrounded values as JSON
        #[arg(long)]
        json: bool,
    },

    /// Tempo from the length of one note
    #[command(name = "ms")]
    Ms {
        /// Note length in milliseconds
        #[arg(allow_hyphen_values = true)]
        ms: String,

        /// Note value: 1/1, 1/2, 1/4, 1/8 or 1/16 (default 1/4)
        note: Option<String>,
    },

    /// Manage favorite tempos
    #[command(name = "fav")]
    Fav {
        #[command(subcommand)]
        action: FavAction,
    },

    /// Read commands from stdin, one per line
    #[command(name = "run")]
    Run,
}

#[derive(Subcommand, Debug)]
pub enum FavAction {
    /// Save a tempo
    Add { bpm: u32 },
    /// Forget a tempo
    Remove { bpm: u32 },
    /// Save a tempo, or forget it if already saved
    Toggle { bpm: u32 },
    /// Show saved tempos
    List,
}
