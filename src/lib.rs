//! bpmcalc - Tempo Calculator
//!
//! Converts a tempo (BPM) into note durations in milliseconds and
//! tempo-synced LFO rates, converts note lengths back into BPM, and keeps a
//! small list of favorite tempos per user.
//!
//! # Architecture
//!
//! - [`engine`]: pure conversion arithmetic, never rounded
//! - [`command`]: text and payload parsing into a closed [`command::Intent`]
//! - [`favorites`]: favorites repository with a single-writer JSON store
//! - [`handler`]: dispatches intents to the engine and the store
//! - [`present`]: display rounding and plain-text rendering
//! - [`cli`]: command-line front end

pub mod cli;
pub mod command;
pub mod engine;
pub mod error;
pub mod favorites;
pub mod handler;
pub mod present;

pub use error::{BpmError, Result};
