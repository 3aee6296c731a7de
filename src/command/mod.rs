//! Command parsing
//!
//! Turns raw chat text and button payloads into a closed [`Intent`].

mod intent;
mod parser;

pub use intent::{Intent, Reason};
pub use parser::{CommandParser, CALCULATE_PAYLOAD_PREFIX, FAVORITE_PAYLOAD_PREFIX};
