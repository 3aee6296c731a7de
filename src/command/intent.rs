//! Parsed command intents

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::{NoteKind, MAX_BPM};
use crate::error::BpmError;

/// What a line of user input asks for
///
/// Produced by [`CommandParser::parse`](super::CommandParser::parse); every
/// input maps to exactly one variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    /// Full duration and LFO table for a tempo in (0, 9999]
    Calculate { bpm: f64 },

    /// Tempo from the length of one note
    ReverseCalculate { ms: f64, note: NoteKind },

    /// Add the tempo to the user's favorites, or remove it if present
    ToggleFavorite { bpm: u32 },

    /// Show the user's favorites
    ListFavorites,

    /// Input that cannot be acted on
    Unrecognized { reason: Reason },
}

impl Intent {
    /// Check if the input was understood
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Intent::Unrecognized { .. })
    }
}

/// Why an input was not recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reason {
    /// Tempo outside (0, 9999]
    #[serde(rename = "range")]
    Range,
    /// `ms` command with a missing or non-numeric value
    #[serde(rename = "ms-format")]
    MsFormat,
    /// `ms` command with a note token outside 1/1 .. 1/16
    #[serde(rename = "note-kind")]
    NoteKind,
    /// `ms` command with a value that is not positive
    #[serde(rename = "ms-range")]
    MsRange,
    /// Neither a number nor a known command
    #[serde(rename = "not-a-number")]
    NotANumber,
    /// Callback payload without a usable integer
    #[serde(rename = "payload")]
    Payload,
}

impl Reason {
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::Range => "range",
            Reason::MsFormat => "ms-format",
            Reason::NoteKind => "note-kind",
            Reason::MsRange => "ms-range",
            Reason::NotANumber => "not-a-number",
            Reason::Payload => "payload",
        }
    }

    /// Typed error for this reason, carrying the offending input
    ///
    /// The front end uses the error's friendly message as its reply.
    pub fn to_error(self, input: &str) -> BpmError {
        let input = input.trim().to_string();
        match self {
            Reason::Range => BpmError::BpmOutOfRange {
                value: input.replace(',', ".").parse().unwrap_or(f64::NAN),
                max: MAX_BPM,
            },
            Reason::MsFormat => BpmError::MsFormat { input },
            Reason::NoteKind => BpmError::UnknownNoteKind {
                token: input.split_whitespace().nth(2).unwrap_or_default().to_string(),
            },
            Reason::MsRange => BpmError::MsOutOfRange {
                value: input
                    .split_whitespace()
                    .nth(1)
                    .and_then(|token| token.replace(',', ".").parse().ok())
                    .unwrap_or(f64::NAN),
            },
            Reason::NotANumber => BpmError::NotANumber { input },
            Reason::Payload => BpmError::MalformedPayload { payload: input },
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_reason_strings() {
        assert_eq!(Reason::NoteKind.to_string(), "note-kind");
        assert_eq!(Reason::MsFormat.as_str(), "ms-format");
    }

    #[test]
    fn test_reason_serializes_as_tag() {
        let json = serde_json::to_string(&Intent::Unrecognized {
            reason: Reason::NotANumber,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"unrecognized","reason":"not-a-number"}"#);
    }

    #[test]
    fn test_reason_to_error_kind() {
        assert_eq!(Reason::Range.to_error("0").kind(), ErrorKind::Validation);
        assert_eq!(Reason::MsRange.to_error("ms -5").kind(), ErrorKind::Validation);
        assert_eq!(Reason::NoteKind.to_error("ms 250 1/3").kind(), ErrorKind::Parse);

        match Reason::NoteKind.to_error("ms 250 1/3") {
            BpmError::UnknownNoteKind { token } => assert_eq!(token, "1/3"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_is_recognized() {
        assert!(Intent::ListFavorites.is_recognized());
        assert!(!Intent::Unrecognized {
            reason: Reason::Payload
        }
        .is_recognized());
    }
}
