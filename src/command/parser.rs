//! Command grammar
//!
//! | input        | intent                         |
//! |--------------|--------------------------------|
//! | `140`        | `Calculate(140)`               |
//! | `ms 500`     | `ReverseCalculate(500, 1/4)`   |
//! | `ms 250 1/8` | `ReverseCalculate(250, 1/8)`   |
//! | `fav_120`    | `ToggleFavorite(120)`          |
//! | `calc_120`   | `Calculate(120)`               |
//! | `/favorites` | `ListFavorites`                |

use tracing::debug;

use crate::command::intent::{Intent, Reason};
use crate::engine::{validate_bpm, validate_ms, NoteKind};

/// Prefix of the favorite toggle payload attached to a result
pub const FAVORITE_PAYLOAD_PREFIX: &str = "fav_";

/// Prefix of the quick-calculation payload attached to a favorites list
pub const CALCULATE_PAYLOAD_PREFIX: &str = "calc_";

/// Literal that starts a reverse calculation
const MS_TOKEN: &str = "ms";

const LIST_FAVORITES_COMMANDS: &[&str] = &["/favorites", "favorites"];

/// Parser for user text and callback payloads
pub struct CommandParser;

impl CommandParser {
    /// Parse one input into an [`Intent`].
    ///
    /// Total: never panics, and anything it cannot act on comes back as
    /// [`Intent::Unrecognized`].
    ///
    /// # Example
    /// ```
    /// use bpmcalc::command::{CommandParser, Intent};
    /// use bpmcalc::engine::NoteKind;
    ///
    /// assert_eq!(
    ///     CommandParser::parse("ms 250 1/8"),
    ///     Intent::ReverseCalculate { ms: 250.0, note: NoteKind::Eighth }
    /// );
    /// ```
    pub fn parse(input: &str) -> Intent {
        let text = input.trim().to_lowercase();

        let intent = if let Some(rest) = text.strip_prefix(FAVORITE_PAYLOAD_PREFIX) {
            Self::parse_payload(rest, |bpm| Intent::ToggleFavorite { bpm })
        } else if let Some(rest) = text.strip_prefix(CALCULATE_PAYLOAD_PREFIX) {
            Self::parse_payload(rest, |bpm| Intent::Calculate { bpm: f64::from(bpm) })
        } else if LIST_FAVORITES_COMMANDS.contains(&text.as_str()) {
            Intent::ListFavorites
        } else if let Some(args) = Self::reverse_args(&text) {
            Self::parse_reverse(args)
        } else {
            Self::parse_tempo(&text)
        };

        debug!(input = %text, ?intent, "parsed command");
        intent
    }

    /// Parse a decimal number, accepting `,` as the decimal separator.
    ///
    /// Non-finite values (`nan`, `inf`) are not numbers here.
    pub fn parse_decimal(token: &str) -> Option<f64> {
        token
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    fn parse_tempo(text: &str) -> Intent {
        match Self::parse_decimal(text) {
            Some(value) => match validate_bpm(value) {
                Ok(bpm) => Intent::Calculate { bpm },
                Err(_) => Intent::Unrecognized {
                    reason: Reason::Range,
                },
            },
            None => Intent::Unrecognized {
                reason: Reason::NotANumber,
            },
        }
    }

    /// Arguments after the `ms` token, if the text is a reverse calculation
    fn reverse_args(text: &str) -> Option<&str> {
        let rest = text.strip_prefix(MS_TOKEN)?;
        rest.starts_with(char::is_whitespace).then_some(rest)
    }

    fn parse_reverse(args: &str) -> Intent {
        let mut tokens = args.split_whitespace();

        let Some(ms) = tokens.next().and_then(Self::parse_decimal) else {
            return Intent::Unrecognized {
                reason: Reason::MsFormat,
            };
        };

        if validate_ms(ms).is_err() {
            return Intent::Unrecognized {
                reason: Reason::MsRange,
            };
        }

        // Tokens after the note value are ignored
        let note = match tokens.next() {
            None => NoteKind::Quarter,
            Some(token) => match NoteKind::from_fraction(token) {
                Some(note) => note,
                None => {
                    return Intent::Unrecognized {
                        reason: Reason::NoteKind,
                    }
                }
            },
        };

        Intent::ReverseCalculate { ms, note }
    }

    fn parse_payload(rest: &str, make: impl FnOnce(u32) -> Intent) -> Intent {
        let Ok(value) = rest.parse::<u32>() else {
            return Intent::Unrecognized {
                reason: Reason::Payload,
            };
        };

        match validate_bpm(f64::from(value)) {
            Ok(_) => make(value),
            Err(_) => Intent::Unrecognized {
                reason: Reason::Range,
            },
        }
    }
}
