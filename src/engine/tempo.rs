//! Tempo validation and reverse calculation

use crate::engine::note::NoteKind;
use crate::error::{BpmError, Result};

/// Milliseconds in one minute
pub const MS_PER_MINUTE: f64 = 60_000.0;

/// Highest tempo accepted for forward conversion (inclusive)
pub const MAX_BPM: f64 = 9999.0;

/// Check that a tempo lies in (0, [`MAX_BPM`]].
///
/// # Example
/// ```
/// use bpmcalc::engine::validate_bpm;
/// assert!(validate_bpm(140.0).is_ok());
/// assert!(validate_bpm(0.0).is_err());
/// ```
pub fn validate_bpm(bpm: f64) -> Result<f64> {
    if bpm > 0.0 && bpm <= MAX_BPM {
        Ok(bpm)
    } else {
        Err(BpmError::BpmOutOfRange {
            value: bpm,
            max: MAX_BPM,
        })
    }
}

/// Check that a millisecond value is positive and finite
pub fn validate_ms(ms: f64) -> Result<f64> {
    if ms > 0.0 && ms.is_finite() {
        Ok(ms)
    } else {
        Err(BpmError::MsOutOfRange { value: ms })
    }
}

/// Length of a quarter note in milliseconds
///
/// Precondition: `bpm > 0`.
pub fn quarter_ms(bpm: f64) -> f64 {
    debug_assert!(bpm > 0.0, "tempo must be positive, got {bpm}");
    MS_PER_MINUTE / bpm
}

/// Convert the length of one `kind` note in milliseconds into a tempo.
///
/// The result is not rounded. Precondition: `ms > 0`.
///
/// # Example
/// ```
/// use bpmcalc::engine::{ms_to_bpm, NoteKind};
/// assert_eq!(ms_to_bpm(500.0, NoteKind::Quarter), 120.0);
/// assert_eq!(ms_to_bpm(250.0, NoteKind::Eighth), 120.0);
/// ```
pub fn ms_to_bpm(ms: f64, kind: NoteKind) -> f64 {
    debug_assert!(ms > 0.0, "milliseconds must be positive, got {ms}");
    let quarter_ms = ms / kind.multiplier();
    MS_PER_MINUTE / quarter_ms
}
