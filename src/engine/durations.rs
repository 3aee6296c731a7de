//! Note durations
//!
//! Turns a tempo into the full table of note lengths in milliseconds:
//! straight notes, triplets and dotted notes (the usual delay times).

use serde::{Deserialize, Serialize};

use crate::engine::note::DurationKind;
use crate::engine::tempo::quarter_ms;

/// Note lengths in milliseconds for a single tempo
///
/// Values are exact; rounding belongs to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationSet {
    pub whole: f64,
    pub half: f64,
    pub quarter: f64,
    pub eighth: f64,
    pub sixteenth: f64,
    pub thirty_second: f64,

    pub quarter_triplet: f64,
    pub eighth_triplet: f64,
    pub sixteenth_triplet: f64,

    pub dotted_half: f64,
    pub dotted_quarter: f64,
    pub dotted_eighth: f64,
    pub dotted_sixteenth: f64,
}

impl DurationSet {
    /// Look up one entry by kind
    pub fn get(&self, kind: DurationKind) -> f64 {
        match kind {
            DurationKind::Whole => self.whole,
            DurationKind::Half => self.half,
            DurationKind::Quarter => self.quarter,
            DurationKind::Eighth => self.eighth,
            DurationKind::Sixteenth => self.sixteenth,
            DurationKind::ThirtySecond => self.thirty_second,
            DurationKind::QuarterTriplet => self.quarter_triplet,
            DurationKind::EighthTriplet => self.eighth_triplet,
            DurationKind::SixteenthTriplet => self.sixteenth_triplet,
            DurationKind::DottedHalf => self.dotted_half,
            DurationKind::DottedQuarter => self.dotted_quarter,
            DurationKind::DottedEighth => self.dotted_eighth,
            DurationKind::DottedSixteenth => self.dotted_sixteenth,
        }
    }

    /// Iterate over all 13 entries in table order
    pub fn iter(&self) -> impl Iterator<Item = (DurationKind, f64)> + '_ {
        DurationKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}

/// Compute every note duration for `bpm`.
///
/// Precondition: `bpm > 0` (see [`validate_bpm`](super::validate_bpm)).
///
/// # Example
/// ```
/// use bpmcalc::engine::compute_durations;
/// let d = compute_durations(120.0);
/// assert_eq!(d.quarter, 500.0);
/// assert_eq!(d.dotted_quarter, 750.0);
/// ```
pub fn compute_durations(bpm: f64) -> DurationSet {
    let quarter = quarter_ms(bpm);
    let half = quarter * 2.0;
    let eighth = quarter / 2.0;
    let sixteenth = quarter / 4.0;

    DurationSet {
        whole: quarter * 4.0,
        half,
        quarter,
        eighth,
        sixteenth,
        thirty_second: quarter / 8.0,

        quarter_triplet: quarter * 2.0 / 3.0,
        eighth_triplet: eighth * 2.0 / 3.0,
        sixteenth_triplet: sixteenth * 2.0 / 3.0,

        dotted_half: half * 1.5,
        dotted_quarter: quarter * 1.5,
        dotted_eighth: eighth * 1.5,
        dotted_sixteenth: sixteenth * 1.5,
    }
}
