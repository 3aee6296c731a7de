//! Tempo-synced LFO rates

use serde::{Deserialize, Serialize};

use crate::engine::note::LfoKind;
use crate::engine::tempo::quarter_ms;

/// LFO rates in hertz, one cycle per note
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LfoSet {
    pub whole: f64,
    pub half: f64,
    pub quarter: f64,
    pub eighth: f64,
    pub sixteenth: f64,
    pub thirty_second: f64,
    pub dotted_quarter: f64,
    pub dotted_eighth: f64,
}

impl LfoSet {
    pub fn get(&self, kind: LfoKind) -> f64 {
        match kind {
            LfoKind::Whole => self.whole,
            LfoKind::Half => self.half,
            LfoKind::Quarter => self.quarter,
            LfoKind::Eighth => self.eighth,
            LfoKind::Sixteenth => self.sixteenth,
            LfoKind::ThirtySecond => self.thirty_second,
            LfoKind::DottedQuarter => self.dotted_quarter,
            LfoKind::DottedEighth => self.dotted_eighth,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (LfoKind, f64)> + '_ {
        LfoKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}

/// Compute LFO rates for `bpm`. Doubling a note's length halves its rate.
///
/// Precondition: `bpm > 0`.
pub fn compute_lfo(bpm: f64) -> LfoSet {
    let quarter_hz = 1000.0 / quarter_ms(bpm);

    LfoSet {
        whole: quarter_hz / 4.0,
        half: quarter_hz / 2.0,
        quarter: quarter_hz,
        eighth: quarter_hz * 2.0,
        sixteenth: quarter_hz * 4.0,
        thirty_second: quarter_hz * 8.0,
        dotted_quarter: quarter_hz / 1.5,
        dotted_eighth: (quarter_hz * 2.0) / 1.5,
    }
}
