//! Note kinds
//!
//! Three closed sets of note names: the five kinds accepted by the reverse
//! calculation, the 13 kinds of a [`DurationSet`](super::DurationSet) and the
//! 8 kinds of an [`LfoSet`](super::LfoSet).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Note kinds accepted by the reverse (ms → BPM) calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    Whole,
    Half,
    /// Reference beat
    #[default]
    Quarter,
    Eighth,
    Sixteenth,
}

impl NoteKind {
    /// All reverse-calculation kinds, longest first
    pub const ALL: [NoteKind; 5] = [
        NoteKind::Whole,
        NoteKind::Half,
        NoteKind::Quarter,
        NoteKind::Eighth,
        NoteKind::Sixteenth,
    ];

    /// Length of this note measured in quarter notes
    pub fn multiplier(self) -> f64 {
        match self {
            NoteKind::Whole => 4.0,
            NoteKind::Half => 2.0,
            NoteKind::Quarter => 1.0,
            NoteKind::Eighth => 0.5,
            NoteKind::Sixteenth => 0.25,
        }
    }

    /// Parse the fraction literal used in commands (`1/1` .. `1/16`)
    pub fn from_fraction(token: &str) -> Option<Self> {
        match token {
            "1/1" => Some(NoteKind::Whole),
            "1/2" => Some(NoteKind::Half),
            "1/4" => Some(NoteKind::Quarter),
            "1/8" => Some(NoteKind::Eighth),
            "1/16" => Some(NoteKind::Sixteenth),
            _ => None,
        }
    }

    /// Fraction literal for this kind
    pub fn fraction(self) -> &'static str {
        match self {
            NoteKind::Whole => "1/1",
            NoteKind::Half => "1/2",
            NoteKind::Quarter => "1/4",
            NoteKind::Eighth => "1/8",
            NoteKind::Sixteenth => "1/16",
        }
    }

    /// Snake-case name, as used in serialized output
    pub fn name(self) -> &'static str {
        match self {
            NoteKind::Whole => "whole",
            NoteKind::Half => "half",
            NoteKind::Quarter => "quarter",
            NoteKind::Eighth => "eighth",
            NoteKind::Sixteenth => "sixteenth",
        }
    }

    /// Resolve a kind by name; unknown names fall back to the quarter note.
    pub fn from_name_or_quarter(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .unwrap_or_default()
    }

    /// Matching entry of a [`DurationSet`](super::DurationSet)
    pub fn duration_kind(self) -> DurationKind {
        match self {
            NoteKind::Whole => DurationKind::Whole,
            NoteKind::Half => DurationKind::Half,
            NoteKind::Quarter => DurationKind::Quarter,
            NoteKind::Eighth => DurationKind::Eighth,
            NoteKind::Sixteenth => DurationKind::Sixteenth,
        }
    }
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.fraction())
    }
}

/// The 13 entries of a duration table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationKind {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
    QuarterTriplet,
    EighthTriplet,
    SixteenthTriplet,
    DottedHalf,
    DottedQuarter,
    DottedEighth,
    DottedSixteenth,
}

impl DurationKind {
    pub const ALL: [DurationKind; 13] = [
        DurationKind::Whole,
        DurationKind::Half,
        DurationKind::Quarter,
        DurationKind::Eighth,
        DurationKind::Sixteenth,
        DurationKind::ThirtySecond,
        DurationKind::QuarterTriplet,
        DurationKind::EighthTriplet,
        DurationKind::SixteenthTriplet,
        DurationKind::DottedHalf,
        DurationKind::DottedQuarter,
        DurationKind::DottedEighth,
        DurationKind::DottedSixteenth,
    ];

    /// Duration of this kind measured in quarter notes
    pub fn quarter_ratio(self) -> f64 {
        match self {
            DurationKind::Whole => 4.0,
            DurationKind::Half => 2.0,
            DurationKind::Quarter => 1.0,
            DurationKind::Eighth => 0.5,
            DurationKind::Sixteenth => 0.25,
            DurationKind::ThirtySecond => 0.125,
            DurationKind::QuarterTriplet => 2.0 / 3.0,
            DurationKind::EighthTriplet => 0.5 * 2.0 / 3.0,
            DurationKind::SixteenthTriplet => 0.25 * 2.0 / 3.0,
            DurationKind::DottedHalf => 2.0 * 1.5,
            DurationKind::DottedQuarter => 1.5,
            DurationKind::DottedEighth => 0.5 * 1.5,
            DurationKind::DottedSixteenth => 0.25 * 1.5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DurationKind::Whole => "whole",
            DurationKind::Half => "half",
            DurationKind::Quarter => "quarter",
            DurationKind::Eighth => "eighth",
            DurationKind::Sixteenth => "sixteenth",
            DurationKind::ThirtySecond => "thirty_second",
            DurationKind::QuarterTriplet => "quarter_triplet",
            DurationKind::EighthTriplet => "eighth_triplet",
            DurationKind::SixteenthTriplet => "sixteenth_triplet",
            DurationKind::DottedHalf => "dotted_half",
            DurationKind::DottedQuarter => "dotted_quarter",
            DurationKind::DottedEighth => "dotted_eighth",
            DurationKind::DottedSixteenth => "dotted_sixteenth",
        }
    }
}

/// The 8 entries of an LFO table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LfoKind {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
    DottedQuarter,
    DottedEighth,
}

impl LfoKind {
    pub const ALL: [LfoKind; 8] = [
        LfoKind::Whole,
        LfoKind::Half,
        LfoKind::Quarter,
        LfoKind::Eighth,
        LfoKind::Sixteenth,
        LfoKind::ThirtySecond,
        LfoKind::DottedQuarter,
        LfoKind::DottedEighth,
    ];

    /// Note whose period this LFO rate follows
    pub fn duration_kind(self) -> DurationKind {
        match self {
            LfoKind::Whole => DurationKind::Whole,
            LfoKind::Half => DurationKind::Half,
            LfoKind::Quarter => DurationKind::Quarter,
            LfoKind::Eighth => DurationKind::Eighth,
            LfoKind::Sixteenth => DurationKind::Sixteenth,
            LfoKind::ThirtySecond => DurationKind::ThirtySecond,
            LfoKind::DottedQuarter => DurationKind::DottedQuarter,
            LfoKind::DottedEighth => DurationKind::DottedEighth,
        }
    }

    pub fn name(self) -> &'static str {
        self.duration_kind().name()
    }
}
