//! Presentation
//!
//! Plain-text rendering of [`Reply`] values, and the one rounding rule used
//! for display.

use std::fmt::Write;

use crate::engine::{DurationKind, LfoKind, NoteKind};
use crate::favorites::Toggle;
use crate::handler::{FavoritesView, Reply, ReverseReport, TempoReport};

/// Round a millisecond value for display: nearest integer, ties to even.
///
/// This is the only rounding applied to engine output, whichever path
/// produced the value.
///
/// # Example
/// ```
/// use bpmcalc::present::round_ms;
/// assert_eq!(round_ms(333.333), 333);
/// assert_eq!(round_ms(62.5), 62);
/// assert_eq!(round_ms(187.5), 188);
/// ```
pub fn round_ms(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Integer tempo for favorites and payloads, never below 1
pub fn round_bpm(tempo: f64) -> u32 {
    (tempo.round_ties_even() as u32).max(1)
}

/// Greeting shown for `/start`
pub const START_TEXT: &str = "\
BPM Calculator

Converts a tempo (BPM) into note durations.

What it does:
- Note durations in ms
- Triplets
- Delay time (dotted)
- LFO rates in Hz
- Reverse calculation (ms -> BPM)

Send a BPM number, for example: 140

Or milliseconds for a reverse calculation:
ms 500      tempo from a quarter note
ms 250 1/8  tempo from an eighth note";

/// Reference shown for `/help`
pub const HELP_TEXT: &str = "\
Help

BPM -> ms:
Send a number, for example: 120

Reverse calculation (ms -> BPM):
ms 500       by quarter note (1/4)
ms 250 1/8   by eighth note
ms 1000 1/2  by half note

Favorites:
/favorites   show saved BPMs
fav_<bpm>    add or remove a BPM
calc_<bpm>   recalculate a saved BPM

Commands:
/start      introduction
/help       this help
/favorites  favorites";

/// Render any reply as plain text
pub fn render(reply: &Reply) -> String {
    match reply {
        Reply::Report(report) => render_report(report),
        Reply::Reverse(reverse) => render_reverse(reverse),
        Reply::FavoriteToggled { bpm, outcome, .. } => match outcome {
            Toggle::Added => format!("Added {bpm} BPM to favorites"),
            Toggle::Removed => format!("Removed {bpm} BPM from favorites"),
            Toggle::Dropped => format!(
                "Favorites are full; {bpm} BPM is above all {} saved values and was not kept",
                crate::favorites::MAX_FAVORITES
            ),
        },
        Reply::Favorites(view) => render_favorites(view),
        Reply::Rejected { message, .. } => message.clone(),
        Reply::StoreUnavailable { message } => message.clone(),
    }
}

fn duration_label(kind: DurationKind) -> &'static str {
    match kind {
        DurationKind::Whole => "Whole (1/1)",
        DurationKind::Half => "Half (1/2)",
        DurationKind::Quarter => "Quarter (1/4)",
        DurationKind::Eighth => "Eighth (1/8)",
        DurationKind::Sixteenth => "16th (1/16)",
        DurationKind::ThirtySecond => "32nd (1/32)",
        DurationKind::QuarterTriplet => "Quarter",
        DurationKind::EighthTriplet => "Eighth",
        DurationKind::SixteenthTriplet => "16th",
        DurationKind::DottedHalf => "1/2 D",
        DurationKind::DottedQuarter => "1/4 D",
        DurationKind::DottedEighth => "1/8 D",
        DurationKind::DottedSixteenth => "1/16 D",
    }
}

fn lfo_label(kind: LfoKind) -> &'static str {
    match kind {
        LfoKind::Whole => "1/1",
        LfoKind::Half => "1/2",
        LfoKind::Quarter => "1/4",
        LfoKind::Eighth => "1/8",
        LfoKind::Sixteenth => "1/16",
        LfoKind::ThirtySecond => "1/32",
        LfoKind::DottedQuarter => "1/4 D",
        LfoKind::DottedEighth => "1/8 D",
    }
}

const BASIC: [DurationKind; 6] = [
    DurationKind::Quarter,
    DurationKind::Eighth,
    DurationKind::Sixteenth,
    DurationKind::ThirtySecond,
    DurationKind::Half,
    DurationKind::Whole,
];

const TRIPLETS: [DurationKind; 3] = [
    DurationKind::QuarterTriplet,
    DurationKind::EighthTriplet,
    DurationKind::SixteenthTriplet,
];

const DOTTED: [DurationKind; 4] = [
    DurationKind::DottedHalf,
    DurationKind::DottedQuarter,
    DurationKind::DottedEighth,
    DurationKind::DottedSixteenth,
];

/// Full duration/LFO table for one tempo
pub fn render_report(report: &TempoReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "BPM: {}", report.tempo);
    out.push_str("--------------------\n");

    let sections: [(&str, &[DurationKind]); 3] = [
        ("Basic durations", &BASIC[..]),
        ("Triplets", &TRIPLETS[..]),
        ("Delay time (dotted)", &DOTTED[..]),
    ];
    for (title, kinds) in sections {
        let _ = writeln!(out, "\n{title}:");
        for &kind in kinds {
            let ms = round_ms(report.durations.get(kind));
            let _ = writeln!(out, "  {:<14} {ms} ms", duration_label(kind));
        }
    }

    out.push_str("\nLFO (Hz):\n");
    for (kind, hz) in report.lfo.iter() {
        let _ = writeln!(out, "  {:<14} {hz:.3} Hz", lfo_label(kind));
    }

    let action = if report.is_favorite {
        format!("remove {} BPM from favorites", report.bpm)
    } else {
        format!("add {} BPM to favorites", report.bpm)
    };
    let _ = write!(out, "\n[{}] {action}", report.toggle_payload);
    out
}

fn note_phrase(note: NoteKind) -> &'static str {
    match note {
        NoteKind::Whole => "a whole note (1/1)",
        NoteKind::Half => "a half note (1/2)",
        NoteKind::Quarter => "a quarter note (1/4)",
        NoteKind::Eighth => "an eighth note (1/8)",
        NoteKind::Sixteenth => "a 16th note (1/16)",
    }
}

/// Reverse calculation answer
pub fn render_reverse(reverse: &ReverseReport) -> String {
    let mut out = format!(
        "Reverse calculation\n\n\
         If {} = {} ms,\n\
         the tempo is ~{:.1} BPM",
        note_phrase(reverse.note),
        round_ms(reverse.ms),
        reverse.bpm,
    );
    if let Some(bpm) = reverse.suggested_bpm {
        let _ = write!(out, "\n\nSend {bpm} for the full table");
    }
    out
}

/// Favorites listing with quick-pick payloads
pub fn render_favorites(view: &FavoritesView) -> String {
    if view.is_empty() {
        return "Favorites are empty\n\n\
                Send a BPM and use its fav_<bpm> payload to save it."
            .to_string();
    }

    let mut out = format!(
        "Favorite BPMs ({}):\n\nPick a value for a quick calculation:\n",
        view.bpms.len()
    );
    for row in &view.rows {
        let _ = writeln!(out, "  {}", row.join("  "));
    }
    out.truncate(out.trim_end().len());
    out
}
