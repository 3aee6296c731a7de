//! Conversion Engine
//!
//! Pure tempo arithmetic:
//! - BPM to note durations (ms)
//! - BPM to tempo-synced LFO rates (Hz)
//! - Note length (ms) back to BPM
//!
//! Nothing here rounds; see [`crate::present::round_ms`].

pub mod durations;
pub mod lfo;
pub mod note;
pub mod tempo;

pub use durations::{compute_durations, DurationSet};
pub use lfo::{compute_lfo, LfoSet};
pub use note::{DurationKind, LfoKind, NoteKind};
pub use tempo::{ms_to_bpm, quarter_ms, validate_bpm, validate_ms, MAX_BPM, MS_PER_MINUTE};
