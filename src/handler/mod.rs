//! Request Handler
//!
//! Glue between the parser, the engine and the favorites store. Takes one
//! line of input from a user and produces a typed [`Reply`]; turning the
//! reply into text is left to [`crate::present`].

use serde::Serialize;
use tracing::{debug, warn};

use crate::command::{CommandParser, Intent, Reason, CALCULATE_PAYLOAD_PREFIX, FAVORITE_PAYLOAD_PREFIX};
use crate::engine::{
    compute_durations, compute_lfo, ms_to_bpm, validate_bpm, DurationSet, LfoSet, NoteKind,
};
use crate::error::BpmError;
use crate::favorites::{FavoritesRepository, Toggle, UserId};
use crate::present::round_bpm;

/// Number of quick-pick buttons per row in a favorites listing
pub const FAVORITES_PER_ROW: usize = 4;

/// Full conversion result for one tempo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TempoReport {
    /// Tempo as requested
    pub tempo: f64,
    /// Integer tempo used for favorites
    pub bpm: u32,
    pub durations: DurationSet,
    pub lfo: LfoSet,
    /// Whether `bpm` is currently a favorite of the requesting user
    pub is_favorite: bool,
    /// Payload that toggles `bpm` as a favorite
    pub toggle_payload: String,
}

impl TempoReport {
    /// Compute the report for `tempo`; `tempo` must already be validated.
    pub fn new(tempo: f64, is_favorite: impl FnOnce(u32) -> bool) -> Self {
        let bpm = round_bpm(tempo);
        Self {
            tempo,
            bpm,
            durations: compute_durations(tempo),
            lfo: compute_lfo(tempo),
            is_favorite: is_favorite(bpm),
            toggle_payload: format!("{FAVORITE_PAYLOAD_PREFIX}{bpm}"),
        }
    }
}

/// Reverse calculation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReverseReport {
    pub ms: f64,
    pub note: NoteKind,
    pub bpm: f64,
    /// Integer tempo to send for the full table, when it is a valid tempo
    pub suggested_bpm: Option<u32>,
}

impl ReverseReport {
    /// `None` when `ms` is too small for the tempo to be finite.
    pub fn new(ms: f64, note: NoteKind) -> Option<Self> {
        let bpm = ms_to_bpm(ms, note);
        if !bpm.is_finite() {
            return None;
        }
        let rounded = bpm.round_ties_even();
        let suggested_bpm =
            (rounded >= 1.0 && validate_bpm(rounded).is_ok()).then(|| round_bpm(bpm));
        Some(Self {
            ms,
            note,
            bpm,
            suggested_bpm,
        })
    }
}

/// A user's favorites with their quick-calculation payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoritesView {
    pub bpms: Vec<u32>,
    /// `calc_<bpm>` payloads in rows of [`FAVORITES_PER_ROW`]
    pub rows: Vec<Vec<String>>,
}

impl FavoritesView {
    pub fn new(bpms: Vec<u32>) -> Self {
        let rows = bpms
            .chunks(FAVORITES_PER_ROW)
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|bpm| format!("{CALCULATE_PAYLOAD_PREFIX}{bpm}"))
                    .collect()
            })
            .collect();
        Self { bpms, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.bpms.is_empty()
    }
}

/// Everything a request can result in
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    Report(TempoReport),
    Reverse(ReverseReport),
    FavoriteToggled {
        bpm: u32,
        outcome: Toggle,
        /// Favorite state after the toggle
        is_favorite: bool,
    },
    Favorites(FavoritesView),
    /// Input was not understood; carries the corrective message
    Rejected { reason: Reason, message: String },
    /// Favorites could not be saved; conversions are unaffected
    StoreUnavailable { message: String },
}

/// Dispatches parsed input against a favorites repository
pub struct RequestHandler<R> {
    store: R,
}

impl<R: FavoritesRepository> RequestHandler<R> {
    pub fn new(store: R) -> Self {
        Self { store }
    }

    /// Get the underlying store.
    pub fn store(&self) -> &R {
        &self.store
    }

    /// Parse and answer one line of input or one callback payload
    pub fn handle(&self, user: &UserId, input: &str) -> Reply {
        match CommandParser::parse(input) {
            Intent::Unrecognized { reason } => Self::rejected(reason, input),
            intent => self.dispatch(user, intent),
        }
    }

    /// Answer an already parsed intent
    pub fn dispatch(&self, user: &UserId, intent: Intent) -> Reply {
        debug!(%user, ?intent, "dispatching");
        match intent {
            Intent::Calculate { bpm } => {
                Reply::Report(TempoReport::new(bpm, |rounded| self.store.contains(user, rounded)))
            }
            Intent::ReverseCalculate { ms, note } => match ReverseReport::new(ms, note) {
                Some(reverse) => Reply::Reverse(reverse),
                None => Self::rejected(Reason::MsRange, &format!("ms {ms}")),
            },
            Intent::ToggleFavorite { bpm } => match self.store.toggle(user, bpm) {
                Ok(outcome) => Reply::FavoriteToggled {
                    bpm,
                    outcome,
                    is_favorite: outcome == Toggle::Added,
                },
                Err(e) => Self::store_unavailable(e),
            },
            Intent::ListFavorites => Reply::Favorites(FavoritesView::new(self.store.get(user))),
            Intent::Unrecognized { reason } => Self::rejected(reason, ""),
        }
    }

    fn rejected(reason: Reason, input: &str) -> Reply {
        Reply::Rejected {
            reason,
            message: reason.to_error(input).friendly_message(),
        }
    }

    fn store_unavailable(error: BpmError) -> Reply {
        warn!(code = error.error_code(), error = %error, "favorites unavailable");
        Reply::StoreUnavailable {
            message: error.friendly_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::MemoryFavoritesStore;

    fn handler() -> RequestHandler<MemoryFavoritesStore> {
        RequestHandler::new(MemoryFavoritesStore::new())
    }

    #[test]
    fn test_report_carries_toggle_payload() {
        let handler = handler();
        let Reply::Report(report) = handler.handle(&UserId::from(1_i64), "120") else {
            panic!("expected a report");
        };
        assert_eq!(report.bpm, 120);
        assert_eq!(report.toggle_payload, "fav_120");
        assert!(!report.is_favorite);
        assert_eq!(report.durations.quarter, 500.0);
    }

    #[test]
    fn test_toggle_round_trip() {
        let handler = handler();
        let user = UserId::from(1_i64);

        let reply = handler.handle(&user, "fav_120");
        assert_eq!(
            reply,
            Reply::FavoriteToggled {
                bpm: 120,
                outcome: Toggle::Added,
                is_favorite: true
            }
        );

        let Reply::Report(report) = handler.handle(&user, "calc_120") else {
            panic!("expected a report");
        };
        assert!(report.is_favorite);

        let reply = handler.handle(&user, "fav_120");
        assert!(matches!(
            reply,
            Reply::FavoriteToggled {
                outcome: Toggle::Removed,
                is_favorite: false,
                ..
            }
        ));
    }

    #[test]
    fn test_favorites_rows_of_four() {
        let handler = handler();
        let user = UserId::from(3_i64);
        for bpm in [90, 100, 110, 120, 130] {
            handler.store().add(&user, bpm).unwrap();
        }

        let Reply::Favorites(view) = handler.handle(&user, "/favorites") else {
            panic!("expected favorites");
        };
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0], vec!["calc_90", "calc_100", "calc_110", "calc_120"]);
        assert_eq!(view.rows[1], vec!["calc_130"]);
    }

    #[test]
    fn test_rejected_carries_message() {
        let handler = handler();
        let reply = handler.handle(&UserId::from(1_i64), "ms 250 1/3");
        match reply {
            Reply::Rejected { reason, message } => {
                assert_eq!(reason, Reason::NoteKind);
                assert!(message.contains("1/16"));
            }
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[test]
    fn test_tiny_ms_is_out_of_range() {
        let handler = handler();
        for input in ["ms 1e-320", "ms 1e-305 1/16"] {
            let reply = handler.handle(&UserId::from(1_i64), input);
            assert!(
                matches!(reply, Reply::Rejected { reason: Reason::MsRange, .. }),
                "input {input} gave {reply:?}"
            );
        }
    }

    #[test]
    fn test_suggestion_only_for_valid_tempo() {
        let handler = handler();
        let user = UserId::from(1_i64);

        let Reply::Reverse(fast) = handler.handle(&user, "ms 1") else {
            panic!("expected a reverse report");
        };
        assert_eq!(fast.bpm, 60_000.0);
        assert_eq!(fast.suggested_bpm, None);

        let Reply::Reverse(slow) = handler.handle(&user, "ms 1e300") else {
            panic!("expected a reverse report");
        };
        assert!(slow.bpm > 0.0 && slow.bpm.is_finite());
        assert_eq!(slow.suggested_bpm, None);

        let Reply::Reverse(usual) = handler.handle(&user, "ms 250 1/8") else {
            panic!("expected a reverse report");
        };
        assert_eq!(usual.suggested_bpm, Some(120));
    }

    #[test]
    fn test_fractional_tempo_rounds_for_favorites() {
        let handler = handler();
        let Reply::Report(report) = handler.handle(&UserId::from(1_i64), "0,4") else {
            panic!("expected a report");
        };
        assert_eq!(report.tempo, 0.4);
        assert_eq!(report.bpm, 1);
        assert!((report.durations.quarter - 150_000.0).abs() < 1e-6);
    }
}
