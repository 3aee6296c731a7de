//! Favorites mapping and its mutation rules
//!
//! Shared by every store implementation so the retention policy lives in
//! one place.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of favorites kept per user
pub const MAX_FAVORITES: usize = 20;

/// Whole store contents: user id → ascending, duplicate-free BPM list
pub type FavoritesMap = BTreeMap<String, Vec<u32>>;

/// Opaque user identifier
///
/// Stored on disk in its string form, so numeric chat ids and arbitrary
/// names share one key space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a favorite toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Toggle {
    /// The tempo was added and kept
    Added,
    /// The tempo was present and has been removed
    Removed,
    /// The list was full and the tempo sorted past the last kept slot
    Dropped,
}

/// Insert `bpm`, then keep the lowest [`MAX_FAVORITES`] values in ascending
/// order. Returns false, leaving the map untouched, if `bpm` is present.
///
/// A full list silently drops a tempo higher than all existing ones; the
/// call still returns true.
pub fn insert_favorite(map: &mut FavoritesMap, user: &UserId, bpm: u32) -> bool {
    let list = map.entry(user.as_str().to_string()).or_default();
    if list.contains(&bpm) {
        return false;
    }

    list.push(bpm);
    list.sort_unstable();
    list.truncate(MAX_FAVORITES);
    true
}

/// Remove `bpm`. Returns false if the user has no such favorite.
///
/// An emptied list stays in the map as `[]`.
pub fn remove_favorite(map: &mut FavoritesMap, user: &UserId, bpm: u32) -> bool {
    let Some(list) = map.get_mut(user.as_str()) else {
        return false;
    };

    match list.iter().position(|&value| value == bpm) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}

/// Remove `bpm` if present, insert it otherwise
pub fn toggle_favorite(map: &mut FavoritesMap, user: &UserId, bpm: u32) -> Toggle {
    if remove_favorite(map, user, bpm) {
        return Toggle::Removed;
    }

    insert_favorite(map, user, bpm);
    if favorites_of(map, user).contains(&bpm) {
        Toggle::Added
    } else {
        Toggle::Dropped
    }
}

/// The user's list, or an empty one
pub fn favorites_of(map: &FavoritesMap, user: &UserId) -> Vec<u32> {
    map.get(user.as_str()).cloned().unwrap_or_default()
}
