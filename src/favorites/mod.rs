//! Favorites Module
//!
//! Per-user lists of favorite tempos behind a repository trait, with a
//! JSON-file store for the CLI and an in-memory store.

pub mod json_store;
pub mod memory;
pub mod record;

pub use json_store::JsonFavoritesStore;
pub use memory::MemoryFavoritesStore;
pub use record::{FavoritesMap, Toggle, UserId, MAX_FAVORITES};

use crate::error::Result;

/// Storage for favorite tempos
///
/// Implementations serialize all mutations behind a single writer, whichever
/// user triggered them, and can be shared across threads.
pub trait FavoritesRepository: Send + Sync {
    /// The user's favorites in ascending order; empty if none or if the
    /// backing store cannot be read.
    fn get(&self, user: &UserId) -> Vec<u32>;

    /// Add a tempo. Returns false if it was already a favorite.
    ///
    /// Lists are capped at [`MAX_FAVORITES`] by keeping the lowest values.
    fn add(&self, user: &UserId, bpm: u32) -> Result<bool>;

    /// Remove a tempo. Returns false if it was not a favorite.
    fn remove(&self, user: &UserId, bpm: u32) -> Result<bool>;

    /// Remove the tempo if present, add it otherwise, as one operation.
    fn toggle(&self, user: &UserId, bpm: u32) -> Result<Toggle>;

    /// Check if a tempo is among the user's favorites
    fn contains(&self, user: &UserId, bpm: u32) -> bool {
        self.get(user).contains(&bpm)
    }
}
