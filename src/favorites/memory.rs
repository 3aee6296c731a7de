//! In-memory favorites store

use std::sync::{Mutex, PoisonError};

use crate::error::{BpmError, Result};
use crate::favorites::record::{
    favorites_of, insert_favorite, remove_favorite, toggle_favorite, FavoritesMap, Toggle, UserId,
};
use crate::favorites::FavoritesRepository;

/// Favorites held in process memory only
#[derive(Debug, Default)]
pub struct MemoryFavoritesStore {
    map: Mutex<FavoritesMap>,
}

impl MemoryFavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing contents
    pub fn with_contents(map: FavoritesMap) -> Self {
        Self {
            map: Mutex::new(map),
        }
    }

    /// Copy of the whole mapping
    pub fn snapshot(&self) -> FavoritesMap {
        self.map
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn mutate<T>(&self, apply: impl FnOnce(&mut FavoritesMap) -> T) -> Result<T> {
        let mut map = self.map.lock().map_err(|_| BpmError::StoreLockPoisoned)?;
        Ok(apply(&mut map))
    }
}

impl FavoritesRepository for MemoryFavoritesStore {
    fn get(&self, user: &UserId) -> Vec<u32> {
        let map = self.map.lock().unwrap_or_else(PoisonError::into_inner);
        favorites_of(&map, user)
    }

    fn add(&self, user: &UserId, bpm: u32) -> Result<bool> {
        self.mutate(|map| insert_favorite(map, user, bpm))
    }

    fn remove(&self, user: &UserId, bpm: u32) -> Result<bool> {
        self.mutate(|map| remove_favorite(map, user, bpm))
    }

    fn toggle(&self, user: &UserId, bpm: u32) -> Result<Toggle> {
        self.mutate(|map| toggle_favorite(map, user, bpm))
    }
}
