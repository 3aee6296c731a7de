//! Favorites Store Tests
//!
//! Behavior shared by every repository, persistence of the JSON store and
//! the single-writer guarantee under concurrent mutation.

use std::fs;
use std::thread;

use bpmcalc::favorites::{
    FavoritesRepository, JsonFavoritesStore, MemoryFavoritesStore, Toggle, UserId, MAX_FAVORITES,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn json_store() -> (TempDir, JsonFavoritesStore) {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = JsonFavoritesStore::new(temp_dir.path().join("favorites.json"));
    (temp_dir, store)
}

/// Repository contract, run against each implementation
fn check_contract(store: &dyn FavoritesRepository) {
    let user = UserId::from(42_i64);

    assert_eq!(store.get(&user), Vec::<u32>::new());

    assert!(store.add(&user, 90).unwrap());
    assert!(!store.add(&user, 90).unwrap());
    assert_eq!(store.get(&user), vec![90]);

    assert!(store.add(&user, 140).unwrap());
    assert!(store.add(&user, 120).unwrap());
    assert_eq!(store.get(&user), vec![90, 120, 140]);

    assert!(!store.remove(&user, 100).unwrap());
    assert!(store.remove(&user, 120).unwrap());
    assert_eq!(store.get(&user), vec![90, 140]);

    assert_eq!(store.toggle(&user, 90).unwrap(), Toggle::Removed);
    assert_eq!(store.toggle(&user, 174).unwrap(), Toggle::Added);
    assert_eq!(store.get(&user), vec![140, 174]);

    // Other users are untouched
    assert!(store.get(&UserId::from(43_i64)).is_empty());
}

/// More than the cap keeps the lowest values in ascending order
fn check_truncation(store: &dyn FavoritesRepository) {
    let user = UserId::from("producer");
    for bpm in (1..=30u32).rev().map(|i| i * 10) {
        assert!(store.add(&user, bpm).unwrap());
    }

    let expected: Vec<u32> = (1..=20).map(|i| i * 10).collect();
    assert_eq!(store.get(&user), expected);

    // A full list drops a tempo above all kept values
    assert!(store.add(&user, 999).unwrap());
    assert_eq!(store.get(&user).len(), MAX_FAVORITES);
    assert!(!store.contains(&user, 999));
    assert_eq!(store.toggle(&user, 999).unwrap(), Toggle::Dropped);
}

#[test]
fn test_memory_store_contract() {
    check_contract(&MemoryFavoritesStore::new());
    check_truncation(&MemoryFavoritesStore::new());
}

#[test]
fn test_json_store_contract() {
    let (_dir, store) = json_store();
    check_contract(&store);

    let (_dir, store) = json_store();
    check_truncation(&store);
}

#[test]
fn test_duplicate_add_scenario() {
    let (_dir, store) = json_store();
    let user = UserId::from(42_i64);

    assert!(store.add(&user, 90).unwrap());
    assert!(!store.add(&user, 90).unwrap());
    assert_eq!(store.get(&user), vec![90]);
}

#[test]
fn test_json_store_persists_across_instances() {
    let (dir, store) = json_store();
    store.add(&UserId::from(1_i64), 128).unwrap();
    store.add(&UserId::from(2_i64), 95).unwrap();
    store.remove(&UserId::from(2_i64), 95).unwrap();

    let reopened = JsonFavoritesStore::new(dir.path().join("favorites.json"));
    assert_eq!(reopened.get(&UserId::from(1_i64)), vec![128]);
    assert_eq!(reopened.get(&UserId::from(2_i64)), Vec::<u32>::new());

    let content = fs::read_to_string(reopened.path()).unwrap();
    assert_eq!(content, r#"{"1":[128],"2":[]}"#);
}

#[test]
fn test_json_store_reads_existing_file() {
    let (_dir, store) = json_store();
    fs::write(store.path(), r#"{"123456": [120, 128, 140]}"#).unwrap();

    assert_eq!(store.get(&UserId::from(123456_i64)), vec![120, 128, 140]);
    assert!(store.contains(&UserId::from(123456_i64), 128));
}

#[test]
fn test_wrong_shape_is_empty() {
    let (_dir, store) = json_store();
    fs::write(store.path(), r#"{"1": ["fast"]}"#).unwrap();
    assert!(store.get(&UserId::from(1_i64)).is_empty());

    fs::write(store.path(), "[1, 2, 3]").unwrap();
    assert!(store.get(&UserId::from(1_i64)).is_empty());
}

// === Concurrency ===

#[test]
fn test_concurrent_adds_lose_no_update() {
    let (_dir, store) = json_store();
    let users: i64 = 8;
    let per_user = 10u32;

    thread::scope(|scope| {
        for user in 0..users {
            let store = &store;
            scope.spawn(move || {
                let id = UserId::from(user);
                for bpm in 1..=per_user {
                    assert!(store.add(&id, 100 + bpm).unwrap());
                }
            });
        }
    });

    let expected: Vec<u32> = (1..=per_user).map(|bpm| 100 + bpm).collect();
    for user in 0..users {
        assert_eq!(store.get(&UserId::from(user)), expected);
    }
}

#[test]
fn test_two_stores_on_one_file_lose_no_update() {
    let (dir, _) = json_store();
    let path = dir.path().join("favorites.json");
    let per_user = 20u32;

    thread::scope(|scope| {
        for user in 0..2_i64 {
            let path = &path;
            scope.spawn(move || {
                let store = JsonFavoritesStore::new(path);
                let id = UserId::from(user);
                for bpm in 1..=per_user {
                    assert!(store.add(&id, 60 + bpm).unwrap());
                }
            });
        }
    });

    let expected: Vec<u32> = (1..=per_user).map(|bpm| 60 + bpm).collect();
    let reopened = JsonFavoritesStore::new(&path);
    assert_eq!(reopened.get(&UserId::from(0_i64)), expected);
    assert_eq!(reopened.get(&UserId::from(1_i64)), expected);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_concurrent_toggles_same_user() {
    let store = MemoryFavoritesStore::new();
    let user = UserId::from(7_i64);

    // Every tempo is toggled an even number of times in total
    thread::scope(|scope| {
        for _ in 0..4 {
            let store = &store;
            let user = &user;
            scope.spawn(move || {
                for bpm in 60..80 {
                    store.toggle(user, bpm).unwrap();
                }
            });
        }
    });

    assert!(store.get(&user).is_empty());
}
