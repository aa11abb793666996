use mealtrack_core::{FileMealRepository, Meal, MealRepository, MealStore, StoreError, StoreOrigin};
use std::fs;
use std::path::Path;

fn meal(name: &str, rating: i32) -> Meal {
    Meal::try_new(name, None, rating).unwrap()
}

fn repo_in(dir: &Path) -> FileMealRepository {
    FileMealRepository::new(dir.join("meals"))
}

fn store_with(dir: &Path, meals: &[Meal]) -> MealStore<FileMealRepository> {
    let mut store = MealStore::new(repo_in(dir));
    for meal in meals {
        store.insert(meal.clone()).unwrap();
    }
    store
}

#[test]
fn insert_appends_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_with(dir.path(), &[meal("A", 1), meal("B", 2)]);

    store.insert(meal("C", 3)).unwrap();

    let expected = vec![meal("A", 1), meal("B", 2), meal("C", 3)];
    assert_eq!(store.meals(), expected.as_slice());
    assert_eq!(repo_in(dir.path()).load_all().unwrap(), expected);
}

#[test]
fn remove_at_front_shifts_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_with(dir.path(), &[meal("A", 1), meal("B", 2), meal("C", 3)]);

    store.remove_at(0).unwrap();

    let expected = vec![meal("B", 2), meal("C", 3)];
    assert_eq!(store.meals(), expected.as_slice());
    assert_eq!(repo_in(dir.path()).load_all().unwrap(), expected);
}

#[test]
fn replace_substitutes_in_place_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_with(dir.path(), &[meal("A", 1), meal("B", 2), meal("C", 3)]);

    store.replace(1, meal("D", 5)).unwrap();

    let expected = vec![meal("A", 1), meal("D", 5), meal("C", 3)];
    assert_eq!(store.meals(), expected.as_slice());
    assert_eq!(store.get(1), Some(&meal("D", 5)));
    assert_eq!(repo_in(dir.path()).load_all().unwrap(), expected);
}

#[test]
fn invalid_index_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_with(dir.path(), &[meal("A", 1)]);

    let err = store.remove_at(1).unwrap_err();
    assert!(matches!(err, StoreError::IndexOutOfRange { index: 1, len: 1 }));
    assert_eq!(store.len(), 1);
}

#[test]
fn open_seeds_samples_when_nothing_is_stored() {
    let dir = tempfile::tempdir().unwrap();
    let store = MealStore::open(repo_in(dir.path()));

    assert_eq!(store.origin(), StoreOrigin::Seeded);
    let names = store.meals().iter().map(Meal::name).collect::<Vec<_>>();
    assert_eq!(names, ["Fri Rie", "Suuushh"]);
    assert!(!dir.path().join("meals").exists());
}

#[test]
fn open_seeds_samples_when_blob_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("meals"), b"{ truncated").unwrap();

    let store = MealStore::open(repo_in(dir.path()));
    assert!(store.load_all().is_none());
    assert_eq!(store.origin(), StoreOrigin::Seeded);
    assert_eq!(store.len(), 2);
}

#[test]
fn seeded_samples_are_persisted_by_next_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = MealStore::open(repo_in(dir.path()));

    store.insert(meal("Pho", 5)).unwrap();

    let reopened = MealStore::open(repo_in(dir.path()));
    assert_eq!(reopened.origin(), StoreOrigin::Loaded);
    let names = reopened.meals().iter().map(Meal::name).collect::<Vec<_>>();
    assert_eq!(names, ["Fri Rie", "Suuushh", "Pho"]);
}

#[test]
fn explicit_save_persists_seeded_samples() {
    let dir = tempfile::tempdir().unwrap();
    let store = MealStore::open(repo_in(dir.path()));

    store.save_all().unwrap();
    assert_eq!(store.load_all().unwrap(), store.meals());
}

#[test]
fn reopen_restores_previous_session() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = MealStore::open(repo_in(dir.path()));
        store.remove_at(1).unwrap();
        store
            .replace(0, Meal::try_new("Curry", Some(vec![7; 16]), 2).unwrap())
            .unwrap();
    }

    let store = MealStore::open(repo_in(dir.path()));
    assert_eq!(store.len(), 1);
    let first = store.get(0).unwrap();
    assert_eq!(first.name(), "Curry");
    assert_eq!(first.image(), Some(&[7; 16][..]));
    assert_eq!(first.rating(), 2);
}

#[test]
fn failed_persist_keeps_mutation_in_memory() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"file").unwrap();
    let mut store = MealStore::new(FileMealRepository::new(blocker.join("meals")));

    let err = store.insert(meal("Lost", 1)).unwrap_err();
    assert!(matches!(err, StoreError::Persist(_)));
    assert_eq!(store.meals(), &[meal("Lost", 1)]);
}
