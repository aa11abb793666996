//! Meal store: the authoritative in-memory meal list for one session.
//!
//! # Responsibility
//! - Own the ordered `Vec<Meal>` shown by the UI (insertion order = display
//!   order).
//! - Apply add/replace/remove and persist the whole list after each one.
//! - Provide the startup flow: load stored meals or fall back to samples.
//!
//! # Invariants
//! - Every successful mutation is followed by exactly one `save_all`.
//! - A persistence failure never rolls back the in-memory mutation.
//! - An out-of-range index leaves both memory and storage untouched.
//! - Missing and undecodable blobs are both reported as "absent".

use crate::model::meal::{Meal, MealValidationError};
use crate::repo::meal_repo::{MealRepository, RepoError, RepoResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// `(name, rating)` of the records installed by `seed_sample_data`.
const SAMPLE_MEALS: [(&str, i32); 2] = [("Fri Rie", 4), ("Suuushh", 3)];

/// Error returned by mutating store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Index does not address an existing meal. Nothing changed.
    IndexOutOfRange { index: usize, len: usize },
    /// In-memory list was updated, but writing it out failed.
    Persist(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "meal index {index} out of range for list of {len}")
            }
            Self::Persist(err) => write!(f, "meal list changed but was not saved: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IndexOutOfRange { .. } => None,
            Self::Persist(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Persist(value)
    }
}

/// Where the current list came from when the store was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOrigin {
    /// Created with `MealStore::new`; nothing loaded.
    Empty,
    /// Decoded from the persisted blob.
    Loaded,
    /// No usable blob; sample meals installed.
    Seeded,
}

/// Session-scoped owner of the meal list.
pub struct MealStore<R: MealRepository> {
    repo: R,
    meals: Vec<Meal>,
    origin: StoreOrigin,
}

impl<R: MealRepository> MealStore<R> {
    /// Creates an empty store without touching storage.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            meals: Vec::new(),
            origin: StoreOrigin::Empty,
        }
    }

    /// Opens a store for a new session.
    ///
    /// Loads the stored list; when it is absent, installs the sample meals
    /// instead. Samples are not written until the next save.
    pub fn open(repo: R) -> Self {
        let mut store = Self::new(repo);
        match store.load_all() {
            Some(meals) => {
                store.meals = meals;
                store.origin = StoreOrigin::Loaded;
            }
            None => match store.seed_sample_data() {
                Ok(()) => store.origin = StoreOrigin::Seeded,
                Err(err) => {
                    warn!("event=store_open module=service status=seed_failed error={err}");
                }
            },
        }
        info!(
            "event=store_open module=service status=ok origin={:?} count={}",
            store.origin,
            store.meals.len()
        );
        store
    }

    /// Reads the persisted list.
    ///
    /// Returns `None` when nothing is stored or the blob cannot be decoded.
    /// One invalid record discards the whole blob.
    pub fn load_all(&self) -> Option<Vec<Meal>> {
        match self.repo.load_all() {
            Ok(meals) => Some(meals),
            Err(RepoError::NotFound(_)) => None,
            Err(err) => {
                warn!("event=store_load module=service status=absent error={err}");
                None
            }
        }
    }

    /// Writes the current list to storage.
    pub fn save_all(&self) -> RepoResult<()> {
        self.repo.save_all(&self.meals).inspect_err(|err| {
            warn!(
                "event=store_save module=service status=error count={} error={err}",
                self.meals.len()
            );
        })
    }

    /// Appends `meal` to the end of the list, then saves.
    pub fn insert(&mut self, meal: Meal) -> Result<(), StoreError> {
        self.meals.push(meal);
        self.save_all()?;
        Ok(())
    }

    /// Replaces the meal at `index` in place, then saves.
    pub fn replace(&mut self, index: usize, meal: Meal) -> Result<(), StoreError> {
        let len = self.meals.len();
        let slot = self
            .meals
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        *slot = meal;
        self.save_all()?;
        Ok(())
    }

    /// Removes the meal at `index`, shifting later meals up, then saves.
    pub fn remove_at(&mut self, index: usize) -> Result<(), StoreError> {
        let len = self.meals.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        self.meals.remove(index);
        self.save_all()?;
        Ok(())
    }

    /// Replaces the in-memory list with the two sample meals.
    ///
    /// Does not persist. On a validation failure the list is left as is.
    pub fn seed_sample_data(&mut self) -> Result<(), MealValidationError> {
        let samples = SAMPLE_MEALS
            .iter()
            .map(|(name, rating)| Meal::try_new(*name, None, *rating))
            .collect::<Result<Vec<_>, _>>()?;
        self.meals = samples;
        Ok(())
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn get(&self, index: usize) -> Option<&Meal> {
        self.meals.get(index)
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    pub fn origin(&self) -> StoreOrigin {
        self.origin
    }
}
