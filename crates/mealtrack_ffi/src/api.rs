//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose meal list use-cases to Dart via FRB.
//! - Own the one process-wide `MealStore` session.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - All session access goes through `SESSION`'s mutex, so concurrent host
//!   calls never interleave a mutation with its save.
//! - Validation failures never mutate the list.

use log::warn;
use mealtrack_core::{
    core_version as core_version_inner, default_log_level as default_log_level_inner,
    init_logging as init_logging_inner, logging_status as logging_status_inner,
    ping as ping_inner, FileMealRepository, Meal, MealStore, StoreError, StoreOrigin,
};
use std::sync::{Mutex, MutexGuard, PoisonError};

type Session = MealStore<FileMealRepository>;

static SESSION: Mutex<Option<Session>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Log level the host should pass to `init_logging` when the user has not
/// picked one: `debug` in debug builds, `info` in release builds.
#[flutter_rust_bridge::frb(sync)]
pub fn default_log_level() -> String {
    default_log_level_inner().to_owned()
}

/// Active logging configuration, for the diagnostics screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingStatus {
    /// Whether `init_logging` has succeeded in this process.
    pub active: bool,
    /// Active level; empty when inactive.
    pub level: String,
    /// Active log directory; empty when inactive.
    pub log_dir: String,
}

/// Reports whether core logging is running and where it writes.
#[flutter_rust_bridge::frb(sync)]
pub fn logging_status() -> LoggingStatus {
    match logging_status_inner() {
        Some((level, log_dir)) => LoggingStatus {
            active: true,
            level: level.to_owned(),
            log_dir: log_dir.display().to_string(),
        },
        None => LoggingStatus {
            active: false,
            level: String::new(),
            log_dir: String::new(),
        },
    }
}

/// One meal row for list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealItem {
    pub name: String,
    /// Raw photo bytes; `None` when no photo is attached.
    pub image: Option<Vec<u8>>,
    /// Star rating in `0..=5`.
    pub rating: u8,
}

impl From<&Meal> for MealItem {
    fn from(meal: &Meal) -> Self {
        Self {
            name: meal.name().to_string(),
            image: meal.image().map(<[u8]>::to_vec),
            rating: meal.rating(),
        }
    }
}

/// Response envelope for list-returning calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealListResponse {
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// Current list in display order. Empty when `ok` is false.
    pub items: Vec<MealItem>,
}

/// Response envelope for add/update/delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealActionResponse {
    /// Whether the list was changed.
    pub ok: bool,
    /// Human-readable response message; carries save warnings too.
    pub message: String,
    /// List after the call, in display order.
    pub items: Vec<MealItem>,
}

/// Opens the meal session stored under `documents_dir`.
///
/// Replaces any session opened earlier. Falls back to the two sample meals
/// when nothing usable is stored.
///
/// # FFI contract
/// - Sync call; reads one small file.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn meals_open(documents_dir: String) -> MealListResponse {
    let repo = match FileMealRepository::in_documents_dir(documents_dir.as_str()) {
        Ok(repo) => repo,
        Err(err) => {
            return MealListResponse {
                ok: false,
                message: format!("meals_open failed: {err}"),
                items: Vec::new(),
            };
        }
    };

    let store = MealStore::open(repo);
    let message = match store.origin() {
        StoreOrigin::Loaded => format!("Loaded {} meal(s).", store.len()),
        StoreOrigin::Seeded => "No saved meals; showing samples.".to_string(),
        StoreOrigin::Empty => "No meals.".to_string(),
    };
    let items = to_items(&store);

    *lock_session() = Some(store);
    MealListResponse {
        ok: true,
        message,
        items,
    }
}

/// Returns the current meal list.
#[flutter_rust_bridge::frb(sync)]
pub fn meals_list() -> MealListResponse {
    match lock_session().as_ref() {
        Some(store) => MealListResponse {
            ok: true,
            message: format!("{} meal(s).", store.len()),
            items: to_items(store),
        },
        None => MealListResponse {
            ok: false,
            message: session_missing("meals_list"),
            items: Vec::new(),
        },
    }
}

/// Appends a new meal built from form input.
#[flutter_rust_bridge::frb(sync)]
pub fn meal_add(name: String, image: Option<Vec<u8>>, rating: i32) -> MealActionResponse {
    with_session("meal_add", |store| {
        let meal = Meal::try_new(name, image, rating).map_err(|err| err.to_string())?;
        Ok(store.insert(meal))
    })
}

/// Replaces the meal at `index` with one built from form input.
#[flutter_rust_bridge::frb(sync)]
pub fn meal_update(
    index: u32,
    name: String,
    image: Option<Vec<u8>>,
    rating: i32,
) -> MealActionResponse {
    with_session("meal_update", |store| {
        let meal = Meal::try_new(name, image, rating).map_err(|err| err.to_string())?;
        Ok(store.replace(index as usize, meal))
    })
}

/// Deletes the meal at `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn meal_delete(index: u32) -> MealActionResponse {
    with_session("meal_delete", |store| Ok(store.remove_at(index as usize)))
}

fn lock_session() -> MutexGuard<'static, Option<Session>> {
    SESSION.lock().unwrap_or_else(PoisonError::into_inner)
}

fn session_missing(call: &str) -> String {
    format!("{call} failed: meals_open has not been called")
}

/// Runs a mutation against the open session and shapes the response.
///
/// `f` returns `Err(message)` when it rejected the input before touching
/// the store, or the store's own outcome otherwise.
fn with_session(
    call: &str,
    f: impl FnOnce(&mut Session) -> Result<Result<(), StoreError>, String>,
) -> MealActionResponse {
    let mut guard = lock_session();
    let Some(store) = guard.as_mut() else {
        return MealActionResponse {
            ok: false,
            message: session_missing(call),
            items: Vec::new(),
        };
    };

    let (ok, message) = match f(&mut *store) {
        Err(message) => (false, format!("{call} failed: {message}")),
        Ok(Ok(())) => (true, "Saved.".to_string()),
        Ok(Err(err @ StoreError::IndexOutOfRange { .. })) => {
            (false, format!("{call} failed: {err}"))
        }
        Ok(Err(err @ StoreError::Persist(_))) => {
            warn!("event={call} module=ffi status=save_failed");
            (true, format!("{call} applied, {err}"))
        }
    };

    MealActionResponse {
        ok,
        message,
        items: to_items(store),
    }
}

fn to_items(store: &Session) -> Vec<MealItem> {
    store.meals().iter().map(MealItem::from).collect()
}
