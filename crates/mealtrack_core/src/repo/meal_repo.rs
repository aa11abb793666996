//! Meal list repository contract and single-file implementation.
//!
//! # Responsibility
//! - Encode/decode the full ordered meal list as one JSON blob.
//! - Read and atomically replace the blob at a fixed location.
//!
//! # Invariants
//! - Writes go to a temp file in the target directory and are renamed over
//!   the blob, so a crash never leaves a truncated file behind.
//! - Blob `version` must equal `BLOB_VERSION`; there is no migration path.
//! - Logging is metadata-only: counts, durations, paths. Never meal content.

use crate::model::meal::Meal;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// File name of the blob inside the application documents directory.
pub const MEALS_FILE_NAME: &str = "meals";
/// Format marker written into every blob.
pub const BLOB_VERSION: u32 = 1;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for meal list persistence.
#[derive(Debug)]
pub enum RepoError {
    /// No blob has been written yet.
    NotFound(PathBuf),
    Io(io::Error),
    /// Blob exists but is corrupt, has the wrong version, or holds an
    /// invalid record.
    Decode(String),
    Encode(String),
    InvalidPath(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "no stored meals at `{}`", path.display()),
            Self::Io(err) => write!(f, "{err}"),
            Self::Decode(message) => write!(f, "invalid stored meal data: {message}"),
            Self::Encode(message) => write!(f, "failed to encode meals: {message}"),
            Self::InvalidPath(message) => write!(f, "invalid storage path: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for RepoError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Whole-list persistence contract.
pub trait MealRepository {
    /// Reads and decodes every stored meal, in stored order.
    fn load_all(&self) -> RepoResult<Vec<Meal>>;
    /// Replaces the stored list with `meals`.
    fn save_all(&self, meals: &[Meal]) -> RepoResult<()>;
}

#[derive(Serialize)]
struct BlobOut<'a> {
    version: u32,
    meals: &'a [Meal],
}

#[derive(Deserialize)]
struct BlobIn {
    version: u32,
    meals: Vec<Meal>,
}

/// Encodes an ordered meal list into blob bytes.
pub fn encode_blob(meals: &[Meal]) -> RepoResult<Vec<u8>> {
    serde_json::to_vec(&BlobOut {
        version: BLOB_VERSION,
        meals,
    })
    .map_err(|err| RepoError::Encode(err.to_string()))
}

/// Decodes blob bytes into an ordered meal list.
///
/// # Errors
/// - `Decode` on malformed JSON, a missing required field, an invalid image
///   payload, a record failing `Meal` validation, or a version mismatch.
pub fn decode_blob(bytes: &[u8]) -> RepoResult<Vec<Meal>> {
    let blob: BlobIn =
        serde_json::from_slice(bytes).map_err(|err| RepoError::Decode(err.to_string()))?;
    if blob.version != BLOB_VERSION {
        return Err(RepoError::Decode(format!(
            "blob version mismatch: expected {BLOB_VERSION}, got {}",
            blob.version
        )));
    }
    Ok(blob.meals)
}

/// Blob-file backed meal repository.
#[derive(Debug, Clone)]
pub struct FileMealRepository {
    path: PathBuf,
}

impl FileMealRepository {
    /// Uses `path` as the blob location.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `<documents_dir>/meals` as the blob location.
    ///
    /// # Errors
    /// - `InvalidPath` when `documents_dir` is empty or not absolute.
    pub fn in_documents_dir(documents_dir: &str) -> RepoResult<Self> {
        let trimmed = documents_dir.trim();
        if trimmed.is_empty() {
            return Err(RepoError::InvalidPath("documents_dir cannot be empty".to_string()));
        }
        let dir = Path::new(trimmed);
        if !dir.is_absolute() {
            return Err(RepoError::InvalidPath(format!(
                "documents_dir must be an absolute path, got `{trimmed}`"
            )));
        }
        Ok(Self::new(dir.join(MEALS_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomically(&self, bytes: &[u8]) -> RepoResult<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut staged = NamedTempFile::new_in(parent)?;
        staged.write_all(bytes)?;
        staged.as_file().sync_all()?;
        staged
            .persist(&self.path)
            .map_err(|err| RepoError::Io(err.error))?;
        sync_dir(parent)?;
        Ok(())
    }
}

// Flushes the rename itself; without this the new directory entry can be
// lost on crash even though the file contents were synced.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

impl MealRepository for FileMealRepository {
    fn load_all(&self) -> RepoResult<Vec<Meal>> {
        let started_at = Instant::now();

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(
                    "event=meals_load module=repo status=missing path={}",
                    self.path.display()
                );
                return Err(RepoError::NotFound(self.path.clone()));
            }
            Err(err) => {
                error!(
                    "event=meals_load module=repo status=error duration_ms={} error_code=read_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        match decode_blob(&bytes) {
            Ok(meals) => {
                info!(
                    "event=meals_load module=repo status=ok count={} bytes={} duration_ms={}",
                    meals.len(),
                    bytes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(meals)
            }
            Err(err) => {
                error!(
                    "event=meals_load module=repo status=error duration_ms={} error_code=decode_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn save_all(&self, meals: &[Meal]) -> RepoResult<()> {
        let started_at = Instant::now();
        let bytes = encode_blob(meals)?;

        match self.write_atomically(&bytes) {
            Ok(()) => {
                info!(
                    "event=meals_save module=repo status=ok count={} bytes={} duration_ms={}",
                    meals.len(),
                    bytes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=meals_save module=repo status=error count={} duration_ms={} error_code=write_failed error={}",
                    meals.len(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
