//! Persistence of the [`AppData`] blob
//!
//! The whole tracker state is one JSON document under a fixed storage key. Read and
//! write failures are never fatal: [`load_or_default`] falls back to the seed data
//! and [`save_logged`] reports the failure and carries on.

pub mod export;
pub mod import;
pub mod share;

use crate::core::models::AppData;
use crate::{error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

pub use export::export_json;
pub use import::{import_json, ImportError};
pub use share::{compress, decompress, payload_from_url, share_url, ShareData, ShareError, MAX_SHARE_URL_LEN};

/// Storage key; the JSON file is named after it
pub const STORAGE_KEY: &str = "academicNavigatorData";

/// Errors reading or writing the stored blob
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure
    #[error("storage I/O error at {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The stored blob is not valid tracker JSON
    #[error("stored data is corrupt: {0}")]
    Json(#[from] serde_json::Error),

    /// The stored blob parses but holds no semesters
    #[error("stored data contains no semesters")]
    NoSemesters,
}

/// Parse a stored blob, rejecting one that breaks the at-least-one-semester rule
fn parse_blob(raw: &str) -> StoreResult<AppData> {
    let data: AppData = serde_json::from_str(raw)?;
    if data.semesters.is_empty() {
        return Err(StoreError::NoSemesters);
    }
    Ok(data)
}

/// Result of a storage operation
pub type StoreResult<T> = Result<T, StoreError>;

/// Somewhere an [`AppData`] blob can be kept between runs
pub trait DataStore {
    /// Read the stored blob; `Ok(None)` when nothing has been saved yet
    ///
    /// # Errors
    /// I/O failures and corrupt JSON.
    fn load(&self) -> StoreResult<Option<AppData>>;

    /// Replace the stored blob
    ///
    /// # Errors
    /// I/O or serialization failures.
    fn save(&self, data: &AppData) -> StoreResult<()>;
}

/// Blob stored as a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by an explicit file path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/academicNavigatorData.json`
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{STORAGE_KEY}.json")))
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl DataStore for JsonFileStore {
    fn load(&self) -> StoreResult<Option<AppData>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        parse_blob(&content).map(Some)
    }

    fn save(&self, data: &AppData) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }
        let json = serde_json::to_string_pretty(data)?;

        // Write next to the target and rename so a crash never leaves half a file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }
}

/// In-memory store for embedding hosts and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding raw text, e.g. to simulate a corrupt blob
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            data: Mutex::new(Some(raw.into())),
        }
    }

    /// The raw stored text, if any
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.data.lock().ok().and_then(|guard| guard.clone())
    }
}

impl DataStore for MemoryStore {
    fn load(&self) -> StoreResult<Option<AppData>> {
        match self.raw() {
            Some(raw) => parse_blob(&raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, data: &AppData) -> StoreResult<()> {
        let json = serde_json::to_string(data)?;
        if let Ok(mut guard) = self.data.lock() {
            *guard = Some(json);
        }
        Ok(())
    }
}

/// Load the stored data, falling back to the seed curriculum
///
/// Nothing stored yet, an unreadable store and a corrupt blob all yield
/// [`AppData::default`]; failures are logged.
pub fn load_or_default(store: &dyn DataStore) -> AppData {
    match store.load() {
        Ok(Some(data)) => {
            info!("Loaded {} semesters from storage", data.semesters.len());
            data
        }
        Ok(None) => {
            info!("No stored data, starting from the default curriculum");
            AppData::default()
        }
        Err(e) => {
            error!("Failed to load stored data, using defaults: {e}");
            AppData::default()
        }
    }
}

/// Save `data`, logging instead of failing
///
/// Returns whether the write succeeded.
pub fn save_logged(store: &dyn DataStore, data: &AppData) -> bool {
    match store.save(data) {
        Ok(()) => {
            info!("Saved tracker data");
            true
        }
        Err(e) => {
            error!("Failed to save tracker data: {e}");
            false
        }
    }
}
