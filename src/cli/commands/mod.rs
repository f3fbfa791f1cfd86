//! CLI command handlers for `navigator`.
//!
//! Each subcommand loads the stored data, applies one action and saves the
//! result. Handlers return a message on failure; `main` prints it and exits 1.

pub mod attendance;
pub mod config;
pub mod data;
pub mod report;
pub mod semester;
pub mod subject;
pub mod summary;
pub mod timetable;

use academic_navigator::config::Config;
use academic_navigator::core::models::{AppData, Semester, SemesterId};
use academic_navigator::core::store::{load_or_default, save_logged, JsonFileStore};

/// Outcome of a command handler
pub type CommandResult = Result<(), String>;

/// Stored data for one invocation plus the store it came from
pub struct Session {
    store: JsonFileStore,
    /// Data as loaded, or as last committed
    pub data: AppData,
}

impl Session {
    /// Open the configured data file, falling back to the seed data
    pub fn open(config: &Config) -> Self {
        let store = if config.paths.data_file.is_empty() {
            JsonFileStore::in_dir(Config::get_navigator_dir())
        } else {
            JsonFileStore::new(&config.paths.data_file)
        };
        Self::with_store(store)
    }

    /// Open an explicit store
    pub fn with_store(store: JsonFileStore) -> Self {
        let data = load_or_default(&store);
        Self { store, data }
    }

    /// Persist `next` and make it the session's data
    ///
    /// # Errors
    /// The store could not be written.
    pub fn commit(&mut self, next: AppData) -> CommandResult {
        if save_logged(&self.store, &next) {
            self.data = next;
            Ok(())
        } else {
            Err(format!("Failed to save data to {}", self.store.path().display()))
        }
    }

    /// Requested semester id, or the current one
    pub fn semester_id(&self, requested: Option<SemesterId>) -> SemesterId {
        requested.unwrap_or(self.data.current_semester)
    }

    /// Requested semester, or the current one
    ///
    /// # Errors
    /// No semester with that id.
    pub fn semester(&self, requested: Option<SemesterId>) -> Result<&Semester, String> {
        let id = self.semester_id(requested);
        self.data
            .semester(id)
            .ok_or_else(|| format!("semester {id} does not exist"))
    }
}
