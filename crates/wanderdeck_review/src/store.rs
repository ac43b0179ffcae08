//! # Progress Stores
//!
//! Where the scheduler's state map lives between sessions.
//!
//! The map is always read and written as a whole. A store never hands back
//! part of a map: a load either yields every record or fails.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tempfile::NamedTempFile;

use crate::error::{ReviewError, ReviewResult};
use crate::item::ItemId;
use crate::state::ReviewState;

/// Identifier to state mapping, ordered by identifier.
pub type StateMap = BTreeMap<ItemId, ReviewState>;

/// Whole-map persistence backend.
pub trait ProgressStore {
    /// Reads the full map.
    ///
    /// A store with no prior history returns an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::LoadFailure`] if stored data exists but cannot be read.
    fn load(&self) -> ReviewResult<StateMap>;

    /// Replaces the stored map with `states`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::PersistFailure`] if the write did not complete.
    fn save(&self, states: &StateMap) -> ReviewResult<()>;
}

impl<S: ProgressStore + ?Sized> ProgressStore for Box<S> {
    fn load(&self) -> ReviewResult<StateMap> {
        (**self).load()
    }

    fn save(&self, states: &StateMap) -> ReviewResult<()> {
        (**self).save(states)
    }
}

/// JSON file on disk.
///
/// Saves write a temporary file next to the target, sync it and rename it
/// over the target, so readers see either the old map or the new one.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// File name used when none is configured.
    pub const DEFAULT_FILE_NAME: &'static str = "srs_progress.json";

    /// Creates a store backed by `path`. Nothing is touched until the first
    /// load or save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_failure(&self, reason: impl Display) -> ReviewError {
        ReviewError::LoadFailure {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn persist_failure(&self, reason: impl Display) -> ReviewError {
        ReviewError::PersistFailure {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FILE_NAME)
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> ReviewResult<StateMap> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(StateMap::new()),
            Err(err) => return Err(self.load_failure(err)),
        };

        serde_json::from_reader(BufReader::new(file)).map_err(|err| self.load_failure(err))
    }

    fn save(&self, states: &StateMap) -> ReviewResult<()> {
        self.replace_contents(|out| {
            serde_json::to_writer_pretty(out, states).map_err(io::Error::from)
        })?;

        tracing::debug!(path = %self.path.display(), items = states.len(), "saved review progress");
        Ok(())
    }
}

impl JsonFileStore {
    /// Replaces the file with whatever `write` produces.
    ///
    /// Output goes to a temporary file in the same directory, which is
    /// synced and renamed over the target only after `write` succeeds. On
    /// any failure the target is left as it was and the temporary file is
    /// removed.
    fn replace_contents<F>(&self, write: F) -> ReviewResult<()>
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()>,
    {
        let dir = self.parent_dir();
        fs::create_dir_all(dir).map_err(|err| self.persist_failure(err))?;

        let mut temp = NamedTempFile::new_in(dir).map_err(|err| self.persist_failure(err))?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            write(&mut writer).map_err(|err| self.persist_failure(err))?;
            writer.flush().map_err(|err| self.persist_failure(err))?;
        }
        temp.as_file()
            .sync_all()
            .map_err(|err| self.persist_failure(err))?;
        temp.persist(&self.path)
            .map_err(|err| self.persist_failure(err.error))?;
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<StateMap>,
    saves: AtomicUsize,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `states`.
    #[must_use]
    pub fn with_states(states: StateMap) -> Self {
        Self {
            snapshot: Mutex::new(states),
            saves: AtomicUsize::new(0),
        }
    }

    /// Returns a copy of the last saved map.
    #[must_use]
    pub fn snapshot(&self) -> StateMap {
        self.snapshot.lock().clone()
    }

    /// Returns how many saves have completed.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> ReviewResult<StateMap> {
        Ok(self.snapshot())
    }

    fn save(&self, states: &StateMap) -> ReviewResult<()> {
        self.snapshot.lock().clone_from(states);
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
