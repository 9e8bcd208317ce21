//! Persistence gateway for the record state

use crate::core::error::StoreError;
use crate::core::models::RecordState;
use crate::{debug, info, warn};
use serde::Serialize;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

/// Anything that can load and save the whole record state
pub trait RecordStore {
    /// Load the persisted state
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read or holds malformed data
    fn load(&self) -> Result<RecordState, StoreError>;

    /// Persist the state as given
    ///
    /// # Errors
    /// Returns an error if the backend cannot be written
    fn save(&self, state: &RecordState) -> Result<(), StoreError>;
}

/// Records file stored as pretty-printed JSON
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the records file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the records file exists
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// First-run initialization: write a default state if the file is missing
    ///
    /// # Returns
    /// `true` if the file was created
    ///
    /// # Errors
    /// Returns an error if the default file cannot be written
    pub fn initialize(&self) -> Result<bool, StoreError> {
        if self.exists() {
            return Ok(false);
        }
        warn!(
            "Records file not found, creating {} with default structure",
            self.path.display()
        );
        self.save(&RecordState::default())?;
        Ok(true)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> StoreError {
        StoreError::Json {
            path: self.path.clone(),
            source,
        }
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> Result<RecordState, StoreError> {
        debug!("Loading records from {}", self.path.display());

        if !self.exists() {
            info!("Records file does not exist, starting from an empty record");
            return Ok(RecordState::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let state: RecordState =
            serde_json::from_str(&content).map_err(|e| self.json_error(e))?;
        if let Some((exam, reason)) = state.first_defect() {
            return Err(StoreError::InvalidRecord {
                path: self.path.clone(),
                name: exam.name.clone(),
                reason,
            });
        }

        info!(
            "Loaded {} exams from {}",
            state.exams.len(),
            self.path.display()
        );
        Ok(state)
    }

    fn save(&self, state: &RecordState) -> Result<(), StoreError> {
        debug!("Saving records to {}", self.path.display());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        state
            .serialize(&mut serializer)
            .map_err(|e| self.json_error(e))?;

        fs::write(&self.path, buf).map_err(|e| self.io_error(e))?;

        info!("Saved {} exams", state.exams.len());
        Ok(())
    }
}

/// In-memory store; nothing touches the filesystem
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RefCell<RecordState>,
    saves: RefCell<usize>,
}

impl MemoryStore {
    /// Create a store pre-filled with a state
    #[must_use]
    pub const fn new(state: RecordState) -> Self {
        Self {
            state: RefCell::new(state),
            saves: RefCell::new(0),
        }
    }

    /// Copy of the last saved state
    #[must_use]
    pub fn snapshot(&self) -> RecordState {
        self.state.borrow().clone()
    }

    /// Number of times `save` was called
    #[must_use]
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Result<RecordState, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, state: &RecordState) -> Result<(), StoreError> {
        self.state.replace(state.clone());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn load(&self) -> Result<RecordState, StoreError> {
        (**self).load()
    }

    fn save(&self, state: &RecordState) -> Result<(), StoreError> {
        (**self).save(state)
    }
}
