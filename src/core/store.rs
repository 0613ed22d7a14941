//! The file store: owned collection of records with write-through persistence

use std::collections::HashSet;

use thiserror::Error;

use super::record::{self, FileId, FileRecord};
use super::storage::{KeyValueStore, StorageError};

/// Slot holding the serialized collection
pub const FILES_KEY: &str = "codeFiles";

/// Errors from a store mutation. The in-memory state is unchanged when one is returned.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to serialize files: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("no file ids left after {0}")]
    IdsExhausted(u64),
}

/// Read the persisted collection. Missing or corrupt state loads as empty.
pub fn load(storage: &impl KeyValueStore) -> Vec<FileRecord> {
    let payload = match storage.get(FILES_KEY) {
        Ok(Some(payload)) => payload,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Could not read saved files, starting empty: {}", e);
            return Vec::new();
        }
    };

    match record::parse(&payload) {
        Ok(files) => {
            let mut seen = HashSet::new();
            let total = files.len();
            let files: Vec<_> = files.into_iter().filter(|f| seen.insert(f.id)).collect();
            if files.len() != total {
                tracing::warn!("Dropped {} records with duplicate ids", total - files.len());
            }
            files
        }
        Err(e) => {
            tracing::warn!("Saved files are corrupt, starting empty: {}", e);
            Vec::new()
        }
    }
}

/// Owns the file records and the active selection
#[derive(Debug)]
pub struct FileStore<S> {
    storage: S,
    files: Vec<FileRecord>,
    active: Option<FileId>,
    /// Highest id handed out or loaded
    last_id: u64,
}

impl<S: KeyValueStore> FileStore<S> {
    /// Load persisted files and select the first one
    pub fn open(storage: S) -> Self {
        let files = load(&storage);
        let active = files.first().map(|f| f.id);
        let last_id = files.iter().map(|f| f.id.0).max().unwrap_or(0);
        tracing::info!("Loaded {} files", files.len());

        Self {
            storage,
            files,
            active,
            last_id,
        }
    }

    /// All records, most recent first
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, id: FileId) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn active_id(&self) -> Option<FileId> {
        self.active
    }

    /// The selected record
    pub fn active(&self) -> Option<&FileRecord> {
        self.active.and_then(|id| self.get(id))
    }

    /// Change the selection. Unknown ids clear it.
    pub fn set_active(&mut self, id: Option<FileId>) {
        self.active = id.filter(|id| self.get(*id).is_some());
        tracing::debug!("Active file: {:?}", self.active);
    }

    /// Create an empty file. Blank names are ignored.
    pub fn create(&mut self, name: &str) -> Result<Option<FileRecord>, StoreError> {
        self.insert(name, "")
    }

    /// Add a file with content, as from an import
    pub fn upload(&mut self, name: &str, content: &str) -> Result<Option<FileRecord>, StoreError> {
        self.insert(name, content)
    }

    /// Store the draft's content into the matching record
    pub fn save(&mut self, draft: &FileRecord) -> Result<Option<FileRecord>, StoreError> {
        if self.active.is_none() {
            return Ok(None);
        }
        let Some(index) = self.position(draft.id) else {
            return Ok(None);
        };

        let mut files = self.files.clone();
        files[index].code = draft.code.clone();
        files[index].modified = record::now();
        self.commit(files)?;

        let saved = self.files[index].clone();
        tracing::info!("Saved file: {} ({})", saved.name, saved.id);
        Ok(Some(saved))
    }

    /// Remove a record, moving the selection to the first remaining one if needed
    pub fn delete(&mut self, id: FileId) -> Result<Option<FileRecord>, StoreError> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let mut files = self.files.clone();
        let removed = files.remove(index);
        self.commit(files)?;

        if self.active == Some(id) {
            self.active = self.files.first().map(|f| f.id);
        }
        tracing::info!("Deleted file: {} ({})", removed.name, removed.id);
        Ok(Some(removed))
    }

    fn insert(&mut self, name: &str, content: &str) -> Result<Option<FileRecord>, StoreError> {
        if name.trim().is_empty() {
            tracing::debug!("Ignoring file with blank name");
            return Ok(None);
        }

        let record = FileRecord::new(self.next_id()?, name, content);
        let mut files = Vec::with_capacity(self.files.len() + 1);
        files.push(record.clone());
        files.extend(self.files.iter().cloned());
        self.commit(files)?;

        self.active = Some(record.id);
        tracing::info!(
            "Added file: {} ({}, {})",
            record.name,
            record.id,
            record.language
        );
        Ok(Some(record))
    }

    fn position(&self, id: FileId) -> Option<usize> {
        self.files.iter().position(|f| f.id == id)
    }

    fn next_id(&mut self) -> Result<FileId, StoreError> {
        let next = self
            .last_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted(self.last_id))?;
        let millis = u64::try_from(record::now().timestamp_millis()).unwrap_or(0);
        self.last_id = millis.max(next);
        Ok(FileId(self.last_id))
    }

    /// Persist `files`, then adopt them as the in-memory collection
    fn commit(&mut self, files: Vec<FileRecord>) -> Result<(), StoreError> {
        let payload = record::serialize(&files)?;
        if let Err(e) = self.storage.set(FILES_KEY, &payload) {
            tracing::error!("Failed to persist files: {}", e);
            return Err(e.into());
        }
        self.files = files;
        Ok(())
    }
}
