//! Note repository contracts and key-value backed implementation.
//!
//! # Responsibility
//! - Persist the whole note collection as one JSON blob under a single key.
//! - Recover from unreadable blobs by serving the built-in collection.
//!
//! # Invariants
//! - Timestamps are written as RFC 3339 strings and read back losslessly.
//! - A missing or corrupt blob never surfaces as a read error to callers.
//! - Write failures are surfaced as `StorageWrite`, not swallowed.
//! - Loaded notes are repaired on read, so a stored note that breaks the write
//!   invariants never blocks writes to the rest of the collection.

use crate::db::{DbError, KeyValueStore};
use crate::model::defaults::default_notes;
use crate::model::note::{Note, NoteDraft, NoteId, NoteValidationError};
use chrono::{DateTime, Utc};
use log::{debug, error, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized collection.
pub const NOTES_STORAGE_KEY: &str = "calnote_notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence operations.
#[derive(Debug)]
pub enum RepoError {
    NotFound(NoteId),
    DuplicateId(NoteId),
    Validation(NoteValidationError),
    /// Persisted blob could not be read or decoded.
    StorageRead(String),
    /// Collection could not be encoded or written.
    StorageWrite(String),
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::DuplicateId(id) => write!(f, "duplicate note id: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::StorageRead(message) => write!(f, "failed to read notes: {message}"),
            Self::StorageWrite(message) => write!(f, "failed to save notes: {message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NoteValidationError> for RepoError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Where the last loaded collection came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionSource {
    /// Decoded from the persisted blob.
    Stored,
    /// No blob yet; built-in collection served.
    Default,
    /// Blob unreadable; built-in collection served instead.
    Recovered(String),
}

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: NOTES_STORAGE_KEY.to_string(),
        }
    }
}

/// Repository interface for the note collection.
pub trait NoteRepository {
    /// Returns the whole collection in stored order.
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
    /// Gets one note by id.
    fn get_note(&self, id: &NoteId) -> RepoResult<Option<Note>>;
    /// Appends a new note with a generated id and `now` stamps.
    fn create_note(&mut self, draft: NoteDraft, now: DateTime<Utc>) -> RepoResult<Note>;
    /// Replaces the stored note sharing `note.id`.
    fn update_note(&mut self, note: Note) -> RepoResult<Note>;
    /// Removes exactly one note.
    fn delete_note(&mut self, id: &NoteId) -> RepoResult<()>;
    /// Removes every listed note that exists; returns the removed count.
    fn delete_notes(&mut self, ids: &[NoteId]) -> RepoResult<usize>;
    /// Overwrites the whole collection.
    fn replace_all(&mut self, notes: Vec<Note>) -> RepoResult<()>;
    /// Drops the persisted blob so the built-in collection is served again.
    fn reset(&mut self) -> RepoResult<()>;
}

/// Note repository persisting through any [`KeyValueStore`].
pub struct KvNoteRepository<S: KeyValueStore> {
    store: S,
    config: StoreConfig,
}

impl<S: KeyValueStore> KvNoteRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, StoreConfig::default())
    }

    pub fn with_config(store: S, config: StoreConfig) -> Self {
        Self { store, config }
    }

    /// Consumes the repository and returns the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Reads the blob strictly, without the default fallback.
    ///
    /// Returns `Ok(None)` when nothing has been persisted yet.
    ///
    /// # Errors
    /// - `StorageRead` when the key cannot be read or the blob does not decode.
    pub fn try_load(&self) -> RepoResult<Option<Vec<Note>>> {
        let raw = self
            .store
            .get_item(&self.config.storage_key)
            .map_err(|err| RepoError::StorageRead(err.to_string()))?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let mut notes = decode_notes(&raw)?;
        let repaired = repair_notes(&mut notes);
        if repaired > 0 {
            warn!(
                "event=store_read module=repo status=repaired key={} notes={} repaired={repaired}",
                self.config.storage_key,
                notes.len()
            );
        }
        Ok(Some(notes))
    }

    /// Loads the collection and reports which source served it.
    pub fn load_with_source(&self) -> (Vec<Note>, CollectionSource) {
        match self.try_load() {
            Ok(Some(notes)) => (notes, CollectionSource::Stored),
            Ok(None) => {
                debug!(
                    "event=store_read module=repo status=default key={}",
                    self.config.storage_key
                );
                (default_notes(), CollectionSource::Default)
            }
            Err(err) => {
                warn!(
                    "event=store_read module=repo status=recovered key={} error={}",
                    self.config.storage_key, err
                );
                (default_notes(), CollectionSource::Recovered(err.to_string()))
            }
        }
    }

    fn load(&self) -> Vec<Note> {
        self.load_with_source().0
    }

    fn save(&mut self, notes: &[Note]) -> RepoResult<()> {
        check_collection(notes)?;
        let encoded = encode_notes(notes)?;
        self.store
            .set_item(&self.config.storage_key, &encoded)
            .map_err(|err| {
                error!(
                    "event=store_write module=repo status=error key={} notes={} error={}",
                    self.config.storage_key,
                    notes.len(),
                    err
                );
                RepoError::StorageWrite(err.to_string())
            })?;
        debug!(
            "event=store_write module=repo status=ok key={} notes={}",
            self.config.storage_key,
            notes.len()
        );
        Ok(())
    }
}

impl<S: KeyValueStore> NoteRepository for KvNoteRepository<S> {
    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        Ok(self.load())
    }

    fn get_note(&self, id: &NoteId) -> RepoResult<Option<Note>> {
        Ok(self.load().into_iter().find(|note| &note.id == id))
    }

    fn create_note(&mut self, draft: NoteDraft, now: DateTime<Utc>) -> RepoResult<Note> {
        let mut notes = self.load();
        let note = Note::from_draft(draft, now);
        if notes.iter().any(|existing| existing.id == note.id) {
            return Err(RepoError::DuplicateId(note.id));
        }
        notes.push(note.clone());
        self.save(&notes)?;
        Ok(note)
    }

    fn update_note(&mut self, note: Note) -> RepoResult<Note> {
        note.validate()?;
        let mut notes = self.load();
        let slot = notes
            .iter_mut()
            .find(|existing| existing.id == note.id)
            .ok_or_else(|| RepoError::NotFound(note.id.clone()))?;
        *slot = note.clone();
        self.save(&notes)?;
        Ok(note)
    }

    fn delete_note(&mut self, id: &NoteId) -> RepoResult<()> {
        let mut notes = self.load();
        let before = notes.len();
        notes.retain(|note| &note.id != id);
        if notes.len() == before {
            return Err(RepoError::NotFound(id.clone()));
        }
        self.save(&notes)
    }

    fn delete_notes(&mut self, ids: &[NoteId]) -> RepoResult<usize> {
        let targets: HashSet<&NoteId> = ids.iter().collect();
        let mut notes = self.load();
        let before = notes.len();
        notes.retain(|note| !targets.contains(&note.id));
        let removed = before - notes.len();
        if removed > 0 {
            self.save(&notes)?;
        }
        Ok(removed)
    }

    fn replace_all(&mut self, notes: Vec<Note>) -> RepoResult<()> {
        self.save(&notes)
    }

    fn reset(&mut self) -> RepoResult<()> {
        self.store
            .remove_item(&self.config.storage_key)
            .map_err(|err| RepoError::StorageWrite(err.to_string()))
    }
}

/// Encodes a collection into the persisted JSON layout.
pub fn encode_notes(notes: &[Note]) -> RepoResult<String> {
    serde_json::to_string(notes).map_err(|err| RepoError::StorageWrite(err.to_string()))
}

/// Decodes the persisted JSON layout.
pub fn decode_notes(raw: &str) -> RepoResult<Vec<Note>> {
    serde_json::from_str(raw).map_err(|err| RepoError::StorageRead(err.to_string()))
}

/// Repairs notes that violate write invariants; returns how many changed.
///
/// Duplicate ids after the first occurrence receive a generated id so no
/// note is lost.
pub fn repair_notes(notes: &mut [Note]) -> usize {
    let mut seen: HashSet<NoteId> = HashSet::with_capacity(notes.len());
    let mut repaired = 0;
    for note in notes.iter_mut() {
        let mut changed = note.repair();
        if !seen.insert(note.id.clone()) {
            note.id = NoteId::generate();
            seen.insert(note.id.clone());
            changed = true;
        }
        if changed {
            repaired += 1;
        }
    }
    repaired
}

fn check_collection(notes: &[Note]) -> RepoResult<()> {
    let mut seen = HashSet::with_capacity(notes.len());
    for note in notes {
        note.validate()?;
        if !seen.insert(&note.id) {
            return Err(RepoError::DuplicateId(note.id.clone()));
        }
    }
    Ok(())
}
