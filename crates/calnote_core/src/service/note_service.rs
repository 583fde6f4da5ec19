//! Note use-case service.
//!
//! # Responsibility
//! - Provide create/edit/favorite/tag/delete APIs over a note repository.
//! - Stamp `modified_at` on every mutation through an injected clock.
//! - Run collection queries and dashboard statistics.
//!
//! # Invariants
//! - Every mutation stamps `modified_at`, never earlier than `created_at`.
//! - Tags are trimmed and deduplicated case-sensitively; blank tags are rejected.
//! - Single-note mutations on an absent id fail with `NoteNotFound`.

use crate::model::note::{normalize_category, normalize_tags, Note, NoteDraft, NoteId};
use crate::repo::note_repo::{NoteRepository, RepoError, RepoResult};
use crate::search::query::{run_query, NotesQuery, ScoredNote};
use crate::service::clock::{Clock, SystemClock};
use crate::service::stats::{dashboard_stats, DashboardStats};
use log::info;
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Tag input contains a blank value.
    InvalidTag(String),
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTag(value) => write!(f, "invalid tag: `{value}`"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service stamping with system local time.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: NoteRepository, C: Clock> NoteService<R, C> {
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Borrows the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Creates one note with a generated id.
    pub fn create_note(&mut self, mut draft: NoteDraft) -> Result<Note, NoteServiceError> {
        draft.tags = checked_tags(draft.tags)?;
        let note = self.repo.create_note(draft, self.clock.now_utc())?;
        info!("event=note_create module=service status=ok note_id={}", note.id);
        Ok(note)
    }

    /// Replaces title and content.
    pub fn update_content(
        &mut self,
        id: &NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Note, NoteServiceError> {
        let title = title.into();
        let content = content.into();
        self.mutate(id, |note| {
            note.title = title;
            note.content = content;
        })
    }

    /// Replaces the whole tag set.
    pub fn set_tags(&mut self, id: &NoteId, tags: Vec<String>) -> Result<Note, NoteServiceError> {
        let tags = checked_tags(tags)?;
        self.mutate(id, |note| note.tags = tags)
    }

    /// Sets or clears the category; blank input clears.
    pub fn set_category(
        &mut self,
        id: &NoteId,
        category: Option<&str>,
    ) -> Result<Note, NoteServiceError> {
        let category = category.and_then(normalize_category);
        self.mutate(id, |note| note.category = category)
    }

    /// Flips the favorite flag.
    pub fn toggle_favorite(&mut self, id: &NoteId) -> Result<Note, NoteServiceError> {
        self.mutate(id, |note| note.is_favorite = !note.is_favorite)
    }

    /// Marks every listed note as favorite in one write.
    ///
    /// Unknown ids and notes that already are favorites are skipped; returns
    /// the number of notes changed.
    pub fn favorite_notes(&mut self, ids: &[NoteId]) -> Result<usize, NoteServiceError> {
        let targets: HashSet<&NoteId> = ids.iter().collect();
        let now = self.clock.now_utc();
        let mut notes = self.repo.list_notes()?;
        let mut changed = 0;
        for note in notes
            .iter_mut()
            .filter(|note| targets.contains(&note.id) && !note.is_favorite)
        {
            note.is_favorite = true;
            note.touch(now);
            changed += 1;
        }
        if changed > 0 {
            self.repo.replace_all(notes)?;
        }
        info!(
            "event=note_bulk_favorite module=service status=ok requested={} changed={changed}",
            ids.len()
        );
        Ok(changed)
    }

    /// Deletes one note.
    pub fn delete_note(&mut self, id: &NoteId) -> Result<(), NoteServiceError> {
        self.repo.delete_note(id)?;
        info!("event=note_delete module=service status=ok note_id={id}");
        Ok(())
    }

    /// Deletes every listed note that exists; returns the removed count.
    pub fn delete_notes(&mut self, ids: &[NoteId]) -> Result<usize, NoteServiceError> {
        let removed = self.repo.delete_notes(ids)?;
        info!(
            "event=note_bulk_delete module=service status=ok requested={} removed={removed}",
            ids.len()
        );
        Ok(removed)
    }

    pub fn get_note(&self, id: &NoteId) -> RepoResult<Option<Note>> {
        self.repo.get_note(id)
    }

    pub fn list_notes(&self) -> RepoResult<Vec<Note>> {
        self.repo.list_notes()
    }

    /// Distinct tags across the collection, sorted.
    pub fn list_tags(&self) -> RepoResult<Vec<String>> {
        let tags: BTreeSet<String> = self
            .repo
            .list_notes()?
            .into_iter()
            .flat_map(|note| note.tags)
            .collect();
        Ok(tags.into_iter().collect())
    }

    /// Runs a query against the current collection and clock.
    pub fn query(&self, query: &NotesQuery) -> RepoResult<Vec<ScoredNote>> {
        let notes = self.repo.list_notes()?;
        Ok(run_query(&notes, query, self.clock.now()))
    }

    /// Dashboard counters for the current collection.
    pub fn stats(&self) -> RepoResult<DashboardStats> {
        let notes = self.repo.list_notes()?;
        Ok(dashboard_stats(&notes, self.clock.now_utc()))
    }

    fn mutate<F>(&mut self, id: &NoteId, apply: F) -> Result<Note, NoteServiceError>
    where
        F: FnOnce(&mut Note),
    {
        let mut note = self
            .repo
            .get_note(id)?
            .ok_or_else(|| NoteServiceError::NoteNotFound(id.clone()))?;
        apply(&mut note);
        note.touch(self.clock.now_utc());
        let updated = self.repo.update_note(note)?;
        info!("event=note_update module=service status=ok note_id={}", updated.id);
        Ok(updated)
    }
}

fn checked_tags(tags: Vec<String>) -> Result<Vec<String>, NoteServiceError> {
    if let Some(blank) = tags.iter().find(|tag| tag.trim().is_empty()) {
        return Err(NoteServiceError::InvalidTag(blank.clone()));
    }
    Ok(normalize_tags(&tags))
}
