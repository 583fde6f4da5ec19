//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and its wire shape.
//! - Provide lifecycle helpers for creation and modification stamps.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `modified_at >= created_at`.
//! - `tags` holds no exact (case-sensitive) duplicates.

use crate::search::text::{strip_markup, word_count};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque note identifier.
///
/// The built-in collection uses integers, freshly created notes use UUID text.
/// Serialized untagged so both forms survive a round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteId {
    Number(i64),
    Text(String),
}

impl NoteId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self::Text(Uuid::new_v4().to_string())
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for NoteId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Validation failures for note invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// `modified_at` is earlier than `created_at`.
    ModifiedBeforeCreated(NoteId),
    /// Tag list contains the same label twice.
    DuplicateTag { id: NoteId, tag: String },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ModifiedBeforeCreated(id) => {
                write!(f, "note {id} has modifiedAt earlier than createdAt")
            }
            Self::DuplicateTag { id, tag } => write!(f, "note {id} has duplicate tag `{tag}`"),
        }
    }
}

impl Error for NoteValidationError {}

/// Persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    /// Body text; may contain editor markup.
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Note {
    /// Creates a note from a draft with a generated id.
    ///
    /// # Invariants
    /// - `created_at == modified_at == now`.
    /// - Draft tags are normalized.
    pub fn from_draft(draft: NoteDraft, now: DateTime<Utc>) -> Self {
        Self::with_id(NoteId::generate(), draft, now)
    }

    /// Creates a note from a draft with a caller-provided id.
    ///
    /// Used by import paths where identity already exists.
    pub fn with_id(id: NoteId, draft: NoteDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
            tags: normalize_tags(&draft.tags),
            category: draft.category.and_then(|value| normalize_category(&value)),
            is_favorite: draft.is_favorite,
            created_at: now,
            modified_at: now,
        }
    }

    /// Stamps a modification, clamped so it never precedes creation.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.modified_at = now.max(self.created_at);
    }

    /// Checks timestamp ordering and tag uniqueness.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.modified_at < self.created_at {
            return Err(NoteValidationError::ModifiedBeforeCreated(self.id.clone()));
        }

        for (index, tag) in self.tags.iter().enumerate() {
            if self.tags[..index].contains(tag) {
                return Err(NoteValidationError::DuplicateTag {
                    id: self.id.clone(),
                    tag: tag.clone(),
                });
            }
        }

        Ok(())
    }

    /// Brings a note loaded from storage back within the write invariants.
    ///
    /// Tags are re-normalized and `modified_at` is clamped to `created_at`.
    /// Returns whether anything changed.
    pub fn repair(&mut self) -> bool {
        let tags = normalize_tags(&self.tags);
        let clamped = self.modified_at.max(self.created_at);
        let changed = tags != self.tags || clamped != self.modified_at;
        self.tags = tags;
        self.modified_at = clamped;
        changed
    }

    /// Exact (case-sensitive) tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|value| value == tag)
    }

    /// Words in the content once markup is removed.
    pub fn word_count(&self) -> usize {
        word_count(&self.content)
    }

    /// Content with markup removed and whitespace collapsed.
    pub fn plain_text(&self) -> String {
        strip_markup(&self.content)
    }
}

/// Creation input for a new note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub is_favorite: bool,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn favorite(mut self) -> Self {
        self.is_favorite = true;
        self
    }
}

/// Trims one tag; blank input yields `None`.
///
/// Case is preserved: tags compare case-sensitively.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trims, drops blanks and removes exact duplicates, keeping first-seen order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if let Some(value) = normalize_tag(tag) {
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
    }
    unique
}

/// Trims a category; blank input clears it.
pub fn normalize_category(category: &str) -> Option<String> {
    normalize_tag(category)
}
