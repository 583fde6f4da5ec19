//! Notes query engine: filter, score and order a note collection.
//!
//! # Responsibility
//! - Apply text, tag, date-range and favorite filters conjunctively.
//! - Score text relevance and produce a stable ordering.
//!
//! # Invariants
//! - Pure: the input collection is never mutated; output is a new sequence.
//! - Deterministic for a fixed reference instant.
//! - Sorting is stable; ties fall back to `modified_at` descending.

use crate::model::note::Note;
use crate::search::text::{contains_ignore_case, count_occurrences};
use crate::search::window::{resolve_window, DateRange};
use chrono::{DateTime, FixedOffset};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Upper clamp for relevance scores.
pub const MAX_RELEVANCE_SCORE: u8 = 5;
const TITLE_WEIGHT: usize = 3;
const CONTENT_WEIGHT: usize = 1;
const TAG_WEIGHT: usize = 2;

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Highest clamped score first.
    Relevance,
    /// Newest creation first.
    CreatedAt,
    /// Oldest creation first.
    CreatedAtAscending,
    /// Most recent modification first.
    #[default]
    ModifiedAt,
    /// Title A-Z.
    Title,
    /// Favorites first, then most recent modification.
    Favorites,
}

impl SortBy {
    /// Parses a sort name, including legacy aliases.
    ///
    /// Unknown names fall back to `ModifiedAt`.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "relevance" => Self::Relevance,
            "createdAt" | "date-desc" => Self::CreatedAt,
            "date-asc" => Self::CreatedAtAscending,
            "title" | "alphabetical" => Self::Title,
            "favorites" => Self::Favorites,
            _ => Self::ModifiedAt,
        }
    }
}

/// Filter and ordering options for one query run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesQuery {
    /// Free text; blank or absent passes every note.
    pub text: Option<String>,
    /// OR-combined exact tag filter; empty passes every note.
    pub tags: BTreeSet<String>,
    pub date_range: DateRange,
    pub favorites_only: bool,
    pub sort_by: SortBy,
}

impl NotesQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    pub fn favorites_only(mut self) -> Self {
        self.favorites_only = true;
        self
    }

    pub fn sorted_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Search text as typed, `None` when absent or whitespace-only.
    ///
    /// Surrounding whitespace is kept and takes part in matching.
    pub fn search_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// One result row with relevance annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredNote {
    pub note: Note,
    /// Weighted occurrence score clamped to `0..=5`; 0 without search text.
    pub relevance_score: u8,
    /// Raw title + content occurrences + matching tags, for display.
    pub match_count: usize,
}

/// Runs `query` over `notes` relative to the reference instant `now`.
pub fn run_query(notes: &[Note], query: &NotesQuery, now: DateTime<FixedOffset>) -> Vec<ScoredNote> {
    let text = query.search_text();
    let window = resolve_window(&query.date_range, now);

    let mut results: Vec<ScoredNote> = notes
        .iter()
        .filter(|note| text.map_or(true, |text| matches_text(note, text)))
        .filter(|note| query.tags.is_empty() || note.tags.iter().any(|tag| query.tags.contains(tag)))
        .filter(|note| window.contains(note.created_at))
        .filter(|note| !query.favorites_only || note.is_favorite)
        .map(|note| score_note(note, text))
        .collect();

    results.sort_by(|a, b| compare_results(a, b, query.sort_by));
    results
}

/// Whether `text` occurs in the title, content or any tag, ignoring case.
pub fn matches_text(note: &Note, text: &str) -> bool {
    contains_ignore_case(&note.title, text)
        || contains_ignore_case(&note.content, text)
        || note.tags.iter().any(|tag| contains_ignore_case(tag, text))
}

/// Scores one note against optional search text.
pub fn score_note(note: &Note, text: Option<&str>) -> ScoredNote {
    let Some(text) = text else {
        return ScoredNote {
            note: note.clone(),
            relevance_score: 0,
            match_count: 0,
        };
    };

    let title_hits = count_occurrences(&note.title, text);
    let content_hits = count_occurrences(&note.content, text);
    let tag_hits = note
        .tags
        .iter()
        .filter(|tag| contains_ignore_case(tag, text))
        .count();

    let weighted = title_hits * TITLE_WEIGHT + content_hits * CONTENT_WEIGHT + tag_hits * TAG_WEIGHT;
    let relevance_score = weighted.min(usize::from(MAX_RELEVANCE_SCORE)) as u8;

    ScoredNote {
        note: note.clone(),
        relevance_score,
        match_count: title_hits + content_hits + tag_hits,
    }
}

fn compare_results(a: &ScoredNote, b: &ScoredNote, sort_by: SortBy) -> Ordering {
    let newest_modified = || b.note.modified_at.cmp(&a.note.modified_at);
    match sort_by {
        SortBy::Relevance => b
            .relevance_score
            .cmp(&a.relevance_score)
            .then_with(newest_modified),
        SortBy::CreatedAt => b
            .note
            .created_at
            .cmp(&a.note.created_at)
            .then_with(newest_modified),
        SortBy::CreatedAtAscending => a
            .note
            .created_at
            .cmp(&b.note.created_at)
            .then_with(newest_modified),
        SortBy::ModifiedAt => newest_modified(),
        SortBy::Title => compare_titles(&a.note.title, &b.note.title).then_with(newest_modified),
        SortBy::Favorites => b
            .note
            .is_favorite
            .cmp(&a.note.is_favorite)
            .then_with(newest_modified),
    }
}

/// Locale-style title comparison.
///
/// Primary key folds case and Latin diacritics (including ligatures such as
/// `ß`, `æ` and `œ`, which expand to two letters); exact text breaks ties so
/// the order stays total. Characters outside the Latin blocks compare by
/// their lowercase code points.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    fold_title(a).cmp(&fold_title(b)).then_with(|| a.cmp(b))
}

fn fold_title(title: &str) -> String {
    let mut folded = String::with_capacity(title.len());
    for c in title.chars() {
        match fold_char(c) {
            Folded::One(base) => folded.push(base),
            Folded::Two(first, second) => {
                folded.push(first);
                folded.push(second);
            }
            Folded::Keep => folded.extend(c.to_lowercase()),
        }
    }
    folded
}

enum Folded {
    One(char),
    Two(char, char),
    Keep,
}

fn fold_char(c: char) -> Folded {
    let base = match c {
        'à'..='å' | 'À'..='Å' | 'ā' | 'Ā' | 'ă' | 'Ă' | 'ą' | 'Ą' => 'a',
        'ç' | 'Ç' | 'ć' | 'Ć' | 'č' | 'Č' => 'c',
        'ď' | 'Ď' | 'đ' | 'Đ' | 'ð' | 'Ð' => 'd',
        'è'..='ë' | 'È'..='Ë' | 'ē' | 'Ē' | 'ę' | 'Ę' | 'ě' | 'Ě' => 'e',
        'ğ' | 'Ğ' => 'g',
        'ì'..='ï' | 'Ì'..='Ï' | 'ī' | 'Ī' | 'ı' | 'İ' => 'i',
        'ł' | 'Ł' | 'ľ' | 'Ľ' => 'l',
        'ñ' | 'Ñ' | 'ń' | 'Ń' | 'ň' | 'Ň' => 'n',
        'ò'..='ö' | 'Ò'..='Ö' | 'ø' | 'Ø' | 'ō' | 'Ō' | 'ő' | 'Ő' => 'o',
        'ř' | 'Ř' => 'r',
        'ś' | 'Ś' | 'š' | 'Š' | 'ş' | 'Ş' => 's',
        'ť' | 'Ť' | 'ţ' | 'Ţ' => 't',
        'ù'..='ü' | 'Ù'..='Ü' | 'ū' | 'Ū' | 'ů' | 'Ů' | 'ű' | 'Ű' => 'u',
        'ý' | 'ÿ' | 'Ý' | 'Ÿ' => 'y',
        'ź' | 'Ź' | 'ż' | 'Ż' | 'ž' | 'Ž' => 'z',
        'ß' | 'ẞ' => return Folded::Two('s', 's'),
        'æ' | 'Æ' => return Folded::Two('a', 'e'),
        'œ' | 'Œ' => return Folded::Two('o', 'e'),
        'þ' | 'Þ' => return Folded::Two('t', 'h'),
        _ => return Folded::Keep,
    };
    Folded::One(base)
}
