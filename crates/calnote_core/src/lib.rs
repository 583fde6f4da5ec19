//! Core domain logic for CalNote.
//! This crate is the single source of truth for note invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use db::{
    open_db, open_db_in_memory, KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::defaults::default_notes;
pub use model::note::{Note, NoteDraft, NoteId, NoteValidationError};
pub use repo::note_repo::{
    CollectionSource, KvNoteRepository, NoteRepository, RepoError, RepoResult, StoreConfig,
    NOTES_STORAGE_KEY,
};
pub use search::query::{run_query, NotesQuery, ScoredNote, SortBy, MAX_RELEVANCE_SCORE};
pub use search::window::{resolve_window, DateRange, DateWindow};
pub use service::calendar::{month_grid, CalendarView, MonthGrid};
pub use service::clock::{Clock, FixedClock, SystemClock};
pub use service::export::{export_file_name, export_results, ExportError, ExportFormat};
pub use service::note_service::{NoteService, NoteServiceError};
pub use service::stats::{dashboard_stats, month_metrics, DashboardStats, MonthMetrics};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
