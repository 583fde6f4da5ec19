use calnote_core::{
    FixedClock, KvNoteRepository, MemoryKeyValueStore, NoteDraft, NoteId, NoteRepository,
    NoteService, NoteServiceError, NotesQuery, SortBy,
};
use chrono::{DateTime, TimeZone, Utc};

type TestService = NoteService<KvNoteRepository<MemoryKeyValueStore>, FixedClock>;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 15, 12, 0, 0).unwrap()
}

fn service() -> TestService {
    NoteService::with_clock(
        KvNoteRepository::new(MemoryKeyValueStore::new()),
        FixedClock::utc(now()),
    )
}

#[test]
fn create_stamps_both_timestamps_with_clock() {
    let mut service = service();
    let note = service
        .create_note(NoteDraft::new("Standup", "notes").with_tags([" Work ", "Work"]))
        .unwrap();

    assert_eq!(note.created_at, now());
    assert_eq!(note.modified_at, now());
    assert_eq!(note.tags, vec!["Work".to_string()]);
    assert!(matches!(note.id, NoteId::Text(_)));
    assert_eq!(service.list_notes().unwrap().len(), 9);
}

#[test]
fn create_rejects_blank_tag() {
    let mut service = service();
    let err = service
        .create_note(NoteDraft::new("t", "c").with_tags(["ok", "   "]))
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::InvalidTag(_)));
    assert_eq!(service.list_notes().unwrap().len(), 8);
}

#[test]
fn update_content_stamps_modified_at_only() {
    let mut service = service();
    let id = NoteId::from(2);
    let before = service.get_note(&id).unwrap().unwrap();

    let updated = service.update_content(&id, "New title", "New body").unwrap();
    assert_eq!(updated.title, "New title");
    assert_eq!(updated.content, "New body");
    assert_eq!(updated.created_at, before.created_at);
    assert_eq!(updated.modified_at, now());
    assert_eq!(service.get_note(&id).unwrap(), Some(updated));
}

#[test]
fn mutations_on_missing_note_fail() {
    let mut service = service();
    let ghost = NoteId::from("ghost");

    assert!(matches!(
        service.update_content(&ghost, "t", "c"),
        Err(NoteServiceError::NoteNotFound(_))
    ));
    assert!(matches!(
        service.toggle_favorite(&ghost),
        Err(NoteServiceError::NoteNotFound(_))
    ));
    assert!(matches!(
        service.delete_note(&ghost),
        Err(NoteServiceError::NoteNotFound(id)) if id == ghost
    ));
}

#[test]
fn set_tags_and_category() {
    let mut service = service();
    let id = NoteId::from(4);

    let tagged = service
        .set_tags(&id, vec!["Baking".to_string(), "baking".to_string()])
        .unwrap();
    assert_eq!(tagged.tags, vec!["Baking", "baking"]);
    assert!(matches!(
        service.set_tags(&id, vec![String::new()]),
        Err(NoteServiceError::InvalidTag(_))
    ));

    let filed = service.set_category(&id, Some(" Kitchen ")).unwrap();
    assert_eq!(filed.category.as_deref(), Some("Kitchen"));
    let cleared = service.set_category(&id, Some("  ")).unwrap();
    assert_eq!(cleared.category, None);
}

#[test]
fn toggle_favorite_flips_and_stamps() {
    let mut service = service();
    let id = NoteId::from(2);

    let on = service.toggle_favorite(&id).unwrap();
    assert!(on.is_favorite);
    assert_eq!(on.modified_at, now());
    let off = service.toggle_favorite(&id).unwrap();
    assert!(!off.is_favorite);
}

#[test]
fn bulk_favorite_changes_only_non_favorites() {
    let mut service = service();
    let ids = [
        NoteId::from(1),
        NoteId::from(2),
        NoteId::from(4),
        NoteId::from("unknown"),
    ];

    let changed = service.favorite_notes(&ids).unwrap();
    assert_eq!(changed, 2);

    let notes = service.list_notes().unwrap();
    let favorites = notes.iter().filter(|note| note.is_favorite).count();
    assert_eq!(favorites, 6);
    let first = notes.iter().find(|note| note.id == NoteId::from(1)).unwrap();
    assert_ne!(first.modified_at, now());
    let second = notes.iter().find(|note| note.id == NoteId::from(2)).unwrap();
    assert_eq!(second.modified_at, now());
}

#[test]
fn bulk_delete_reports_removed_count() {
    let mut service = service();
    let removed = service
        .delete_notes(&[NoteId::from(7), NoteId::from(8), NoteId::from(99)])
        .unwrap();
    assert_eq!(removed, 2);
    assert_eq!(service.repo().list_notes().unwrap().len(), 6);
}

#[test]
fn list_tags_is_sorted_and_unique() {
    let service = service();
    let tags = service.list_tags().unwrap();

    assert_eq!(tags.len(), 15);
    assert!(tags.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(tags.contains(&"Reflection".to_string()));
}

#[test]
fn query_uses_the_service_clock() {
    let mut service = service();
    service
        .create_note(NoteDraft::new("Fresh reflection", "today"))
        .unwrap();

    let month = service
        .query(&NotesQuery::new().with_date_range(calnote_core::DateRange::Month))
        .unwrap();
    assert_eq!(month.len(), 1);
    assert_eq!(month[0].note.title, "Fresh reflection");

    let ranked = service
        .query(&NotesQuery::new().with_text("reflect").sorted_by(SortBy::Relevance))
        .unwrap();
    let titles: Vec<&str> = ranked.iter().map(|row| row.note.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Weekly Reflection - January",
            "Fresh reflection",
            "Learning Goals 2024"
        ]
    );
    assert_eq!(ranked[0].relevance_score, 5);
}

#[test]
fn stats_count_favorites_and_recent_notes() {
    let mut service = service();
    service.create_note(NoteDraft::new("new", "").favorite()).unwrap();

    let stats = service.stats().unwrap();
    assert_eq!(stats.total_notes, 9);
    assert_eq!(stats.favorite_notes, 5);
    assert_eq!(stats.notes_this_week, 1);
    assert_eq!(stats.unique_tags, 15);
}
