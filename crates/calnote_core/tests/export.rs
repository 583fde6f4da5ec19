use calnote_core::{
    default_notes, export_file_name, export_results, run_query, ExportFormat, Note, NoteDraft,
    NoteId, NotesQuery, SortBy,
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 15, 12, 0, 0).unwrap()
}

fn results_for(notes: &[Note], text: &str) -> Vec<calnote_core::ScoredNote> {
    let query = NotesQuery::new().with_text(text).sorted_by(SortBy::Relevance);
    run_query(notes, &query, now().fixed_offset())
}

#[test]
fn json_export_wraps_results_in_envelope() {
    let notes = default_notes();
    let results = results_for(&notes, "meeting");

    let raw = export_results(&results, "meeting", ExportFormat::Json, now()).unwrap();
    let json: Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json["searchQuery"], "meeting");
    assert_eq!(json["exportDate"], "2024-02-15T12:00:00Z");
    assert_eq!(json["totalResults"], results.len());
    let exported = json["results"].as_array().unwrap();
    assert_eq!(exported.len(), results.len());
    assert_eq!(exported[0]["id"], serde_json::json!(results[0].note.id));
    assert!(exported[0].get("isFavorite").is_some());
    assert!(exported[0].get("relevanceScore").is_none());
}

#[test]
fn csv_export_quotes_fields_and_joins_tags() {
    let created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let note = Note::with_id(
        NoteId::from(7),
        NoteDraft::new("Lunch, maybe", "Say \"hi\"\nthen leave").with_tags(["Work", "Food"]),
        created,
    );
    let results = run_query(&[note], &NotesQuery::new(), now().fixed_offset());

    let csv = export_results(&results, "", ExportFormat::Csv, now()).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("id,title,content,createdAt,modifiedAt,tags,isFavorite")
    );
    assert_eq!(
        csv.split_once('\n').map(|(_, body)| body),
        Some(
            "7,\"Lunch, maybe\",\"Say \"\"hi\"\"\nthen leave\",2024-01-02T03:04:05Z,\
             2024-01-02T03:04:05Z,Work;Food,false\n"
        )
    );
}

#[test]
fn text_and_markdown_exports_strip_markup() {
    let created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let note = Note::from_draft(
        NoteDraft::new("Groceries", "<p>eggs &amp; <b>milk</b></p>")
            .with_tags(["Home"])
            .favorite(),
        created,
    );
    let results = run_query(&[note], &NotesQuery::new(), now().fixed_offset());

    let text = export_results(&results, "eggs", ExportFormat::Text, now()).unwrap();
    assert!(text.starts_with("Search results for \"eggs\" (1 notes)"));
    assert!(text.contains("Tags: Home"));
    assert!(text.contains("eggs & milk"));
    assert!(!text.contains("<b>"));

    let markdown = export_results(&results, "eggs", ExportFormat::Markdown, now()).unwrap();
    assert!(markdown.contains("## Groceries ★"));
    assert!(markdown.contains("`#Home`"));
    assert!(markdown.contains("eggs & milk"));
}

#[test]
fn file_names_follow_format() {
    assert_eq!(
        export_file_name(ExportFormat::Csv, now()),
        "search-results-1707998400000.csv"
    );
    assert_eq!(ExportFormat::parse("markdown"), Some(ExportFormat::Markdown));
}
