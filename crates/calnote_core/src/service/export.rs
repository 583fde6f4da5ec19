//! Search result export.
//!
//! # Responsibility
//! - Render a result set as JSON, CSV, plain text or Markdown.
//!
//! # Invariants
//! - The JSON envelope carries `searchQuery`, `exportDate`, `totalResults`
//!   and `results` with the persisted note fields.
//! - Output order equals result order.

use crate::model::note::Note;
use crate::search::query::ScoredNote;
use chrono::{DateTime, SecondsFormat, Utc};
use csv::{IntoInnerError, Terminator, Writer, WriterBuilder};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::string::FromUtf8Error;

const CSV_HEADER: [&str; 7] = [
    "id",
    "title",
    "content",
    "createdAt",
    "modifiedAt",
    "tags",
    "isFavorite",
];

/// Supported export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Text,
    Markdown,
}

impl ExportFormat {
    /// Parses a format name or file extension.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "txt" | "text" => Some(Self::Text),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
            Self::Markdown => "md",
        }
    }
}

#[derive(Debug)]
pub enum ExportError {
    Encode(serde_json::Error),
    Csv(csv::Error),
    /// Rendered CSV bytes were not valid UTF-8.
    Utf8(FromUtf8Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode export: {err}"),
            Self::Csv(err) => write!(f, "failed to write csv export: {err}"),
            Self::Utf8(err) => write!(f, "csv export is not valid utf-8: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::Utf8(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<IntoInnerError<Writer<Vec<u8>>>> for ExportError {
    fn from(value: IntoInnerError<Writer<Vec<u8>>>) -> Self {
        Self::Csv(value.into_error().into())
    }
}

impl From<FromUtf8Error> for ExportError {
    fn from(value: FromUtf8Error) -> Self {
        Self::Utf8(value)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportEnvelope<'a> {
    search_query: &'a str,
    export_date: DateTime<Utc>,
    total_results: usize,
    results: Vec<&'a Note>,
}

/// Suggested download name, e.g. `search-results-1707955200000.csv`.
pub fn export_file_name(format: ExportFormat, now: DateTime<Utc>) -> String {
    format!(
        "search-results-{}.{}",
        now.timestamp_millis(),
        format.extension()
    )
}

/// Renders `results` for `query` in the requested format.
pub fn export_results(
    results: &[ScoredNote],
    query: &str,
    format: ExportFormat,
    now: DateTime<Utc>,
) -> Result<String, ExportError> {
    let notes: Vec<&Note> = results.iter().map(|result| &result.note).collect();
    let rendered = match format {
        ExportFormat::Json => {
            let envelope = ExportEnvelope {
                search_query: query,
                export_date: now,
                total_results: notes.len(),
                results: notes,
            };
            serde_json::to_string_pretty(&envelope)?
        }
        ExportFormat::Csv => render_csv(&notes)?,
        ExportFormat::Text => render_text(&notes, query),
        ExportFormat::Markdown => render_markdown(&notes, query),
    };
    Ok(rendered)
}

fn render_csv(notes: &[&Note]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(vec![]);
    writer.write_record(CSV_HEADER)?;
    for note in notes {
        writer.write_record([
            note.id.to_string(),
            note.title.clone(),
            note.content.clone(),
            note.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            note.modified_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            note.tags.join(";"),
            note.is_favorite.to_string(),
        ])?;
    }
    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

fn render_text(notes: &[&Note], query: &str) -> String {
    let mut out = format!("Search results for \"{query}\" ({} notes)\n\n", notes.len());
    for note in notes {
        out.push_str(&note.title);
        out.push('\n');
        out.push_str(&format!(
            "Created: {}  Modified: {}\n",
            note.created_at.format("%Y-%m-%d %H:%M"),
            note.modified_at.format("%Y-%m-%d %H:%M")
        ));
        if !note.tags.is_empty() {
            out.push_str(&format!("Tags: {}\n", note.tags.join(", ")));
        }
        out.push('\n');
        out.push_str(&note.plain_text());
        out.push_str("\n\n----------------------------------------\n\n");
    }
    out
}

fn render_markdown(notes: &[&Note], query: &str) -> String {
    let mut out = format!("# Search results for \"{query}\"\n\n{} notes\n", notes.len());
    for note in notes {
        let star = if note.is_favorite { " ★" } else { "" };
        out.push_str(&format!("\n## {}{star}\n\n", note.title));
        out.push_str(&format!(
            "_Created {} · Modified {}_\n\n",
            note.created_at.format("%Y-%m-%d"),
            note.modified_at.format("%Y-%m-%d")
        ));
        if !note.tags.is_empty() {
            let tags: Vec<String> = note.tags.iter().map(|tag| format!("`#{tag}`")).collect();
            out.push_str(&tags.join(" "));
            out.push_str("\n\n");
        }
        out.push_str(&note.plain_text());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{export_file_name, render_csv, ExportFormat};
    use crate::model::note::{Note, NoteDraft, NoteId};
    use chrono::{TimeZone, Utc};

    #[test]
    fn csv_fields_are_quoted_when_needed() {
        let created = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let note = Note::with_id(
            NoteId::from(1),
            NoteDraft::new("a,b", "say \"hi\"\r\nbye").with_tags(["x"]),
            created,
        );

        let csv = render_csv(&[&note]).unwrap();
        let (header, body) = csv.split_once('\n').unwrap();
        assert_eq!(header, "id,title,content,createdAt,modifiedAt,tags,isFavorite");
        assert!(body.starts_with("1,\"a,b\",\"say \"\"hi\"\"\r\nbye\","));
        assert!(body.ends_with(",x,false\n"));
    }

    #[test]
    fn file_name_uses_millis_and_extension() {
        let now = Utc.with_ymd_and_hms(2024, 2, 15, 0, 0, 0).unwrap();
        assert_eq!(
            export_file_name(ExportFormat::Markdown, now),
            format!("search-results-{}.md", now.timestamp_millis())
        );
        assert_eq!(ExportFormat::parse("TXT"), Some(ExportFormat::Text));
        assert_eq!(ExportFormat::parse("pdf"), None);
    }
}
