//! Text helpers shared by search, previews and the editor word counter.
//!
//! All matching here is literal and case-insensitive per character; query
//! text is never interpreted as a pattern.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Default snippet length for result previews.
pub const SNIPPET_MAX_CHARS: usize = 150;
const SNIPPET_CHARS_BEFORE: usize = 50;
const SNIPPET_CHARS_AFTER: usize = 100;
const ELLIPSIS: &str = "...";

static MARKUP_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid markup tag regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Removes markup tags, decodes common entities and collapses whitespace.
pub fn strip_markup(input: &str) -> String {
    let without_tags = MARKUP_TAG_RE.replace_all(input, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

/// Counts whitespace-separated words after markup removal.
pub fn word_count(content: &str) -> usize {
    strip_markup(content).split_whitespace().count()
}

/// Byte range of the first case-insensitive occurrence of `needle`.
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    haystack.char_indices().find_map(|(start, _)| {
        match_len_at(&haystack[start..], needle).map(|len| start..start + len)
    })
}

/// Whether `needle` occurs in `haystack`, ignoring case.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    find_ignore_case(haystack, needle).is_some()
}

/// Byte ranges of every non-overlapping case-insensitive occurrence.
///
/// Renderers use these to wrap matches in highlight markup.
pub fn highlight_ranges(text: &str, query: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    if query.is_empty() {
        return ranges;
    }

    let mut cursor = 0;
    while cursor < text.len() {
        match find_ignore_case(&text[cursor..], query) {
            Some(found) => {
                let range = cursor + found.start..cursor + found.end;
                cursor = range.end;
                ranges.push(range);
            }
            None => break,
        }
    }
    ranges
}

/// Number of non-overlapping case-insensitive occurrences.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    highlight_ranges(haystack, needle).len()
}

/// Shortens `text` to `max_chars` characters, appending `...` when cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Preview window around the first match of `query` in `content`.
///
/// Keeps 50 characters before and 100 after the match. Without a query or a
/// match the leading `max_chars` characters are returned instead.
pub fn snippet(content: &str, query: &str, max_chars: usize) -> String {
    let query = query.trim();
    let Some(found) = (!query.is_empty())
        .then(|| find_ignore_case(content, query))
        .flatten()
    else {
        return truncate(content, max_chars);
    };

    let total_chars = content.chars().count();
    let match_start = content[..found.start].chars().count();
    let match_chars = content[found].chars().count();
    let start = match_start.saturating_sub(SNIPPET_CHARS_BEFORE);
    let end = (match_start + match_chars + SNIPPET_CHARS_AFTER).min(total_chars);

    let mut out = String::new();
    if start > 0 {
        out.push_str(ELLIPSIS);
    }
    out.extend(content.chars().skip(start).take(end - start));
    if end < total_chars {
        out.push_str(ELLIPSIS);
    }
    out
}

fn match_len_at(haystack: &str, needle: &str) -> Option<usize> {
    let mut hay_chars = haystack.char_indices();
    let mut consumed = 0;
    for expected in needle.chars() {
        let (index, actual) = hay_chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        consumed = index + actual.len_utf8();
    }
    Some(consumed)
}
