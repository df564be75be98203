//! Preview text shown in history lists.

use super::ClipboardContentRecord;

/// Maximum number of characters of text kept before the ellipsis.
pub const PREVIEW_MAX_CHARS: usize = 500;
pub const PREVIEW_ELLIPSIS: &str = "...";
/// Separator used when several file paths are stored in one item.
pub const FILE_PATH_STORE_SEPARATOR: char = ';';

/// Derive the preview text for a record.
///
/// - text: first 500 characters (ellipsis appended when cut), whitespace runs
///   collapsed to one space
/// - one file path: its filename component
/// - several file paths: `"<count> files"`
/// - otherwise the kind name
pub fn preview_text(record: &ClipboardContentRecord) -> String {
    if let Some(text) = record.non_empty_text() {
        return text_preview(text);
    }
    if let Some(paths) = record.non_empty_file_paths() {
        return match paths {
            [single] => file_name(single).to_string(),
            many => format!("{} files", many.len()),
        };
    }
    record.kind.to_string()
}

fn text_preview(text: &str) -> String {
    let mut chars = text.char_indices();
    let truncated = match chars.nth(PREVIEW_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], PREVIEW_ELLIPSIS),
        None => text.to_string(),
    };
    collapse_whitespace(&truncated)
}

/// Collapse every whitespace run to a single space, trimming both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Last component of a path, accepting both `/` and `\` separators.
pub fn file_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    trimmed
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(path)
}

/// Join file paths the way they are stored in `ClipboardItem::file_path`.
pub fn join_stored_paths(paths: &[String]) -> String {
    paths.join(&FILE_PATH_STORE_SEPARATOR.to_string())
}

/// Split a stored `file_path` back into the ordered path list.
pub fn split_stored_paths(stored: &str) -> Vec<String> {
    stored
        .split(FILE_PATH_STORE_SEPARATOR)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
