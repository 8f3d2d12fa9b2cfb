//! Document formatting for the Format command.

use crate::language::Language;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Formats `text` according to `language`.
///
/// JSON is re-serialized with two-space indentation. Everything else gets
/// trailing whitespace stripped from each line and a single final newline.
pub fn format(language: Language, text: &str) -> Result<String, FormatError> {
    match language {
        Language::Json => format_json(text),
        _ => Ok(tidy_whitespace(text)),
    }
}

fn format_json(text: &str) -> Result<String, FormatError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let mut out = serde_json::to_string_pretty(&value)?;
    out.push('\n');
    Ok(out)
}

fn tidy_whitespace(text: &str) -> String {
    let mut out = text
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");

    let trimmed_len = out.trim_end_matches('\n').len();
    out.truncate(trimmed_len);
    if !out.is_empty() {
        out.push('\n');
    }
    out
}
