//! Syntax highlighting for the editor widget.
//!
//! A small line tokenizer keyed by [`Language`]. It knows comments, strings,
//! numbers, keywords and markup tags, which is enough to make every entry of
//! the Language menu visibly change the editor. Colors come from the active
//! theme's palette at render time.

use iced::advanced::text::highlighter::{Format, Highlighter};
use iced::{Color, Font, Theme};
use quire_core::Language;
use std::ops::Range;

/// Settings for the highlighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightSettings {
    pub language: Language,
}

/// Token classes produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    String,
    Number,
    Comment,
    Tag,
}

impl TokenKind {
    /// Maps a token to a color from the theme's palette.
    pub fn to_format(self, theme: &Theme) -> Format<Font> {
        let palette = theme.extended_palette();
        let color = match self {
            TokenKind::Keyword => palette.primary.strong.color,
            TokenKind::String => palette.success.base.color,
            TokenKind::Number => palette.danger.base.color,
            TokenKind::Comment => Color {
                a: 0.55,
                ..palette.background.base.text
            },
            TokenKind::Tag => palette.primary.base.color,
        };
        Format {
            color: Some(color),
            font: None,
        }
    }
}

// ============================================================================
// Language tables
// ============================================================================

fn keywords(language: Language) -> &'static [&'static str] {
    match language {
        Language::JavaScript | Language::TypeScript => &[
            "async", "await", "break", "case", "catch", "class", "const", "continue",
            "default", "delete", "do", "else", "export", "extends", "false", "finally",
            "for", "function", "if", "import", "in", "instanceof", "interface", "let",
            "new", "null", "return", "static", "super", "switch", "this", "throw",
            "true", "try", "type", "typeof", "undefined", "var", "void", "while", "yield",
        ],
        Language::Json => &["true", "false", "null"],
        Language::Python => &[
            "and", "as", "assert", "async", "await", "break", "class", "continue", "def",
            "del", "elif", "else", "except", "False", "finally", "for", "from", "global",
            "if", "import", "in", "is", "lambda", "None", "nonlocal", "not", "or", "pass",
            "raise", "return", "self", "True", "try", "while", "with", "yield",
        ],
        Language::Rust => &[
            "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else",
            "enum", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match",
            "mod", "move", "mut", "pub", "ref", "return", "self", "Self", "static",
            "struct", "super", "trait", "true", "type", "unsafe", "use", "where", "while",
        ],
        Language::Java => &[
            "abstract", "boolean", "break", "case", "catch", "class", "continue",
            "default", "do", "double", "else", "enum", "extends", "false", "final",
            "finally", "float", "for", "if", "implements", "import", "int", "interface",
            "long", "new", "null", "package", "private", "protected", "public", "return",
            "static", "super", "switch", "this", "throw", "throws", "true", "try", "void",
            "while",
        ],
        Language::Cpp => &[
            "auto", "bool", "break", "case", "catch", "char", "class", "const",
            "constexpr", "continue", "default", "delete", "do", "double", "else", "enum",
            "false", "float", "for", "if", "include", "int", "long", "namespace", "new",
            "nullptr", "private", "protected", "public", "return", "sizeof", "static",
            "struct", "switch", "template", "this", "throw", "true", "try", "typedef",
            "typename", "using", "virtual", "void", "while",
        ],
        Language::Sql => &[
            "and", "as", "by", "create", "delete", "desc", "distinct", "drop", "from",
            "group", "having", "insert", "into", "join", "left", "limit", "not", "null",
            "on", "or", "order", "select", "set", "table", "update", "values", "where",
        ],
        Language::Css => &["important", "inherit", "initial", "none", "auto"],
        Language::PlainText | Language::Html | Language::Markdown | Language::Xml => &[],
    }
}

fn block_comment(language: Language) -> Option<(&'static str, &'static str)> {
    match language {
        Language::JavaScript
        | Language::TypeScript
        | Language::Css
        | Language::Rust
        | Language::Java
        | Language::Cpp
        | Language::Sql => Some(("/*", "*/")),
        Language::Html | Language::Xml | Language::Markdown => Some(("<!--", "-->")),
        _ => None,
    }
}

fn has_tags(language: Language) -> bool {
    matches!(language, Language::Html | Language::Xml)
}

fn is_keyword(language: Language, word: &str) -> bool {
    let table = keywords(language);
    if language == Language::Sql {
        table.iter().any(|kw| kw.eq_ignore_ascii_case(word))
    } else {
        table.contains(&word)
    }
}

// ============================================================================
// Highlighter
// ============================================================================

/// Syntax highlighter for the text editor.
pub struct EditorHighlighter {
    language: Language,
    in_block_comment: bool,
    spans: Vec<(Range<usize>, TokenKind)>,
    current_line: usize,
}

impl Highlighter for EditorHighlighter {
    type Settings = HighlightSettings;
    type Highlight = TokenKind;
    type Iterator<'a> = std::vec::IntoIter<(Range<usize>, TokenKind)> where Self: 'a;

    fn new(settings: &Self::Settings) -> Self {
        Self {
            language: settings.language,
            in_block_comment: false,
            spans: Vec::new(),
            current_line: 0,
        }
    }

    fn update(&mut self, new_settings: &Self::Settings) {
        if self.language != new_settings.language {
            self.language = new_settings.language;
            self.in_block_comment = false;
            self.current_line = 0;
        }
    }

    fn change_line(&mut self, line: usize) {
        // Block comment state can't be recovered mid-document.
        if line < self.current_line {
            self.current_line = 0;
            self.in_block_comment = false;
        }
    }

    fn highlight_line(&mut self, line: &str) -> Self::Iterator<'_> {
        if self.language != Language::PlainText {
            self.tokenize(line);
        }
        self.current_line += 1;
        std::mem::take(&mut self.spans).into_iter()
    }

    fn current_line(&self) -> usize {
        self.current_line
    }
}

impl EditorHighlighter {
    fn tokenize(&mut self, line: &str) {
        let bytes = line.as_bytes();
        let len = bytes.len();
        let mut i = 0;

        if self.in_block_comment {
            let end = block_comment(self.language).map_or("*/", |(_, end)| end);
            match line.find(end) {
                Some(pos) => {
                    i = pos + end.len();
                    self.spans.push((0..i, TokenKind::Comment));
                    self.in_block_comment = false;
                }
                None => {
                    self.spans.push((0..len, TokenKind::Comment));
                    return;
                }
            }
        }

        while i < len {
            let rest = &line[i..];

            if let Some(marker) = self.language.line_comment() {
                if rest.starts_with(marker) {
                    self.spans.push((i..len, TokenKind::Comment));
                    return;
                }
            }

            if let Some((start, end)) = block_comment(self.language) {
                if rest.starts_with(start) {
                    let body = i + start.len();
                    match line[body..].find(end) {
                        Some(pos) => {
                            let stop = body + pos + end.len();
                            self.spans.push((i..stop, TokenKind::Comment));
                            i = stop;
                        }
                        None => {
                            self.spans.push((i..len, TokenKind::Comment));
                            self.in_block_comment = true;
                            return;
                        }
                    }
                    continue;
                }
            }

            let b = bytes[i];

            if b == b'"' || b == b'\'' || (b == b'`' && self.allows_backticks()) {
                let stop = string_end(bytes, i);
                self.spans.push((i..stop, TokenKind::String));
                i = stop;
                continue;
            }

            if b.is_ascii_digit() {
                let start = i;
                while i < len && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'.' || bytes[i] == b'_') {
                    i += 1;
                }
                self.spans.push((start..i, TokenKind::Number));
                continue;
            }

            if b == b'<' && has_tags(self.language) {
                let start = i;
                i += 1;
                if i < len && (bytes[i] == b'/' || bytes[i] == b'?' || bytes[i] == b'!') {
                    i += 1;
                }
                while i < len && (bytes[i].is_ascii_alphanumeric() || matches!(bytes[i], b'-' | b':' | b'_')) {
                    i += 1;
                }
                if i > start + 1 {
                    self.spans.push((start..i, TokenKind::Tag));
                }
                continue;
            }

            if b.is_ascii_alphabetic() || b == b'_' {
                let start = i;
                while i < len && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                if is_keyword(self.language, &line[start..i]) {
                    self.spans.push((start..i, TokenKind::Keyword));
                }
                continue;
            }

            // Skip to the next char boundary.
            i += line[i..].chars().next().map_or(1, char::len_utf8);
        }
    }

    fn allows_backticks(&self) -> bool {
        matches!(
            self.language,
            Language::JavaScript | Language::TypeScript | Language::Markdown
        )
    }
}

/// End of a string literal starting at `start`. Unterminated strings run to
/// the end of the line.
fn string_end(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(language: Language, lines: &[&str]) -> Vec<Vec<(String, TokenKind)>> {
        let mut hl = EditorHighlighter::new(&HighlightSettings { language });
        lines
            .iter()
            .map(|line| {
                hl.highlight_line(line)
                    .map(|(range, kind)| (line[range].to_string(), kind))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_rust_keywords_and_comments() {
        let out = tokens(Language::Rust, &["fn main() { let x = 42; } // done"]);
        assert_eq!(
            out[0],
            [
                ("fn".to_string(), TokenKind::Keyword),
                ("let".to_string(), TokenKind::Keyword),
                ("42".to_string(), TokenKind::Number),
                ("// done".to_string(), TokenKind::Comment),
            ]
        );
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let out = tokens(Language::Cpp, &["int a; /* start", "still", "end */ int b;"]);
        assert_eq!(out[0].last().unwrap(), &("/* start".to_string(), TokenKind::Comment));
        assert_eq!(out[1], [("still".to_string(), TokenKind::Comment)]);
        assert_eq!(out[2][0], ("end */".to_string(), TokenKind::Comment));
        assert_eq!(out[2][1], ("int".to_string(), TokenKind::Keyword));
    }

    #[test]
    fn test_strings_with_escapes() {
        let out = tokens(Language::Json, &[r#"{"k\"ey": true}"#]);
        assert_eq!(out[0][0], (r#""k\"ey""#.to_string(), TokenKind::String));
        assert_eq!(out[0][1], ("true".to_string(), TokenKind::Keyword));
    }

    #[test]
    fn test_plain_text_has_no_tokens() {
        let out = tokens(Language::PlainText, &["fn \"x\" 1"]);
        assert!(out[0].is_empty());
    }

    #[test]
    fn test_sql_keywords_ignore_case() {
        let out = tokens(Language::Sql, &["SELECT id FROM t -- all"]);
        let kinds: Vec<TokenKind> = out[0].iter().map(|(_, k)| *k).collect();
        assert_eq!(kinds, [TokenKind::Keyword, TokenKind::Keyword, TokenKind::Comment]);
    }

    #[test]
    fn test_html_tags() {
        let out = tokens(Language::Html, &["<div class=\"a\">é</div>"]);
        let tags: Vec<&str> = out[0]
            .iter()
            .filter(|(_, k)| *k == TokenKind::Tag)
            .map(|(s, _)| s.as_str())
            .collect();
        assert_eq!(tags, ["<div", "</div"]);
    }

    #[test]
    fn test_language_change_resets_state() {
        let mut hl = EditorHighlighter::new(&HighlightSettings { language: Language::Rust });
        let _ = hl.highlight_line("/* open").count();
        hl.update(&HighlightSettings { language: Language::Python });
        assert_eq!(hl.current_line(), 0);
        let spans: Vec<_> = hl.highlight_line("x = 1").collect();
        assert_eq!(spans, [(4..5, TokenKind::Number)]);
    }
}
