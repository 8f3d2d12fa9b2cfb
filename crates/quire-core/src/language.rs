//! Languages the editor knows how to highlight.
//!
//! The Language menu is built from [`Language::ALL`], so adding a variant
//! here is enough to make it selectable.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    PlainText,
    JavaScript,
    TypeScript,
    Json,
    Html,
    Css,
    Markdown,
    Python,
    Rust,
    Java,
    Cpp,
    Sql,
    Xml,
}

impl Language {
    /// Every language, in menu order.
    pub const ALL: [Language; 13] = [
        Language::PlainText,
        Language::JavaScript,
        Language::TypeScript,
        Language::Json,
        Language::Html,
        Language::Css,
        Language::Markdown,
        Language::Python,
        Language::Rust,
        Language::Java,
        Language::Cpp,
        Language::Sql,
        Language::Xml,
    ];

    /// Stable identifier, used in logs and serialized state.
    pub fn id(self) -> &'static str {
        match self {
            Language::PlainText => "plaintext",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Json => "json",
            Language::Html => "html",
            Language::Css => "css",
            Language::Markdown => "markdown",
            Language::Python => "python",
            Language::Rust => "rust",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::Sql => "sql",
            Language::Xml => "xml",
        }
    }

    /// Human readable name for menus.
    pub fn label(self) -> &'static str {
        match self {
            Language::PlainText => "Plain Text",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Json => "JSON",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Markdown => "Markdown",
            Language::Python => "Python",
            Language::Rust => "Rust",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::Sql => "SQL",
            Language::Xml => "XML",
        }
    }

    /// File extensions (lowercase, without the dot).
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Language::PlainText => &["txt", "text", "log"],
            Language::JavaScript => &["js", "mjs", "cjs", "jsx"],
            Language::TypeScript => &["ts", "mts", "cts", "tsx"],
            Language::Json => &["json", "jsonc"],
            Language::Html => &["html", "htm"],
            Language::Css => &["css", "scss", "less"],
            Language::Markdown => &["md", "markdown"],
            Language::Python => &["py", "pyw", "pyi"],
            Language::Rust => &["rs"],
            Language::Java => &["java"],
            Language::Cpp => &["c", "h", "cpp", "cc", "cxx", "hpp", "hh"],
            Language::Sql => &["sql"],
            Language::Xml => &["xml", "xsl", "svg"],
        }
    }

    /// Token that starts a line comment, if the language has one.
    pub fn line_comment(self) -> Option<&'static str> {
        match self {
            Language::JavaScript
            | Language::TypeScript
            | Language::Rust
            | Language::Java
            | Language::Cpp => Some("//"),
            Language::Python => Some("#"),
            Language::Sql => Some("--"),
            _ => None,
        }
    }

    /// Looks up a language by its identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.id() == id)
    }

    /// Picks a language from a file's extension, defaulting to plain text.
    pub fn find_by_file_name(file: Option<&Path>) -> Self {
        let Some(ext) = file
            .and_then(|f| f.extension())
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
        else {
            return Language::PlainText;
        };

        Self::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
