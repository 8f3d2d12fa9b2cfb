//! Theme files on disk.
//!
//! A theme is a `.css` file in the themes directory. Only its custom
//! properties are read:
//!
//! ```css
//! :root {
//!     --background: #1e1e1e;
//!     --foreground: #d4d4d4;
//!     --accent: #569cd6;
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::CoreResult;

/// Lists the `.css` files in a themes directory.
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    dir: PathBuf,
}

impl ThemeCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Theme file names, sorted. A missing directory yields an empty list.
    pub fn list(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Cannot read themes from {}: {}", self.dir.display(), e);
                return Vec::new();
            }
        };

        let mut themes: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|name| {
                Path::new(name)
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("css"))
            })
            .collect();

        themes.sort_by_key(|name| name.to_lowercase());
        tracing::debug!(count = themes.len(), "Listed themes");
        themes
    }

    /// Full path of a theme file.
    pub fn path_of(&self, theme: &str) -> PathBuf {
        self.dir.join(theme)
    }

    /// Reads and parses a theme.
    pub fn load(&self, theme: &str) -> CoreResult<ThemeSheet> {
        let css = std::fs::read_to_string(self.path_of(theme))?;
        Ok(ThemeSheet::parse(&css))
    }
}

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rgb` or `#rrggbb`.
    pub fn parse_hex(value: &str) -> Option<Self> {
        let hex = value.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Some(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => None,
        }
    }

    /// Channels scaled to `0.0..=1.0`.
    pub fn to_f32(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

/// Custom properties declared by a theme stylesheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeSheet {
    properties: HashMap<String, String>,
}

impl ThemeSheet {
    /// Collects every `--name: value;` declaration. Later ones win.
    pub fn parse(css: &str) -> Self {
        let without_comments = strip_comments(css);
        let properties = without_comments
            .split([';', '{', '}'])
            .filter_map(|decl| {
                let (name, value) = decl.split_once(':')?;
                let name = name.trim().strip_prefix("--")?;
                let value = value.trim();
                (!name.is_empty() && !value.is_empty())
                    .then(|| (name.to_string(), value.to_string()))
            })
            .collect();
        Self { properties }
    }

    /// Raw value of a custom property, without the leading `--`.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// A custom property parsed as a hex color.
    pub fn color(&self, name: &str) -> Option<Rgb> {
        self.property(name).and_then(Rgb::parse_hex)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        rest = match rest[start + 2..].find("*/") {
            Some(end) => &rest[start + 2 + end + 2..],
            None => "",
        };
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_lists_only_css_files_sorted() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("solarized.css"), "").unwrap();
        std::fs::write(dir.path().join("Dark.CSS"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("nested.css")).unwrap();

        let catalog = ThemeCatalog::new(dir.path());
        assert_eq!(catalog.list(), ["Dark.CSS", "solarized.css"]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempdir().unwrap();
        let catalog = ThemeCatalog::new(dir.path().join("nope"));
        assert!(catalog.list().is_empty());
    }

    #[test]
    fn test_parse_sheet() {
        let sheet = ThemeSheet::parse(
            "/* dark */\n:root {\n  --background: #1e1e1e;\n  --accent:#fa0;\n  color: red;\n  --font: \"Fira Code\", monospace\n}",
        );
        assert_eq!(sheet.color("background"), Some(Rgb::new(0x1e, 0x1e, 0x1e)));
        assert_eq!(sheet.color("accent"), Some(Rgb::new(0xff, 0xaa, 0x00)));
        assert_eq!(sheet.property("font"), Some("\"Fira Code\", monospace"));
        assert_eq!(sheet.property("color"), None);
        assert_eq!(sheet.color("font"), None);
    }

    #[test]
    fn test_load_from_catalog() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("light.css"), ":root { --background: #ffffff; }").unwrap();
        let catalog = ThemeCatalog::new(dir.path());
        let sheet = catalog.load("light.css").unwrap();
        assert_eq!(sheet.color("background"), Some(Rgb::new(255, 255, 255)));
        assert!(catalog.load("missing.css").is_err());
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::parse_hex("#000"), Some(Rgb::new(0, 0, 0)));
        assert_eq!(Rgb::parse_hex("#12345"), None);
        assert_eq!(Rgb::parse_hex("123456"), None);
        assert_eq!(Rgb::parse_hex("#gg0000"), None);
    }
}
