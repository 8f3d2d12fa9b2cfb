//! User preferences persisted as JSON.
//!
//! The file looks like `{"theme": {"name": "dark.css"}}`. Fields this
//! module doesn't know about are kept in `extra` and written back untouched.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: ThemePreference,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemePreference {
    /// File name of the selected theme inside the themes directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Preferences {
    /// Reads preferences from `path`. A missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PreferencesError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("No preferences at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes preferences to `path` with two-space indentation.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PreferencesError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Re-reads the file, records `theme` as selected and writes it back.
    ///
    /// Re-reading first keeps edits made to the file by hand since startup.
    pub fn select_theme(path: impl AsRef<Path>, theme: &str) -> Result<Self, PreferencesError> {
        let path = path.as_ref();
        let mut prefs = Self::load(path)?;
        prefs.theme.name = Some(theme.to_string());
        prefs.save(path)?;
        tracing::info!(theme, "Theme preference saved");
        Ok(prefs)
    }

    pub fn theme_name(&self) -> Option<&str> {
        self.theme.name.as_deref()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let prefs = Preferences::load(dir.path().join("prefs.json")).unwrap();
        assert_eq!(prefs.theme_name(), None);
    }

    #[test]
    fn test_select_theme_preserves_unknown_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"theme":{"name":"light.css","size":3},"fontSize":14}"#).unwrap();

        let prefs = Preferences::select_theme(&path, "dark.css").unwrap();
        assert_eq!(prefs.theme_name(), Some("dark.css"));

        let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"]["name"], "dark.css");
        assert_eq!(raw["theme"]["size"], 3);
        assert_eq!(raw["fontSize"], 14);
    }

    #[test]
    fn test_saved_with_two_space_indent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        Preferences::select_theme(&path, "a.css").unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n  \"theme\": {\n    \"name\": \"a.css\""));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(Preferences::load(&path), Err(PreferencesError::Parse(_))));
    }
}
