//! Open tabs and the registry that owns them.
//!
//! ## Learning: Newtypes
//!
//! `TabId` wraps a `Uuid`. Callers can't mix it up with any other id, and
//! the registry can hand ids out freely because they are `Copy`.
//!
//! ## Invariant
//!
//! No two open tabs share a `name`. Every tab enters the registry through
//! [`TabRegistry::add_tab`], which resolves collisions with a `" (n)"` suffix.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::language::Language;

/// Name given to tabs created without one.
pub const DEFAULT_TAB_NAME: &str = "New Document.txt";

/// Longest name shown verbatim in the tab strip.
pub const DISPLAY_NAME_LIMIT: usize = 20;

/// Unique identifier for a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(Uuid);

impl TabId {
    /// Creates a new unique tab ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single open document.
#[derive(Debug, Clone)]
pub struct Tab {
    id: TabId,
    name: String,
    display_name: String,
    file: Option<PathBuf>,
    content: String,
    is_temp: bool,
    language: Option<Language>,
}

impl Tab {
    pub fn id(&self) -> TabId {
        self.id
    }

    /// Unique name among open tabs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name as shown in the tab strip.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Backing file, if the tab has been opened from or saved to disk.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_temp(&self) -> bool {
        self.is_temp
    }

    /// The explicit language, or the one implied by the backing file.
    pub fn language(&self) -> Language {
        self.language
            .unwrap_or_else(|| Language::find_by_file_name(self.file.as_deref()))
    }
}

/// Parameters for [`TabRegistry::add_tab`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTab {
    pub name: Option<String>,
    pub file: Option<PathBuf>,
    pub content: Option<String>,
    pub is_temp: bool,
}

impl NewTab {
    /// A blank document with a generated name.
    pub fn temp() -> Self {
        Self {
            is_temp: true,
            ..Self::default()
        }
    }

    /// A document backed by a file on disk.
    pub fn from_file(name: impl Into<String>, file: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            file: Some(file.into()),
            content: Some(content.into()),
            is_temp: false,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Truncates `name` to [`DISPLAY_NAME_LIMIT`] characters, appending `...`.
pub fn display_name(name: &str) -> String {
    match name.char_indices().nth(DISPLAY_NAME_LIMIT) {
        Some((cut, _)) => format!("{}...", &name[..cut]),
        None => name.to_string(),
    }
}

/// Ordered collection of open tabs plus the active selection.
#[derive(Debug, Default)]
pub struct TabRegistry {
    tabs: Vec<Tab>,
    active: Option<TabId>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a tab and makes it active. Always succeeds.
    pub fn add_tab(&mut self, new: NewTab) -> TabId {
        let id = TabId::new();
        let requested = new.name.as_deref().unwrap_or(DEFAULT_TAB_NAME);
        let name = self.unique_name(requested);
        let display_name = display_name(&name);

        tracing::debug!(%id, %name, temp = new.is_temp, "adding tab");

        self.tabs.push(Tab {
            id,
            name,
            display_name,
            file: new.file,
            content: new.content.unwrap_or_default(),
            is_temp: new.is_temp,
            language: None,
        });
        self.active = Some(id);
        id
    }

    /// Makes `id` the active tab.
    ///
    /// Returns `false` without touching anything when the tab is already
    /// active or is not open.
    pub fn select_tab(&mut self, id: TabId) -> bool {
        if self.active == Some(id) || self.position(id).is_none() {
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Closes a tab.
    ///
    /// When the closed tab was active, the tab before it becomes active. The
    /// first tab has nothing before it, so its successor (now at index 0)
    /// takes over. Indexing before the first tab would instead leave no
    /// selection while tabs remain, so that case is not followed. Closing the
    /// last remaining tab leaves no selection.
    pub fn remove_tab(&mut self, id: TabId) -> Option<Tab> {
        let idx = self.position(id)?;
        let removed = self.tabs.remove(idx);

        if self.active == Some(id) {
            self.active = if self.tabs.is_empty() {
                None
            } else {
                self.tabs.get(idx.saturating_sub(1)).map(Tab::id)
            };
        }

        tracing::debug!(%id, name = %removed.name, "removed tab");
        Some(removed)
    }

    /// Replaces a tab's stored content. Returns `false` for unknown tabs.
    pub fn update_content(&mut self, id: TabId, content: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(tab) => {
                tab.content = content.into();
                true
            }
            None => false,
        }
    }

    /// Overrides the language used to edit a tab.
    pub fn set_language(&mut self, id: TabId, language: Language) -> bool {
        match self.get_mut(id) {
            Some(tab) => {
                tab.language = Some(language);
                true
            }
            None => false,
        }
    }

    /// Records where a tab was saved. The tab keeps its name.
    pub fn attach_file(&mut self, id: TabId, file: impl Into<PathBuf>) -> bool {
        match self.get_mut(id) {
            Some(tab) => {
                tab.file = Some(file.into());
                tab.is_temp = false;
                true
            }
            None => false,
        }
    }

    /// Returns true if an open tab already uses `name`.
    pub fn is_name_taken(&self, name: &str) -> bool {
        self.tabs.iter().any(|tab| tab.name == name)
    }

    /// Returns `initial`, or `"initial (n)"` with the smallest free `n >= 1`.
    pub fn unique_name(&self, initial: &str) -> String {
        if !self.is_name_taken(initial) {
            return initial.to_string();
        }
        (1usize..)
            .map(|n| format!("{} ({})", initial, n))
            .find(|candidate| !self.is_name_taken(candidate))
            .unwrap_or_else(|| initial.to_string())
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    pub fn get_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|tab| tab.id == id)
    }

    /// Index of a tab in insertion order.
    pub fn position(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == id)
    }

    pub fn active_id(&self) -> Option<TabId> {
        self.active
    }

    pub fn active(&self) -> Option<&Tab> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut Tab> {
        let id = self.active?;
        self.get_mut(id)
    }

    /// Tabs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn names(registry: &TabRegistry) -> Vec<&str> {
        registry.iter().map(Tab::name).collect()
    }

    #[test]
    fn test_duplicate_name_gets_suffix() {
        let mut registry = TabRegistry::new();
        registry.add_tab(NewTab::named("x"));
        registry.add_tab(NewTab::named("x"));
        registry.add_tab(NewTab::named("x"));
        assert_eq!(names(&registry), ["x", "x (1)", "x (2)"]);
    }

    #[test]
    fn test_open_colliding_files() {
        let mut registry = TabRegistry::new();
        registry.add_tab(NewTab::from_file("a.txt", "/one/a.txt", "1"));
        registry.add_tab(NewTab::from_file("a.txt", "/two/a.txt", "2"));
        registry.add_tab(NewTab::from_file("b.txt", "/one/b.txt", "3"));
        assert_eq!(names(&registry), ["a.txt", "a.txt (1)", "b.txt"]);
    }

    #[test]
    fn test_same_file_opened_twice_is_not_deduplicated() {
        let mut registry = TabRegistry::new();
        let first = registry.add_tab(NewTab::from_file("a.txt", "/a.txt", ""));
        let second = registry.add_tab(NewTab::from_file("a.txt", "/a.txt", ""));
        assert_ne!(first, second);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(second).unwrap().name(), "a.txt (1)");
    }

    #[test]
    fn test_suffix_reuses_smallest_free_number() {
        let mut registry = TabRegistry::new();
        registry.add_tab(NewTab::named("x"));
        let one = registry.add_tab(NewTab::named("x"));
        registry.add_tab(NewTab::named("x"));
        registry.remove_tab(one);
        let again = registry.add_tab(NewTab::named("x"));
        assert_eq!(registry.get(again).unwrap().name(), "x (1)");
    }

    #[test]
    fn test_temp_tabs_use_default_name() {
        let mut registry = TabRegistry::new();
        let first = registry.add_tab(NewTab::temp());
        let second = registry.add_tab(NewTab::temp());
        assert_eq!(registry.get(first).unwrap().name(), DEFAULT_TAB_NAME);
        assert_eq!(registry.get(second).unwrap().name(), "New Document.txt (1)");
        assert!(registry.get(first).unwrap().is_temp());
        assert_eq!(registry.get(first).unwrap().content(), "");
    }

    #[test]
    fn test_display_name_truncation() {
        assert_eq!(display_name("short.txt"), "short.txt");
        assert_eq!(display_name("exactly-twenty-chars"), "exactly-twenty-chars");
        assert_eq!(
            display_name("a-rather-long-file-name.txt"),
            "a-rather-long-file-n..."
        );
        assert_eq!(display_name("ééééééééééééééééééééé"), "éééééééééééééééééééé...");
    }

    #[test]
    fn test_display_name_is_fixed_at_creation() {
        let mut registry = TabRegistry::new();
        let id = registry.add_tab(NewTab::named("New Document.txt (1) copy"));
        registry.attach_file(id, "/tmp/other.txt");
        assert_eq!(registry.get(id).unwrap().display_name(), "New Document.txt (1)...");
    }

    #[test]
    fn test_add_selects_new_tab() {
        let mut registry = TabRegistry::new();
        let a = registry.add_tab(NewTab::temp());
        assert_eq!(registry.active_id(), Some(a));
        let b = registry.add_tab(NewTab::temp());
        assert_eq!(registry.active_id(), Some(b));
    }

    #[test]
    fn test_select_is_noop_when_already_active() {
        let mut registry = TabRegistry::new();
        let a = registry.add_tab(NewTab::temp());
        let b = registry.add_tab(NewTab::temp());
        assert!(!registry.select_tab(b));
        assert!(registry.select_tab(a));
        assert_eq!(registry.active_id(), Some(a));
        assert!(!registry.select_tab(TabId::new()));
        assert_eq!(registry.active_id(), Some(a));
    }

    #[test]
    fn test_remove_only_tab_clears_selection() {
        let mut registry = TabRegistry::new();
        let a = registry.add_tab(NewTab::temp());
        assert!(registry.remove_tab(a).is_some());
        assert!(registry.is_empty());
        assert_eq!(registry.active_id(), None);
        assert!(registry.active().is_none());
    }

    #[test]
    fn test_remove_active_selects_previous() {
        let mut registry = TabRegistry::new();
        let a = registry.add_tab(NewTab::named("a"));
        let b = registry.add_tab(NewTab::named("b"));
        let c = registry.add_tab(NewTab::named("c"));
        registry.select_tab(b);
        registry.remove_tab(b);
        assert_eq!(registry.active_id(), Some(a));
        assert_eq!(names(&registry), ["a", "c"]);

        registry.select_tab(c);
        registry.remove_tab(c);
        assert_eq!(registry.active_id(), Some(a));
    }

    #[test]
    fn test_remove_first_active_selects_successor() {
        let mut registry = TabRegistry::new();
        let a = registry.add_tab(NewTab::named("a"));
        let b = registry.add_tab(NewTab::named("b"));
        registry.add_tab(NewTab::named("c"));
        registry.select_tab(a);
        registry.remove_tab(a);
        assert_eq!(registry.active_id(), Some(b));
    }

    #[test]
    fn test_remove_inactive_keeps_selection() {
        let mut registry = TabRegistry::new();
        let a = registry.add_tab(NewTab::named("a"));
        let b = registry.add_tab(NewTab::named("b"));
        let c = registry.add_tab(NewTab::named("c"));
        registry.remove_tab(a);
        assert_eq!(registry.active_id(), Some(c));
        registry.remove_tab(b);
        assert_eq!(registry.active_id(), Some(c));
    }

    #[test]
    fn test_remove_unknown_tab() {
        let mut registry = TabRegistry::new();
        let a = registry.add_tab(NewTab::temp());
        assert!(registry.remove_tab(TabId::new()).is_none());
        assert_eq!(registry.active_id(), Some(a));
    }

    #[test]
    fn test_update_content() {
        let mut registry = TabRegistry::new();
        let a = registry.add_tab(NewTab::temp());
        assert!(registry.update_content(a, "hello"));
        assert_eq!(registry.get(a).unwrap().content(), "hello");
        assert!(!registry.update_content(TabId::new(), "ignored"));
    }

    #[test]
    fn test_language_override() {
        let mut registry = TabRegistry::new();
        let a = registry.add_tab(NewTab::from_file("main.rs", "/src/main.rs", ""));
        assert_eq!(registry.get(a).unwrap().language(), Language::Rust);
        registry.set_language(a, Language::Json);
        assert_eq!(registry.get(a).unwrap().language(), Language::Json);
    }

    #[test]
    fn test_attach_file_keeps_name() {
        let mut registry = TabRegistry::new();
        let a = registry.add_tab(NewTab::temp());
        registry.attach_file(a, "/tmp/notes.md");
        let tab = registry.get(a).unwrap();
        assert_eq!(tab.name(), DEFAULT_TAB_NAME);
        assert_eq!(tab.file(), Some(Path::new("/tmp/notes.md")));
        assert!(!tab.is_temp());
    }

    proptest! {
        #[test]
        fn prop_names_stay_unique(
            ops in proptest::collection::vec((0u8..4, 0usize..8), 1..64)
        ) {
            let pool = ["a", "a (1)", "b", "New Document.txt"];
            let mut registry = TabRegistry::new();

            for (kind, pick) in ops {
                if kind == 0 && !registry.is_empty() {
                    let id = registry.iter().nth(pick % registry.len()).map(Tab::id).unwrap();
                    registry.remove_tab(id);
                } else {
                    registry.add_tab(NewTab::named(pool[pick % pool.len()]));
                }

                let unique: HashSet<&str> = registry.iter().map(Tab::name).collect();
                prop_assert_eq!(unique.len(), registry.len());
                prop_assert_eq!(registry.active_id().is_some(), !registry.is_empty());
            }
        }
    }
}
