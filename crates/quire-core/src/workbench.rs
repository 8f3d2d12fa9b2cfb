//! The workbench ties the tab registry, statistics and event bus together.
//!
//! ## Learning: The Facade Pattern
//!
//! The UI talks to `Workbench` only. It hands in [`ShellEvent`]s and gets
//! back a [`Response`] describing what, if anything, the UI has to do next
//! (forward a command to the editor widget, ask for a save path, re-theme).
//!
//! ## Thread Safety
//!
//! `Workbench` is owned by the UI thread. Every call runs to completion, so
//! there is no locking anywhere in here.

use std::path::{Path, PathBuf};

use crate::event::{EventBus, ShellEvent, WorkbenchEvent};
use crate::format;
use crate::language::Language;
use crate::stats::{EditorStatistics, StatisticsAggregator};
use crate::tab::{NewTab, Tab, TabId, TabRegistry};
use crate::{CoreError, CoreResult};

/// Commands the workbench forwards to the editor widget of the active tab.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    Undo,
    Redo,
    /// Replace the whole buffer (after formatting).
    Replace(String),
    SetLanguage(Language),
}

/// What the UI should do after an event was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    None,
    Editor(TabId, EditorCommand),
    /// The active tab has no file; ask the user where to save it.
    SaveAs { id: TabId, suggested_name: String },
    Saved(TabId, PathBuf),
    ResetTheme,
}

pub struct Workbench {
    tabs: TabRegistry,
    statistics: StatisticsAggregator,
    event_bus: EventBus,
}

impl Workbench {
    pub fn new() -> Self {
        Self {
            tabs: TabRegistry::new(),
            statistics: StatisticsAggregator::new(),
            event_bus: EventBus::new(),
        }
    }

    /// Handles one event from the shell.
    ///
    /// Events that need an active tab are ignored when there is none.
    pub fn dispatch(&mut self, event: ShellEvent) -> CoreResult<Response> {
        tracing::debug!(event = event.name(), "dispatch");

        match event {
            ShellEvent::NewTab => {
                self.add_tab(NewTab::temp());
                Ok(Response::None)
            }
            ShellEvent::OpenTab(open) => {
                self.add_tab(NewTab::from_file(open.name, open.file, open.content));
                Ok(Response::None)
            }
            ShellEvent::RemoveTab => {
                if let Some(id) = self.tabs.active_id() {
                    self.remove_tab(id);
                }
                Ok(Response::None)
            }
            ShellEvent::SaveTab => self.save_active(),
            ShellEvent::UndoTab => Ok(self.forward(EditorCommand::Undo)),
            ShellEvent::RedoTab => Ok(self.forward(EditorCommand::Redo)),
            ShellEvent::FormatTab => self.format_active(),
            ShellEvent::SetTabLanguage(language) => {
                let Some(id) = self.tabs.active_id() else {
                    return Ok(Response::None);
                };
                self.tabs.set_language(id, language);
                self.emit(WorkbenchEvent::LanguageChanged(id, language));
                Ok(Response::Editor(id, EditorCommand::SetLanguage(language)))
            }
            ShellEvent::ResetTheme => {
                self.emit(WorkbenchEvent::ThemeReset);
                Ok(Response::ResetTheme)
            }
        }
    }

    // ==================== Tab Operations ====================

    pub fn add_tab(&mut self, new: NewTab) -> TabId {
        let id = self.tabs.add_tab(new);
        self.emit(WorkbenchEvent::TabAdded(id));
        self.emit(WorkbenchEvent::TabSelected(Some(id)));
        id
    }

    pub fn select_tab(&mut self, id: TabId) {
        if self.tabs.select_tab(id) {
            self.emit(WorkbenchEvent::TabSelected(Some(id)));
        }
    }

    pub fn remove_tab(&mut self, id: TabId) -> Option<Tab> {
        let was_active = self.tabs.active_id() == Some(id);
        let removed = self.tabs.remove_tab(id)?;
        self.emit(WorkbenchEvent::TabRemoved(id));
        if was_active {
            self.emit(WorkbenchEvent::TabSelected(self.tabs.active_id()));
            if self.tabs.is_empty() {
                self.publish_statistics(EditorStatistics::default());
            }
        }
        Some(removed)
    }

    /// Stores the widget's working copy back into the registry.
    pub fn update_content(&mut self, id: TabId, content: impl Into<String>) {
        if self.tabs.update_content(id, content) {
            self.emit(WorkbenchEvent::ContentChanged(id));
        }
    }

    /// Records where the user chose to save a tab after a `SaveAs` response.
    pub fn save_as(&mut self, id: TabId, path: impl AsRef<Path>) -> CoreResult<Response> {
        let path = path.as_ref();
        if !self.tabs.attach_file(id, path) {
            return Err(CoreError::TabNotFound(id));
        }
        self.write_tab(id)
    }

    // ==================== Statistics ====================

    /// Recomputes footer statistics from the active tab and the widget's
    /// line count and selection ranges.
    ///
    /// Returns the new snapshot, or `None` when nothing changed.
    pub fn observe_editor(&mut self, line_count: usize, selections: &[usize]) -> Option<EditorStatistics> {
        let content = self.tabs.active().map(Tab::content).unwrap_or_default();
        let next = EditorStatistics::compute(content, line_count, selections);
        self.publish_statistics(next)
    }

    pub fn statistics(&self) -> EditorStatistics {
        self.statistics.current()
    }

    fn publish_statistics(&mut self, next: EditorStatistics) -> Option<EditorStatistics> {
        let changed = self.statistics.observe(next)?;
        self.emit(WorkbenchEvent::StatisticsChanged(changed));
        Some(changed)
    }

    // ==================== Accessors ====================

    pub fn tabs(&self) -> &TabRegistry {
        &self.tabs
    }

    pub fn active(&self) -> Option<&Tab> {
        self.tabs.active()
    }

    /// Subscribes to workbench events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<WorkbenchEvent> {
        self.event_bus.subscribe()
    }

    // ==================== Internals ====================

    fn forward(&self, command: EditorCommand) -> Response {
        match self.tabs.active_id() {
            Some(id) => Response::Editor(id, command),
            None => Response::None,
        }
    }

    fn save_active(&mut self) -> CoreResult<Response> {
        let Some(tab) = self.tabs.active() else {
            return Ok(Response::None);
        };
        if tab.file().is_none() {
            return Ok(Response::SaveAs {
                id: tab.id(),
                suggested_name: tab.name().to_string(),
            });
        }
        let id = tab.id();
        self.write_tab(id)
    }

    fn write_tab(&mut self, id: TabId) -> CoreResult<Response> {
        let tab = self.tabs.get(id).ok_or(CoreError::TabNotFound(id))?;
        let path = tab.file().ok_or(CoreError::NoFile(id))?.to_path_buf();
        std::fs::write(&path, tab.content())?;
        tracing::info!("Saved {} to {}", tab.name(), path.display());
        self.emit(WorkbenchEvent::TabSaved(id, path.clone()));
        Ok(Response::Saved(id, path))
    }

    fn format_active(&mut self) -> CoreResult<Response> {
        let Some(tab) = self.tabs.active() else {
            return Ok(Response::None);
        };
        let id = tab.id();
        let formatted = format::format(tab.language(), tab.content())?;
        if formatted == tab.content() {
            return Ok(Response::None);
        }
        self.update_content(id, formatted.clone());
        Ok(Response::Editor(id, EditorCommand::Replace(formatted)))
    }

    fn emit(&self, event: WorkbenchEvent) {
        self.event_bus.emit(event);
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::OpenTab;
    use tempfile::tempdir;
    use tokio::sync::broadcast::error::TryRecvError;

    fn open(name: &str, file: &str, content: &str) -> ShellEvent {
        ShellEvent::OpenTab(OpenTab {
            name: name.into(),
            file: file.into(),
            content: content.into(),
        })
    }

    fn names(bench: &Workbench) -> Vec<String> {
        bench.tabs().iter().map(|t| t.name().to_string()).collect()
    }

    #[test]
    fn test_open_three_tabs_scenario() {
        let mut bench = Workbench::new();
        bench.dispatch(open("a.txt", "/x/a.txt", "")).unwrap();
        bench.dispatch(open("a.txt", "/y/a.txt", "")).unwrap();
        bench.dispatch(open("b.txt", "/x/b.txt", "")).unwrap();
        assert_eq!(names(&bench), ["a.txt", "a.txt (1)", "b.txt"]);
        assert_eq!(bench.active().unwrap().name(), "b.txt");
    }

    #[test]
    fn test_new_tab_is_temp() {
        let mut bench = Workbench::new();
        bench.dispatch(ShellEvent::NewTab).unwrap();
        let tab = bench.active().unwrap();
        assert!(tab.is_temp());
        assert!(tab.file().is_none());
    }

    #[test]
    fn test_remove_tab_closes_active() {
        let mut bench = Workbench::new();
        bench.dispatch(ShellEvent::NewTab).unwrap();
        bench.dispatch(ShellEvent::NewTab).unwrap();
        bench.dispatch(ShellEvent::RemoveTab).unwrap();
        assert_eq!(names(&bench), ["New Document.txt"]);
        bench.dispatch(ShellEvent::RemoveTab).unwrap();
        assert!(bench.active().is_none());
        assert_eq!(bench.dispatch(ShellEvent::RemoveTab).unwrap(), Response::None);
    }

    #[test]
    fn test_identical_statistics_emit_nothing() {
        let mut bench = Workbench::new();
        let id = bench.add_tab(NewTab::temp());
        bench.update_content(id, "hello");

        let mut rx = bench.subscribe();
        let first = bench.observe_editor(1, &[]);
        assert_eq!(first.map(|s| s.length), Some(5));
        assert!(matches!(rx.try_recv(), Ok(WorkbenchEvent::StatisticsChanged(_))));

        assert_eq!(bench.observe_editor(1, &[]), None);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_closing_last_tab_resets_statistics() {
        let mut bench = Workbench::new();
        let id = bench.add_tab(NewTab::named("a"));
        bench.update_content(id, "abc");
        bench.observe_editor(1, &[1]);
        bench.remove_tab(id);
        assert_eq!(bench.statistics(), EditorStatistics::default());
    }

    #[test]
    fn test_undo_redo_forward_to_active_tab() {
        let mut bench = Workbench::new();
        assert_eq!(bench.dispatch(ShellEvent::UndoTab).unwrap(), Response::None);
        let id = bench.add_tab(NewTab::temp());
        assert_eq!(
            bench.dispatch(ShellEvent::UndoTab).unwrap(),
            Response::Editor(id, EditorCommand::Undo)
        );
        assert_eq!(
            bench.dispatch(ShellEvent::RedoTab).unwrap(),
            Response::Editor(id, EditorCommand::Redo)
        );
    }

    #[test]
    fn test_set_language() {
        let mut bench = Workbench::new();
        let id = bench.add_tab(NewTab::temp());
        let response = bench.dispatch(ShellEvent::SetTabLanguage(Language::Python)).unwrap();
        assert_eq!(response, Response::Editor(id, EditorCommand::SetLanguage(Language::Python)));
        assert_eq!(bench.active().unwrap().language(), Language::Python);
    }

    #[test]
    fn test_format_json_tab() {
        let mut bench = Workbench::new();
        let id = bench.add_tab(NewTab::from_file("a.json", "/a.json", r#"{"k":1}"#));
        let response = bench.dispatch(ShellEvent::FormatTab).unwrap();
        let expected = "{\n  \"k\": 1\n}\n".to_string();
        assert_eq!(response, Response::Editor(id, EditorCommand::Replace(expected.clone())));
        assert_eq!(bench.active().unwrap().content(), expected);
        assert_eq!(bench.dispatch(ShellEvent::FormatTab).unwrap(), Response::None);
    }

    #[test]
    fn test_format_invalid_json_keeps_content() {
        let mut bench = Workbench::new();
        bench.add_tab(NewTab::from_file("a.json", "/a.json", "{"));
        assert!(matches!(bench.dispatch(ShellEvent::FormatTab), Err(CoreError::Format(_))));
        assert_eq!(bench.active().unwrap().content(), "{");
    }

    #[test]
    fn test_save_temp_tab_asks_for_path() {
        let dir = tempdir().unwrap();
        let mut bench = Workbench::new();
        let id = bench.add_tab(NewTab::temp());
        bench.update_content(id, "draft");

        let response = bench.dispatch(ShellEvent::SaveTab).unwrap();
        assert_eq!(
            response,
            Response::SaveAs {
                id,
                suggested_name: "New Document.txt".into()
            }
        );

        let path = dir.path().join("draft.txt");
        assert_eq!(bench.save_as(id, &path).unwrap(), Response::Saved(id, path.clone()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "draft");
        assert!(!bench.active().unwrap().is_temp());
    }

    #[test]
    fn test_save_file_backed_tab() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "old").unwrap();

        let mut bench = Workbench::new();
        bench
            .dispatch(ShellEvent::OpenTab(OpenTab::from_path(path.clone(), "old".into())))
            .unwrap();
        let id = bench.active().unwrap().id();
        bench.update_content(id, "new");

        let mut rx = bench.subscribe();
        assert_eq!(bench.dispatch(ShellEvent::SaveTab).unwrap(), Response::Saved(id, path.clone()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(rx.try_recv().unwrap(), WorkbenchEvent::TabSaved(id, path));
    }

    #[test]
    fn test_writing_tab_without_file_fails() {
        let mut bench = Workbench::new();
        let id = bench.add_tab(NewTab::temp());
        assert!(matches!(bench.write_tab(id), Err(CoreError::NoFile(tab)) if tab == id));
    }

    #[test]
    fn test_reset_theme() {
        let mut bench = Workbench::new();
        let mut rx = bench.subscribe();
        assert_eq!(bench.dispatch(ShellEvent::ResetTheme).unwrap(), Response::ResetTheme);
        assert_eq!(rx.try_recv().unwrap(), WorkbenchEvent::ThemeReset);
    }
}
