//! Events flowing between the shell and the workbench.
//!
//! Two directions:
//! - [`ShellEvent`]: commands from the shell (menus, dialogs, shortcuts)
//!   into the workbench. Delivered in order, one at a time.
//! - [`WorkbenchEvent`]: notifications out of the workbench, broadcast on
//!   an [`EventBus`] to anyone interested.
//!
//! ## Learning: Observer Pattern in Rust
//!
//! Rust's ownership model makes callback-based observers awkward. A
//! `tokio::sync::broadcast` channel sidesteps that: events are values,
//! every subscriber gets its own copy, and slow subscribers lag instead of
//! blocking the sender.

use std::path::PathBuf;
use tokio::sync::broadcast;

use crate::language::Language;
use crate::stats::EditorStatistics;
use crate::tab::TabId;

/// Payload of an `openTab` event: a file the shell has already read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTab {
    pub name: String,
    pub file: PathBuf,
    pub content: String,
}

impl OpenTab {
    /// Names the tab after the file's base name.
    pub fn from_path(file: PathBuf, content: String) -> Self {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file.display().to_string());
        Self { name, file, content }
    }
}

/// Commands sent by the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    NewTab,
    OpenTab(OpenTab),
    RemoveTab,
    SaveTab,
    UndoTab,
    RedoTab,
    FormatTab,
    SetTabLanguage(Language),
    ResetTheme,
}

impl ShellEvent {
    /// Channel name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ShellEvent::NewTab => "newTab",
            ShellEvent::OpenTab(_) => "openTab",
            ShellEvent::RemoveTab => "removeTab",
            ShellEvent::SaveTab => "saveTab",
            ShellEvent::UndoTab => "undoTab",
            ShellEvent::RedoTab => "redoTab",
            ShellEvent::FormatTab => "formatTab",
            ShellEvent::SetTabLanguage(_) => "setTabLanguage",
            ShellEvent::ResetTheme => "resetTheme",
        }
    }
}

/// Notifications published by the workbench.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkbenchEvent {
    TabAdded(TabId),
    /// Active selection changed; `None` once every tab is closed.
    TabSelected(Option<TabId>),
    TabRemoved(TabId),
    ContentChanged(TabId),
    StatisticsChanged(EditorStatistics),
    LanguageChanged(TabId, Language),
    TabSaved(TabId, PathBuf),
    ThemeReset,
}

/// Broadcast channel for [`WorkbenchEvent`]s.
pub struct EventBus {
    sender: broadcast::Sender<WorkbenchEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(256);
        Self { sender }
    }

    /// Emits an event to all subscribers.
    pub fn emit(&self, event: WorkbenchEvent) {
        // No subscribers is fine.
        let _ = self.sender.send(event);
    }

    /// Returns a receiver for all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<WorkbenchEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}
