use iced::widget::text_editor;
use std::path::PathBuf;

use std::collections::VecDeque;
use std::ops::Deref;
use tokio::sync::broadcast;

use quire_core::{ShellConfig, WorkbenchEvent};

/// Snapshots kept per tab for undo.
const HISTORY_LIMIT: usize = 100;

/// Workbench events kept for the developer tools panel.
const EVENT_LOG_LIMIT: usize = 50;

/// Snapshot-based undo/redo history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    undo_stack: Vec<String>,
    redo_stack: Vec<String>,
}

impl History {
    /// Records `current` before an edit. Clears the redo stack.
    pub fn record(&mut self, current: String) {
        if self.undo_stack.last() == Some(&current) {
            return;
        }
        self.undo_stack.push(current);
        if self.undo_stack.len() > HISTORY_LIMIT {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Returns the text to restore, given the text being replaced.
    pub fn undo(&mut self, current: String) -> Option<String> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    pub fn redo(&mut self, current: String) -> Option<String> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }
}

/// The editor widget's working copy of one tab.
pub struct EditorState {
    pub content: text_editor::Content,
    pub history: History,
}

impl EditorState {
    pub fn new(text: &str) -> Self {
        Self {
            content: text_editor::Content::with_text(text),
            history: History::default(),
        }
    }

    /// The buffer's text, exactly as typed.
    ///
    /// `Content::text` appends a newline whenever the last line lacks one,
    /// so the lines are joined here instead.
    pub fn text(&self) -> String {
        join_lines(self.content.lines())
    }

    /// Applies a widget action, recording history for edits.
    ///
    /// Returns `true` when the text changed.
    pub fn perform(&mut self, action: text_editor::Action) -> bool {
        let is_edit = action.is_edit();
        if is_edit {
            self.history.record(self.text());
        }
        self.content.perform(action);
        is_edit
    }

    /// Replaces the whole buffer as one undoable step.
    pub fn replace(&mut self, text: &str) {
        self.history.record(self.text());
        self.content = text_editor::Content::with_text(text);
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.text()) {
            Some(previous) => {
                self.content = text_editor::Content::with_text(&previous);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.text()) {
            Some(next) => {
                self.content = text_editor::Content::with_text(&next);
                true
            }
            None => false,
        }
    }

    /// Character length of each selection range. The widget has at most one.
    pub fn selection_lengths(&self) -> Vec<usize> {
        self.content
            .selection()
            .map(|selected| selected.chars().count())
            .into_iter()
            .collect()
    }

    pub fn line_count(&self) -> usize {
        self.content.line_count()
    }
}

fn join_lines<S: Deref<Target = str>>(lines: impl IntoIterator<Item = S>) -> String {
    let mut text = String::new();
    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 {
            text.push('\n');
        }
        text.push_str(&line);
    }
    text
}

/// Recent workbench events, newest last, shown in the developer tools panel.
pub struct EventLog {
    receiver: broadcast::Receiver<WorkbenchEvent>,
    entries: VecDeque<String>,
}

impl EventLog {
    pub fn new(receiver: broadcast::Receiver<WorkbenchEvent>) -> Self {
        Self {
            receiver,
            entries: VecDeque::with_capacity(EVENT_LOG_LIMIT),
        }
    }

    /// Moves every pending event into the log.
    pub fn drain(&mut self) {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    tracing::debug!(?event, "workbench event");
                    if self.entries.len() == EVENT_LOG_LIMIT {
                        self.entries.pop_front();
                    }
                    self.entries.push_back(format!("{:?}", event));
                }
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event log lagged");
                }
                Err(_) => break,
            }
        }
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

/// Startup options handed over by the binary.
#[derive(Debug, Default)]
pub struct Flags {
    pub config: ShellConfig,
    /// File opened in a second tab after the initial blank one
    pub file: Option<PathBuf>,
}
