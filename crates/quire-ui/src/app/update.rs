use iced::widget::scrollable;
use iced::{Task, keyboard};
use std::path::PathBuf;

use quire_core::{
    Accelerator, CoreResult, EditorCommand, MenuAction, OpenTab, Preferences, Response,
    ShellEvent, TabId,
};

use super::{App, EditorState, Message, tab_strip_id};

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        let task = self.handle_message(message);
        self.events.drain();
        task
    }

    fn handle_message(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Menu(action) => {
                self.active_menu = None;
                return self.run_menu_action(action);
            }

            Message::ToggleMenu(idx) => {
                self.active_menu = if self.active_menu == Some(idx) {
                    None
                } else {
                    Some(idx)
                };
            }

            Message::CloseMenu => {
                self.active_menu = None;
            }

            Message::TabSelected(id) => {
                self.active_menu = None;
                self.workbench.select_tab(id);
                self.refresh_statistics();
            }

            Message::TabClosed(id) => {
                self.active_menu = None;
                if let Some(tab) = self.workbench.remove_tab(id) {
                    self.status_message = format!("Closed: {}", tab.name());
                }
                self.sync_editors();
                self.refresh_statistics();
            }

            Message::EditorAction(action) => {
                self.active_menu = None;
                let Some(id) = self.workbench.tabs().active_id() else {
                    return Task::none();
                };
                if let Some(editor) = self.editors.get_mut(&id) {
                    if editor.perform(action) {
                        let text = editor.text();
                        self.workbench.update_content(id, text);
                    }
                }
                self.refresh_statistics();
            }

            Message::KeyPressed(key, modifiers) => {
                return self.handle_key_pressed(key, modifiers);
            }

            Message::FileOpened(result) => match result {
                Ok(open) => {
                    self.status_message = format!("Opened: {}", open.name);
                    return self.dispatch(ShellEvent::OpenTab(open));
                }
                Err(e) => {
                    if e != "Cancelled" {
                        self.status_message = format!("Error: {}", e);
                    }
                }
            },

            Message::SaveAsPicked(id, path) => {
                let Some(path) = path else {
                    return Task::none();
                };
                let result = self.workbench.save_as(id, path);
                return self.apply(result);
            }
        }

        Task::none()
    }

    // ==================== Workbench ====================

    /// Hands an event to the workbench and carries out its response.
    pub fn dispatch(&mut self, event: ShellEvent) -> Task<Message> {
        let before = self.workbench.tabs().len();
        let result = self.workbench.dispatch(event);
        self.sync_editors();

        let follow_up = self.apply(result);
        self.refresh_statistics();

        if self.workbench.tabs().len() > before {
            Task::batch([follow_up, self.scroll_to_active()])
        } else {
            follow_up
        }
    }

    fn apply(&mut self, result: CoreResult<Response>) -> Task<Message> {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("{}", e);
                self.status_message = format!("Error: {}", e);
                return Task::none();
            }
        };

        match response {
            Response::None => {}
            Response::Editor(id, command) => self.apply_editor_command(id, command),
            Response::SaveAs { id, suggested_name } => {
                return Task::perform(
                    async move {
                        rfd::AsyncFileDialog::new()
                            .set_file_name(&suggested_name)
                            .save_file()
                            .await
                            .map(|file| file.path().to_path_buf())
                    },
                    move |path| Message::SaveAsPicked(id, path),
                );
            }
            Response::Saved(_, path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                self.status_message = format!("Saved: {}", name);
            }
            Response::ResetTheme => {
                self.theme = crate::theme::load_theme(&self.catalog, self.preferences.theme_name());
            }
        }

        Task::none()
    }

    fn apply_editor_command(&mut self, id: TabId, command: EditorCommand) {
        let Some(editor) = self.editors.get_mut(&id) else {
            return;
        };

        let changed = match command {
            EditorCommand::Undo => editor.undo(),
            EditorCommand::Redo => editor.redo(),
            EditorCommand::Replace(text) => {
                editor.replace(&text);
                self.status_message = "Formatted".to_string();
                // The workbench already holds the replacement.
                false
            }
            EditorCommand::SetLanguage(language) => {
                self.status_message = format!("Language: {}", language);
                false
            }
        };

        if changed {
            let text = editor.text();
            self.workbench.update_content(id, text);
        }
    }

    /// Creates widget state for new tabs and drops it for closed ones.
    pub fn sync_editors(&mut self) {
        let tabs = self.workbench.tabs();
        self.editors.retain(|id, _| tabs.get(*id).is_some());
        for tab in tabs.iter() {
            self.editors
                .entry(tab.id())
                .or_insert_with(|| EditorState::new(tab.content()));
        }
    }

    /// Feeds the active editor's line count and selection to the statistics
    /// aggregator.
    pub fn refresh_statistics(&mut self) {
        let Some(editor) = self
            .workbench
            .tabs()
            .active_id()
            .and_then(|id| self.editors.get(&id))
        else {
            return;
        };
        let line_count = editor.line_count();
        let selections = editor.selection_lengths();
        self.workbench.observe_editor(line_count, &selections);
    }

    /// Scrolls the tab strip so the active tab is in view.
    ///
    /// iced 0.13 scrollables cannot scroll to a child widget by id, so the
    /// tab's container anchor is not looked up. The strip snaps to the
    /// active tab's relative position instead, which lands on it because
    /// tabs are laid out in registry order.
    fn scroll_to_active(&self) -> Task<Message> {
        let tabs = self.workbench.tabs();
        let Some(pos) = tabs.active_id().and_then(|id| tabs.position(id)) else {
            return Task::none();
        };
        let x = if tabs.len() > 1 {
            pos as f32 / (tabs.len() - 1) as f32
        } else {
            0.0
        };
        scrollable::snap_to(tab_strip_id(), scrollable::RelativeOffset { x, y: 0.0 })
    }

    // ==================== Menu ====================

    fn run_menu_action(&mut self, action: MenuAction) -> Task<Message> {
        match action {
            MenuAction::Shell(event) => return self.dispatch(event),

            MenuAction::OpenFile => {
                return Task::perform(
                    async {
                        match rfd::AsyncFileDialog::new().pick_file().await {
                            Some(file) => read_file(file.path().to_path_buf()).await,
                            None => Err("Cancelled".to_string()),
                        }
                    },
                    Message::FileOpened,
                );
            }

            MenuAction::SelectTheme(theme) => {
                match Preferences::select_theme(&self.config.preferences_file, &theme) {
                    Ok(preferences) => {
                        self.preferences = preferences;
                        self.rebuild_menu();
                        self.status_message = format!("Theme: {}", theme);
                        return self.dispatch(ShellEvent::ResetTheme);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to save theme preference: {}", e);
                        self.status_message = format!("Error: {}", e);
                    }
                }
            }

            MenuAction::ReloadThemes => {
                self.themes = self.catalog.list();
                self.rebuild_menu();
                self.status_message = format!("{} themes", self.themes.len());
            }

            MenuAction::Reload => {
                match Preferences::load(&self.config.preferences_file) {
                    Ok(preferences) => self.preferences = preferences,
                    Err(e) => tracing::warn!("Keeping current preferences: {}", e),
                }
                self.themes = self.catalog.list();
                self.rebuild_menu();
                self.status_message = "Reloaded".to_string();
                return self.dispatch(ShellEvent::ResetTheme);
            }

            MenuAction::ToggleDeveloperTools => {
                self.developer_tools_visible = !self.developer_tools_visible;
            }
        }

        Task::none()
    }

    // ==================== Keyboard ====================

    pub fn handle_key_pressed(
        &mut self,
        key: keyboard::Key,
        modifiers: keyboard::Modifiers,
    ) -> Task<Message> {
        if matches!(key, keyboard::Key::Named(keyboard::key::Named::Escape)) {
            self.active_menu = None;
            return Task::none();
        }

        let Some(accelerator) = to_accelerator(&key, modifiers) else {
            return Task::none();
        };

        match self.menu_bar.find_by_accelerator(accelerator).cloned() {
            Some(action) => self.handle_message(Message::Menu(action)),
            None => Task::none(),
        }
    }
}

/// Maps a key press with the command modifier to an accelerator.
fn to_accelerator(key: &keyboard::Key, modifiers: keyboard::Modifiers) -> Option<Accelerator> {
    if !modifiers.command() {
        return None;
    }
    let keyboard::Key::Character(c) = key else {
        return None;
    };
    let key = c.chars().next()?.to_lowercase().next()?;

    Some(Accelerator {
        command: true,
        shift: modifiers.shift(),
        alt: modifiers.alt(),
        key,
    })
}

/// Reads a file into an `openTab` payload.
pub async fn read_file(path: PathBuf) -> Result<OpenTab, String> {
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => Ok(OpenTab::from_path(path, content)),
        Err(e) => Err(format!("Failed to read {}: {}", path.display(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::{Key, Modifiers};

    #[test]
    fn test_to_accelerator() {
        let key = Key::Character("F".into());
        assert_eq!(
            to_accelerator(&key, Modifiers::COMMAND | Modifiers::SHIFT),
            Some(Accelerator::command('f').with_shift())
        );
        assert_eq!(to_accelerator(&key, Modifiers::SHIFT), None);
        assert_eq!(
            to_accelerator(&Key::Named(keyboard::key::Named::Enter), Modifiers::COMMAND),
            None
        );
    }

    #[tokio::test]
    async fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "# hi").unwrap();

        let open = read_file(path.clone()).await.unwrap();
        assert_eq!(open.name, "notes.md");
        assert_eq!(open.content, "# hi");
        assert!(read_file(dir.path().join("missing")).await.is_err());
    }
}
