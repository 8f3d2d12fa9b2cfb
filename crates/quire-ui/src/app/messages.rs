use iced::keyboard;
use iced::widget::text_editor;
use std::path::PathBuf;

use quire_core::{MenuAction, OpenTab, TabId};

#[derive(Debug, Clone)]
pub enum Message {
    // Menu bar
    Menu(MenuAction),
    ToggleMenu(usize),
    CloseMenu,

    // Tab strip
    TabSelected(TabId),
    TabClosed(TabId),

    // Editor
    EditorAction(text_editor::Action),

    KeyPressed(keyboard::Key, keyboard::Modifiers),

    // Async results
    FileOpened(Result<OpenTab, String>),
    SaveAsPicked(TabId, Option<PathBuf>),
}
