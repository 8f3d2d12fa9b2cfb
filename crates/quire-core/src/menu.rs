//! Application menu model.
//!
//! ## Learning: Data-Driven UI
//!
//! The menu is plain data rebuilt from a [`MenuContext`] whenever its inputs
//! change (themes reloaded, theme selected). The UI only renders it and
//! turns clicks into the attached [`MenuAction`]. Keyboard shortcuts are
//! looked up in the same model, so a shortcut always does what its menu
//! entry says.

use crate::event::ShellEvent;
use crate::language::Language;

/// Keyboard shortcut such as `CmdOrCtrl+Shift+F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Accelerator {
    /// Cmd on macOS, Ctrl elsewhere
    pub command: bool,
    pub shift: bool,
    pub alt: bool,
    /// Lowercase key character
    pub key: char,
}

impl Accelerator {
    pub const fn command(key: char) -> Self {
        Self {
            command: true,
            shift: false,
            alt: false,
            key,
        }
    }

    pub const fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Parses strings like `"CmdOrCtrl+Shift+F"`.
    pub fn parse(s: &str) -> Result<Self, AcceleratorError> {
        let mut accel = Self {
            command: false,
            shift: false,
            alt: false,
            key: '\0',
        };
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            match part.to_lowercase().as_str() {
                "cmdorctrl" | "commandorcontrol" | "ctrl" | "control" | "cmd" | "command" => {
                    accel.command = true
                }
                "shift" => accel.shift = true,
                "alt" | "option" => accel.alt = true,
                other => {
                    let mut chars = other.chars();
                    match (chars.next(), chars.next(), key) {
                        (Some(c), None, None) => key = Some(c),
                        _ => return Err(AcceleratorError::Invalid(s.to_string())),
                    }
                }
            }
        }

        accel.key = key.ok_or_else(|| AcceleratorError::Invalid(s.to_string()))?;
        Ok(accel)
    }
}

impl std::fmt::Display for Accelerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.command {
            #[cfg(target_os = "macos")]
            f.write_str("Cmd+")?;
            #[cfg(not(target_os = "macos"))]
            f.write_str("Ctrl+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        write!(f, "{}", self.key.to_ascii_uppercase())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AcceleratorError {
    #[error("Invalid accelerator: {0}")]
    Invalid(String),
}

/// What happens when a menu entry is activated.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    /// Forward an event to the workbench.
    Shell(ShellEvent),
    /// Show the open-file dialog, then send `openTab`.
    OpenFile,
    /// Persist a theme choice, rebuild the menu, then send `resetTheme`.
    SelectTheme(String),
    /// Re-scan the themes directory and rebuild the menu.
    ReloadThemes,
    /// Reload preferences and theme from disk.
    Reload,
    ToggleDeveloperTools,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub label: String,
    pub accelerator: Option<Accelerator>,
    pub action: MenuAction,
    pub checked: bool,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            accelerator: None,
            action,
            checked: false,
        }
    }

    /// Attaches a shortcut written like `"CmdOrCtrl+Shift+F"`.
    ///
    /// An unparsable shortcut is logged and left off the item.
    pub fn shortcut(mut self, spec: &str) -> Self {
        match Accelerator::parse(spec) {
            Ok(accelerator) => self.accelerator = Some(accelerator),
            Err(e) => tracing::warn!("Ignoring shortcut on {}: {}", self.label, e),
        }
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuEntry {
    Item(MenuItem),
    Submenu(Menu),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    pub label: String,
    pub entries: Vec<MenuEntry>,
}

impl Menu {
    fn new(label: impl Into<String>, entries: Vec<MenuEntry>) -> Self {
        Self {
            label: label.into(),
            entries,
        }
    }

    /// All items, descending into submenus.
    pub fn items(&self) -> Vec<&MenuItem> {
        let mut out = Vec::new();
        collect_items(&self.entries, &mut out);
        out
    }
}

fn collect_items<'a>(entries: &'a [MenuEntry], out: &mut Vec<&'a MenuItem>) {
    for entry in entries {
        match entry {
            MenuEntry::Item(item) => out.push(item),
            MenuEntry::Submenu(menu) => collect_items(&menu.entries, out),
        }
    }
}

/// Everything the menu depends on.
#[derive(Debug, Clone, Copy)]
pub struct MenuContext<'a> {
    pub themes: &'a [String],
    pub current_theme: Option<&'a str>,
    pub languages: &'a [Language],
    /// Show the Developer menu
    pub developer: bool,
}

/// The top-level menus, left to right.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MenuBar {
    pub menus: Vec<Menu>,
}

impl MenuBar {
    pub fn build(ctx: MenuContext<'_>) -> Self {
        use MenuEntry::Item;

        let file = Menu::new(
            "File",
            vec![
                Item(MenuItem::new("New", MenuAction::Shell(ShellEvent::NewTab))
                    .shortcut("CmdOrCtrl+N")),
                Item(MenuItem::new("Open", MenuAction::OpenFile)
                    .shortcut("CmdOrCtrl+T")),
                Item(MenuItem::new("Save", MenuAction::Shell(ShellEvent::SaveTab))
                    .shortcut("CmdOrCtrl+S")),
                Item(MenuItem::new("Remove", MenuAction::Shell(ShellEvent::RemoveTab))
                    .shortcut("CmdOrCtrl+W")),
            ],
        );

        let edit = Menu::new(
            "Edit",
            vec![
                Item(MenuItem::new("Undo", MenuAction::Shell(ShellEvent::UndoTab))
                    .shortcut("CmdOrCtrl+Z")),
                Item(MenuItem::new("Redo", MenuAction::Shell(ShellEvent::RedoTab))
                    .shortcut("CmdOrCtrl+Y")),
                Item(MenuItem::new("Format", MenuAction::Shell(ShellEvent::FormatTab))
                    .shortcut("CmdOrCtrl+Shift+F")),
            ],
        );

        let language = Menu::new(
            "Language",
            ctx.languages
                .iter()
                .map(|&lang| {
                    Item(MenuItem::new(
                        lang.label(),
                        MenuAction::Shell(ShellEvent::SetTabLanguage(lang)),
                    ))
                })
                .collect(),
        );

        let mut theme_entries: Vec<MenuEntry> = ctx
            .themes
            .iter()
            .map(|theme| {
                Item(MenuItem::new(theme.as_str(), MenuAction::SelectTheme(theme.clone()))
                    .checked(ctx.current_theme == Some(theme.as_str())))
            })
            .collect();
        theme_entries.push(Item(MenuItem::new("Reload Themes", MenuAction::ReloadThemes)));

        let preferences = Menu::new(
            "Preferences",
            vec![MenuEntry::Submenu(Menu::new("Theme", theme_entries))],
        );

        let mut menus = vec![file, edit, language, preferences];

        if ctx.developer {
            menus.push(Menu::new(
                "Developer",
                vec![
                    Item(MenuItem::new("Reload", MenuAction::Reload)
                        .shortcut("CmdOrCtrl+R")),
                    Item(MenuItem::new("Developer Tools", MenuAction::ToggleDeveloperTools)
                        .shortcut("CmdOrCtrl+I")),
                ],
            ));
        }

        tracing::debug!(themes = ctx.themes.len(), developer = ctx.developer, "Menu rebuilt");
        Self { menus }
    }

    /// Finds the action bound to a shortcut.
    pub fn find_by_accelerator(&self, accelerator: Accelerator) -> Option<&MenuAction> {
        self.menus
            .iter()
            .flat_map(Menu::items)
            .find(|item| item.accelerator == Some(accelerator))
            .map(|item| &item.action)
    }

    pub fn menu(&self, label: &str) -> Option<&Menu> {
        self.menus.iter().find(|menu| menu.label == label)
    }
}
