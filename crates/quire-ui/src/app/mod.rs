use iced::widget::scrollable;
use iced::{Subscription, Task, Theme, keyboard};
use std::collections::HashMap;

use quire_core::{
    Language, MenuBar, MenuContext, Preferences, ShellConfig, ShellEvent, TabId, ThemeCatalog,
    Workbench,
};

pub mod messages;
pub mod types;
pub mod update;
pub mod view;

pub use messages::*;
pub use types::*;

/// Id of the horizontal scrollable holding the tab strip.
pub fn tab_strip_id() -> scrollable::Id {
    scrollable::Id::new("tab-strip")
}

pub struct App {
    pub workbench: Workbench,
    /// Widget working copies, one per open tab
    pub editors: HashMap<TabId, EditorState>,
    pub config: ShellConfig,
    pub catalog: ThemeCatalog,
    pub themes: Vec<String>,
    pub preferences: Preferences,
    pub menu_bar: MenuBar,
    /// Index into `menu_bar.menus` of the open dropdown
    pub active_menu: Option<usize>,
    pub theme: Theme,
    pub status_message: String,
    pub developer_tools_visible: bool,
    /// Workbench events, drained after every update
    pub events: EventLog,
}

impl App {
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let Flags { config, file } = flags;

        let catalog = ThemeCatalog::new(&config.themes_dir);
        let preferences = Preferences::load(&config.preferences_file).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable preferences: {}", e);
            Preferences::default()
        });
        let themes = catalog.list();
        let theme = crate::theme::load_theme(&catalog, preferences.theme_name());

        let workbench = Workbench::new();
        let events = EventLog::new(workbench.subscribe());

        let mut app = Self {
            workbench,
            editors: HashMap::new(),
            config,
            catalog,
            themes,
            preferences,
            menu_bar: MenuBar::default(),
            active_menu: None,
            theme,
            status_message: "Ready".to_string(),
            developer_tools_visible: false,
            events,
        };
        app.rebuild_menu();

        let mut tasks = vec![app.dispatch(ShellEvent::NewTab)];
        app.events.drain();
        if let Some(path) = file {
            tasks.push(Task::perform(update::read_file(path), Message::FileOpened));
        }

        (app, Task::batch(tasks))
    }

    pub fn title(&self) -> String {
        match self.workbench.active() {
            Some(tab) => format!("{} - Quire", tab.name()),
            None => "Quire".to_string(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme.clone()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, modifiers| Some(Message::KeyPressed(key, modifiers)))
    }

    /// Rebuilds the menu from the current themes and preferences.
    pub fn rebuild_menu(&mut self) {
        self.menu_bar = MenuBar::build(MenuContext {
            themes: &self.themes,
            current_theme: self.preferences.theme_name(),
            languages: &Language::ALL,
            developer: !self.config.packaged,
        });
        if self.active_menu.is_some_and(|idx| idx >= self.menu_bar.menus.len()) {
            self.active_menu = None;
        }
    }
}

pub fn run(flags: Flags) -> iced::Result {
    let size = iced::Size::new(flags.config.window.width, flags.config.window.height);

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .theme(App::theme)
        .window_size(size)
        .antialiasing(true)
        .run_with(move || App::new(flags))
}
