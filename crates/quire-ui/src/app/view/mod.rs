pub mod menu;
pub mod tabs;

use iced::widget::{container, horizontal_space, mouse_area, row, scrollable, stack, text, Column, Space};
use iced::{Alignment, Background, Border, Element, Length, Padding, Theme};

use crate::app::{App, Message};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let mut sections: Vec<Element<'_, Message>> = vec![
            self.view_menu_bar(),
            self.view_tab_strip(),
            self.view_editor(),
        ];
        if self.developer_tools_visible {
            sections.push(self.view_developer_tools());
        }
        sections.push(self.view_footer());

        let main_view: Element<'_, Message> = container(Column::with_children(sections))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|theme: &Theme| container::Style {
                background: Some(Background::Color(theme.extended_palette().background.base.color)),
                ..Default::default()
            })
            .into();

        if self.active_menu.is_some() {
            stack![
                main_view,
                mouse_area(
                    container(Space::new(Length::Fill, Length::Fill))
                        .width(Length::Fill)
                        .height(Length::Fill)
                )
                .on_press(Message::CloseMenu),
                self.view_menu_dropdown(),
            ]
            .into()
        } else {
            main_view
        }
    }

    /// Status message on the left, statistics of the active editor on the right.
    pub fn view_footer(&self) -> Element<'_, Message> {
        let stats = self.workbench.statistics();
        let language = self
            .workbench
            .active()
            .map(|tab| tab.language().label())
            .unwrap_or("");

        let bar = row![
            text(self.status_message.as_str()).size(12),
            horizontal_space(),
            text(language).size(12),
            text(format!("Length: {}", stats.length)).size(12),
            text(format!("Lines: {}", stats.line_count)).size(12),
            text(format!("Selection: {}", stats.selection.selection_length)).size(12),
        ]
        .spacing(16)
        .padding(Padding::from([4, 12]))
        .align_y(Alignment::Center);

        container(bar)
            .width(Length::Fill)
            .style(|theme: &Theme| {
                let palette = theme.extended_palette();
                container::Style {
                    background: Some(Background::Color(palette.primary.strong.color)),
                    text_color: Some(palette.primary.strong.text),
                    ..Default::default()
                }
            })
            .into()
    }

    /// Live dump of the workbench, shell settings and recent events.
    pub fn view_developer_tools(&self) -> Element<'_, Message> {
        let mut lines: Vec<Element<'_, Message>> = vec![
            text(format!(
                "themes: {} ({} found)   preferences: {}   theme: {}",
                self.catalog.dir().display(),
                self.themes.len(),
                self.config.preferences_file.display(),
                self.preferences.theme_name().unwrap_or("<default>"),
            ))
            .size(11)
            .into(),
            text(format!("{:?}", self.workbench.statistics())).size(11).into(),
        ];

        let active = self.workbench.tabs().active_id();
        for tab in self.workbench.tabs().iter() {
            let marker = if active == Some(tab.id()) { "*" } else { " " };
            let file = tab
                .file()
                .map(|f| f.display().to_string())
                .unwrap_or_else(|| "-".to_string());
            lines.push(
                text(format!(
                    "{} {}  {:?}  file={}  temp={}  language={}  chars={}",
                    marker,
                    tab.id(),
                    tab.name(),
                    file,
                    tab.is_temp(),
                    tab.language().id(),
                    tab.content().chars().count(),
                ))
                .size(11)
                .font(iced::Font::MONOSPACE)
                .into(),
            );
        }

        lines.push(text("events:").size(11).into());
        for entry in self.events.entries().rev() {
            lines.push(text(entry).size(11).font(iced::Font::MONOSPACE).into());
        }

        container(scrollable(Column::with_children(lines).spacing(2).padding(8)))
            .width(Length::Fill)
            .height(160)
            .style(|theme: &Theme| {
                let palette = theme.extended_palette();
                container::Style {
                    background: Some(Background::Color(palette.background.weak.color)),
                    border: Border {
                        color: palette.background.strong.color,
                        width: 1.0,
                        radius: 0.0.into(),
                    },
                    ..Default::default()
                }
            })
            .into()
    }
}
