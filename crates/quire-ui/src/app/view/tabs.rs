use iced::widget::{
    button, container, row, scrollable, text, text_editor, tooltip, Row, Space,
};
use iced::{Alignment, Background, Border, Color, Element, Font, Length, Padding, Theme};

use quire_core::Tab;

use crate::app::{tab_strip_id, App, Message};
use crate::highlighter::{EditorHighlighter, HighlightSettings};

impl App {
    pub fn view_tab_strip(&self) -> Element<'_, Message> {
        let active = self.workbench.tabs().active_id();

        let tabs: Vec<Element<'_, Message>> = self
            .workbench
            .tabs()
            .iter()
            .map(|tab| self.make_tab(tab, active == Some(tab.id())))
            .collect();

        let strip = scrollable(Row::with_children(tabs).spacing(1).align_y(Alignment::End))
            .id(tab_strip_id())
            .direction(scrollable::Direction::Horizontal(
                scrollable::Scrollbar::new().width(3.0).scroller_width(3.0),
            ))
            .width(Length::Fill);

        container(strip)
            .width(Length::Fill)
            .height(38)
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

    /// One tab: a select button holding a close button.
    ///
    /// The close button sits inside the tab button and captures its own
    /// click, so closing a tab never selects it first.
    pub fn make_tab<'a>(&self, tab: &'a Tab, is_active: bool) -> Element<'a, Message> {
        let close_btn = button(text("x").size(12))
            .padding(Padding::from([2, 6]))
            .style(|theme: &Theme, status| {
                let palette = theme.extended_palette();
                let bg = match status {
                    button::Status::Hovered => palette.danger.weak.color,
                    _ => Color::TRANSPARENT,
                };
                button::Style {
                    background: Some(Background::Color(bg)),
                    text_color: palette.background.base.text,
                    border: Border {
                        radius: 2.0.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                }
            })
            .on_press(Message::TabClosed(tab.id()));

        let tab_content = row![
            text(tab.display_name()).size(13),
            Space::with_width(8),
            close_btn,
        ]
        .align_y(Alignment::Center);

        let tab_btn = button(tab_content)
            .padding(Padding::from([8, 14]))
            .style(move |theme: &Theme, status| {
                let palette = theme.extended_palette();
                let bg = match (is_active, status) {
                    (true, _) => palette.background.base.color,
                    (false, button::Status::Hovered) => palette.background.strong.color,
                    (false, _) => palette.background.weak.color,
                };
                button::Style {
                    background: Some(Background::Color(bg)),
                    text_color: if is_active {
                        palette.background.base.text
                    } else {
                        palette.background.weak.text
                    },
                    border: Border {
                        color: if is_active {
                            palette.primary.base.color
                        } else {
                            Color::TRANSPARENT
                        },
                        width: if is_active { 2.0 } else { 0.0 },
                        radius: 0.0.into(),
                    },
                    ..Default::default()
                }
            })
            .on_press(Message::TabSelected(tab.id()));

        let hint = match tab.file() {
            Some(file) => file.display().to_string(),
            None => tab.name().to_string(),
        };

        // The tab id doubles as the anchor the strip scrolls to.
        container(tooltip(
            tab_btn,
            container(text(hint).size(11)).padding(6).style(container::rounded_box),
            tooltip::Position::Bottom,
        ))
        .id(container::Id::new(tab.id().to_string()))
        .into()
    }

    pub fn view_editor(&self) -> Element<'_, Message> {
        let active = self
            .workbench
            .active()
            .and_then(|tab| self.editors.get(&tab.id()).map(|editor| (tab, editor)));

        let Some((tab, editor)) = active else {
            return container(text("No open tabs").size(16))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into();
        };

        text_editor(&editor.content)
            .height(Length::Fill)
            .padding(Padding {
                top: 16.0,
                right: 20.0,
                bottom: 16.0,
                left: 16.0,
            })
            .font(Font::MONOSPACE)
            .size(14.0)
            .style(|theme: &Theme, _status| {
                let palette = theme.extended_palette();
                text_editor::Style {
                    background: Background::Color(palette.background.base.color),
                    border: Border {
                        width: 0.0,
                        radius: 0.0.into(),
                        color: Color::TRANSPARENT,
                    },
                    icon: palette.background.strong.text,
                    placeholder: palette.background.strong.color,
                    value: palette.background.base.text,
                    selection: crate::theme::selection_color(theme),
                }
            })
            .highlight_with::<EditorHighlighter>(
                HighlightSettings {
                    language: tab.language(),
                },
                |kind, theme| kind.to_format(theme),
            )
            .on_action(Message::EditorAction)
            .into()
    }
}
