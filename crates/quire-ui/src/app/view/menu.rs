use iced::widget::{button, column, container, horizontal_space, row, scrollable, text, Column, Row, Space};
use iced::{Alignment, Background, Border, Color, Element, Length, Padding, Theme};

use quire_core::{MenuBar, MenuEntry, MenuItem};

use crate::app::{App, Message};

const DROPDOWN_WIDTH: f32 = 260.0;
const DROPDOWN_MAX_HEIGHT: f32 = 420.0;

impl App {
    pub fn view_menu_bar(&self) -> Element<'_, Message> {
        let mut menu_items: Vec<Element<'_, Message>> = Vec::new();

        for (idx, menu) in self.menu_bar.menus.iter().enumerate() {
            let is_active = self.active_menu == Some(idx);

            let menu_btn = button(text(menu.label.as_str()).size(12))
                .padding(Padding::from([6, 10]))
                .style(move |theme: &Theme, status: button::Status| {
                    let palette = theme.extended_palette();
                    let bg = if is_active {
                        palette.background.strong.color
                    } else {
                        match status {
                            button::Status::Hovered => palette.background.strong.color,
                            _ => palette.background.weak.color,
                        }
                    };
                    button::Style {
                        background: Some(Background::Color(bg)),
                        text_color: palette.background.base.text,
                        border: Border {
                            radius: 4.0.into(),
                            ..Default::default()
                        },
                        ..Default::default()
                    }
                })
                .on_press(Message::ToggleMenu(idx));

            menu_items.push(menu_btn.into());
        }

        menu_items.push(horizontal_space().into());

        let toolbar = Row::with_children(menu_items)
            .spacing(2)
            .padding(Padding::from([4, 8]))
            .align_y(Alignment::Center);

        container(toolbar)
            .width(Length::Fill)
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

    pub fn view_menu_dropdown(&self) -> Element<'_, Message> {
        let Some((idx, menu)) = self
            .active_menu
            .and_then(|idx| self.menu_bar.menus.get(idx).map(|menu| (idx, menu)))
        else {
            return Space::new(0, 0).into();
        };

        let mut items: Vec<Element<'_, Message>> = Vec::new();
        push_entries(&menu.entries, 0, &mut items);

        let menu_content = Column::with_children(items)
            .width(Length::Fixed(DROPDOWN_WIDTH))
            .padding(4);

        let menu_box = container(scrollable(menu_content))
            .max_height(DROPDOWN_MAX_HEIGHT)
            .style(|theme: &Theme| {
                let palette = theme.extended_palette();
                container::Style {
                    background: Some(Background::Color(palette.background.weak.color)),
                    border: Border {
                        color: palette.background.strong.color,
                        width: 1.0,
                        radius: 6.0.into(),
                    },
                    ..Default::default()
                }
            });

        column![
            Space::with_height(Length::Fixed(32.0)),
            row![
                Space::with_width(Length::Fixed(menu_offset_x(&self.menu_bar, idx))),
                menu_box,
            ],
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}

/// Horizontal position of a dropdown, under its menu button.
fn menu_offset_x(bar: &MenuBar, idx: usize) -> f32 {
    let before: f32 = bar
        .menus
        .iter()
        .take(idx)
        .map(|menu| menu.label.chars().count() as f32 * 7.0 + 22.0)
        .sum();
    8.0 + before
}

/// Flattens entries into rows; submenus become an indented section.
fn push_entries<'a>(entries: &'a [MenuEntry], depth: u16, out: &mut Vec<Element<'a, Message>>) {
    for entry in entries {
        match entry {
            MenuEntry::Item(item) => out.push(menu_item(item, depth)),
            MenuEntry::Submenu(submenu) => {
                out.push(menu_heading(&submenu.label, depth));
                push_entries(&submenu.entries, depth + 1, out);
            }
        }
    }
}

fn menu_item(item: &MenuItem, depth: u16) -> Element<'_, Message> {
    let shortcut = item
        .accelerator
        .map(|accel| accel.to_string())
        .unwrap_or_default();

    button(
        row![
            Space::with_width(Length::Fixed(f32::from(depth) * 12.0)),
            text(if item.checked { "✓" } else { "" }).size(12).width(16),
            text(item.label.as_str()).size(12),
            horizontal_space(),
            text(shortcut).size(11),
        ]
        .width(Length::Fill)
        .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .padding(Padding::from([6, 12]))
    .style(|theme: &Theme, status: button::Status| {
        let palette = theme.extended_palette();
        let bg = match status {
            button::Status::Hovered => palette.primary.weak.color,
            _ => Color::TRANSPARENT,
        };
        let text_color = match status {
            button::Status::Hovered => palette.primary.weak.text,
            _ => palette.background.base.text,
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color,
            border: Border::default(),
            ..Default::default()
        }
    })
    .on_press(Message::Menu(item.action.clone()))
    .into()
}

fn menu_heading(label: &str, depth: u16) -> Element<'_, Message> {
    container(
        row![
            Space::with_width(Length::Fixed(f32::from(depth) * 12.0)),
            text(label).size(11),
        ],
    )
    .padding(Padding::from([6, 12]))
    .style(|theme: &Theme| container::Style {
        text_color: Some(theme.extended_palette().background.strong.text),
        ..Default::default()
    })
    .into()
}
