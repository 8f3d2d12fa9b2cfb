//! Turning theme stylesheets into iced themes.
//!
//! ## Learning: Palettes, not hard-coded colors
//!
//! iced derives a whole "extended palette" (weak/strong shades of the
//! background, primary colors with readable text on top) from five base
//! colors. The shell only has to fill in those five from the stylesheet's
//! custom properties; every widget style then reads its colors from
//! `theme.extended_palette()`, so switching themes re-colors the whole
//! window without touching any view code.

use iced::theme::Palette;
use iced::{Color, Theme};
use quire_core::{Rgb, ThemeCatalog, ThemeSheet};

/// Custom properties read from a stylesheet, with the palette slot each fills.
const BACKGROUND: &str = "background";
const FOREGROUND: &str = "foreground";
const ACCENT: &str = "accent";
const SUCCESS: &str = "success";
const DANGER: &str = "danger";

fn to_color(rgb: Rgb) -> Color {
    let [r, g, b] = rgb.to_f32();
    Color::from_rgb(r, g, b)
}

/// Builds a palette from a sheet. Missing colors come from the built-in
/// dark palette.
pub fn palette_from_sheet(sheet: &ThemeSheet) -> Palette {
    let fallback = Theme::Dark.palette();
    let pick = |name: &str, default: Color| sheet.color(name).map(to_color).unwrap_or(default);

    Palette {
        background: pick(BACKGROUND, fallback.background),
        text: pick(FOREGROUND, fallback.text),
        primary: pick(ACCENT, fallback.primary),
        success: pick(SUCCESS, fallback.success),
        danger: pick(DANGER, fallback.danger),
    }
}

/// Loads the named theme from the catalog.
///
/// No preference, an unreadable file or a sheet without any custom
/// properties all yield `Theme::Dark`.
pub fn load_theme(catalog: &ThemeCatalog, name: Option<&str>) -> Theme {
    let Some(name) = name else {
        return Theme::Dark;
    };

    match catalog.load(name) {
        Ok(sheet) if !sheet.is_empty() => {
            tracing::info!("Applied theme {}", name);
            Theme::custom(name.to_string(), palette_from_sheet(&sheet))
        }
        Ok(_) => {
            tracing::warn!("Theme {} declares no custom properties", name);
            Theme::Dark
        }
        Err(e) => {
            tracing::warn!("Failed to load theme {}: {}", name, e);
            Theme::Dark
        }
    }
}

/// Color of the editor selection highlight.
pub fn selection_color(theme: &Theme) -> Color {
    Color {
        a: 0.45,
        ..theme.palette().primary
    }
}
