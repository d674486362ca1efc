use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the row and its host
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    /// Title text of an open task
    pub text: Color,
    pub text_bright: Color,
    /// Filled marker and title of a finished task
    pub done: Color,
    /// Outline of an empty marker
    pub marker_border: Color,
    /// Check glyph drawn on a filled marker
    pub check: Color,
    /// Edit / cancel / trash glyphs
    pub icon: Color,
    pub dim: Color,
    pub selection_bg: Color,
    pub editing_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x12, 0x12, 0x14),
            text: Color::Rgb(0x99, 0x99, 0x99),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            done: Color::Rgb(0x1D, 0xB8, 0x63),
            marker_border: Color::Rgb(0xB2, 0xB2, 0xB2),
            check: Color::Rgb(0xFF, 0xFF, 0xFF),
            icon: Color::Rgb(0xC0, 0xC0, 0xC0),
            dim: Color::Rgb(0x4A, 0x4A, 0x4E),
            selection_bg: Color::Rgb(0x26, 0x26, 0x2B),
            editing_bg: Color::Rgb(0x1E, 0x2A, 0x23),
        }
    }
}

/// Parse a hex color string like "#1DB863" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "done" => theme.done = color,
                "marker_border" => theme.marker_border = color,
                "check" => theme.check = color,
                "icon" => theme.icon = color,
                "dim" => theme.dim = color,
                "selection_bg" => theme.selection_bg = color,
                "editing_bg" => theme.editing_bg = color,
                _ => {}
            }
        }

        theme
    }

    /// Title color for a task's completion state
    pub fn title_color(&self, done: bool) -> Color {
        if done { self.done } else { self.text }
    }
}

/// Named glyphs standing in for the row's icon assets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyphs {
    pub check: String,
    pub edit: String,
    pub cancel: String,
    pub trash: String,
}

impl Default for Glyphs {
    fn default() -> Self {
        Glyphs {
            check: "\u{2713}".into(),
            edit: "\u{270E}".into(),
            cancel: "\u{2715}".into(),
            trash: "\u{232B}".into(),
        }
    }
}

impl Glyphs {
    /// Apply `[ui.glyphs]` overrides. Empty values keep the default.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut glyphs = Glyphs::default();
        for (key, value) in &ui.glyphs {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "check" => glyphs.check = value.clone(),
                "edit" => glyphs.edit = value.clone(),
                "cancel" | "x" => glyphs.cancel = value.clone(),
                "trash" => glyphs.trash = value.clone(),
                _ => {}
            }
        }
        glyphs
    }
}
