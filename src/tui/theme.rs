use ratatui::style::{Color, Modifier, Style};

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    /// Glyph color of the backdrop art
    pub backdrop: Color,
    pub ordinal: Color,
    pub grip: Color,
    pub hover_bg: Color,
    pub selection_bg: Color,
    pub drop_bg: Color,
    pub floating_bg: Color,
    pub focus: Color,
    pub highlight: Color,
    pub red: Color,
    pub bold: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x1E, 0x1E, 0x1E),
            text: Color::Rgb(0x00, 0xFF, 0x7F),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x96, 0x96, 0x96),
            backdrop: Color::Rgb(0x4A, 0x4A, 0x4A),
            ordinal: Color::Rgb(0xB4, 0xB4, 0xB4),
            grip: Color::Rgb(0x6E, 0x6E, 0x6E),
            hover_bg: Color::Rgb(0x3C, 0x3C, 0x3C),
            selection_bg: Color::Rgb(0x00, 0x4C, 0x80),
            drop_bg: Color::Rgb(0x1E, 0x5A, 0x1E),
            floating_bg: Color::Rgb(0x00, 0x7A, 0xCC),
            focus: Color::Rgb(0x00, 0x99, 0xFF),
            highlight: Color::Rgb(0xFF, 0xD7, 0x00),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            bold: false,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

impl Theme {
    /// Create a theme from the `[ui]` settings, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme {
            bold: ui.bold,
            ..Theme::default()
        };

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring color that is not #RRGGBB");
                continue;
            };
            let slot = match key.as_str() {
                "background" => &mut theme.background,
                "text" => &mut theme.text,
                "text_bright" => &mut theme.text_bright,
                "dim" => &mut theme.dim,
                "backdrop" => &mut theme.backdrop,
                "ordinal" => &mut theme.ordinal,
                "grip" => &mut theme.grip,
                "hover_bg" => &mut theme.hover_bg,
                "selection_bg" => &mut theme.selection_bg,
                "drop_bg" => &mut theme.drop_bg,
                "floating_bg" => &mut theme.floating_bg,
                "focus" => &mut theme.focus,
                "highlight" => &mut theme.highlight,
                "red" => &mut theme.red,
                _ => {
                    tracing::warn!(key = %key, "unknown color slot");
                    continue;
                }
            };
            *slot = color;
        }

        theme
    }

    /// Style for task text on a row
    pub fn task_style(&self, selected: bool) -> Style {
        let fg = if selected { self.text_bright } else { self.text };
        let style = Style::default().fg(fg);
        if self.bold {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}
