//! Palettes for the menu bar and its popups

use ratatui::style::{Color, Modifier, Style};

/// Visual palette owned by a window and copied into popups it spawns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Window background
    pub background: Style,
    /// Menu bar labels
    pub label: Style,
    /// Menu bar label holding keyboard focus
    pub focused_label: Style,
    /// Popup border box
    pub popup_border: Style,
    /// Popup item rows
    pub popup_item: Style,
    /// Highlighted popup row
    pub popup_selected: Style,
}

impl Palette {
    /// Built-in palette names
    pub const NAMES: [&'static str; 3] = ["default", "monochrome", "high-contrast"];

    /// Monochrome palette that relies on modifiers only
    pub fn monochrome() -> Self {
        Self {
            background: Style::default(),
            label: Style::default(),
            focused_label: Style::default().add_modifier(Modifier::UNDERLINED),
            popup_border: Style::default(),
            popup_item: Style::default(),
            popup_selected: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    /// High contrast palette
    pub fn high_contrast() -> Self {
        Self {
            background: Style::default().bg(Color::Black),
            label: Style::default().fg(Color::White).bg(Color::Black),
            focused_label: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            popup_border: Style::default().fg(Color::Yellow).bg(Color::Black),
            popup_item: Style::default().fg(Color::White).bg(Color::Black),
            popup_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Look up a palette by name, falling back to the default one
    pub fn by_name(name: &str) -> Self {
        match name {
            "default" => Self::default(),
            "monochrome" => Self::monochrome(),
            "high-contrast" => Self::high_contrast(),
            other => {
                tracing::warn!(theme = other, "Unknown palette, using default");
                Self::default()
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Style::default().bg(Color::Blue),
            label: Style::default().fg(Color::White).bg(Color::Blue),
            focused_label: Style::default()
                .fg(Color::Yellow)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            popup_border: Style::default().fg(Color::White).bg(Color::Cyan),
            popup_item: Style::default().fg(Color::Black).bg(Color::Cyan),
            popup_selected: Style::default().fg(Color::White).bg(Color::Black),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_palettes_resolve() {
        assert_eq!(Palette::by_name("default"), Palette::default());
        assert_eq!(Palette::by_name("monochrome"), Palette::monochrome());
        assert_eq!(Palette::by_name("high-contrast"), Palette::high_contrast());
    }

    #[test]
    fn test_unknown_palette_falls_back() {
        assert_eq!(Palette::by_name("solarized"), Palette::default());
    }

    #[test]
    fn test_selected_row_differs_from_item() {
        for name in Palette::NAMES {
            let palette = Palette::by_name(name);
            assert_ne!(palette.popup_item, palette.popup_selected, "{}", name);
        }
    }
}
