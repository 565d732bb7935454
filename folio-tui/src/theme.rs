//! Theme system for folio TUI.

use ratatui::style::{Color, Modifier, Style};

/// Colors and styles used by every panel and widget.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub secondary: Color,
    pub muted: Color,
    pub warning: Color,

    // UI element colors
    pub border: Color,
    pub selection: Color,

    // Text styles
    pub bold: Style,
    pub dim: Style,
    pub italic: Style,
}

impl Theme {
    /// Border style for a view panel in the given phase.
    pub fn panel_border(&self, leaving: bool, entering: bool) -> Style {
        if leaving {
            Style::default().fg(self.muted).add_modifier(Modifier::DIM)
        } else if entering {
            Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border)
        }
    }
}

/// Creates the default folio theme, a violet gradient on near-black.
///
/// - Indigo accent (#667eea) for the active view and focus
/// - Purple secondary (#764ba2) for numbers and badges
pub fn folio_default() -> Theme {
    let fg = Color::Rgb(230, 230, 240); // #e6e6f0

    Theme {
        name: "folio".into(),

        bg: Color::Rgb(10, 10, 15), // #0a0a0f
        fg,
        accent: Color::Rgb(102, 126, 234),   // #667eea
        secondary: Color::Rgb(118, 75, 162), // #764ba2
        muted: Color::Rgb(120, 120, 140),    // #78788c
        warning: Color::Rgb(255, 200, 0),    // #ffc800

        border: Color::Rgb(50, 50, 70),    // #323246
        selection: Color::Rgb(40, 44, 80), // #282c50

        bold: Style::default().fg(fg).add_modifier(Modifier::BOLD),
        dim: Style::default().fg(fg).add_modifier(Modifier::DIM),
        italic: Style::default().fg(fg).add_modifier(Modifier::ITALIC),
    }
}
