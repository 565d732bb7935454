//! Address bar showing the in-memory history.

use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::Theme;

/// Host name shown before the fragment.
pub const LOCATION_HOST: &str = "folio.local/";

#[derive(Debug, Clone)]
pub struct LocationBarWidget<'a> {
    pub fragment: &'a str,
    /// Zero-based cursor into the history stack.
    pub position: usize,
    pub depth: usize,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

impl<'a> LocationBarWidget<'a> {
    /// Layout: "← → folio.local/#about   2/3"
    pub fn to_paragraph(&self, theme: &Theme) -> Paragraph<'a> {
        let arrow = |enabled: bool, symbol: &'static str| {
            let color = if enabled { theme.fg } else { theme.border };
            Span::styled(symbol, Style::default().fg(color))
        };

        let line = Line::from(vec![
            arrow(self.can_go_back, "←"),
            Span::raw(" "),
            arrow(self.can_go_forward, "→"),
            Span::raw(" "),
            Span::styled(LOCATION_HOST, Style::default().fg(theme.muted)),
            Span::styled(self.fragment, Style::default().fg(theme.accent)),
            Span::raw("   "),
            Span::styled(
                format!("{}/{}", self.position + 1, self.depth),
                Style::default().fg(theme.muted),
            ),
        ]);
        Paragraph::new(line)
    }
}
