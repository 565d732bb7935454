//! Live status region at the bottom of the screen.
//!
//! Shows the most recent announcement while it is attached, with the
//! transition phase on the right for sighted users.

use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::Theme;

#[derive(Debug, Clone)]
pub struct StatusLineWidget<'a> {
    pub message: Option<&'a str>,
    pub phase: &'static str,
    pub progress: f32,
}

impl<'a> StatusLineWidget<'a> {
    pub fn format_progress(&self) -> String {
        format!("{:.0}%", self.progress.clamp(0.0, 1.0) * 100.0)
    }

    /// Layout: "Switched to about view   [entering 40%]"
    pub fn to_paragraph(&self, theme: &Theme) -> Paragraph<'a> {
        let mut spans = Vec::new();
        if let Some(message) = self.message {
            spans.push(Span::styled(message, Style::default().fg(theme.fg)));
            spans.push(Span::raw("   "));
        }
        let phase = if self.phase == "idle" {
            "[idle]".to_string()
        } else {
            format!("[{} {}]", self.phase, self.format_progress())
        };
        spans.push(Span::styled(phase, Style::default().fg(theme.muted)));
        spans.push(Span::styled(
            "  tab focus · ←→ move · enter open · [ ] history · q quit",
            Style::default().fg(theme.border),
        ));
        Paragraph::new(Line::from(spans))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folio_default;
    use crate::widgets::render_to_string;

    #[test]
    fn renders_attached_message() {
        let widget = StatusLineWidget {
            message: Some("Switched to about view"),
            phase: "entering",
            progress: 0.4,
        };
        let content = render_to_string(widget.to_paragraph(&folio_default()), 100);
        assert!(content.contains("Switched to about view"), "got: {content}");
        assert!(content.contains("[entering 40%]"), "got: {content}");
    }

    #[test]
    fn idle_without_message_shows_only_phase() {
        let widget = StatusLineWidget {
            message: None,
            phase: "idle",
            progress: 1.0,
        };
        let content = render_to_string(widget.to_paragraph(&folio_default()), 100);
        assert!(content.starts_with("[idle]"), "got: {content}");
    }

    #[test]
    fn progress_is_clamped() {
        let widget = StatusLineWidget {
            message: None,
            phase: "leaving",
            progress: 1.7,
        };
        assert_eq!(widget.format_progress(), "100%");
    }
}
