//! Row of call-to-action buttons for the visible view.

use folio_core::CallToAction;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::Theme;

const GAP: &str = "  ";

#[derive(Debug, Clone)]
pub struct CtaBarWidget<'a> {
    pub buttons: Vec<&'a CallToAction>,
    /// Index of the focused button, if the content area has focus.
    pub focused: Option<usize>,
}

impl<'a> CtaBarWidget<'a> {
    pub fn new(buttons: impl IntoIterator<Item = &'a CallToAction>) -> Self {
        Self {
            buttons: buttons.into_iter().collect(),
            focused: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Layout: "[ View Projects ]  [ Get in Touch ]"
    pub fn to_paragraph(&self, theme: &Theme) -> Paragraph<'a> {
        let mut spans = Vec::new();
        for (index, cta) in self.buttons.iter().enumerate() {
            if index > 0 {
                spans.push(Span::raw(GAP));
            }
            let style = if self.focused == Some(index) {
                Style::default()
                    .fg(theme.bg)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.accent)
            };
            spans.push(Span::styled(button_text(cta), style));
        }
        Paragraph::new(Line::from(spans))
    }

    /// Button under `column`, counted from the bar's left edge.
    pub fn hit_test(&self, column: u16) -> Option<usize> {
        let column = usize::from(column);
        let mut start = 0;
        for (index, cta) in self.buttons.iter().enumerate() {
            if index > 0 {
                start += GAP.len();
            }
            let width = Span::raw(button_text(cta)).width();
            if (start..start + width).contains(&column) {
                return Some(index);
            }
            start += width;
        }
        None
    }
}

fn button_text(cta: &CallToAction) -> String {
    format!("[ {} ]", cta.label)
}
