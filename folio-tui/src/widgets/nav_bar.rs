//! Navigation bar listing every view in registry order.

use folio_core::NavItem;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::Theme;

const SEPARATOR: &str = " │ ";

/// One tab per view; the current view is highlighted, the focused item
/// drawn with the selection background.
#[derive(Debug, Clone)]
pub struct NavBarWidget<'a> {
    pub items: &'a [NavItem],
    /// Index of the current view.
    pub selected: Option<usize>,
    /// Index of the keyboard-focused item, if the bar has focus.
    pub focused: Option<usize>,
}

impl<'a> NavBarWidget<'a> {
    pub fn new(items: &'a [NavItem]) -> Self {
        Self {
            items,
            selected: None,
            focused: None,
        }
    }

    pub fn selected(mut self, index: Option<usize>) -> Self {
        self.selected = index;
        self
    }

    pub fn focused(mut self, index: Option<usize>) -> Self {
        self.focused = index;
        self
    }

    /// Layout: " 1 Home │ 2 Portfolio │ 3 About "
    pub fn to_paragraph(&self, theme: &Theme) -> Paragraph<'a> {
        let mut spans = Vec::with_capacity(self.items.len() * 2);
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled(SEPARATOR, Style::default().fg(theme.border)));
            }

            let mut style = Style::default().fg(theme.fg);
            if self.selected == Some(index) {
                style = style
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            if self.focused == Some(index) {
                style = style.bg(theme.selection);
            }

            spans.push(Span::styled(item_text(index, item), style));
        }
        Paragraph::new(Line::from(spans))
    }

    /// Item under `column`, counted from the bar's left edge.
    pub fn hit_test(&self, column: u16) -> Option<usize> {
        let column = usize::from(column);
        let separator = Span::raw(SEPARATOR).width();
        let mut start = 0;
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                start += separator;
            }
            let width = Span::raw(item_text(index, item)).width();
            if (start..start + width).contains(&column) {
                return Some(index);
            }
            start += width;
        }
        None
    }
}

fn item_text(index: usize, item: &NavItem) -> String {
    format!(" {} {} ", index + 1, item.label)
}
