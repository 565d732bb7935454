//! Traits for view rendering in folio TUI.

use ratatui::{Frame, layout::Rect};

use crate::Theme;

/// Trait for views that can render themselves.
pub trait ViewRenderer {
    /// Render the view to the terminal frame.
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Get the view's title for display.
    fn title(&self) -> &str;
}
