//! Widgets for the folio TUI.
//!
//! Each widget borrows what it shows and converts to a ratatui widget
//! with `to_paragraph(&theme)`.

mod cta_bar;
mod location_bar;
mod nav_bar;
mod status_line;

pub use cta_bar::CtaBarWidget;
pub use location_bar::LocationBarWidget;
pub use nav_bar::NavBarWidget;
pub use status_line::StatusLineWidget;

#[cfg(test)]
pub(crate) fn render_to_string(paragraph: ratatui::widgets::Paragraph<'_>, width: u16) -> String {
    use ratatui::{Terminal, backend::TestBackend};

    let backend = TestBackend::new(width, 1);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|f| {
            let area = f.area();
            f.render_widget(paragraph, area);
        })
        .unwrap();

    let buffer = terminal.backend().buffer();
    buffer.content().iter().map(|cell| cell.symbol()).collect()
}
