//! View panels for folio TUI.
//!
//! - `ViewRenderer` trait for anything drawn into the body area
//! - `PanelView` draws one portfolio view with its transition styling

mod panel;
mod traits;

pub use panel::PanelView;
pub use traits::ViewRenderer;
