//! Terminal UI for folio.
//!
//! Renders the portfolio views on a ratatui surface and drives a
//! [`folio_core::Stage`] from crossterm input and the stage's own
//! deadlines.

mod app;
mod keybindings;
mod state;
mod terminal;
mod theme;
mod views;
mod widgets;

pub use app::{App, FRAME_INTERVAL, FolioStage, IDLE_INTERVAL};
pub use keybindings::{Action, KeyBindings};
pub use state::{FocusArea, FocusState};
pub use terminal::{FolioTerminal, install_panic_hook, restore_terminal, setup_terminal};
pub use theme::{Theme, folio_default};
pub use views::{PanelView, ViewRenderer};
pub use widgets::{CtaBarWidget, LocationBarWidget, NavBarWidget, StatusLineWidget};
