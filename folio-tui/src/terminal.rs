//! Owning the tty while the portfolio is on screen.
//!
//! folio draws into the alternate screen with mouse reporting on, so the
//! shell's scrollback is untouched and clicks reach the nav bar and the
//! call-to-action buttons. Every way out, including a panic, has to hand
//! the tty back in the state it was found.

use std::io::{self, Stdout, Write};
use std::panic;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

/// A terminal drawing folio onto the process's stdout.
pub type FolioTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Takes over the tty for [`crate::App::run`].
pub fn setup_terminal() -> io::Result<FolioTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Hands the tty back after a clean quit.
pub fn restore_terminal(terminal: &mut FolioTerminal) -> io::Result<()> {
    disable_raw_mode()?;
    leave_screen(terminal.backend_mut())?;
    terminal.show_cursor()
}

/// Makes a panic inside the event loop print onto the normal screen
/// instead of the folio frame it interrupted.
pub fn install_panic_hook() {
    let previous = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = leave_screen(&mut io::stdout());
        previous(info);
    }));
}

// Mouse reporting goes first; a shell left with it on echoes clicks as text.
fn leave_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(out, DisableMouseCapture, LeaveAlternateScreen)
}
