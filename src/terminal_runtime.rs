use std::io::{self, Stdout};
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::driver::Screen;
use crate::game::Snapshot;
use crate::renderer;

type SnakeTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Interactive play surface. Holds raw mode and the alternate screen until
/// dropped.
pub struct TerminalSession {
    terminal: SnakeTerminal,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let terminal = hide_shell(io::stdout()).and_then(|stdout| {
            Terminal::new(CrosstermBackend::new(stdout))
        });
        match terminal {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                restore_terminal();
                Err(error)
            }
        }
    }

    /// Draws the board and the overlay for `screen`.
    pub fn draw(&mut self, snapshot: &Snapshot, screen: Screen) -> io::Result<()> {
        self.terminal
            .draw(|frame| renderer::render(frame, snapshot, screen))
            .map(|_| ())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Puts the shell back before a panic message prints over the board.
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal();
        previous(info);
    }));
}

fn hide_shell(mut stdout: Stdout) -> io::Result<Stdout> {
    execute!(stdout, EnterAlternateScreen, Hide)?;
    Ok(stdout)
}

// Errors are ignored: this runs from Drop and the panic hook, where the
// terminal may already be gone.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
}
