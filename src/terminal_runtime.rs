use std::io;
use std::panic;
use std::time::Instant;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{debug, error, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::game::{Flow, Snapshot};
use crate::input::{GameInput, InputQueue, map_key_event};
use crate::renderer;

type GameTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Raw-mode, alternate-screen terminal that one game session draws into and
/// reads keys from. The terminal is restored when the session is dropped.
pub struct TerminalSession {
    terminal: GameTerminal,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => {
                debug!("terminal session started");
                Ok(Self { terminal })
            }
            Err(error) => {
                let _ = restore_terminal();
                Err(error)
            }
        }
    }

    /// Draws one frame of the board, HUD and any overlay for `snapshot`.
    pub fn draw(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        self.terminal.draw(|frame| renderer::render(frame, snapshot))?;
        Ok(())
    }

    /// Buffers key presses into `queue` until `deadline`.
    ///
    /// A quit key returns immediately instead of waiting for the tick.
    pub fn collect_inputs(
        &mut self,
        queue: &mut InputQueue,
        deadline: Instant,
    ) -> io::Result<Flow> {
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining)? {
                return Ok(Flow::Continue);
            }

            if let Event::Key(key) = event::read()? {
                if queue_key(queue, key) == Flow::Quit {
                    return Ok(Flow::Quit);
                }
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        match restore_terminal() {
            Ok(()) => debug!("terminal session restored"),
            Err(error) => warn!("failed to restore terminal: {error}"),
        }
    }
}

/// Maps one key event and queues it for the next tick. Quit is never queued.
fn queue_key(queue: &mut InputQueue, key: KeyEvent) -> Flow {
    match map_key_event(key) {
        Some(GameInput::Quit) => Flow::Quit,
        Some(input) => {
            queue.push(input);
            Flow::Continue
        }
        None => Flow::Continue,
    }
}

/// Leaves the alternate screen before the panic message is printed, and
/// records the panic in the log file.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        error!("game panicked: {panic_info}");
        default_hook(panic_info);
    }));
}

fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    execute!(io::stdout(), Show, LeaveAlternateScreen)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use super::queue_key;
    use crate::game::Flow;
    use crate::input::{Direction, GameInput, InputQueue};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn game_keys_are_queued_in_order() {
        let mut queue = InputQueue::new();

        assert_eq!(queue_key(&mut queue, press(KeyCode::Up)), Flow::Continue);
        assert_eq!(queue_key(&mut queue, press(KeyCode::Char('p'))), Flow::Continue);

        assert_eq!(
            queue.drain().collect::<Vec<_>>(),
            vec![GameInput::Direction(Direction::Up), GameInput::Pause]
        );
    }

    #[test]
    fn quit_key_is_not_queued() {
        let mut queue = InputQueue::new();

        assert_eq!(queue_key(&mut queue, press(KeyCode::Char('q'))), Flow::Quit);
        assert!(queue.is_empty());
    }

    #[test]
    fn key_releases_are_dropped() {
        let mut queue = InputQueue::new();
        let mut release = press(KeyCode::Left);
        release.kind = KeyEventKind::Release;

        assert_eq!(queue_key(&mut queue, release), Flow::Continue);
        assert!(queue.is_empty());
    }
}
