use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step in grid coordinates; `y` grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Semantic input commands consumed by the simulation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Restart,
    Quit,
    /// Any other key; only meaningful on the start screen.
    AnyKey,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Maps a terminal key event to a game command. Releases and repeats are ignored.
#[must_use]
pub fn map_key_event(event: KeyEvent) -> Option<GameInput> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(event.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return Some(GameInput::Quit);
    }

    let input = match event.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            GameInput::Direction(Direction::Up)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            GameInput::Direction(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            GameInput::Direction(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            GameInput::Direction(Direction::Right)
        }
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') | KeyCode::Esc => {
            GameInput::Pause
        }
        KeyCode::Char('r') | KeyCode::Char('R') => GameInput::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') => GameInput::Quit,
        _ => GameInput::AnyKey,
    };

    Some(input)
}

/// Inputs collected between ticks, drained in arrival order at the start of each tick.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: VecDeque<GameInput>,
}

impl InputQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, input: GameInput) {
        self.pending.push_back(input);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Takes every buffered input at once, leaving the queue empty.
    pub fn drain(&mut self) -> impl Iterator<Item = GameInput> + '_ {
        self.pending.drain(..)
    }
}
