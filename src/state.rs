/// High-level gameplay state. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Start,
    Playing,
    Paused,
    GameOver,
}

/// Events that can move the game between states.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StatusEvent {
    AnyKey,
    PauseToggle,
    Collision,
    Restart,
}

impl GameStatus {
    /// Returns the state reached by `event`, or `None` when the transition is
    /// not allowed and must be ignored.
    #[must_use]
    pub fn next(self, event: StatusEvent) -> Option<Self> {
        match (self, event) {
            (Self::Start, StatusEvent::AnyKey) => Some(Self::Playing),
            (Self::Playing, StatusEvent::PauseToggle) => Some(Self::Paused),
            (Self::Paused, StatusEvent::PauseToggle) => Some(Self::Playing),
            (Self::Playing, StatusEvent::Collision) => Some(Self::GameOver),
            (Self::GameOver, StatusEvent::Restart) => Some(Self::Playing),
            _ => None,
        }
    }

    /// Returns true when simulation ticks should advance the snake.
    #[must_use]
    pub fn is_running(self) -> bool {
        self == Self::Playing
    }
}
