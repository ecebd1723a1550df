use std::time::Duration;

use crate::state::GameStatus;

/// Frame interval used while the snake is not moving.
pub const IDLE_TICK_INTERVAL_MS: u64 = 100;

/// Shortest tick interval the loop will ever wait.
pub const MIN_TICK_INTERVAL_MS: u64 = 40;

/// Converts a speed level (ticks per second) into a wait between ticks.
#[must_use]
pub fn tick_interval_for_speed(speed_level: u32) -> Duration {
    let per_tick_ms = 1000 / u64::from(speed_level.max(1));
    Duration::from_millis(per_tick_ms.max(MIN_TICK_INTERVAL_MS))
}

/// Interval until the next tick given the current state.
#[must_use]
pub fn tick_interval(status: GameStatus, speed_level: u32) -> Duration {
    if status.is_running() {
        tick_interval_for_speed(speed_level)
    } else {
        Duration::from_millis(IDLE_TICK_INTERVAL_MS)
    }
}
