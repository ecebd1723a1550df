use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::collision::{self, Collision};
use crate::config::{Rgb, SimConfig};
use crate::food::{FoodItem, FoodSet};
use crate::grid::GridSize;
use crate::input::GameInput;
use crate::snake::{ConsumptionEvent, Position, Snake};
use crate::state::{GameStatus, StatusEvent};

/// Whether the outer loop should keep running.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Read-only view of everything the render surface needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub snake: &'a Snake,
    pub snake_color: Rgb,
    pub foods: &'a [FoodItem],
    pub score: u32,
    pub multiplier: u32,
    pub speed_level: u32,
    pub status: GameStatus,
    pub tick_count: u64,
    pub grid: GridSize,
    pub death_reason: Option<Collision>,
}

impl Snapshot<'_> {
    /// Body positions from head to tail.
    pub fn body(&self) -> impl Iterator<Item = Position> + '_ {
        self.snake.segments().copied()
    }
}

/// Complete mutable game state for one session.
///
/// The config must have passed [`SimConfig::validate`].
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub foods: FoodSet,
    pub status: GameStatus,
    pub tick_count: u64,
    pub death_reason: Option<Collision>,
    config: SimConfig,
    rng: StdRng,
}

impl GameState {
    /// Creates a session seeded from OS entropy, waiting on the start screen.
    #[must_use]
    pub fn new(config: SimConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(config: SimConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimConfig, mut rng: StdRng) -> Self {
        let snake = Snake::spawn(&config);
        let foods = FoodSet::seeded(&config, &mut rng, |position| snake.occupies(position));

        Self {
            snake,
            foods,
            status: GameStatus::Start,
            tick_count: 0,
            death_reason: None,
            config,
            rng,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.grid()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.snake.score()
    }

    #[must_use]
    pub fn speed_level(&self) -> u32 {
        self.snake.speed_level()
    }

    /// Runs one full tick: drains `inputs` in order, then advances the simulation.
    ///
    /// A quit command stops processing immediately and skips the simulation phase.
    pub fn step<I>(&mut self, inputs: I) -> Flow
    where
        I: IntoIterator<Item = GameInput>,
    {
        for input in inputs {
            if self.apply_input(input) == Flow::Quit {
                return Flow::Quit;
            }
        }

        self.tick();
        Flow::Continue
    }

    /// Applies one external input event. Inputs invalid for the current state are ignored.
    pub fn apply_input(&mut self, input: GameInput) -> Flow {
        if input == GameInput::Quit {
            info!("quit requested");
            return Flow::Quit;
        }

        if self.status == GameStatus::Start {
            self.transition(StatusEvent::AnyKey);
            return Flow::Continue;
        }

        match input {
            GameInput::Direction(direction) => {
                if self.status.is_running() {
                    let _ = self.snake.change_direction(direction);
                }
            }
            GameInput::Pause => {
                self.transition(StatusEvent::PauseToggle);
            }
            GameInput::Restart => self.restart(),
            GameInput::AnyKey | GameInput::Quit => {}
        }

        Flow::Continue
    }

    /// Advances simulation by one gameplay tick. No-op unless playing.
    pub fn tick(&mut self) -> Option<ConsumptionEvent> {
        if !self.status.is_running() {
            return None;
        }

        self.tick_count += 1;

        if self.foods.pending() > 0 {
            let snake = &self.snake;
            self.foods
                .retry_pending(&self.config, &mut self.rng, |position| snake.occupies(position));
        }

        let event = self
            .snake
            .update(&mut self.foods, &self.config, &mut self.rng);

        if let Some(reason) = collision::detect(&self.snake, self.bounds()) {
            self.death_reason = Some(reason);
            self.transition(StatusEvent::Collision);
            info!(
                "game over after {} ticks: {reason:?}, score {}",
                self.tick_count,
                self.score()
            );
        }

        event
    }

    /// Discards the current snake and food and begins a fresh round.
    /// Only valid after game over; ignored otherwise.
    pub fn restart(&mut self) {
        if self.transition(StatusEvent::Restart) {
            self.reset_round();
        }
    }

    fn reset_round(&mut self) {
        self.snake = Snake::spawn(&self.config);
        let snake = &self.snake;
        self.foods = FoodSet::seeded(&self.config, &mut self.rng, |position| {
            snake.occupies(position)
        });
        self.tick_count = 0;
        self.death_reason = None;
    }

    fn transition(&mut self, event: StatusEvent) -> bool {
        match self.status.next(event) {
            Some(next) => {
                info!("status {:?} -> {next:?} on {event:?}", self.status);
                self.status = next;
                true
            }
            None => false,
        }
    }

    /// Read-only view for the render surface.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            snake: &self.snake,
            snake_color: self.snake.color(&self.config),
            foods: self.foods.items(),
            score: self.snake.score(),
            multiplier: self.snake.multiplier(),
            speed_level: self.snake.speed_level(),
            status: self.status,
            tick_count: self.tick_count,
            grid: self.bounds(),
            death_reason: self.death_reason,
        }
    }
}
