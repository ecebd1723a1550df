use std::collections::VecDeque;

use log::debug;
use rand::Rng;

use crate::config::{Rgb, ScoringRule, SimConfig};
use crate::food::{FoodItem, FoodSet};
use crate::grid::GridSize;
use crate::input::{Direction, direction_change_is_valid};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        bounds.contains(self)
    }

    /// Returns the neighbouring cell one step along `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Outcome of the head landing on a food item.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ConsumptionEvent {
    pub position: Position,
    pub food_color: Rgb,
    pub points: u32,
    pub multiplier: u32,
    /// Palette index after the consumption advanced it.
    pub color_index: usize,
}

/// Mutable snake state: body, movement buffering, palette position and scoring.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    buffered_direction: Direction,
    next_buffered_direction: Option<Direction>,
    pending_growth: bool,
    color_index: usize,
    score: u32,
    multiplier: u32,
    speed_level: u32,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        Self::from_segments(vec![start], direction)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// An empty segment list is padded with the origin so the body is never empty.
    /// The speed level follows the default speed rule until the first update
    /// recomputes it from the active config.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        let mut body = VecDeque::from(segments);
        if body.is_empty() {
            body.push_back(Position { x: 0, y: 0 });
        }
        let speed_level = SimConfig::default().speed_for_length(body.len());

        Self {
            body,
            direction,
            buffered_direction: direction,
            next_buffered_direction: None,
            pending_growth: false,
            color_index: 0,
            score: 0,
            multiplier: 0,
            speed_level,
        }
    }

    /// Creates the snake a new game starts with: one cell at the grid centre, heading right.
    #[must_use]
    pub fn spawn(config: &SimConfig) -> Self {
        let mut snake = Self::new(config.grid().center(), Direction::Right);
        snake.speed_level = config.speed_for_length(snake.len());
        snake
    }

    /// Advances the snake one cell, resolving at most one consumption.
    ///
    /// A consumed item is removed from `foods`, and the food set is replenished
    /// once the new head is in place so replacements never land on the body.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        foods: &mut FoodSet,
        config: &SimConfig,
        rng: &mut R,
    ) -> Option<ConsumptionEvent> {
        self.direction = self.buffered_direction;
        if let Some(next) = self.next_buffered_direction.take() {
            self.buffered_direction = next;
        }

        let new_head = self.head().step(self.direction);
        let event = foods
            .take_at(new_head)
            .map(|food| self.consume(food, config));

        self.body.push_front(new_head);
        if self.pending_growth {
            self.pending_growth = false;
        } else {
            let _ = self.body.pop_back();
        }
        self.speed_level = config.speed_for_length(self.body.len());

        if let Some(event) = event {
            debug!(
                "ate food at ({}, {}) for {} points, multiplier {}",
                event.position.x, event.position.y, event.points, event.multiplier
            );
            let body = &self.body;
            foods.spawn_replacement(config, event.color_index, rng, |position| {
                body.contains(&position)
            });
        }

        event
    }

    fn consume(&mut self, food: FoodItem, config: &SimConfig) -> ConsumptionEvent {
        self.pending_growth = true;

        let points = match config.scoring {
            ScoringRule::Flat { points } => points,
            ScoringRule::ColorStreak { base, streak_bonus } => {
                if self.color(config) == food.color {
                    self.multiplier += 1;
                } else {
                    self.multiplier = 0;
                }
                base.saturating_add(self.multiplier.saturating_mul(streak_bonus))
            }
        };
        self.score = self.score.saturating_add(points);
        self.color_index = (self.color_index + 1) % config.palette.len().max(1);

        ConsumptionEvent {
            position: food.position,
            food_color: food.color,
            points,
            multiplier: self.multiplier,
            color_index: self.color_index,
        }
    }

    /// Buffers the next direction, supporting a two-deep queue for quick turns.
    ///
    /// When no turn is queued yet, the direction is stored as the primary
    /// buffered direction (rejecting direct reversals of the current direction).
    /// When a turn is already queued, a second direction is stored with
    /// last-input-wins semantics (rejecting reversals of the queued direction).
    /// Returns false when the request was rejected.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if self.buffered_direction == self.direction {
            if !direction_change_is_valid(self.direction, direction) {
                return false;
            }
            self.buffered_direction = direction;
        } else {
            if !direction_change_is_valid(self.buffered_direction, direction) {
                return false;
            }
            self.next_buffered_direction = Some(direction);
        }

        true
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        // Every move pushes a head before popping the tail, so the body never
        // drops below one segment.
        self.body.front().copied().unwrap_or(Position { x: 0, y: 0 })
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    #[must_use]
    pub fn color_index(&self) -> usize {
        self.color_index
    }

    /// Current body color taken from the shared palette.
    #[must_use]
    pub fn color(&self, config: &SimConfig) -> Rgb {
        config.color_pair(self.color_index).snake
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Target ticks per second.
    #[must_use]
    pub fn speed_level(&self) -> u32 {
        self.speed_level
    }
}
