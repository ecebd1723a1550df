use log::{debug, warn};
use rand::Rng;

use crate::config::{FoodPolicy, Rgb, SimConfig};
use crate::error::SpawnError;
use crate::grid::GridSize;
use crate::snake::Position;

/// Food entity currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FoodItem {
    pub position: Position,
    pub color: Rgb,
    /// Offset into the renderer's pulse cycle. Cosmetic only.
    pub pulse_phase: u8,
}

impl FoodItem {
    #[must_use]
    pub fn new(position: Position, color: Rgb) -> Self {
        Self {
            position,
            color,
            pulse_phase: 0,
        }
    }
}

/// Ordered, bounded collection of food items.
///
/// Spawns that cannot find a free cell are remembered in `pending`, together
/// with the color they were assigned, and retried on later ticks.
#[derive(Debug, Clone)]
pub struct FoodSet {
    items: Vec<FoodItem>,
    max_items: usize,
    pending: Vec<Rgb>,
}

impl FoodSet {
    #[must_use]
    pub fn new(max_items: usize) -> Self {
        Self {
            items: Vec::new(),
            max_items,
            pending: Vec::new(),
        }
    }

    /// Builds a set from explicit items, truncated to `max_items`.
    #[must_use]
    pub fn from_items(max_items: usize, mut items: Vec<FoodItem>) -> Self {
        items.truncate(max_items);
        Self {
            items,
            max_items,
            pending: Vec::new(),
        }
    }

    /// Creates the food set a new game starts with: one item colored after the
    /// first palette entry.
    #[must_use]
    pub fn seeded<R, F>(config: &SimConfig, rng: &mut R, occupied: F) -> Self
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        let mut foods = Self::new(config.max_foods);
        let color = config.color_pair(0).food;
        foods.spawn_one(config, color, rng, &occupied);
        foods
    }

    /// Removes and returns the first item at `position`.
    pub fn take_at(&mut self, position: Position) -> Option<FoodItem> {
        let index = self.items.iter().position(|food| food.position == position)?;
        Some(self.items.remove(index))
    }

    /// Returns true if any item sits on `position`.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.items.iter().any(|food| food.position == position)
    }

    #[must_use]
    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of spawns deferred to a later tick.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Replenishes the set after a consumption according to the configured policy.
    ///
    /// `color_index` is the snake's palette index after the consumption.
    /// Returns the number of items actually placed.
    pub fn spawn_replacement<R, F>(
        &mut self,
        config: &SimConfig,
        color_index: usize,
        rng: &mut R,
        occupied: F,
    ) -> usize
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        match config.food_policy {
            FoodPolicy::Single => {
                let color = config.color_pair(color_index).food;
                usize::from(self.spawn_one(config, color, rng, &occupied))
            }
            FoodPolicy::Burst { min, max } => {
                let count = rng.gen_range(min..=max.max(min));
                let mut placed = 0;
                for _ in 0..count {
                    if self.items.len() >= self.max_items {
                        break;
                    }
                    let color = random_palette_food(config, rng);
                    if self.spawn_one(config, color, rng, &occupied) {
                        placed += 1;
                    }
                }
                placed
            }
        }
    }

    /// Retries spawns deferred by earlier exhaustion, keeping their original
    /// colors. Returns the number placed.
    pub fn retry_pending<R, F>(&mut self, config: &SimConfig, rng: &mut R, occupied: F) -> usize
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        let deferred = std::mem::take(&mut self.pending);

        let mut placed = 0;
        for color in deferred {
            if self.spawn_one(config, color, rng, &occupied) {
                placed += 1;
            }
        }

        if placed > 0 {
            debug!("placed {placed} deferred food item(s)");
        }
        placed
    }

    fn spawn_one<R, F>(
        &mut self,
        config: &SimConfig,
        color: Rgb,
        rng: &mut R,
        occupied: &F,
    ) -> bool
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        if self.items.len() >= self.max_items {
            return false;
        }

        let taken = |position: Position| occupied(position) || self.contains(position);
        match random_interior_position(rng, config.grid(), config.spawn_retry_limit, taken) {
            Ok(position) => {
                self.items.push(FoodItem {
                    position,
                    color,
                    pulse_phase: rng.gen_range(0..=u8::MAX),
                });
                true
            }
            Err(error) => {
                warn!("food spawn deferred: {error}");
                self.pending.push(color);
                false
            }
        }
    }
}

fn random_palette_food<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> Rgb {
    let index = rng.gen_range(0..config.palette.len().max(1));
    config.color_pair(index).food
}

/// Samples a free cell strictly inside the border ring.
///
/// Uses bounded rejection sampling: after `retry_limit` misses the spawn is
/// reported as exhausted rather than looping forever on a saturated grid.
pub fn random_interior_position<R, F>(
    rng: &mut R,
    bounds: GridSize,
    retry_limit: u32,
    occupied: F,
) -> Result<Position, SpawnError>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    if bounds.interior_cells() == 0 {
        return Err(SpawnError::NoInterior);
    }

    for _ in 0..retry_limit {
        let position = Position {
            x: rng.gen_range(1..i32::from(bounds.width) - 1),
            y: rng.gen_range(1..i32::from(bounds.height) - 1),
        };
        if !occupied(position) {
            return Ok(position);
        }
    }

    Err(SpawnError::Exhausted {
        attempts: retry_limit,
    })
}
