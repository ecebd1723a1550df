use std::collections::HashSet;

use crate::grid::GridSize;
use crate::snake::Snake;

/// Why a snake died.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    Wall,
    SelfCollision,
}

/// Classifies the snake's current body against the grid, if it collides at all.
///
/// Wall hits take precedence over self hits.
#[must_use]
pub fn detect(snake: &Snake, grid: GridSize) -> Option<Collision> {
    if !grid.contains(snake.head()) {
        return Some(Collision::Wall);
    }

    let distinct: HashSet<_> = snake.segments().collect();
    if distinct.len() < snake.len() {
        return Some(Collision::SelfCollision);
    }

    None
}

/// Returns true on a wall or self collision.
#[must_use]
pub fn check(snake: &Snake, grid: GridSize) -> bool {
    detect(snake, grid).is_some()
}
