use serde::{Deserialize, Serialize};

use crate::snake::Position;

/// Logical grid dimensions passed through the game as a named type.
///
/// Pure geometry: the grid holds no state beyond its size. Cells are addressed
/// with `x` in `[0, width)` and `y` in `[0, height)`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns the number of cells left once the outer border ring is removed.
    #[must_use]
    pub fn interior_cells(self) -> usize {
        usize::from(self.width.saturating_sub(2)) * usize::from(self.height.saturating_sub(2))
    }

    /// Returns true when `position` lies inside `[0, width) x [0, height)`.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < i32::from(self.width)
            && position.y < i32::from(self.height)
    }

    /// Returns true for cells on the outermost ring, which food may never use.
    #[must_use]
    pub fn is_border(self, position: Position) -> bool {
        self.contains(position)
            && (position.x == 0
                || position.y == 0
                || position.x == i32::from(self.width) - 1
                || position.y == i32::from(self.height) - 1)
    }

    /// Returns true for in-bounds cells that are not on the border ring.
    #[must_use]
    pub fn is_interior(self, position: Position) -> bool {
        self.contains(position) && !self.is_border(position)
    }

    /// Spawn cell for a fresh snake.
    #[must_use]
    pub fn center(self) -> Position {
        Position {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GridSize;
    use crate::snake::Position;

    #[test]
    fn contains_rejects_every_side() {
        let grid = GridSize::new(10, 8);

        assert!(grid.contains(Position { x: 0, y: 0 }));
        assert!(grid.contains(Position { x: 9, y: 7 }));
        assert!(!grid.contains(Position { x: -1, y: 3 }));
        assert!(!grid.contains(Position { x: 3, y: -1 }));
        assert!(!grid.contains(Position { x: 10, y: 3 }));
        assert!(!grid.contains(Position { x: 3, y: 8 }));
    }

    #[test]
    fn border_ring_and_interior_partition_the_grid() {
        let grid = GridSize::new(5, 4);
        let mut border = 0;
        let mut interior = 0;

        for y in 0..4 {
            for x in 0..5 {
                let position = Position { x, y };
                assert_ne!(grid.is_border(position), grid.is_interior(position));
                if grid.is_border(position) {
                    border += 1;
                } else {
                    interior += 1;
                }
            }
        }

        assert_eq!(interior, grid.interior_cells());
        assert_eq!(border + interior, grid.total_cells());
    }

    #[test]
    fn out_of_bounds_cells_are_neither_border_nor_interior() {
        let grid = GridSize::new(5, 5);
        let outside = Position { x: 5, y: 2 };

        assert!(!grid.is_border(outside));
        assert!(!grid.is_interior(outside));
    }

    #[test]
    fn center_matches_half_dimensions() {
        assert_eq!(GridSize::new(10, 10).center(), Position { x: 5, y: 5 });
        assert_eq!(GridSize::new(7, 3).center(), Position { x: 3, y: 1 });
    }

    #[test]
    fn degenerate_grid_has_no_interior() {
        assert_eq!(GridSize::new(2, 9).interior_cells(), 0);
        assert_eq!(GridSize::new(3, 3).interior_cells(), 1);
    }
}
