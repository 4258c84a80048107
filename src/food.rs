//! Food field: a set of occupied grid cells.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::rng::RandomSource;

/// Integer grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub cx: i32,
    pub cy: i32,
}

impl Cell {
    pub fn new(cx: i32, cy: i32) -> Self {
        Self { cx, cy }
    }

    /// Cell containing a continuous position (floored).
    pub fn containing(x: f64, y: f64) -> Self {
        Self {
            cx: x.floor() as i32,
            cy: y.floor() as i32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodField {
    width: i32,
    height: i32,
    max_spawn_attempts: u32,
    cells: BTreeSet<Cell>,
}

impl FoodField {
    pub fn new(width: i32, height: i32, max_spawn_attempts: u32) -> Self {
        Self {
            width,
            height,
            max_spawn_attempts,
            cells: BTreeSet::new(),
        }
    }

    /// Places one item on a free cell chosen by rejection sampling.
    ///
    /// Returns `None` without touching the field when every cell is taken or
    /// when `max_spawn_attempts` draws all landed on occupied cells.
    pub fn spawn(&mut self, rng: &mut dyn RandomSource) -> Option<Cell> {
        if self.is_saturated() {
            debug!(cells = self.cells.len(), "food field saturated, skipping spawn");
            return None;
        }

        for _ in 0..self.max_spawn_attempts {
            let cell = Cell::new(
                rng.rand_int(0, self.width - 1),
                rng.rand_int(0, self.height - 1),
            );
            if self.cells.insert(cell) {
                return Some(cell);
            }
        }

        warn!(
            attempts = self.max_spawn_attempts,
            cells = self.cells.len(),
            "no free food cell found, skipping spawn"
        );
        None
    }

    /// Inserts a specific cell. Returns false when the cell was already occupied
    /// or lies outside the board.
    pub fn insert(&mut self, cell: Cell) -> bool {
        if !self.in_bounds(cell) {
            return false;
        }
        self.cells.insert(cell)
    }

    /// Removes a cell; absent cells are ignored.
    pub fn remove(&mut self, cell: Cell) -> bool {
        self.cells.remove(&cell)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    fn capacity(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    fn is_saturated(&self) -> bool {
        self.cells.len() >= self.capacity()
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.cx) && (0..self.height).contains(&cell.cy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimRng;

    #[test]
    fn spawn_grows_by_one_without_duplicates() {
        let mut rng = SimRng::new(9);
        let mut field = FoodField::new(10, 10, 10_000);
        for expected in 1..=60 {
            let cell = field.spawn(&mut rng).expect("free cell exists");
            assert!(cell.cx >= 0 && cell.cx < 10 && cell.cy >= 0 && cell.cy < 10);
            assert_eq!(field.len(), expected);
        }
    }

    #[test]
    fn spawn_fills_board_then_noops() {
        let mut rng = SimRng::new(2);
        let mut field = FoodField::new(3, 3, 10_000);
        for _ in 0..9 {
            assert!(field.spawn(&mut rng).is_some());
        }
        assert_eq!(field.len(), 9);
        for _ in 0..100 {
            assert_eq!(field.spawn(&mut rng), None);
        }
        assert_eq!(field.len(), 9);
    }

    #[test]
    fn spawn_gives_up_after_bounded_attempts() {
        let mut rng = SimRng::new(2);
        let mut field = FoodField::new(2, 1, 0);
        assert_eq!(field.spawn(&mut rng), None);
        assert!(field.is_empty());
    }

    #[test]
    fn remove_absent_cell_is_noop() {
        let mut field = FoodField::new(5, 5, 100);
        assert!(field.insert(Cell::new(1, 2)));
        assert!(!field.insert(Cell::new(1, 2)));
        assert!(!field.insert(Cell::new(5, 0)));
        assert!(!field.remove(Cell::new(3, 3)));
        assert!(field.remove(Cell::new(1, 2)));
        assert!(field.is_empty());
    }

    #[test]
    fn containing_floors_positions() {
        assert_eq!(Cell::containing(5.99, 0.0), Cell::new(5, 0));
        assert_eq!(Cell::containing(119.0, 42.5), Cell::new(119, 42));
    }
}
