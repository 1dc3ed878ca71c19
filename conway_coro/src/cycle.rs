// cycle.rs - Detects a run that has become periodic (still life, oscillator)
//
// Only 64-bit hashes of recent generations are kept, never the grids.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::grid::Grid;

pub const HISTORY_LEN: usize = 10;

pub fn hash_grid(grid: &Grid) -> u64 {
    let mut hasher = DefaultHasher::new();
    grid.hash(&mut hasher);
    hasher.finish()
}

#[derive(Debug, Default, Clone)]
pub struct CycleDetector {
    history: [u64; HISTORY_LEN],
    count: usize,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `grid` and returns true if it matches one of the last
    /// `HISTORY_LEN` grids recorded.
    pub fn check(&mut self, grid: &Grid) -> bool {
        let current = hash_grid(grid);
        let filled = self.count.min(HISTORY_LEN);
        if self.history[..filled].contains(&current) {
            return true;
        }
        self.history[self.count % HISTORY_LEN] = current;
        self.count += 1;
        false
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellState;

    #[test]
    fn first_sighting_is_not_a_cycle() {
        let grid = Grid::new(3, 3).unwrap();
        let mut detector = CycleDetector::new();
        assert!(!detector.check(&grid));
        assert!(detector.check(&grid));
    }

    #[test]
    fn distinct_grids_do_not_collide() {
        let mut detector = CycleDetector::new();
        for i in 0..HISTORY_LEN as isize {
            let mut grid = Grid::new(4, 4).unwrap();
            grid.set(i / 4, i % 4, CellState::Alive);
            assert!(!detector.check(&grid));
        }
    }

    #[test]
    fn reset_forgets_history() {
        let grid = Grid::new(2, 2).unwrap();
        let mut detector = CycleDetector::new();
        detector.check(&grid);
        detector.reset();
        assert!(!detector.check(&grid));
    }
}
