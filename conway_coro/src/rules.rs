// rules.rs - Neighbor counting and the B3/S23 transition rule

use crate::grid::{CellState, Grid};

/// Neighbor offsets as (dy, dx): N, NE, E, SE, S, SW, W, NW.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, 0), (-1, 1), (0, 1), (1, 1),
    (1, 0), (1, -1), (0, -1), (-1, -1),
];

/// Live-neighbor count of (y, x), 0..=8. Reads go through the wrapping `Grid::get`.
pub fn count_neighbors(grid: &Grid, y: isize, x: isize) -> u8 {
    // Reduce first so the offsets below cannot overflow
    let (y, x) = grid.wrap(y, x);
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|&&(dy, dx)| grid.get(y + dy, x + dx).is_alive())
        .count() as u8
}

pub fn next_state(state: CellState, neighbors: u8) -> CellState {
    match (state, neighbors) {
        (CellState::Alive, 2) | (CellState::Alive, 3) => CellState::Alive, // Survival
        (CellState::Empty, 3)                         => CellState::Alive, // Birth
        _                                             => CellState::Empty, // Death or stays dead
    }
}
