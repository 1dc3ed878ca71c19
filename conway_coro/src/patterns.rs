use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::grid::{CellState, Grid};

/// A named seed pattern; `cells` are (y, x) offsets from the placement origin.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(isize, isize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(0, 3), (1, 4), (2, 2), (2, 3), (2, 4)],
    },
    Pattern {
        name: "Block",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top section
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            // Bottom section (mirrored)
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (5, 1), (5, 2), (6, 1), (6, 2),
            (5, 11), (6, 11), (7, 11), (4, 12), (8, 12), (3, 13), (9, 13),
            (3, 14), (9, 14), (6, 15), (4, 16), (8, 16), (5, 17), (6, 17),
            (7, 17), (6, 18), (3, 21), (4, 21), (5, 21), (3, 22), (4, 22),
            (5, 22), (2, 23), (6, 23), (1, 25), (2, 25), (6, 25), (7, 25),
            (3, 35), (4, 35), (3, 36), (4, 36),
        ],
    },
];

/// Case-insensitive lookup; '-', '_' and spaces are ignored ("r_pentomino" finds "R-pentomino").
pub fn find(name: &str) -> Option<&'static Pattern> {
    let key = normalize(name);
    PATTERNS.iter().find(|p| normalize(p.name) == key)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Clears the grid and marks the pattern alive relative to (origin_y, origin_x).
/// Cells past an edge wrap to the other side.
pub fn apply_pattern(grid: &mut Grid, pattern: &Pattern, origin_y: isize, origin_x: isize) {
    grid.clear();
    for &(dy, dx) in pattern.cells {
        grid.set(origin_y + dy, origin_x + dx, CellState::Alive);
    }
}

/// Clears the grid and marks each listed coordinate alive.
pub fn apply_cells(grid: &mut Grid, cells: &[(isize, isize)]) {
    grid.clear();
    for &(y, x) in cells {
        grid.set(y, x, CellState::Alive);
    }
}

/// Deterministic fill where roughly a third of the cells come out alive.
pub fn apply_random_pattern(grid: &mut Grid, seed_value: u32) {
    grid.clear();

    // Simple pseudo-random generator
    let mut hasher = DefaultHasher::new();
    seed_value.hash(&mut hasher);
    let mut seed = hasher.finish();

    for y in 0..grid.height() as isize {
        for x in 0..grid.width() as isize {
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            if seed % 3 == 0 {
                grid.set(y, x, CellState::Alive);
            }
        }
    }
}
