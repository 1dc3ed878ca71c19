// grid.rs - Toroidal grid for Conway's Game of Life
//
// Coordinates wrap in both directions, so any (y, x) is a valid address.
// Wraparound happens here and nowhere else.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SimulationError};

pub const ALIVE_CHAR: char = '*';
pub const EMPTY_CHAR: char = '-';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    Alive,
    #[default]
    Empty,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    pub fn as_char(self) -> char {
        match self {
            CellState::Alive => ALIVE_CHAR,
            CellState::Empty => EMPTY_CHAR,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            CellState::Alive => CellState::Empty,
            CellState::Empty => CellState::Alive,
        }
    }
}

/// Fixed-size grid of cells stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Creates a `height` x `width` grid with every cell empty. The cell count
    /// must be non-zero and fit in `isize`.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        let len = height
            .checked_mul(width)
            .filter(|&len| len > 0 && len <= isize::MAX as usize)
            .ok_or(SimulationError::InvalidDimension { height, width })?;
        Ok(Self {
            height,
            width,
            cells: vec![CellState::Empty; len],
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells, always `height * width`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// (y, x) reduced into `0..height` and `0..width`.
    pub fn wrap(&self, y: isize, x: isize) -> (isize, isize) {
        (y.rem_euclid(self.height as isize), x.rem_euclid(self.width as isize))
    }

    /// Row-major index of (y, x) after wrapping both coordinates.
    pub fn index_of(&self, y: isize, x: isize) -> usize {
        let (row, col) = self.wrap(y, x);
        row as usize * self.width + col as usize
    }

    pub fn get(&self, y: isize, x: isize) -> CellState {
        self.cells[self.index_of(y, x)]
    }

    pub fn set(&mut self, y: isize, x: isize, state: CellState) {
        let idx = self.index_of(y, x);
        self.cells[idx] = state;
    }

    pub fn toggle(&mut self, y: isize, x: isize) {
        let idx = self.index_of(y, x);
        self.cells[idx] = self.cells[idx].toggled();
    }

    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Alive coordinates in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(move |(i, _)| (i / width, i % width))
    }

    /// One line per row, `*` for alive and `-` for empty, joined with `\n`.
    pub fn render(&self) -> String {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|c| c.as_char()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for Grid {
    type Err = SimulationError;

    /// Parses the output of [`Grid::render`]. Surrounding blank lines are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<&str> = s.trim().lines().map(str::trim).collect();
        let width = rows.first().map_or(0, |r| r.chars().count());
        if rows.is_empty() || width == 0 {
            return Err(SimulationError::Parse("empty grid".into()));
        }

        let mut grid = Grid::new(rows.len(), width)?;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(SimulationError::Parse(format!(
                    "row {y} has {} cells, expected {width}",
                    row.chars().count()
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                let state = match ch {
                    ALIVE_CHAR => CellState::Alive,
                    EMPTY_CHAR => CellState::Empty,
                    other => {
                        return Err(SimulationError::Parse(format!(
                            "unexpected character {other:?} at ({y}, {x})"
                        )));
                    }
                };
                grid.set(y as isize, x as isize, state);
            }
        }
        Ok(grid)
    }
}
