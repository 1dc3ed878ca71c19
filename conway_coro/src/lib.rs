//! Toroidal Game of Life where every cell of a generation is computed by its
//! own async task, with all tasks joined before the next grid is handed out.
//!
//! ```no_run
//! use conway_coro::{patterns, Grid, Stepper, StepperConfig};
//!
//! let mut grid = Grid::new(5, 9)?;
//! patterns::apply_pattern(&mut grid, patterns::find("glider").unwrap(), 0, 0);
//! let stepper = Stepper::new(StepperConfig::default())?;
//! let next = stepper.step(grid)?;
//! println!("{next}");
//! # Ok::<(), conway_coro::SimulationError>(())
//! ```

pub mod config;
pub mod cycle;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod rules;
pub mod stepper;

pub use config::{Scheduler, StepperConfig};
pub use cycle::CycleDetector;
pub use error::SimulationError;
pub use grid::{CellState, Grid};
pub use stepper::{step, Stepper};
