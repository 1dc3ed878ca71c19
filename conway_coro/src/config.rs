// config.rs - Command-line options for the text driver and stepper settings

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::error::SimulationError;
use crate::grid::Grid;
use crate::patterns;

/// How cell tasks are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Scheduler {
    /// All cell tasks multiplexed on the calling thread.
    Cooperative,
    /// Cell tasks spread over a pool of worker threads.
    #[default]
    ThreadPool,
}

#[derive(Debug, Clone, Default)]
pub struct StepperConfig {
    pub scheduler: Scheduler,
    /// Worker count for `Scheduler::ThreadPool`; tokio picks one per core when unset.
    pub worker_threads: Option<usize>,
    /// Upper bound on a single step. A step that overruns yields no grid at all.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Parser)]
#[command(name = "conway_coro", about = "Toroidal Game of Life with one task per cell")]
pub struct Args {
    /// Grid height
    #[arg(long, default_value_t = 5)]
    pub height: usize,

    /// Grid width
    #[arg(long, default_value_t = 9)]
    pub width: usize,

    /// Number of generations to compute
    #[arg(long, default_value_t = 5)]
    pub generations: usize,

    /// Seed pattern name, or "random"
    #[arg(long, default_value = "glider")]
    pub pattern: String,

    /// Starting grid in rendered form, rows separated by '/' (e.g. "-*-/--*/***");
    /// sets the dimensions and replaces --pattern and --cell
    #[arg(long, allow_hyphen_values = true)]
    pub grid: Option<String>,

    /// Explicit alive cell as "y,x"; repeatable, replaces --pattern
    #[arg(long = "cell", value_parser = parse_cell, allow_hyphen_values = true)]
    pub cells: Vec<(isize, isize)>,

    /// Seed for the random fill
    #[arg(long, default_value_t = 0)]
    pub seed: u32,

    #[arg(long, value_enum, default_value_t = Scheduler::ThreadPool)]
    pub scheduler: Scheduler,

    /// Worker threads for the thread-pool scheduler
    #[arg(long)]
    pub threads: Option<usize>,

    /// Per-step timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Stop early once a generation repeats
    #[arg(long)]
    pub stop_on_cycle: bool,
}

impl Args {
    pub fn stepper_config(&self) -> StepperConfig {
        StepperConfig {
            scheduler: self.scheduler,
            worker_threads: self.threads,
            timeout: self.timeout_ms.map(Duration::from_millis),
        }
    }

    /// Builds generation 0 from --grid, --cell, or --pattern, in that order.
    pub fn initial_grid(&self) -> Result<Grid, SimulationError> {
        if let Some(text) = &self.grid {
            return text.replace('/', "\n").parse();
        }

        let mut grid = Grid::new(self.height, self.width)?;
        if !self.cells.is_empty() {
            patterns::apply_cells(&mut grid, &self.cells);
        } else if self.pattern.eq_ignore_ascii_case("random") {
            patterns::apply_random_pattern(&mut grid, self.seed);
        } else {
            let pattern = patterns::find(&self.pattern)
                .ok_or_else(|| SimulationError::Parse(format!("unknown pattern {:?}", self.pattern)))?;
            patterns::apply_pattern(&mut grid, pattern, 0, 0);
        }
        Ok(grid)
    }
}

/// Parses "y,x" (signed, whitespace allowed) into a coordinate pair.
pub fn parse_cell(s: &str) -> Result<(isize, isize), SimulationError> {
    let (y, x) = s
        .split_once(',')
        .ok_or_else(|| SimulationError::Parse(format!("expected \"y,x\", got {s:?}")))?;
    let coord = |part: &str| {
        part.trim()
            .parse::<isize>()
            .map_err(|e| SimulationError::Parse(format!("bad coordinate {part:?}: {e}")))
    };
    Ok((coord(y)?, coord(x)?))
}
