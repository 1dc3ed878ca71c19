// stepper.rs - Generation stepper: one async task per cell, joined per generation
//
// The source grid is shared read-only through an `Arc`. Every cell task hands
// back the next state of exactly one cell, so writes into the destination
// never overlap and no lock is needed.

use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinSet;
use tracing::{debug, trace, warn};

use crate::config::{Scheduler, StepperConfig};
use crate::error::{Result, SimulationError};
use crate::grid::{CellState, Grid};
use crate::rules;

/// Result of one cell task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellUpdate {
    pub y: isize,
    pub x: isize,
    pub state: CellState,
}

/// Cell task: reads the source only, yields once to the scheduler.
async fn step_cell(source: Arc<Grid>, y: isize, x: isize) -> CellUpdate {
    let state = source.get(y, x);
    let neighbors = rules::count_neighbors(&source, y, x);

    tokio::task::yield_now().await;  // Cooperative yielding

    CellUpdate { y, x, state: rules::next_state(state, neighbors) }
}

/// Computes the next generation of `source` on the current tokio runtime.
///
/// Spawns `height * width` cell tasks and waits for all of them before the
/// destination grid is returned. If a task fails, the remaining tasks are
/// aborted and the partial destination is dropped.
pub async fn step(source: Arc<Grid>) -> Result<Grid> {
    let mut next = Grid::new(source.height(), source.width())?;
    debug!(height = source.height(), width = source.width(), tasks = next.len(), "dispatching cell tasks");

    // Dispatch phase
    let mut tasks = JoinSet::new();
    for y in 0..source.height() as isize {
        for x in 0..source.width() as isize {
            tasks.spawn(step_cell(Arc::clone(&source), y, x));
        }
    }

    // Join phase
    let mut written = 0;
    while let Some(joined) = tasks.join_next().await {
        let update = joined?;
        next.set(update.y, update.x, update.state);
        written += 1;
    }
    debug_assert_eq!(written, next.len());

    Ok(next)
}

/// Blocking front end that owns the runtime the cell tasks run on.
pub struct Stepper {
    runtime: Runtime,
    config: StepperConfig,
}

impl Stepper {
    pub fn new(config: StepperConfig) -> Result<Self> {
        let runtime = match config.scheduler {
            Scheduler::Cooperative => Builder::new_current_thread().enable_all().build()?,
            Scheduler::ThreadPool => {
                let mut builder = Builder::new_multi_thread();
                if let Some(threads) = config.worker_threads {
                    builder.worker_threads(threads.max(1));
                }
                builder.enable_all().build()?
            }
        };
        debug!(scheduler = ?config.scheduler, workers = ?config.worker_threads, "stepper ready");
        Ok(Self { runtime, config })
    }

    pub fn config(&self) -> &StepperConfig {
        &self.config
    }

    /// Next generation of `source`. Returns only once every cell is computed.
    pub fn step(&self, source: impl Into<Arc<Grid>>) -> Result<Grid> {
        let source = source.into();
        self.runtime.block_on(async {
            match self.config.timeout {
                None => step(source).await,
                Some(limit) => match tokio::time::timeout(limit, step(source)).await {
                    Ok(next) => next,
                    Err(_) => {
                        warn!(?limit, "step timed out, discarding partial generation");
                        Err(SimulationError::Timeout(limit))
                    }
                },
            }
        })
    }

    /// Steps `generations` times, calling `on_generation(n, grid)` after each
    /// one (n starts at 1). Returns the last grid computed.
    pub fn run<F>(&self, mut grid: Grid, generations: usize, mut on_generation: F) -> Result<Grid>
    where
        F: FnMut(usize, &Grid) -> ControlFlow<()>,
    {
        for generation in 1..=generations {
            grid = self.step(grid)?;
            trace!(generation, population = grid.population(), "generation complete");
            if on_generation(generation, &grid).is_break() {
                debug!(generation, "run stopped early");
                break;
            }
        }
        Ok(grid)
    }
}
