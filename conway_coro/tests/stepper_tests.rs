//! Integration tests for the generation stepper.
//!
//! Every scenario runs on the cooperative scheduler and on thread pools of
//! several sizes; the resulting grids must be identical.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use conway_coro::rules::{count_neighbors, next_state};
use conway_coro::{patterns, CellState, CycleDetector, Grid, Scheduler, SimulationError, Stepper, StepperConfig};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn grid_with(height: usize, width: usize, cells: &[(isize, isize)]) -> Grid {
    let mut grid = Grid::new(height, width).expect("valid dimensions");
    patterns::apply_cells(&mut grid, cells);
    grid
}

fn live(grid: &Grid) -> Vec<(usize, usize)> {
    grid.live_cells().collect()
}

fn stepper(scheduler: Scheduler, worker_threads: Option<usize>) -> Stepper {
    Stepper::new(StepperConfig { scheduler, worker_threads, timeout: None }).expect("runtime")
}

fn all_steppers() -> Vec<Stepper> {
    vec![
        stepper(Scheduler::Cooperative, None),
        stepper(Scheduler::ThreadPool, Some(1)),
        stepper(Scheduler::ThreadPool, Some(4)),
        stepper(Scheduler::ThreadPool, None),
    ]
}

/// Single-threaded reference without any task machinery.
fn sequential_step(source: &Grid) -> Grid {
    let mut next = Grid::new(source.height(), source.width()).unwrap();
    for y in 0..source.height() as isize {
        for x in 0..source.width() as isize {
            next.set(y, x, next_state(source.get(y, x), count_neighbors(source, y, x)));
        }
    }
    next
}

const GLIDER: &[(isize, isize)] = &[(0, 3), (1, 4), (2, 2), (2, 3), (2, 4)];

// ── Reference scenario ──────────────────────────────────────────────────────

#[test]
fn glider_translates_after_four_steps() {
    for stepper in all_steppers() {
        let grid = stepper.run(grid_with(5, 9, GLIDER), 4, |_, _| ControlFlow::Continue(())).unwrap();
        assert_eq!(live(&grid), vec![(1, 4), (2, 5), (3, 3), (3, 4), (3, 5)]);
    }
}

#[test]
fn glider_wraps_across_both_edges() {
    let stepper = stepper(Scheduler::ThreadPool, None);
    let grid = stepper.run(grid_with(5, 9, GLIDER), 20, |_, _| ControlFlow::Continue(())).unwrap();
    assert_eq!(live(&grid), vec![(0, 8), (1, 0), (2, 0), (2, 7), (2, 8)]);
}

#[test]
fn glider_generations_render() {
    let stepper = stepper(Scheduler::Cooperative, None);
    let mut frames = Vec::new();
    stepper
        .run(grid_with(5, 9, GLIDER), 2, |_, grid| {
            frames.push(grid.render());
            ControlFlow::Continue(())
        })
        .unwrap();
    assert_eq!(frames[0], "---------\n--*-*----\n---**----\n---*-----\n---------");
    assert_eq!(frames[1], "---------\n----*----\n--*-*----\n---**----\n---------");
}

// ── Invariants ──────────────────────────────────────────────────────────────

#[test]
fn block_is_stable() {
    for size in [4, 5, 8] {
        let block = grid_with(size, size, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        for stepper in all_steppers() {
            assert_eq!(stepper.step(block.clone()).unwrap(), block, "size {size}");
        }
    }
}

#[test]
fn empty_grid_stays_empty() {
    for (h, w) in [(1, 1), (1, 7), (3, 3), (16, 9)] {
        let empty = Grid::new(h, w).unwrap();
        let next = stepper(Scheduler::ThreadPool, Some(2)).step(empty.clone()).unwrap();
        assert_eq!(next, empty);
    }
}

#[test]
fn every_cell_is_written() {
    // A full grid has 8 live neighbors everywhere, so every cell must flip to empty
    let mut full = Grid::new(7, 11).unwrap();
    for y in 0..7 {
        for x in 0..11 {
            full.set(y, x, CellState::Alive);
        }
    }
    for stepper in all_steppers() {
        let next = stepper.step(full.clone()).unwrap();
        assert_eq!(next.population(), 0);
        assert_eq!((next.height(), next.width()), (7, 11));
    }
}

#[test]
fn schedulers_agree_with_sequential_reference() {
    let mut grid = Grid::new(23, 31).unwrap();
    patterns::apply_random_pattern(&mut grid, 42);
    let steppers = all_steppers();

    for _ in 0..6 {
        let expected = sequential_step(&grid);
        let shared = Arc::new(grid);
        for stepper in &steppers {
            assert_eq!(stepper.step(Arc::clone(&shared)).unwrap(), expected);
        }
        grid = expected;
    }
}

#[test]
fn blinker_cycle_is_detected() {
    let stepper = stepper(Scheduler::Cooperative, None);
    let mut detector = CycleDetector::new();
    let start = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
    detector.check(&start);

    let mut stopped_at = None;
    stepper
        .run(start, 10, |generation, grid| {
            if detector.check(grid) {
                stopped_at = Some(generation);
                return ControlFlow::Break(());
            }
            ControlFlow::Continue(())
        })
        .unwrap();
    assert_eq!(stopped_at, Some(2));
}

// ── Timeouts ────────────────────────────────────────────────────────────────

#[test]
fn timed_out_step_returns_no_grid() {
    let stepper = Stepper::new(StepperConfig {
        scheduler: Scheduler::Cooperative,
        worker_threads: None,
        timeout: Some(Duration::ZERO),
    })
    .unwrap();
    // Large enough that dispatching alone outlasts the timer resolution
    let mut grid = Grid::new(256, 256).unwrap();
    patterns::apply_random_pattern(&mut grid, 1);

    match stepper.step(grid) {
        Err(SimulationError::Timeout(limit)) => assert_eq!(limit, Duration::ZERO),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[test]
fn generous_timeout_does_not_interfere() {
    let stepper = Stepper::new(StepperConfig {
        timeout: Some(Duration::from_secs(30)),
        ..Default::default()
    })
    .unwrap();
    let next = stepper.step(grid_with(5, 9, GLIDER)).unwrap();
    assert_eq!(next.population(), 5);
}
