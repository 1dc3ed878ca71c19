// main.rs - Text driver: steps the grid a fixed number of times and prints each generation

use std::ops::ControlFlow;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use conway_coro::config::Args;
use conway_coro::{CycleDetector, Stepper};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("conway_coro=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let start = Instant::now();

    let grid = args.initial_grid().context("building initial grid")?;

    let stepper = Stepper::new(args.stepper_config()).context("starting stepper")?;
    tracing::info!(
        height = grid.height(),
        width = grid.width(),
        generations = args.generations,
        scheduler = ?stepper.config().scheduler,
        timeout = ?stepper.config().timeout,
        population = grid.population(),
        "starting simulation"
    );

    let mut cycles = CycleDetector::new();
    cycles.check(&grid);
    stepper.run(grid, args.generations, |generation, grid| {
        println!();
        println!("{grid}");
        if args.stop_on_cycle && cycles.check(grid) {
            tracing::info!(generation, "generation repeats, stopping");
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    })?;

    println!("duration {}", start.elapsed().as_secs_f64());
    Ok(())
}
