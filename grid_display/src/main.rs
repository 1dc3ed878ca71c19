// main.rs - Interactive viewer for the toroidal Game of Life
// Each step runs one async task per cell through conway_coro::Stepper

use std::time::{Duration, Instant};

use eframe::egui;
use egui::Color32;
use tracing_subscriber::EnvFilter;

use conway_coro::{patterns, CycleDetector, Grid, SimulationError, Stepper, StepperConfig};

mod ui;

pub const GRID_HEIGHT: usize = 50;
pub const GRID_WIDTH: usize = 50;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("grid_display=info,conway_coro=info")),
        )
        .init();

    let app = match GameOfLife::new(GRID_HEIGHT, GRID_WIDTH) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "could not start simulation");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Toroidal Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
}

pub struct GameOfLife {
    pub grid: Grid,
    stepper: Stepper,
    cycles: CycleDetector,

    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub generation: u32,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    pub status: Option<String>,
    random_seed: u32,
}

impl GameOfLife {
    pub fn new(height: usize, width: usize) -> Result<Self, SimulationError> {
        let mut app = Self {
            grid: Grid::new(height, width)?,
            stepper: Stepper::new(StepperConfig::default())?,
            cycles: CycleDetector::new(),
            is_running: false,
            last_update: Instant::now(),
            update_interval: Duration::from_millis(200),
            generation: 0,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
            status: None,
            random_seed: 0,
        };
        app.reset_history();
        Ok(app)
    }

    pub fn update_generation(&mut self) {
        match self.stepper.step(self.grid.clone()) {
            Ok(next) => {
                self.grid = next;
                self.generation += 1;
                if self.cycles.check(&self.grid) {
                    tracing::info!(generation = self.generation, "cycle detected, pausing");
                    self.status = Some(format!("Cycle reached at generation {}", self.generation));
                    self.is_running = false;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "step failed");
                self.status = Some(e.to_string());
                self.is_running = false;
            }
        }
    }

    fn reset_history(&mut self) {
        self.status = None;
        self.cycles.reset();
        self.cycles.check(&self.grid);
    }

    fn restart(&mut self) {
        self.generation = 0;
        self.reset_history();
    }

    pub fn clear_grid(&mut self) {
        self.grid.clear();
        self.restart();
    }

    pub fn apply_selected_pattern(&mut self) {
        if let Some(pattern) = patterns::PATTERNS.get(self.selected_pattern) {
            // Drop it a few cells in from the top-left corner
            patterns::apply_pattern(&mut self.grid, pattern, 2, 2);
            self.restart();
        }
    }

    pub fn apply_random_pattern(&mut self) {
        // Own counter: generation is 0 after every reset
        self.random_seed = self.random_seed.wrapping_add(1);
        patterns::apply_random_pattern(&mut self.grid, self.random_seed);
        self.restart();
    }

    pub fn toggle_cell(&mut self, row: usize, col: usize) {
        self.grid.toggle(row as isize, col as isize);
        self.reset_history();
    }
}
