// ui.rs - egui front end for the viewer

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use std::time::{Duration, Instant};

use conway_coro::patterns;

use crate::GameOfLife;

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-update if running
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.update_generation();
            self.last_update = Instant::now();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Toroidal Conway's Game of Life (one task per cell)");

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    if self.is_running {
                        self.status = None;
                        self.last_update = Instant::now();
                    }
                }

                if ui.button("⏭ Step").clicked() {
                    self.is_running = false;
                    self.update_generation();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.is_running = false;
                    self.clear_grid();
                }

                if ui.button("🎲 Random").clicked() {
                    self.is_running = false;
                    self.apply_random_pattern();
                }

                ui.separator();

                // Pattern dropdown
                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.is_running = false;
                    self.apply_selected_pattern();
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.generation));
            });

            ui.separator();

            // Speed control
            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1000.0 / self.update_interval.as_millis() as f32;
                if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                    self.update_interval = Duration::from_millis((1000.0 / speed) as u64);
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();

            ui.label("Edges wrap around: cells leaving one side re-enter on the other.");
            ui.label("Click cells to toggle them alive/dead while paused.");
            if let Some(status) = &self.status {
                ui.colored_label(Color32::YELLOW, status.as_str());
            }

            ui.separator();

            // Draw the grid
            let height = self.grid.height();
            let width = self.grid.width();
            let spacing = 0.5;
            let box_size = (750.0 / height.max(width) as f32 - spacing).clamp(2.0, 15.0);

            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(
                (box_size + spacing) * width as f32 - spacing,
                (box_size + spacing) * height as f32 - spacing,
            );

            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

            // Fill background
            painter.rect_filled(
                Rect::from_min_size(start_pos, total_size),
                0.0,
                Color32::BLACK,
            );

            let clicked_at = if !self.is_running && response.clicked() {
                response.interact_pointer_pos()
            } else {
                None
            };
            let mut toggled = None;

            for row in 0..height {
                for col in 0..width {
                    let x = start_pos.x + col as f32 * (box_size + spacing);
                    let y = start_pos.y + row as f32 * (box_size + spacing);

                    let rect = Rect::from_min_size(
                        egui::pos2(x, y),
                        Vec2::splat(box_size),
                    );

                    let cell_color = if self.grid.get(row as isize, col as isize).is_alive() {
                        self.live_color
                    } else {
                        self.dead_color
                    };

                    painter.rect_filled(rect, 1.0, cell_color);
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));

                    if clicked_at.is_some_and(|pos| rect.contains(pos)) {
                        toggled = Some((row, col));
                    }
                }
            }

            if let Some((row, col)) = toggled {
                self.toggle_cell(row, col);
            }

            ui.separator();

            // Statistics
            let live_cells = self.grid.population();
            let total = self.grid.len();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", total - live_cells));
                ui.label(format!("Population: {:.1}%", (live_cells as f32 / total as f32) * 100.0));
            });
        });

        // Request repaint if running to keep animation smooth
        if self.is_running {
            ctx.request_repaint();
        }
    }
}
