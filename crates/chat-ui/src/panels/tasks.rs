//! Task log panel — read-only view of the backend's task records.

use egui::{self, Align, Layout, RichText, ScrollArea};
use chat_core::task_log::TaskLogState;
use chat_types::task::{format_timestamp, Task};
use crate::state::UiState;
use crate::theme::*;

/// Render the task log. Returns true when the user asked for a refresh.
pub fn task_log_panel(ui: &mut egui::Ui, state: &UiState) -> bool {
    let mut refresh = false;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading(RichText::new("Task Log").color(TEXT_PRIMARY).strong());
                if let TaskLogState::Loaded(tasks) = &state.task_log {
                    ui.label(
                        RichText::new(format!("({} tasks)", tasks.len()))
                            .color(TEXT_SECONDARY)
                            .small(),
                    );
                }
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui
                        .add_enabled(!state.task_log.is_loading(), egui::Button::new("Refresh").small())
                        .clicked()
                    {
                        refresh = true;
                    }
                });
            });

            ui.separator();

            match &state.task_log {
                TaskLogState::NotLoaded => {
                    ui.label(RichText::new("Tasks have not been loaded yet.").color(TEXT_SECONDARY));
                }
                TaskLogState::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(RichText::new("Loading tasks...").color(TEXT_SECONDARY));
                    });
                }
                TaskLogState::Failed(message) => {
                    egui::Frame::default()
                        .fill(BG_ERROR)
                        .corner_radius(PANEL_ROUNDING)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new("Error").color(ERROR).strong().small());
                            ui.label(RichText::new(message).color(TEXT_PRIMARY));
                        });
                }
                TaskLogState::Empty => {
                    ui.label(RichText::new("No tasks found.").color(TEXT_SECONDARY).italics());
                }
                TaskLogState::Loaded(tasks) => {
                    ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| task_table(ui, tasks));
                }
            }
        });

    refresh
}

fn task_table(ui: &mut egui::Ui, tasks: &[Task]) {
    egui::Grid::new("task_log_grid")
        .striped(true)
        .num_columns(6)
        .spacing([16.0, 6.0])
        .show(ui, |ui| {
            for header in ["ID", "Type", "Status", "Query", "Created", "Completed"] {
                ui.label(RichText::new(header).color(ACCENT).strong().small());
            }
            ui.end_row();

            for task in tasks {
                ui.label(RichText::new(task.id.to_string()).color(TEXT_PRIMARY).monospace());
                ui.label(RichText::new(&task.kind).color(TEXT_PRIMARY));
                ui.label(
                    RichText::new(task.status.label())
                        .color(task_status_color(&task.status))
                        .strong(),
                );
                ui.label(RichText::new(task.query().unwrap_or("—")).color(TEXT_SECONDARY));
                ui.label(RichText::new(format_timestamp(&task.created_at)).color(TEXT_SECONDARY).small());
                let completed = task
                    .completed_at
                    .as_deref()
                    .map(format_timestamp)
                    .unwrap_or_else(|| "—".to_string());
                ui.label(RichText::new(completed).color(TEXT_SECONDARY).small());
                ui.end_row();
            }
        });
}
