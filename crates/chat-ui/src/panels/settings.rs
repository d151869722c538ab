//! Settings panel — backend URL, assistant name, storage backend.

use egui::{self, RichText, Vec2};
use chat_types::config::{ClientConfig, StorageBackendType, DEFAULT_BASE_URL};
use crate::theme::*;

/// What the caller should do after rendering the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    None,
    /// A field was edited but not saved yet
    Changed,
    SaveClicked,
}

/// Save feedback passed in from the app layer
#[derive(Debug, Clone)]
pub struct SaveFeedback {
    pub message: String,
    pub success: bool,
}

/// Render the settings panel. Returns an action for the caller to handle.
pub fn settings_panel(
    ui: &mut egui::Ui,
    config: &mut ClientConfig,
    save_feedback: Option<&SaveFeedback>,
) -> SettingsAction {
    let mut changed = false;
    let mut save_clicked = false;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Settings").color(TEXT_PRIMARY));
            ui.separator();

            // ── Backend Section ──────────────────────────────
            ui.label(RichText::new("Backend").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("Base URL").color(TEXT_SECONDARY).small());
            if ui
                .add(egui::TextEdit::singleline(&mut config.backend.base_url).hint_text(DEFAULT_BASE_URL))
                .changed()
            {
                changed = true;
            }
            ui.label(
                RichText::new("Leave empty to use the page's own origin.")
                    .color(TEXT_SECONDARY)
                    .small()
                    .italics(),
            );

            ui.add_space(4.0);

            ui.label(RichText::new("Assistant name").color(TEXT_SECONDARY).small());
            if ui.text_edit_singleline(&mut config.assistant_name).changed() {
                changed = true;
            }

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(4.0);

            // ── Storage Section ──────────────────────────────
            ui.label(RichText::new("Storage").color(ACCENT).strong());
            ui.add_space(2.0);

            egui::ComboBox::from_id_salt("storage_backend")
                .selected_text(config.storage.backend.label())
                .show_ui(ui, |ui| {
                    for backend in StorageBackendType::all() {
                        if ui
                            .selectable_value(&mut config.storage.backend, backend.clone(), backend.label())
                            .changed()
                        {
                            changed = true;
                        }
                    }
                });

            ui.add_space(4.0);
            ui.label(
                RichText::new(storage_description(&config.storage.backend))
                    .color(TEXT_SECONDARY)
                    .small()
                    .italics(),
            );

            // ── Save Button ──────────────────────────────────
            ui.add_space(16.0);
            ui.separator();
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let btn = ui.add(
                    egui::Button::new(RichText::new("Save Settings").color(TEXT_PRIMARY).strong())
                        .fill(ACCENT)
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(120.0, 28.0)),
                );
                if btn.clicked() {
                    save_clicked = true;
                }

                if let Some(fb) = save_feedback {
                    let color = if fb.success { SUCCESS } else { ERROR };
                    ui.label(RichText::new(&fb.message).color(color).small());
                }
            });
        });

    if save_clicked {
        SettingsAction::SaveClicked
    } else if changed {
        SettingsAction::Changed
    } else {
        SettingsAction::None
    }
}

pub fn storage_description(backend: &StorageBackendType) -> &'static str {
    match backend {
        StorageBackendType::Auto => "Uses localStorage when the browser allows it, otherwise memory. Takes effect after reload.",
        StorageBackendType::LocalStorage => "Chats survive page reloads. Takes effect after reload.",
        StorageBackendType::Memory => "Chats are lost on page reload. Takes effect after reload.",
    }
}
