//! Name prompt — gates the chat until a display name is chosen.

use egui::{self, Align, Layout, RichText, Vec2};
use crate::state::UiState;
use crate::theme::*;

/// Render the name prompt. Returns Some(name) when the user picks one.
pub fn identity_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<String> {
    let mut chosen = None;

    ui.with_layout(Layout::top_down(Align::Center), |ui| {
        ui.add_space(ui.available_height() * 0.2);

        egui::Frame::default()
            .fill(BG_SECONDARY)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_max_width(360.0);
                ui.heading(RichText::new("Welcome").color(TEXT_PRIMARY).strong());
                ui.label(
                    RichText::new(format!(
                        "{} would like to know what to call you.",
                        state.assistant_name
                    ))
                    .color(TEXT_SECONDARY),
                );
                ui.add_space(8.0);

                let input = egui::TextEdit::singleline(&mut state.name_input)
                    .hint_text("Your name")
                    .desired_width(f32::INFINITY);
                let response = ui.add(input);

                let can_start = !state.name_input.trim().is_empty();
                let start_btn = ui.add_enabled(
                    can_start,
                    egui::Button::new(RichText::new("Start chatting").color(TEXT_PRIMARY))
                        .fill(if can_start { ACCENT } else { BG_SURFACE })
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(140.0, 28.0)),
                );

                let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if can_start && (entered || start_btn.clicked()) {
                    chosen = Some(state.name_input.trim().to_string());
                }

                if !state.known_identities.is_empty() {
                    ui.add_space(12.0);
                    ui.label(RichText::new("Continue as").color(TEXT_SECONDARY).small());
                    ui.horizontal_wrapped(|ui| {
                        for name in &state.known_identities {
                            if ui.button(RichText::new(name).color(ACCENT)).clicked() {
                                chosen = Some(name.clone());
                            }
                        }
                    });
                }
            });
    });

    chosen
}
