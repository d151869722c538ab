//! Chat panel — displays the transcript and the input field.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use chat_types::message::{Message, Sender, FALLBACK_ERROR_TEXT};
use crate::state::UiState;
use crate::theme::*;

/// What the user asked for this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    Send(String),
    NewChat,
    SwitchUser,
}

/// Render the chat panel. Returns an action when the user did something.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<ChatAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(
                        RichText::new(format!("Chat with {}", state.assistant_name))
                            .color(TEXT_PRIMARY)
                            .strong(),
                    );
                    if let Some(name) = &state.identity {
                        ui.label(
                            RichText::new(format!("as {}", name))
                                .color(TEXT_SECONDARY)
                                .small(),
                        );
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.small_button("Switch user").clicked() {
                            action = Some(ChatAction::SwitchUser);
                        }
                        // Disabled mid-turn and while a reset is archiving
                        if ui
                            .add_enabled(!state.is_busy(), egui::Button::new("New chat").small())
                            .clicked()
                        {
                            action = Some(ChatAction::NewChat);
                        }
                        let status_color = if state.is_busy() { WARNING } else { SUCCESS };
                        ui.label(
                            RichText::new(&state.status_text)
                                .color(status_color)
                                .small(),
                        );
                    });
                });

                ui.separator();

                // Messages area
                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for message in &state.messages {
                            render_message(ui, message, &state.assistant_name);
                            ui.add_space(4.0);
                        }

                        if state.pending {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(
                                    RichText::new(format!("{} is typing...", state.assistant_name))
                                        .color(TEXT_SECONDARY)
                                        .italics()
                                        .small(),
                                );
                            });
                        }
                    });

                ui.add_space(8.0);

                // Input area
                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Type a message...")
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));

                    let response = ui.add(input);

                    let send_enabled = state.can_send();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    // Submit on Enter or button click
                    let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if entered || send_btn.clicked() {
                        if let Some(text) = state.take_input() {
                            action = Some(ChatAction::Send(text));
                        }
                        response.request_focus();
                    }
                });
            });
        });

    action
}

fn render_message(ui: &mut egui::Ui, message: &Message, assistant_name: &str) {
    let is_error = message.sender == Sender::Agent && message.text == FALLBACK_ERROR_TEXT;
    let (label, label_color, bg) = match message.sender {
        Sender::User => ("You", ACCENT, BG_USER_BUBBLE),
        Sender::Agent if is_error => (assistant_name, ERROR, BG_ERROR),
        Sender::Agent => (assistant_name, SUCCESS, BG_SECONDARY),
    };

    let layout = if message.sender.is_user() {
        Layout::top_down(Align::Max)
    } else {
        Layout::top_down(Align::Min)
    };

    ui.with_layout(layout, |ui| {
        egui::Frame::default()
            .fill(bg)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.8);
                ui.label(RichText::new(label).color(label_color).strong().small());
                ui.label(RichText::new(&message.text).color(TEXT_PRIMARY));
            });
    });
}
