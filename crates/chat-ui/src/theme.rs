//! Palette and egui style for the chat client.

use egui::{Color32, CornerRadius, Stroke, Vec2, Visuals};
use chat_types::task::TaskStatus;

pub const BG_PRIMARY: Color32 = Color32::from_rgb(17, 24, 39);
pub const BG_SECONDARY: Color32 = Color32::from_rgb(31, 41, 55);
pub const BG_SURFACE: Color32 = Color32::from_rgb(55, 65, 81);
pub const BG_USER_BUBBLE: Color32 = Color32::from_rgb(13, 74, 110);
pub const BG_ERROR: Color32 = Color32::from_rgb(69, 26, 26);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(243, 244, 246);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(156, 163, 175);
pub const ACCENT: Color32 = Color32::from_rgb(14, 165, 233);
pub const SUCCESS: Color32 = Color32::from_rgb(74, 222, 128);
pub const ERROR: Color32 = Color32::from_rgb(248, 113, 113);
pub const WARNING: Color32 = Color32::from_rgb(251, 191, 36);

pub const PANEL_ROUNDING: CornerRadius = CornerRadius::same(8);
pub const PANEL_PADDING: Vec2 = Vec2::new(12.0, 10.0);
pub const BUBBLE_ROUNDING: CornerRadius = CornerRadius::same(10);

pub fn task_status_color(status: &TaskStatus) -> Color32 {
    match status {
        TaskStatus::Completed => SUCCESS,
        TaskStatus::InProgress => WARNING,
        TaskStatus::Failed => ERROR,
        TaskStatus::Other(_) => TEXT_SECONDARY,
    }
}

fn visuals() -> Visuals {
    let mut v = Visuals::dark();
    v.panel_fill = BG_PRIMARY;
    v.window_fill = BG_SECONDARY;
    v.extreme_bg_color = BG_SECONDARY;
    v.hyperlink_color = ACCENT;

    for w in [&mut v.widgets.inactive, &mut v.widgets.hovered] {
        w.bg_fill = BG_SURFACE;
        w.weak_bg_fill = BG_SURFACE;
    }
    v.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    v.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    v.widgets.active.bg_fill = ACCENT;
    v.widgets.active.weak_bg_fill = ACCENT;
    v.widgets.active.fg_stroke = Stroke::new(1.0, BG_PRIMARY);

    v.selection.bg_fill = ACCENT.linear_multiply(0.35);
    v.selection.stroke = Stroke::new(1.0, ACCENT);
    v
}

/// Install the chat palette on an egui context
pub fn apply_theme(ctx: &egui::Context) {
    ctx.set_visuals(visuals());
    ctx.style_mut(|style| {
        style.spacing.item_spacing = Vec2::new(8.0, 8.0);
        style.spacing.button_padding = Vec2::new(10.0, 4.0);
    });
}
