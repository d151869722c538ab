//! egui panels and the UI-side projection of chat state.

pub mod state;
pub mod theme;
pub mod panels;
