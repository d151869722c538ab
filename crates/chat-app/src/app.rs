//! Main egui application — composes the panels and owns the chat client.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use chat_core::client::ChatClient;
use chat_core::conversation::TurnOutcome;
use chat_core::event_bus::EventBus;
use chat_core::ports::StoragePort;
use chat_core::store::ChatStore;
use chat_platform::backend::HttpChatBackend;
use chat_platform::storage::{open_storage, MemoryStorage};
use chat_types::config::{ClientConfig, StorageBackendType};
use chat_ui::panels::chat::ChatAction;
use chat_ui::panels::settings::{SaveFeedback, SettingsAction};
use chat_ui::panels::{chat, identity, settings, tasks};
use chat_ui::state::{UiState, View};
use chat_ui::theme;

const CONFIG_STORAGE_KEY: &str = "chat:config";

/// Result of the async startup sequence, picked up on the next frame
struct Booted {
    config: ClientConfig,
    client: Rc<ChatClient>,
}

/// The main application state
pub struct ChatApp {
    ui_state: UiState,
    config: ClientConfig,
    event_bus: EventBus,
    /// Holds the saved config. Always auto-detected so the configured
    /// chat storage can be chosen from it.
    settings_storage: Rc<dyn StoragePort>,
    client: Option<Rc<ChatClient>>,
    boot_slot: Rc<RefCell<Option<Booted>>>,
    known_slot: Rc<RefCell<Option<Vec<String>>>>,
    /// Set when the client turned a submission down before it became a turn
    send_rejected: Rc<Cell<bool>>,
    save_feedback: Rc<RefCell<Option<SaveFeedback>>>,
    first_frame: bool,
}

impl ChatApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = ClientConfig::default();
        let event_bus = EventBus::new();

        let settings_storage: Rc<dyn StoragePort> = open_storage(&StorageBackendType::Auto)
            .unwrap_or_else(|e| {
                log::warn!("Settings storage unavailable ({}), using memory", e);
                Rc::new(MemoryStorage::new())
            });

        let app = Self {
            ui_state: UiState::new(config.assistant_name.clone()),
            config,
            event_bus: event_bus.clone(),
            settings_storage: settings_storage.clone(),
            client: None,
            boot_slot: Rc::new(RefCell::new(None)),
            known_slot: Rc::new(RefCell::new(None)),
            send_rejected: Rc::new(Cell::new(false)),
            save_feedback: Rc::new(RefCell::new(None)),
            first_frame: true,
        };

        Self::boot(
            settings_storage,
            event_bus,
            app.boot_slot.clone(),
            app.known_slot.clone(),
            cc.egui_ctx.clone(),
        );

        app
    }

    /// Restore config, open the configured chat storage, then restore the
    /// stored identity and its conversation.
    fn boot(
        settings_storage: Rc<dyn StoragePort>,
        event_bus: EventBus,
        boot_slot: Rc<RefCell<Option<Booted>>>,
        known_slot: Rc<RefCell<Option<Vec<String>>>>,
        ctx: egui::Context,
    ) {
        wasm_bindgen_futures::spawn_local(async move {
            let config = Self::restore_config(settings_storage.as_ref()).await;

            let storage = open_storage(&config.storage.backend).unwrap_or_else(|e| {
                log::warn!(
                    "{} unavailable ({}), falling back to memory",
                    config.storage.backend.label(),
                    e
                );
                Rc::new(MemoryStorage::new())
            });

            let backend = Rc::new(HttpChatBackend::new(config.backend.clone()));
            let client = Rc::new(ChatClient::new(
                ChatStore::new(storage),
                backend,
                event_bus,
                &config.assistant_name,
            ));

            if client.restore().await.is_none() {
                *known_slot.borrow_mut() = Some(client.known_identities().await);
            }

            *boot_slot.borrow_mut() = Some(Booted { config, client });
            ctx.request_repaint();
        });
    }

    async fn restore_config(storage: &dyn StoragePort) -> ClientConfig {
        match storage.get(CONFIG_STORAGE_KEY).await {
            Ok(Some(json)) => match serde_json::from_str::<ClientConfig>(&json) {
                Ok(config) => {
                    log::info!("Config restored from storage");
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable config: {}", e);
                    ClientConfig::default()
                }
            },
            Ok(None) => ClientConfig::default(),
            Err(e) => {
                log::warn!("Could not read config: {}", e);
                ClientConfig::default()
            }
        }
    }

    /// Save config to storage (async) and report the outcome in the panel
    fn save_config(&self, ctx: &egui::Context) {
        let json = match serde_json::to_string(&self.config) {
            Ok(json) => json,
            Err(e) => {
                *self.save_feedback.borrow_mut() = Some(SaveFeedback {
                    message: format!("Could not serialise settings: {}", e),
                    success: false,
                });
                return;
            }
        };

        let storage = self.settings_storage.clone();
        let feedback = self.save_feedback.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = storage.set(CONFIG_STORAGE_KEY, &json).await;
            *feedback.borrow_mut() = Some(match result {
                Ok(()) => {
                    log::info!("Config saved to storage");
                    SaveFeedback {
                        message: "Saved".to_string(),
                        success: true,
                    }
                }
                Err(e) => {
                    log::warn!("Saving config failed: {}", e);
                    SaveFeedback {
                        message: format!("Save failed: {}", e),
                        success: false,
                    }
                }
            });
            ctx.request_repaint();
        });
    }

    /// Point the running client at the edited config.
    fn apply_config(&mut self) {
        self.ui_state.assistant_name = self.config.assistant_name.clone();
        if let Some(client) = &self.client {
            client.set_backend(Rc::new(HttpChatBackend::new(self.config.backend.clone())));
            client.set_assistant_name(&self.config.assistant_name);
        }
    }

    fn poll_slots(&mut self) {
        if let Some(booted) = self.boot_slot.borrow_mut().take() {
            log::info!("Chat client ready (backend {})", booted.config.backend.base_url);
            self.ui_state.assistant_name = booted.config.assistant_name.clone();
            self.config = booted.config;
            self.client = Some(booted.client);
        }
        if let Some(names) = self.known_slot.borrow_mut().take() {
            self.ui_state.known_identities = names;
        }
        if self.send_rejected.replace(false) {
            self.ui_state.release_input();
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        self.poll_slots();

        // Drain events from the chat client
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        if self.ui_state.is_busy() || self.ui_state.task_log.is_loading() {
            ctx.request_repaint();
        }

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("{} Chat", self.ui_state.assistant_name))
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.separator();
                if ui
                    .selectable_label(self.ui_state.view == View::Chat, "Chat")
                    .clicked()
                {
                    self.ui_state.view = View::Chat;
                }
                if ui
                    .selectable_label(self.ui_state.view == View::Tasks, "Tasks")
                    .clicked()
                    && self.ui_state.view != View::Tasks
                {
                    self.ui_state.view = View::Tasks;
                    self.dispatch_refresh_tasks(ctx);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .selectable_label(self.ui_state.show_settings, "Settings")
                        .clicked()
                    {
                        self.ui_state.show_settings = !self.ui_state.show_settings;
                    }
                    ui.label(
                        RichText::new(&self.config.backend.base_url)
                            .color(theme::TEXT_SECONDARY)
                            .small(),
                    );
                });
            });
        });

        // ── Settings side panel ──────────────────────────────
        if self.ui_state.show_settings {
            SidePanel::right("settings_panel")
                .min_width(280.0)
                .max_width(350.0)
                .show(ctx, |ui| {
                    let feedback = self.save_feedback.borrow().clone();
                    match settings::settings_panel(ui, &mut self.config, feedback.as_ref()) {
                        SettingsAction::SaveClicked => {
                            self.apply_config();
                            self.save_config(ctx);
                        }
                        SettingsAction::Changed => {
                            *self.save_feedback.borrow_mut() = None;
                        }
                        SettingsAction::None => {}
                    }
                });
        }

        // ── Main content ─────────────────────────────────────
        CentralPanel::default().show(ctx, |ui| match self.ui_state.view {
            View::Tasks => {
                if tasks::task_log_panel(ui, &self.ui_state) {
                    self.dispatch_refresh_tasks(ctx);
                }
            }
            View::Chat if self.ui_state.identity_required => {
                if let Some(name) = identity::identity_panel(ui, &mut self.ui_state) {
                    self.dispatch_sign_in(name, ctx);
                }
            }
            View::Chat if self.ui_state.identity.is_none() => {
                ui.centered_and_justified(|ui| ui.spinner());
            }
            View::Chat => {
                if let Some(action) = chat::chat_panel(ui, &mut self.ui_state) {
                    match action {
                        ChatAction::Send(text) => self.dispatch_send(text, ctx),
                        ChatAction::NewChat => self.dispatch_new_chat(ctx),
                        ChatAction::SwitchUser => self.dispatch_sign_out(ctx),
                    }
                }
            }
        });
    }
}

impl ChatApp {
    /// Send a chat message (async). The client appends the user's message
    /// before its first await; the UI sees it through the event bus.
    fn dispatch_send(&self, text: String, ctx: &egui::Context) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let rejected = self.send_rejected.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            if client.send(&text).await == TurnOutcome::Rejected {
                log::warn!("Message not sent: the chat is busy");
                rejected.set(true);
            }
            ctx.request_repaint();
        });
    }

    fn dispatch_new_chat(&self, ctx: &egui::Context) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            client.new_chat().await;
            ctx.request_repaint();
        });
    }

    fn dispatch_sign_in(&self, name: String, ctx: &egui::Context) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            match client.sign_in(&name).await {
                Ok(identity) => log::info!("Signed in as {}", identity),
                Err(e) => log::error!("Sign-in failed: {}", e),
            }
            ctx.request_repaint();
        });
    }

    fn dispatch_sign_out(&self, ctx: &egui::Context) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let known_slot = self.known_slot.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = client.sign_out().await {
                log::error!("Sign-out failed: {}", e);
            }
            *known_slot.borrow_mut() = Some(client.known_identities().await);
            ctx.request_repaint();
        });
    }

    fn dispatch_refresh_tasks(&self, ctx: &egui::Context) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            client.refresh_tasks().await;
            ctx.request_repaint();
        });
    }
}
