//! Main application struct and eframe integration
//!
//! This module contains the EchoApp that implements eframe::App.

use crate::config::{AppConfig, FlowVariant};
use crate::conversation::ConversationController;
use crate::ui::components::{
    AnimatedCircle, ConversationList, DebugPanel, IndicatorSize, InsightPanel, MessageInput,
    VoiceAction, VoiceControls,
};
use crate::ui::state::UiState;
use crate::ui::theme::Theme;
use crate::utils::SystemClock;
use crate::EchoError;
use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Main Echo Insight application
pub struct EchoApp {
    controller: ConversationController,
    ui_state: UiState,
    theme: Theme,
    /// Name shown on the voice controls
    persona: String,
    /// Last frame time for FPS calculation
    last_frame_time: Instant,
    /// Whether the theme has been applied to the context
    initialized: bool,
}

impl EchoApp {
    /// Create the application for a native window
    pub fn new(cc: &eframe::CreationContext<'_>, config: &AppConfig) -> Self {
        let controller = ConversationController::from_config(config, Arc::new(SystemClock::new()));
        let mut app = Self::with_controller(controller, config);
        app.initialize(&cc.egui_ctx);
        app
    }

    /// Create the application around an existing controller
    pub fn with_controller(controller: ConversationController, config: &AppConfig) -> Self {
        Self {
            controller,
            ui_state: UiState::new(config.timing.pulse_interval(), config.ui.show_debug_panel),
            theme: Theme::from_choice(config.ui.theme),
            persona: config.ui.persona.clone(),
            last_frame_time: Instant::now(),
            initialized: false,
        }
    }

    pub fn controller(&self) -> &ConversationController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ConversationController {
        &mut self.controller
    }

    pub fn ui_state(&self) -> &UiState {
        &self.ui_state
    }

    pub fn ui_state_mut(&mut self) -> &mut UiState {
        &mut self.ui_state
    }

    fn initialize(&mut self, ctx: &egui::Context) {
        if self.initialized {
            return;
        }

        self.theme.apply(ctx);
        self.initialized = true;
        info!("[UI] Echo Insight UI initialized ({} flow)", self.controller.flow());
    }

    /// Run one frame: advance the controller, render, schedule the next repaint
    pub fn show(&mut self, ctx: &egui::Context) {
        self.initialize(ctx);

        self.controller.tick();
        let now = self.controller.now();
        let state = self.controller.state();
        self.ui_state
            .indicator
            .update(state.is_listening, state.is_processing, now);

        self.show_header(ctx);
        self.show_debug_panel(ctx);
        self.show_analysis(ctx);
        self.show_content(ctx);

        if self.controller.state().is_busy() {
            ctx.request_repaint();
        } else if let Some(remaining) = self.controller.time_until_next_step() {
            ctx.request_repaint_after(remaining);
        }
    }

    /// Show the top header bar
    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(egui::Frame::none().fill(self.theme.bg_secondary).inner_margin(12.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Echo Insight")
                            .size(20.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );

                    ui.label(
                        RichText::new("Conversational Assistant")
                            .size(14.0)
                            .color(self.theme.text_muted),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let toggle = ui.button("🔍");
                        toggle.widget_info(|| {
                            egui::WidgetInfo::labeled(
                                egui::WidgetType::Button,
                                true,
                                "Toggle debug panel",
                            )
                        });
                        if toggle.clicked() {
                            self.ui_state.show_debug_panel = !self.ui_state.show_debug_panel;
                        }
                    });
                });
            });
    }

    /// Show the debug panel on the left
    fn show_debug_panel(&mut self, ctx: &egui::Context) {
        if !self.ui_state.show_debug_panel {
            return;
        }

        SidePanel::left("debug_panel")
            .resizable(true)
            .default_width(280.0)
            .min_width(220.0)
            .max_width(480.0)
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                DebugPanel::new(&self.controller, &self.ui_state, &self.theme).show(ui);
            });
    }

    /// Show the analysis sidebar
    fn show_analysis(&mut self, ctx: &egui::Context) {
        SidePanel::right("analysis")
            .resizable(true)
            .default_width(320.0)
            .min_width(240.0)
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                ui.label(
                    RichText::new("Analysis")
                        .size(18.0)
                        .strong()
                        .color(self.theme.text_primary),
                );
                ui.add_space(self.theme.spacing_sm);
                InsightPanel::new(self.controller.state(), &self.theme).show(ui);
            });
    }

    /// Show the indicator and the conversation
    fn show_content(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                self.show_indicator(ui);
                ui.add_space(self.theme.spacing);
                self.show_conversation(ui);
            });
    }

    fn show_indicator(&self, ui: &mut egui::Ui) {
        let state = self.controller.state();
        let size = if ui.available_height() < 600.0 {
            IndicatorSize::Medium
        } else {
            IndicatorSize::Large
        };

        ui.vertical_centered(|ui| {
            AnimatedCircle::new(&self.ui_state.indicator, &self.theme)
                .listening(state.is_listening)
                .processing(state.is_processing)
                .size(size)
                .show(ui);

            ui.add_space(self.theme.spacing_sm);
            ui.label(
                RichText::new(state.status_text())
                    .size(16.0)
                    .color(self.theme.text_secondary),
            );

            if let Some(transcript) = self.controller.live_transcript() {
                ui.label(
                    RichText::new(format!("\u{201c}{}\u{201d}", transcript))
                        .italics()
                        .color(self.theme.text_muted),
                );
            }
        });
    }

    fn show_conversation(&mut self, ui: &mut egui::Ui) {
        let is_voice = self.controller.flow() == FlowVariant::Voice;
        // Input row, plus the voice controls row in the voice flow
        let footer = if is_voice { 140.0 } else { 80.0 };
        let list_height = (ui.available_height() - footer).max(120.0);

        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ConversationList::new(self.controller.state().messages(), &self.theme)
                    .max_height(list_height)
                    .show(ui);

                ui.add_space(self.theme.spacing_sm);

                let submitted = MessageInput::new(&mut self.ui_state.input_text, &self.theme)
                    .enabled(!self.controller.is_busy())
                    .show(ui);
                if let Some(text) = submitted {
                    let outcome = self.controller.submit(&text);
                    debug!("[UI] Typed submission {:?}", outcome);
                }

                if is_voice {
                    ui.add_space(self.theme.spacing_sm);
                    self.show_voice_controls(ui);
                }
            });
    }

    fn show_voice_controls(&mut self, ui: &mut egui::Ui) {
        let supported = self.controller.voice_supported();
        let state = self.controller.state();

        let action = ui
            .vertical_centered(|ui| {
                let action = VoiceControls::new(&self.persona, &self.theme)
                    .listening(state.is_listening)
                    .enabled(supported && !state.is_processing)
                    .show(ui);

                if !supported {
                    ui.label(
                        RichText::new(EchoError::SpeechUnsupported.user_message())
                            .size(12.0)
                            .color(self.theme.text_muted),
                    );
                }

                action
            })
            .inner;

        match action {
            Some(VoiceAction::Start) => self.controller.start_listening(),
            Some(VoiceAction::Stop) => self.controller.stop_listening(),
            None => {}
        }
    }
}

impl eframe::App for EchoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f64();
        self.last_frame_time = now;
        self.ui_state.update_fps(delta);

        self.show(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.ui_state.indicator.teardown();
        self.controller.shutdown();
        info!("[UI] Echo Insight shutting down");
    }
}
