//! Debug panel component
//!
//! Displays the controller's internal state for debugging.

use crate::conversation::ConversationController;
use crate::ui::state::UiState;
use crate::ui::theme::Theme;
use egui::{self, RichText, ScrollArea};

/// Debug panel component
pub struct DebugPanel<'a> {
    controller: &'a ConversationController,
    ui_state: &'a UiState,
    theme: &'a Theme,
}

impl<'a> DebugPanel<'a> {
    pub fn new(controller: &'a ConversationController, ui_state: &'a UiState, theme: &'a Theme) -> Self {
        Self {
            controller,
            ui_state,
            theme,
        }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let state = self.controller.state();

        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new("Debug Panel")
                                .strong()
                                .color(self.theme.text_primary),
                        );

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                RichText::new(format!("{:.1} FPS", self.ui_state.debug_info.fps))
                                    .size(12.0)
                                    .family(egui::FontFamily::Monospace)
                                    .color(self.fps_color()),
                            );
                        });
                    });

                    ui.separator();

                    egui::Grid::new("debug_stats")
                        .num_columns(2)
                        .spacing([20.0, 4.0])
                        .show(ui, |ui| {
                            self.stat_row(ui, "Flow", &self.controller.flow().to_string());
                            self.stat_row(ui, "Listening", &state.is_listening.to_string());
                            self.stat_row(ui, "Processing", &state.is_processing.to_string());
                            self.stat_row(ui, "Messages", &state.messages().len().to_string());
                            self.stat_row(ui, "Insights", &state.insights().len().to_string());
                            self.stat_row(ui, "Topics", &state.topics().len().to_string());
                            self.stat_row(
                                ui,
                                "Pending Timers",
                                &self.controller.pending_timers().to_string(),
                            );
                            self.stat_row(ui, "Next Step", &self.next_step());
                            self.stat_row(
                                ui,
                                "Rotation",
                                &format!("{:.1}°", self.ui_state.indicator.rotation()),
                            );
                            self.stat_row(ui, "Pulse", &self.ui_state.indicator.pulse().to_string());
                            self.stat_row(
                                ui,
                                "Speech",
                                if self.controller.voice_supported() {
                                    "available"
                                } else {
                                    "unsupported"
                                },
                            );
                        });

                    if let Some(error) = self.controller.last_speech_error() {
                        ui.add_space(self.theme.spacing_sm);
                        ui.horizontal(|ui| {
                            ui.label(RichText::new("⚠").color(self.theme.error));
                            ui.label(RichText::new(error).size(12.0).color(self.theme.error));
                        });
                    }

                    ui.add_space(self.theme.spacing_sm);
                    ui.separator();

                    ui.label(
                        RichText::new("Recent Activity")
                            .size(12.0)
                            .strong()
                            .color(self.theme.text_secondary),
                    );

                    ScrollArea::vertical()
                        .id_salt("debug_activity")
                        .max_height(120.0)
                        .auto_shrink([false, false])
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            let activity = self.controller.activity();
                            if activity.is_empty() {
                                ui.label(
                                    RichText::new("No activity yet")
                                        .size(11.0)
                                        .color(self.theme.text_muted)
                                        .italics(),
                                );
                            }
                            for entry in activity.iter() {
                                ui.label(
                                    RichText::new(entry)
                                        .size(11.0)
                                        .family(egui::FontFamily::Monospace)
                                        .color(self.theme.text_muted),
                                );
                            }
                        });
                });
            });
    }

    fn stat_row(&self, ui: &mut egui::Ui, label: &str, value: &str) {
        ui.label(RichText::new(label).size(12.0).color(self.theme.text_muted));

        let display_value = if value.is_empty() { "—" } else { value };
        ui.label(
            RichText::new(display_value)
                .size(12.0)
                .family(egui::FontFamily::Monospace)
                .color(self.theme.text_primary),
        );

        ui.end_row();
    }

    fn next_step(&self) -> String {
        match self.controller.time_until_next_step() {
            Some(remaining) => format!("{} ms", remaining.as_millis()),
            None => String::new(),
        }
    }

    fn fps_color(&self) -> egui::Color32 {
        let fps = self.ui_state.debug_info.fps;
        if fps >= 55.0 {
            self.theme.success
        } else if fps >= 30.0 {
            self.theme.warning
        } else {
            self.theme.error
        }
    }
}
