//! Start/stop talking buttons for the voice flow

use crate::ui::theme::Theme;
use egui::{self, RichText, Vec2};

/// What the user asked the voice controls to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceAction {
    Start,
    Stop,
}

pub struct VoiceControls<'a> {
    persona: &'a str,
    theme: &'a Theme,
    is_listening: bool,
    enabled: bool,
}

impl<'a> VoiceControls<'a> {
    pub fn new(persona: &'a str, theme: &'a Theme) -> Self {
        Self {
            persona,
            theme,
            is_listening: false,
            enabled: true,
        }
    }

    pub fn listening(mut self, is_listening: bool) -> Self {
        self.is_listening = is_listening;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn start_label(persona: &str) -> String {
        format!("Start talking with {}", persona)
    }

    pub fn stop_label(persona: &str) -> String {
        format!("Stop talking with {}", persona)
    }

    /// Start and stop buttons side by side; only the one matching the
    /// current listening state is enabled
    pub fn show(self, ui: &mut egui::Ui) -> Option<VoiceAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            let start_enabled = self.enabled && !self.is_listening;
            let start_label = Self::start_label(self.persona);
            if self.button(ui, "🎤", &start_label, self.theme.primary, start_enabled) {
                action = Some(VoiceAction::Start);
            }

            ui.add_space(self.theme.spacing_sm);

            let stop_enabled = self.enabled && self.is_listening;
            let stop_label = Self::stop_label(self.persona);
            if self.button(ui, "⏹", &stop_label, self.theme.error, stop_enabled) {
                action = Some(VoiceAction::Stop);
            }
        });

        action
    }

    fn button(
        &self,
        ui: &mut egui::Ui,
        icon: &str,
        label: &str,
        fill: egui::Color32,
        enabled: bool,
    ) -> bool {
        let fill = if enabled { fill } else { self.theme.text_muted };
        let button = egui::Button::new(
            RichText::new(format!("{}  {}", icon, label)).color(egui::Color32::WHITE),
        )
        .min_size(Vec2::new(220.0, 40.0))
        .rounding(self.theme.button_rounding)
        .fill(fill);

        let response = ui.add_enabled(enabled, button);
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, enabled, label)
        });
        response.clicked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_name_the_persona() {
        assert_eq!(VoiceControls::start_label("Maggie"), "Start talking with Maggie");
        assert_eq!(VoiceControls::stop_label("Maggie"), "Stop talking with Maggie");
    }
}
