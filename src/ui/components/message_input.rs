//! Text input with a send button

use crate::ui::theme::Theme;
use egui::{self, Key, RichText, Vec2};

/// Message input component
///
/// Returns the draft text from [`MessageInput::show`] when the user submits
/// it, either with the send button or with Enter. The draft is cleared on
/// submit.
pub struct MessageInput<'a> {
    draft: &'a mut String,
    theme: &'a Theme,
    enabled: bool,
}

impl<'a> MessageInput<'a> {
    pub fn new(draft: &'a mut String, theme: &'a Theme) -> Self {
        Self {
            draft,
            theme,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> Option<String> {
        let mut submitted = false;

        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing_sm)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    // Reserve space for the send button
                    let available_width = ui.available_width() - 60.0;

                    let text_edit = egui::TextEdit::singleline(self.draft)
                        .hint_text("Type your message...")
                        .desired_width(available_width)
                        .font(egui::TextStyle::Body)
                        .margin(egui::Margin::symmetric(12.0, 8.0))
                        .id(egui::Id::new("message_input"));

                    let response = ui.add_enabled(self.enabled, text_edit);
                    let enabled = self.enabled;
                    response.widget_info(|| {
                        egui::WidgetInfo::labeled(egui::WidgetType::TextEdit, enabled, "Message input")
                    });

                    // Singleline edits drop focus when Enter is pressed
                    if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                        submitted = true;
                    }

                    let can_send = self.enabled && !self.draft.trim().is_empty();
                    let fill = if can_send {
                        self.theme.primary
                    } else {
                        self.theme.text_muted
                    };

                    let button = egui::Button::new(
                        RichText::new("➤").size(18.0).color(egui::Color32::WHITE),
                    )
                    .min_size(Vec2::splat(40.0))
                    .rounding(self.theme.button_rounding)
                    .fill(fill);

                    let send = ui.add_enabled(can_send, button);
                    send.widget_info(|| {
                        egui::WidgetInfo::labeled(egui::WidgetType::Button, can_send, "Send message")
                    });
                    if send.clicked() {
                        submitted = true;
                    }
                    send.on_hover_text("Send message (Enter)");
                });
            });

        if !submitted || !self.enabled || self.draft.trim().is_empty() {
            return None;
        }

        Some(std::mem::take(self.draft))
    }
}
