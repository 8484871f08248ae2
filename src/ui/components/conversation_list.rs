//! Conversation history

use crate::messages::Message;
use crate::ui::components::MessageBubble;
use crate::ui::theme::Theme;
use egui::{self, RichText};

pub const EMPTY_PLACEHOLDER: &str = "No messages yet. Start a conversation!";

/// Scrollable list of messages, newest at the bottom
pub struct ConversationList<'a> {
    messages: &'a [Message],
    theme: &'a Theme,
    max_height: f32,
}

impl<'a> ConversationList<'a> {
    pub fn new(messages: &'a [Message], theme: &'a Theme) -> Self {
        Self {
            messages,
            theme,
            max_height: f32::INFINITY,
        }
    }

    pub fn max_height(mut self, max_height: f32) -> Self {
        self.max_height = max_height;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .id_salt("conversation_list")
            .max_height(self.max_height)
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.add_space(self.theme.spacing_sm);

                if self.messages.is_empty() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.label(RichText::new(EMPTY_PLACEHOLDER).color(self.theme.text_muted));
                    });
                } else {
                    for message in self.messages {
                        ui.push_id(message.id, |ui| {
                            MessageBubble::new(message, self.theme).show(ui);
                        });
                        ui.add_space(self.theme.spacing);
                    }
                }
            });
    }
}
