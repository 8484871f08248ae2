//! Single chat message: avatar, bubble and optional timestamp

use crate::messages::Message;
use crate::ui::theme::Theme;
use egui::{self, Color32, RichText, Sense, Vec2};

const AVATAR_SIZE: f32 = 36.0;

/// Message bubble component
pub struct MessageBubble<'a> {
    message: &'a Message,
    theme: &'a Theme,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message, theme: &'a Theme) -> Self {
        Self { message, theme }
    }

    /// Label exposed to accessibility tooling
    pub fn accessible_label(message: &Message) -> String {
        if message.sender.is_user() {
            format!("User message: {}", message.content)
        } else {
            format!("Assistant response: {}", message.content)
        }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let is_user = self.message.sender.is_user();

        ui.horizontal_top(|ui| {
            self.draw_avatar(ui, is_user);

            ui.vertical(|ui| {
                let bubble_color = if is_user {
                    self.theme.user_bubble
                } else {
                    self.theme.assistant_bubble
                };

                egui::Frame::none()
                    .fill(bubble_color)
                    .rounding(self.theme.bubble_rounding)
                    .inner_margin(self.theme.spacing)
                    .show(ui, |ui| {
                        ui.set_max_width(ui.available_width());
                        let label = Self::accessible_label(self.message);
                        let response = ui.label(
                            RichText::new(&self.message.content).color(self.theme.text_primary),
                        );
                        response.widget_info(|| {
                            egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &label)
                        });
                    });

                if let Some(timestamp) = &self.message.timestamp {
                    ui.label(
                        RichText::new(timestamp)
                            .size(11.0)
                            .color(self.theme.text_muted),
                    );
                }
            });
        });
    }

    fn draw_avatar(&self, ui: &mut egui::Ui, is_user: bool) {
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(AVATAR_SIZE), Sense::hover());
        if !ui.is_rect_visible(rect) {
            return;
        }

        let painter = ui.painter();
        let center = rect.center();
        let radius = AVATAR_SIZE / 2.0;

        if is_user {
            painter.circle_filled(center, radius, self.theme.bg_tertiary);
            painter.circle_filled(center, radius * 0.45, Color32::WHITE);
        } else {
            // Dot in a ring
            painter.circle_filled(center, radius, self.theme.primary);
            painter.circle_stroke(center, radius * 0.5, egui::Stroke::new(1.5, Color32::WHITE));
            painter.circle_filled(center, radius * 0.15, Color32::WHITE);
        }
    }
}
