//! Conversation analysis sidebar

use crate::conversation::ConversationState;
use crate::ui::theme::Theme;
use egui::{self, RichText};

pub const EMPTY_SUMMARY: &str = "No conversation data available yet.";
pub const EMPTY_INSIGHTS: &str = "No insights generated yet.";

/// Summary, numbered insights and topic chips
pub struct InsightPanel<'a> {
    state: &'a ConversationState,
    theme: &'a Theme,
}

impl<'a> InsightPanel<'a> {
    pub fn new(state: &'a ConversationState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .id_salt("insight_panel")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.section(ui, "Conversation Summary", |panel, ui| {
                    let (text, color) = if panel.state.summary.trim().is_empty() {
                        (EMPTY_SUMMARY, panel.theme.text_muted)
                    } else {
                        (panel.state.summary.as_str(), panel.theme.text_secondary)
                    };
                    ui.label(RichText::new(text).color(color));
                });

                self.section(ui, "Key Insights", |panel, ui| {
                    if panel.state.insights().is_empty() {
                        ui.label(RichText::new(EMPTY_INSIGHTS).color(panel.theme.text_muted));
                        return;
                    }
                    for (index, insight) in panel.state.insights().iter().enumerate() {
                        panel.insight_row(ui, index + 1, insight);
                    }
                });

                if !self.state.topics().is_empty() {
                    self.section(ui, "Topics Discussed", |panel, ui| {
                        ui.horizontal_wrapped(|ui| {
                            for topic in panel.state.topics() {
                                panel.topic_chip(ui, topic);
                            }
                        });
                    });
                }
            });
    }

    fn section(&self, ui: &mut egui::Ui, title: &str, body: impl FnOnce(&Self, &mut egui::Ui)) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(title)
                        .strong()
                        .color(self.theme.text_primary),
                );
                ui.add_space(self.theme.spacing_sm);
                body(self, ui);
            });
        ui.add_space(self.theme.spacing);
    }

    fn insight_row(&self, ui: &mut egui::Ui, number: usize, insight: &str) {
        ui.horizontal_top(|ui| {
            // Numbered badge
            let (rect, _) = ui.allocate_exact_size(egui::Vec2::splat(20.0), egui::Sense::hover());
            ui.painter().circle_filled(rect.center(), 10.0, self.theme.primary);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                number.to_string(),
                egui::FontId::proportional(11.0),
                egui::Color32::WHITE,
            );

            let label = format!("Insight {}: {}", number, insight);
            let response = ui.label(RichText::new(insight).color(self.theme.text_secondary));
            response.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &label)
            });
        });
    }

    fn topic_chip(&self, ui: &mut egui::Ui, topic: &str) {
        let label = format!("Topic: {}", topic);
        let response = egui::Frame::none()
            .fill(self.theme.chip)
            .rounding(self.theme.bubble_rounding)
            .inner_margin(egui::Margin::symmetric(10.0, 4.0))
            .show(ui, |ui| {
                ui.label(RichText::new(topic).size(12.0).color(self.theme.primary))
            })
            .inner;
        response.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &label));
    }
}
