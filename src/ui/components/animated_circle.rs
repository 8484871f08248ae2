//! Animated indicator
//!
//! A gradient ring that spins while the assistant is listening or
//! processing. The animation state lives in [`IndicatorAnimation`] and is
//! advanced from the same clock as the conversation, so it can be tested
//! without rendering.

use crate::ui::theme::Theme;
use crate::utils::{Scheduler, TimerId};
use egui::{Pos2, Sense, Shape, Stroke, Vec2};
use std::f32::consts::TAU;
use std::time::Duration;

/// Degrees of rotation per elapsed millisecond
pub const ROTATION_PER_MS: f32 = 0.01;
/// Pulse magnitude cycles through 0..PULSE_STEPS
pub const PULSE_STEPS: u8 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndicatorSize {
    Small,
    Medium,
    #[default]
    Large,
}

impl IndicatorSize {
    pub fn diameter(&self) -> f32 {
        match self {
            IndicatorSize::Small => 32.0,
            IndicatorSize::Medium => 64.0,
            IndicatorSize::Large => 256.0,
        }
    }
}

#[derive(Debug)]
struct PulseTick;

/// Rotation and pulse loops behind the indicator
#[derive(Debug)]
pub struct IndicatorAnimation {
    rotation: f32,
    /// Time of the previous frame while the rotation loop runs
    last_frame: Option<Duration>,
    pulse: u8,
    pulse_interval: Duration,
    pulse_timer: Option<TimerId>,
    ticks: Scheduler<PulseTick>,
}

impl IndicatorAnimation {
    pub fn new(pulse_interval: Duration) -> Self {
        Self {
            rotation: 0.0,
            last_frame: None,
            pulse: 0,
            pulse_interval,
            pulse_timer: None,
            ticks: Scheduler::new(),
        }
    }

    /// Current ring angle in degrees, 0..360
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Current pulse magnitude, 0..PULSE_STEPS
    pub fn pulse(&self) -> u8 {
        self.pulse
    }

    pub fn is_running(&self) -> bool {
        self.last_frame.is_some()
    }

    /// Advance both loops to `now`
    pub fn update(&mut self, is_listening: bool, is_processing: bool, now: Duration) {
        self.update_rotation(is_listening || is_processing, now);
        self.update_pulse(is_listening, now);
    }

    /// Cancel both loops
    pub fn teardown(&mut self) {
        self.last_frame = None;
        self.stop_pulse();
    }

    fn update_rotation(&mut self, active: bool, now: Duration) {
        if !active {
            self.last_frame = None;
            return;
        }

        // The first frame of a run only records its time
        let last = self.last_frame.unwrap_or(now);
        let delta_ms = now.saturating_sub(last).as_secs_f32() * 1000.0;
        self.rotation = (self.rotation + delta_ms * ROTATION_PER_MS) % 360.0;
        self.last_frame = Some(now);
    }

    fn update_pulse(&mut self, listening: bool, now: Duration) {
        if !listening {
            self.stop_pulse();
            return;
        }

        if self.pulse_timer.is_none() {
            self.pulse_timer = Some(self.ticks.schedule_after(now, self.pulse_interval, PulseTick));
        }

        while let Some((due, PulseTick)) = self.ticks.pop_due(now) {
            self.pulse = (self.pulse + 1) % PULSE_STEPS;
            self.pulse_timer = Some(self.ticks.schedule_at(due + self.pulse_interval, PulseTick));
        }
    }

    fn stop_pulse(&mut self) {
        if let Some(id) = self.pulse_timer.take() {
            self.ticks.cancel(id);
        }
        self.pulse = 0;
    }
}

impl Default for IndicatorAnimation {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

/// Indicator widget
pub struct AnimatedCircle<'a> {
    animation: &'a IndicatorAnimation,
    theme: &'a Theme,
    is_listening: bool,
    is_processing: bool,
    size: IndicatorSize,
}

impl<'a> AnimatedCircle<'a> {
    pub fn new(animation: &'a IndicatorAnimation, theme: &'a Theme) -> Self {
        Self {
            animation,
            theme,
            is_listening: false,
            is_processing: false,
            size: IndicatorSize::default(),
        }
    }

    pub fn listening(mut self, is_listening: bool) -> Self {
        self.is_listening = is_listening;
        self
    }

    pub fn processing(mut self, is_processing: bool) -> Self {
        self.is_processing = is_processing;
        self
    }

    pub fn size(mut self, size: IndicatorSize) -> Self {
        self.size = size;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let diameter = self.size.diameter();
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(diameter), Sense::hover());

        if ui.is_rect_visible(rect) {
            let center = rect.center();
            let radius = diameter / 2.0;
            let ring_width = (diameter * 0.06).max(2.0);

            self.draw_ring(ui.painter(), center, radius - ring_width / 2.0, ring_width);

            // Inner disc
            let inner_radius = radius - ring_width;
            ui.painter()
                .circle_filled(center, inner_radius, self.theme.bg_primary);

            if self.is_listening {
                let strength = self.animation.pulse() as f32 / (PULSE_STEPS - 1) as f32;
                let alpha = 0.05 + 0.15 * strength;
                ui.painter().circle_filled(
                    center,
                    inner_radius,
                    self.theme.primary.gamma_multiply(alpha),
                );
            } else if self.is_processing {
                self.draw_spinner(ui, center, inner_radius / 2.0);
            } else {
                ui.painter().circle_filled(
                    center,
                    inner_radius / 2.0,
                    self.theme.primary.gamma_multiply(0.05),
                );
            }
        }

        let label = if self.is_listening {
            "Indicator: listening"
        } else if self.is_processing {
            "Indicator: processing"
        } else {
            "Indicator: idle"
        };
        response.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::Other, true, label));

        response
    }

    /// Gradient ring, rotated by the current angle
    fn draw_ring(&self, painter: &egui::Painter, center: Pos2, radius: f32, width: f32) {
        const SEGMENTS: usize = 72;
        let offset = self.animation.rotation().to_radians();

        for i in 0..SEGMENTS {
            let t0 = i as f32 / SEGMENTS as f32;
            let t1 = (i + 1) as f32 / SEGMENTS as f32;
            let a0 = offset + t0 * TAU;
            let a1 = offset + t1 * TAU;

            // Out and back so the seam is invisible
            let blend = 1.0 - (t0 * 2.0 - 1.0).abs();
            let color = self.theme.ring_color(blend);

            painter.line_segment(
                [
                    center + radius * Vec2::angled(a0),
                    center + radius * Vec2::angled(a1),
                ],
                Stroke::new(width, color),
            );
        }
    }

    fn draw_spinner(&self, ui: &egui::Ui, center: Pos2, radius: f32) {
        let t = ui.ctx().input(|i| i.time) as f32;
        let start = t * TAU;
        let sweep = TAU * 0.75;

        let points: Vec<Pos2> = (0..=32)
            .map(|i| {
                let angle = start + sweep * i as f32 / 32.0;
                center + radius * Vec2::angled(angle)
            })
            .collect();

        ui.painter().add(Shape::line(
            points,
            Stroke::new((radius * 0.15).max(2.0), self.theme.secondary),
        ));
    }
}
