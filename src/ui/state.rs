//! View-side state
//!
//! Everything here belongs to the window rather than the conversation: the
//! draft text, panel toggles, the indicator animation and frame timing.

use crate::ui::components::IndicatorAnimation;
use std::collections::VecDeque;
use std::time::Duration;

/// Frame statistics shown in the debug panel
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    /// Current frame rate
    pub fps: f32,
}

#[derive(Debug)]
pub struct UiState {
    /// Current text in the message input
    pub input_text: String,
    pub show_debug_panel: bool,
    pub indicator: IndicatorAnimation,
    pub debug_info: DebugInfo,
    frame_times: VecDeque<f64>,
}

impl UiState {
    pub fn new(pulse_interval: Duration, show_debug_panel: bool) -> Self {
        Self {
            input_text: String::new(),
            show_debug_panel,
            indicator: IndicatorAnimation::new(pulse_interval),
            debug_info: DebugInfo::default(),
            frame_times: VecDeque::with_capacity(60),
        }
    }

    /// Update the FPS calculation
    pub fn update_fps(&mut self, delta_time: f64) {
        self.frame_times.push_back(delta_time);
        if self.frame_times.len() > 60 {
            self.frame_times.pop_front();
        }

        let avg_time: f64 = self.frame_times.iter().sum::<f64>() / self.frame_times.len() as f64;
        self.debug_info.fps = if avg_time > 0.0 {
            1.0 / avg_time as f32
        } else {
            0.0
        };
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(Duration::from_millis(100), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_averages_recent_frames() {
        let mut state = UiState::default();
        state.update_fps(1.0 / 50.0);
        state.update_fps(1.0 / 50.0);
        assert!((state.debug_info.fps - 50.0).abs() < 0.01);

        for _ in 0..100 {
            state.update_fps(1.0 / 20.0);
        }
        assert!((state.debug_info.fps - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_zero_delta_reports_zero_fps() {
        let mut state = UiState::default();
        state.update_fps(0.0);
        assert_eq!(state.debug_info.fps, 0.0);
    }
}
