//! User interface for Echo Insight
//!
//! Built with egui/eframe. The page is a header, the animated indicator with
//! the conversation underneath, and an analysis sidebar.

pub mod app;
pub mod components;
pub mod state;
pub mod theme;

pub use app::EchoApp;
pub use state::UiState;
pub use theme::Theme;

use crate::config::AppConfig;

/// Open the native window and run until it is closed
pub fn run(config: AppConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 820.0])
            .with_min_inner_size([720.0, 520.0])
            .with_title("Echo Insight"),
        ..Default::default()
    };

    eframe::run_native(
        "Echo Insight",
        options,
        Box::new(move |cc| Ok(Box::new(EchoApp::new(cc, &config)))),
    )
}
