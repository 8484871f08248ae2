//! Application configuration
//!
//! Settings come from built-in defaults, optionally overridden by a TOML
//! file. The file is looked up at an explicit path first, then at
//! `<config dir>/echo-insight/config.toml`.

use crate::{EchoError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Which response simulation drives the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FlowVariant {
    /// Submitting text runs a timed listening phase, then processing
    #[default]
    Basic,
    /// Listening is toggled by voice controls; speech and typed text both submit
    Voice,
}

impl std::fmt::Display for FlowVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowVariant::Basic => write!(f, "basic"),
            FlowVariant::Voice => write!(f, "voice"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeChoice {
    #[default]
    Light,
    Dark,
}

/// Timer lengths, in milliseconds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Basic flow: how long the cosmetic listening phase lasts
    pub listen_delay_ms: u64,
    /// How long the assistant "composes" a reply
    pub process_delay_ms: u64,
    /// Indicator pulse step while listening
    pub pulse_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            listen_delay_ms: 1000,
            process_delay_ms: 1500,
            pulse_interval_ms: 100,
        }
    }
}

impl TimingConfig {
    pub fn listen_delay(&self) -> Duration {
        Duration::from_millis(self.listen_delay_ms)
    }

    pub fn process_delay(&self) -> Duration {
        Duration::from_millis(self.process_delay_ms)
    }

    pub fn pulse_interval(&self) -> Duration {
        Duration::from_millis(self.pulse_interval_ms)
    }
}

/// Speech recognition settings (voice flow)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// When false the recognizer is treated as unsupported
    pub enabled: bool,
    pub language: String,
    pub continuous: bool,
    pub interim_results: bool,
    /// Scripted recognizer: delay between "heard" words
    pub word_interval_ms: u64,
    /// Scripted recognizer: phrases spoken, one per listening session
    pub phrases: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            language: "en-US".to_string(),
            continuous: true,
            interim_results: true,
            word_interval_ms: 250,
            phrases: vec![
                "Hello there".to_string(),
                "What features do you have".to_string(),
                "I need some help with uploads".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Name shown on the voice controls
    pub persona: String,
    pub theme: ThemeChoice,
    pub show_debug_panel: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            persona: "Maggie".to_string(),
            theme: ThemeChoice::Light,
            show_debug_panel: false,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub flow: FlowVariant,
    /// Start with the canned sample conversation
    pub seed_sample_data: bool,
    /// Insights are derived only once the conversation is longer than this
    pub insight_threshold: usize,
    pub timing: TimingConfig,
    pub speech: SpeechConfig,
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            flow: FlowVariant::Basic,
            seed_sample_data: true,
            insight_threshold: 5,
            timing: TimingConfig::default(),
            speech: SpeechConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Default location of the config file, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("echo-insight").join("config.toml"))
    }

    /// Load a configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            EchoError::ConfigError(format!("Failed to read '{}': {}", path.display(), e))
        })?;

        let config = Self::from_toml(&content).map_err(|e| match e {
            EchoError::ConfigError(msg) => {
                EchoError::ConfigError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        info!("[CONFIG] Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(content).map_err(|e| EchoError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration: explicit path, then default path, then defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                debug!("[CONFIG] No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Select the flow variant
    pub fn with_flow(mut self, flow: FlowVariant) -> Self {
        self.flow = flow;
        self
    }

    /// Start with an empty conversation
    pub fn without_sample_data(mut self) -> Self {
        self.seed_sample_data = false;
        self
    }

    /// Treat speech recognition as unavailable
    pub fn without_speech(mut self) -> Self {
        self.speech.enabled = false;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let timing = &self.timing;
        if timing.listen_delay_ms == 0 || timing.process_delay_ms == 0 {
            return Err(EchoError::ConfigError(
                "Response delays must be greater than zero".to_string(),
            ));
        }
        if timing.pulse_interval_ms == 0 {
            return Err(EchoError::ConfigError(
                "Pulse interval must be greater than zero".to_string(),
            ));
        }

        if self.speech.enabled {
            if self.speech.phrases.iter().all(|p| p.trim().is_empty()) {
                return Err(EchoError::ConfigError(
                    "Speech is enabled but no phrases are configured".to_string(),
                ));
            }
            if self.speech.word_interval_ms == 0 {
                return Err(EchoError::ConfigError(
                    "Speech word interval must be greater than zero".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.flow, FlowVariant::Basic);
        assert!(config.seed_sample_data);
        assert_eq!(config.insight_threshold, 5);
        assert_eq!(config.timing.listen_delay(), Duration::from_millis(1000));
        assert_eq!(config.timing.process_delay(), Duration::from_millis(1500));
        assert_eq!(config.timing.pulse_interval(), Duration::from_millis(100));
        assert_eq!(config.ui.persona, "Maggie");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = AppConfig::default()
            .with_flow(FlowVariant::Voice)
            .without_sample_data()
            .without_speech();

        assert_eq!(config.flow, FlowVariant::Voice);
        assert!(!config.seed_sample_data);
        assert!(!config.speech.enabled);
    }

    #[test]
    fn test_parse_sparse_toml() {
        let toml_str = r#"
            flow = "voice"

            [timing]
            process_delay_ms = 500

            [ui]
            theme = "dark"
        "#;

        let config = AppConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.flow, FlowVariant::Voice);
        assert_eq!(config.timing.process_delay_ms, 500);
        assert_eq!(config.timing.listen_delay_ms, 1000);
        assert_eq!(config.ui.theme, ThemeChoice::Dark);
        assert_eq!(config.ui.persona, "Maggie");
    }

    #[test]
    fn test_parse_speech_phrases() {
        let toml_str = r#"
            [speech]
            language = "en-GB"
            phrases = ["help me please"]
        "#;

        let config = AppConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.speech.language, "en-GB");
        assert_eq!(config.speech.phrases, vec!["help me please".to_string()]);
        assert!(config.speech.interim_results);
    }

    #[test]
    fn test_zero_delay_is_rejected() {
        let result = AppConfig::from_toml("[timing]\nlisten_delay_ms = 0\n");
        assert!(matches!(result, Err(EchoError::ConfigError(_))));
    }

    #[test]
    fn test_enabled_speech_without_phrases_is_rejected() {
        let result = AppConfig::from_toml("[speech]\nphrases = []\n");
        assert!(matches!(result, Err(EchoError::ConfigError(_))));

        let disabled = AppConfig::from_toml("[speech]\nenabled = false\nphrases = []\n");
        assert!(disabled.is_ok());
    }

    #[test]
    fn test_unknown_flow_is_a_parse_error() {
        let result = AppConfig::from_toml("flow = \"telepathic\"\n");
        assert!(matches!(result, Err(EchoError::ConfigError(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = AppConfig::load("/definitely/not/here/echo-insight.toml");
        assert!(matches!(result, Err(EchoError::ConfigError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "echo-insight-config-{}.toml",
            uuid::Uuid::new_v4()
        ));
        fs::write(&path, "insight_threshold = 2\n").unwrap();

        let config = AppConfig::discover(Some(&path)).unwrap();
        assert_eq!(config.insight_threshold, 2);

        fs::remove_file(&path).unwrap();
    }
}
