//! Echo Insight - a conversational assistant demo
//!
//! The assistant is simulated locally: replies come from keyword rules,
//! "thinking" latency from fixed timers, and voice input from a pluggable
//! speech backend. The egui front-end renders the chat, an animated
//! indicator and an analysis sidebar.

pub mod config;
pub mod conversation;
pub mod messages;
pub mod speech;
pub mod ui;
pub mod utils;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum EchoError {
    #[error("Speech recognition is not supported on this platform")]
    SpeechUnsupported,

    #[error("Speech recognition error: {0}")]
    SpeechError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl EchoError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Nothing to retry against
            EchoError::SpeechUnsupported => false,
            // A new listening session may succeed
            EchoError::SpeechError(_) => true,
            EchoError::ConfigError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            EchoError::SpeechUnsupported => {
                "Voice input is not available on this system.".to_string()
            }
            EchoError::SpeechError(_) => {
                "Speech recognition failed. Please try again.".to_string()
            }
            EchoError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EchoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_speech_errors_are_recoverable() {
        assert!(EchoError::SpeechError("no-speech".to_string()).is_recoverable());
        assert!(!EchoError::SpeechUnsupported.is_recoverable());
        assert!(!EchoError::ConfigError("bad".to_string()).is_recoverable());
    }

    #[test]
    fn test_user_message_hides_details() {
        let err = EchoError::ConfigError("line 3: expected `=`".to_string());
        assert!(!err.user_message().contains("line 3"));
        assert_eq!(
            EchoError::SpeechUnsupported.user_message(),
            "Voice input is not available on this system."
        );
    }
}
