//! Speech recognition binding
//!
//! A [`SpeechBackend`] is an opaque recognizer that reports what it hears as
//! [`SpeechEvent`]s over a channel. [`VoiceInput`] owns the backend and turns
//! its events into submissions for the conversation controller.
//!
//! Backends:
//! - [`ScriptedSpeech`]: simulated recognizer that "hears" configured phrases
//! - [`ManualSpeech`]: driven by the host through a [`SpeechRemote`]

pub mod manual;
pub mod scripted;
pub mod voice;

pub use manual::{ManualSpeech, SpeechRemote};
pub use scripted::ScriptedSpeech;
pub use voice::{VoiceInput, VoiceUpdate};

use crate::config::SpeechConfig;
use crate::Result;
use crossbeam_channel::Sender;

/// Recognizer settings applied when a session starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizerOptions {
    /// Keep listening after a final result
    pub continuous: bool,
    /// Report partial transcripts while the user is still speaking
    pub interim_results: bool,
    /// BCP 47 language tag
    pub language: String,
}

impl Default for RecognizerOptions {
    fn default() -> Self {
        Self {
            continuous: true,
            interim_results: true,
            language: "en-US".to_string(),
        }
    }
}

impl From<&SpeechConfig> for RecognizerOptions {
    fn from(config: &SpeechConfig) -> Self {
        Self {
            continuous: config.continuous,
            interim_results: config.interim_results,
            language: config.language.clone(),
        }
    }
}

/// Events produced by a recognizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// Recognized speech. The transcript is the concatenation of `segments`.
    Result { segments: Vec<String>, is_final: bool },
    /// The recognizer failed; the session is over
    Error(String),
    /// The recognizer stopped on its own
    Ended,
}

impl SpeechEvent {
    /// Concatenated transcript of a result event
    pub fn transcript(&self) -> Option<String> {
        match self {
            SpeechEvent::Result { segments, .. } => Some(segments.concat()),
            _ => None,
        }
    }
}

/// A platform speech recognizer
pub trait SpeechBackend: Send {
    /// Human-readable backend name for logs
    fn name(&self) -> &str;

    /// Begin a listening session, reporting events on `events`
    fn start(&mut self, options: &RecognizerOptions, events: Sender<SpeechEvent>) -> Result<()>;

    /// End the current session. Stopping an idle backend is a no-op.
    fn stop(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_concatenates_segments() {
        let event = SpeechEvent::Result {
            segments: vec!["What features".to_string(), " do you have".to_string()],
            is_final: true,
        };
        assert_eq!(
            event.transcript().as_deref(),
            Some("What features do you have")
        );
        assert_eq!(SpeechEvent::Ended.transcript(), None);
    }

    #[test]
    fn test_options_from_config() {
        let mut config = SpeechConfig::default();
        config.language = "de-DE".to_string();
        config.interim_results = false;

        let options = RecognizerOptions::from(&config);
        assert_eq!(options.language, "de-DE");
        assert!(!options.interim_results);
        assert!(options.continuous);
    }
}
