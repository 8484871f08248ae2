//! Voice input binding used by the conversation controller

use super::{RecognizerOptions, ScriptedSpeech, SpeechBackend, SpeechEvent};
use crate::config::SpeechConfig;
use crate::{EchoError, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, error, info, warn};

/// What the controller should do with recognizer output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceUpdate {
    /// Partial transcript for display
    Interim(String),
    /// Finalized transcript to submit
    Transcript(String),
    /// Recognizer failed; listening is over
    Failed(String),
    /// Recognizer stopped on its own
    Ended,
}

/// Owns the speech backend and its event channel
pub struct VoiceInput {
    backend: Option<Box<dyn SpeechBackend>>,
    options: RecognizerOptions,
    event_tx: Sender<SpeechEvent>,
    event_rx: Receiver<SpeechEvent>,
    active: bool,
}

impl VoiceInput {
    pub fn new(backend: Box<dyn SpeechBackend>, options: RecognizerOptions) -> Self {
        info!("[SPEECH] Using {} recognizer", backend.name());
        let (event_tx, event_rx) = unbounded();
        Self {
            backend: Some(backend),
            options,
            event_tx,
            event_rx,
            active: false,
        }
    }

    /// Voice input with no recognizer behind it
    pub fn unsupported() -> Self {
        warn!("[SPEECH] Speech recognition not supported; voice input disabled");
        let (event_tx, event_rx) = unbounded();
        Self {
            backend: None,
            options: RecognizerOptions::default(),
            event_tx,
            event_rx,
            active: false,
        }
    }

    /// Build the binding described by the configuration
    pub fn from_config(config: &SpeechConfig) -> Self {
        if config.enabled {
            Self::new(
                Box::new(ScriptedSpeech::from_config(config)),
                RecognizerOptions::from(config),
            )
        } else {
            Self::unsupported()
        }
    }

    pub fn is_supported(&self) -> bool {
        self.backend.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn options(&self) -> &RecognizerOptions {
        &self.options
    }

    /// Start a listening session
    pub fn start(&mut self) -> Result<()> {
        let backend = self.backend.as_mut().ok_or(EchoError::SpeechUnsupported)?;
        if self.active {
            return Ok(());
        }

        // Leftovers from a previous session are stale
        while self.event_rx.try_recv().is_ok() {}

        backend.start(&self.options, self.event_tx.clone())?;
        self.active = true;
        Ok(())
    }

    /// Stop the listening session, if any
    ///
    /// Events still queued from the session are discarded.
    pub fn stop(&mut self) {
        if self.active {
            self.active = false;

            if let Some(backend) = self.backend.as_mut() {
                if let Err(e) = backend.stop() {
                    error!("[SPEECH] Failed to stop recognizer: {}", e);
                }
            }
        }

        let dropped = self.event_rx.try_iter().count();
        if dropped > 0 {
            debug!("[SPEECH] Dropped {} events queued after stop", dropped);
        }
    }

    /// Drain recognizer events
    pub fn poll(&mut self) -> Vec<VoiceUpdate> {
        let mut updates = Vec::new();

        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                SpeechEvent::Result { segments, is_final } => {
                    let transcript = segments.concat();
                    if is_final {
                        debug!("[SPEECH] Final transcript: \"{}\"", transcript);
                        updates.push(VoiceUpdate::Transcript(transcript));
                    } else {
                        updates.push(VoiceUpdate::Interim(transcript));
                    }
                }
                SpeechEvent::Error(reason) => {
                    error!("[SPEECH] Recognition error: {}", reason);
                    self.stop();
                    updates.push(VoiceUpdate::Failed(reason));
                }
                SpeechEvent::Ended => {
                    debug!("[SPEECH] Recognizer ended");
                    self.stop();
                    updates.push(VoiceUpdate::Ended);
                }
            }
        }

        updates
    }
}

impl Drop for VoiceInput {
    fn drop(&mut self) {
        self.stop();
    }
}
