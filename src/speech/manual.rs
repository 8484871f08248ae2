//! Host-driven recognizer
//!
//! Useful wherever speech has to be injected deterministically: the remote
//! half emits events as if the recognizer had heard them, but only while a
//! session is active.

use super::{RecognizerOptions, SpeechBackend, SpeechEvent};
use crate::{EchoError, Result};
use crossbeam_channel::Sender;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Session {
    events: Option<Sender<SpeechEvent>>,
    options: Option<RecognizerOptions>,
    starts: usize,
    fail_next_start: Option<String>,
}

/// Recognizer whose output is supplied by a [`SpeechRemote`]
#[derive(Debug, Clone)]
pub struct ManualSpeech {
    session: Arc<Mutex<Session>>,
}

/// Host side of a [`ManualSpeech`] backend
#[derive(Debug, Clone)]
pub struct SpeechRemote {
    session: Arc<Mutex<Session>>,
}

impl ManualSpeech {
    pub fn new() -> (Self, SpeechRemote) {
        let session = Arc::new(Mutex::new(Session::default()));
        (
            Self {
                session: Arc::clone(&session),
            },
            SpeechRemote { session },
        )
    }
}

impl SpeechBackend for ManualSpeech {
    fn name(&self) -> &str {
        "manual"
    }

    fn start(&mut self, options: &RecognizerOptions, events: Sender<SpeechEvent>) -> Result<()> {
        let mut session = self.session.lock();
        if let Some(reason) = session.fail_next_start.take() {
            return Err(EchoError::SpeechError(reason));
        }
        if session.events.is_some() {
            return Err(EchoError::SpeechError(
                "recognition has already started".to_string(),
            ));
        }
        session.events = Some(events);
        session.options = Some(options.clone());
        session.starts += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.session.lock().events = None;
        Ok(())
    }
}

impl SpeechRemote {
    /// Whether a listening session is active
    pub fn is_active(&self) -> bool {
        self.session.lock().events.is_some()
    }

    /// How many sessions have been started
    pub fn start_count(&self) -> usize {
        self.session.lock().starts
    }

    /// Options of the most recent session
    pub fn last_options(&self) -> Option<RecognizerOptions> {
        self.session.lock().options.clone()
    }

    /// Make the next `start` fail with `reason`
    pub fn fail_next_start(&self, reason: impl Into<String>) {
        self.session.lock().fail_next_start = Some(reason.into());
    }

    /// Deliver an event. Returns false when no session is listening.
    pub fn emit(&self, event: SpeechEvent) -> bool {
        let mut session = self.session.lock();
        let delivered = match &session.events {
            Some(tx) => tx.send(event.clone()).is_ok(),
            None => false,
        };
        // Errors and ends close the session, like a real recognizer
        if delivered && matches!(event, SpeechEvent::Error(_) | SpeechEvent::Ended) {
            session.events = None;
        }
        delivered
    }

    /// Emit a partial transcript
    pub fn hear_interim(&self, text: &str) -> bool {
        self.emit(SpeechEvent::Result {
            segments: vec![text.to_string()],
            is_final: false,
        })
    }

    /// Emit a final transcript
    pub fn hear_final(&self, text: &str) -> bool {
        self.emit(SpeechEvent::Result {
            segments: vec![text.to_string()],
            is_final: true,
        })
    }

    /// Emit a recognizer failure
    pub fn fail(&self, reason: &str) -> bool {
        self.emit(SpeechEvent::Error(reason.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_events_only_flow_while_started() {
        let (mut backend, remote) = ManualSpeech::new();
        let (tx, rx) = unbounded();

        assert!(!remote.hear_final("ignored"));

        backend.start(&RecognizerOptions::default(), tx).unwrap();
        assert!(remote.is_active());
        assert!(remote.hear_final("hello"));
        assert_eq!(rx.try_recv().unwrap().transcript().as_deref(), Some("hello"));

        backend.stop().unwrap();
        assert!(!remote.hear_final("late"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_double_start_is_an_error() {
        let (mut backend, _remote) = ManualSpeech::new();
        let (tx, _rx) = unbounded();
        backend.start(&RecognizerOptions::default(), tx.clone()).unwrap();
        assert!(matches!(
            backend.start(&RecognizerOptions::default(), tx),
            Err(EchoError::SpeechError(_))
        ));
    }

    #[test]
    fn test_error_closes_session() {
        let (mut backend, remote) = ManualSpeech::new();
        let (tx, rx) = unbounded();
        backend.start(&RecognizerOptions::default(), tx).unwrap();

        assert!(remote.fail("no-speech"));
        assert!(!remote.is_active());
        assert_eq!(rx.try_recv().unwrap(), SpeechEvent::Error("no-speech".to_string()));
    }
}
