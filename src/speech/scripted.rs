//! Simulated recognizer
//!
//! Each listening session "hears" the next configured phrase, one word per
//! interval, on a worker thread. Interim results grow word by word; the
//! final result carries the whole phrase.

use super::{RecognizerOptions, SpeechBackend, SpeechEvent};
use crate::config::SpeechConfig;
use crate::{EchoError, Result};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info};

/// Commands sent to the speaking worker
#[derive(Debug)]
enum WorkerCommand {
    Stop,
}

struct Worker {
    command_tx: Sender<WorkerCommand>,
    handle: JoinHandle<()>,
}

/// Recognizer that replays a script of phrases
pub struct ScriptedSpeech {
    phrases: Vec<String>,
    word_interval: Duration,
    next_phrase: usize,
    worker: Option<Worker>,
}

impl ScriptedSpeech {
    pub fn new(phrases: Vec<String>, word_interval: Duration) -> Self {
        let phrases = phrases
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        Self {
            phrases,
            word_interval,
            next_phrase: 0,
            worker: None,
        }
    }

    pub fn from_config(config: &SpeechConfig) -> Self {
        Self::new(
            config.phrases.clone(),
            Duration::from_millis(config.word_interval_ms),
        )
    }

    fn take_phrase(&mut self) -> Option<String> {
        if self.phrases.is_empty() {
            return None;
        }
        let phrase = self.phrases[self.next_phrase % self.phrases.len()].clone();
        self.next_phrase += 1;
        Some(phrase)
    }
}

impl SpeechBackend for ScriptedSpeech {
    fn name(&self) -> &str {
        "scripted"
    }

    fn start(&mut self, options: &RecognizerOptions, events: Sender<SpeechEvent>) -> Result<()> {
        if self.worker.is_some() {
            return Err(EchoError::SpeechError(
                "recognition has already started".to_string(),
            ));
        }

        let phrase = self
            .take_phrase()
            .ok_or_else(|| EchoError::SpeechError("no phrases to recognize".to_string()))?;

        let (command_tx, command_rx) = bounded(4);
        let options = options.clone();
        let interval = self.word_interval;

        info!("[SPEECH] Scripted session started ({})", options.language);

        let handle = thread::spawn(move || {
            speak(&phrase, interval, &options, &command_rx, &events);
        });

        self.worker = Some(Worker { command_tx, handle });
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };

        let _ = worker.command_tx.send(WorkerCommand::Stop);
        worker
            .handle
            .join()
            .map_err(|_| EchoError::SpeechError("speech worker panicked".to_string()))?;

        info!("[SPEECH] Scripted session stopped");
        Ok(())
    }
}

impl Drop for ScriptedSpeech {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Worker body: emit the phrase word by word until done or stopped
fn speak(
    phrase: &str,
    interval: Duration,
    options: &RecognizerOptions,
    command_rx: &Receiver<WorkerCommand>,
    events: &Sender<SpeechEvent>,
) {
    let words: Vec<&str> = phrase.split_whitespace().collect();

    for heard in 1..=words.len() {
        match command_rx.recv_timeout(interval) {
            Ok(WorkerCommand::Stop) | Err(RecvTimeoutError::Disconnected) => {
                debug!("[SPEECH] Worker stopped after {} words", heard - 1);
                return;
            }
            Err(RecvTimeoutError::Timeout) => {}
        }

        if heard < words.len() && options.interim_results {
            let interim = SpeechEvent::Result {
                segments: vec![words[..heard].join(" ")],
                is_final: false,
            };
            if events.send(interim).is_err() {
                return;
            }
        }
    }

    // One segment per word, spaced so they concatenate back to the phrase
    let segments = words
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { w.to_string() } else { format!(" {}", w) })
        .collect();

    if events
        .send(SpeechEvent::Result {
            segments,
            is_final: true,
        })
        .is_err()
    {
        return;
    }

    if options.continuous {
        // Keep the session open until told to stop
        let _ = command_rx.recv();
    } else {
        let _ = events.send(SpeechEvent::Ended);
    }
}
