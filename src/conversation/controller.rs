//! Page controller: the simulated assistant's state machine
//!
//! Basic flow:  Idle -> Listening (listen delay) -> Processing (process delay) -> Idle
//! Voice flow:  Idle -> Processing (process delay) -> Idle, with listening
//!              toggled independently by the speech recognizer
//!
//! All deferred work sits in a [`Scheduler`] read against an injected
//! [`Clock`]; nothing happens until [`ConversationController::tick`] runs.

use super::responder::{derive_insight, derive_topic, respond};
use super::state::ConversationState;
use crate::config::{AppConfig, FlowVariant};
use crate::messages::{Message, Sender};
use crate::speech::{VoiceInput, VoiceUpdate};
use crate::utils::{ActivityLog, Clock, Scheduler};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Outcome of a submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// User message appended, reply scheduled
    Accepted,
    /// Empty or whitespace-only text
    Rejected,
    /// The assistant is busy with an earlier submission
    Dropped,
}

/// A user turn waiting for its reply
#[derive(Debug, Clone)]
struct PendingTurn {
    text: String,
    /// Message count before the user message was appended
    prior_count: usize,
}

#[derive(Debug)]
enum ResponseStep {
    /// Basic flow: listening phase is over
    BeginProcessing(PendingTurn),
    /// Processing is over; reply and update insights
    Reply(PendingTurn),
}

/// Owns the conversation and drives the response simulation
pub struct ConversationController {
    state: ConversationState,
    flow: FlowVariant,
    insight_threshold: usize,
    listen_delay: Duration,
    process_delay: Duration,
    clock: Arc<dyn Clock>,
    timers: Scheduler<ResponseStep>,
    voice: VoiceInput,
    live_transcript: Option<String>,
    last_speech_error: Option<String>,
    activity: ActivityLog,
}

impl ConversationController {
    pub fn new(config: &AppConfig, clock: Arc<dyn Clock>, voice: VoiceInput) -> Self {
        let state = if config.seed_sample_data {
            ConversationState::sample()
        } else {
            ConversationState::new()
        };

        info!(
            "[CONVO] Controller ready: {} flow, {} seeded messages",
            config.flow,
            state.messages().len()
        );

        Self {
            state,
            flow: config.flow,
            insight_threshold: config.insight_threshold,
            listen_delay: config.timing.listen_delay(),
            process_delay: config.timing.process_delay(),
            clock,
            timers: Scheduler::new(),
            voice,
            live_transcript: None,
            last_speech_error: None,
            activity: ActivityLog::new(),
        }
    }

    /// Build a controller with the voice binding the configuration asks for
    pub fn from_config(config: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        let voice = match config.flow {
            FlowVariant::Voice => VoiceInput::from_config(&config.speech),
            FlowVariant::Basic => VoiceInput::unsupported(),
        };
        Self::new(config, clock, voice)
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn flow(&self) -> FlowVariant {
        self.flow
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Whether typed input should be disabled
    pub fn is_busy(&self) -> bool {
        match self.flow {
            FlowVariant::Basic => self.state.is_busy(),
            FlowVariant::Voice => self.state.is_processing,
        }
    }

    pub fn voice_supported(&self) -> bool {
        self.voice.is_supported()
    }

    /// Partial transcript of what the recognizer is hearing
    pub fn live_transcript(&self) -> Option<&str> {
        self.live_transcript.as_deref()
    }

    pub fn last_speech_error(&self) -> Option<&str> {
        self.last_speech_error.as_deref()
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Time until the next response step, if one is pending
    pub fn time_until_next_step(&self) -> Option<Duration> {
        self.timers
            .next_due()
            .map(|due| due.saturating_sub(self.clock.now()))
    }

    /// Submit user text (typed or spoken)
    pub fn submit(&mut self, text: &str) -> Submission {
        let text = text.trim();
        if text.is_empty() {
            return Submission::Rejected;
        }

        if self.is_busy() {
            debug!("[CONVO] Busy, dropping submission \"{}\"", text);
            self.activity.add(format!("Dropped while busy: {}", text));
            return Submission::Dropped;
        }

        let now = self.clock.now();
        let turn = PendingTurn {
            text: text.to_string(),
            prior_count: self.state.messages().len(),
        };

        self.state.push_message(Message::now(Sender::User, text));
        self.activity.add(format!("User: {}", text));

        match self.flow {
            FlowVariant::Basic => {
                self.state.is_listening = true;
                self.timers
                    .schedule_after(now, self.listen_delay, ResponseStep::BeginProcessing(turn));
                debug!("[CONVO] Listening phase started");
            }
            FlowVariant::Voice => {
                if self.state.is_listening {
                    self.stop_listening();
                }
                self.state.is_processing = true;
                self.timers
                    .schedule_after(now, self.process_delay, ResponseStep::Reply(turn));
                debug!("[CONVO] Processing started");
            }
        }

        Submission::Accepted
    }

    /// Begin a voice listening session
    pub fn start_listening(&mut self) {
        if self.state.is_listening {
            return;
        }
        if self.state.is_processing {
            debug!("[CONVO] Processing, ignoring start listening");
            return;
        }

        match self.voice.start() {
            Ok(()) => {
                self.state.is_listening = true;
                self.live_transcript = None;
                self.activity.add("Listening started");
                info!("[CONVO] Listening started");
            }
            Err(e) if e.is_recoverable() => {
                error!("[CONVO] Failed to start listening: {}", e);
                self.last_speech_error = Some(e.to_string());
                self.activity.add(format!("Listening failed: {}", e));
            }
            Err(e) => {
                warn!("[CONVO] Voice input unavailable: {}", e);
            }
        }
    }

    /// End the voice listening session
    pub fn stop_listening(&mut self) {
        self.voice.stop();
        self.live_transcript = None;
        if self.state.is_listening {
            self.state.is_listening = false;
            self.activity.add("Listening stopped");
            info!("[CONVO] Listening stopped");
        }
    }

    /// Advance the state machine: fire due timers and handle speech events
    pub fn tick(&mut self) {
        self.poll_voice();

        let now = self.clock.now();
        while let Some((due, step)) = self.timers.pop_due(now) {
            self.run_step(due, step);
        }
    }

    /// Cancel everything pending and release the recognizer
    pub fn shutdown(&mut self) {
        let pending = self.timers.len();
        self.timers.clear();
        self.voice.stop();
        self.state.is_listening = false;
        self.state.is_processing = false;
        info!("[CONVO] Shut down with {} pending timers", pending);
    }

    fn poll_voice(&mut self) {
        for update in self.voice.poll() {
            match update {
                VoiceUpdate::Interim(text) => {
                    self.live_transcript = Some(text);
                }
                VoiceUpdate::Transcript(text) => {
                    self.live_transcript = None;
                    let outcome = self.submit(&text);
                    debug!("[CONVO] Spoken submission {:?}", outcome);
                }
                VoiceUpdate::Failed(reason) => {
                    self.last_speech_error = Some(reason.clone());
                    self.activity.add(format!("Speech error: {}", reason));
                    self.stop_listening();
                }
                VoiceUpdate::Ended => {
                    self.stop_listening();
                }
            }
        }
    }

    fn run_step(&mut self, due: Duration, step: ResponseStep) {
        match step {
            ResponseStep::BeginProcessing(turn) => {
                self.state.is_listening = false;
                self.state.is_processing = true;
                // Chained from the due time so a late tick still resolves the whole chain
                self.timers
                    .schedule_at(due + self.process_delay, ResponseStep::Reply(turn));
                debug!("[CONVO] Processing started");
            }
            ResponseStep::Reply(turn) => {
                self.state.is_processing = false;
                self.reply(turn);
            }
        }
    }

    fn reply(&mut self, turn: PendingTurn) {
        let reply = respond(&turn.text);
        self.state.push_message(Message::now(Sender::Assistant, reply));
        self.activity.add(format!("Assistant: {}", reply));
        info!("[CONVO] Replied to \"{}\"", turn.text);

        if turn.prior_count <= self.insight_threshold {
            return;
        }

        let insight = derive_insight(&turn.text);
        self.activity.add(format!("Insight: {}", insight));
        self.state.push_insight(insight);

        if let Some(topic) = derive_topic(&turn.text) {
            if self.state.add_topic(topic) {
                self.activity.add(format!("Topic: {}", topic));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::responder::{CAPABILITY_REPLY, GREETING_REPLY, HELP_REPLY};
    use crate::utils::ManualClock;

    fn basic(clock: &ManualClock) -> ConversationController {
        ConversationController::from_config(&AppConfig::default(), Arc::new(clock.clone()))
    }

    #[test]
    fn test_basic_flow_phases() {
        let clock = ManualClock::new();
        let mut controller = basic(&clock);

        assert_eq!(controller.submit("Hi there"), Submission::Accepted);
        assert!(controller.state().is_listening);
        assert!(!controller.state().is_processing);
        assert_eq!(controller.state().messages().len(), 6);

        clock.advance_ms(999);
        controller.tick();
        assert!(controller.state().is_listening);

        clock.advance_ms(1);
        controller.tick();
        assert!(!controller.state().is_listening);
        assert!(controller.state().is_processing);

        clock.advance_ms(1499);
        controller.tick();
        assert!(controller.state().is_processing);
        assert_eq!(controller.state().messages().len(), 6);

        clock.advance_ms(1);
        controller.tick();
        assert!(!controller.state().is_busy());

        let messages = controller.state().messages();
        assert_eq!(messages.len(), 7);
        assert_eq!(messages[6].sender, Sender::Assistant);
        assert_eq!(messages[6].content, GREETING_REPLY);
    }

    #[test]
    fn test_single_late_tick_resolves_chain() {
        let clock = ManualClock::new();
        let mut controller = basic(&clock);

        controller.submit("help");
        clock.advance_ms(10_000);
        controller.tick();

        assert!(!controller.state().is_busy());
        assert_eq!(
            controller.state().messages().last().map(|m| m.content.as_str()),
            Some(HELP_REPLY)
        );
        assert_eq!(controller.pending_timers(), 0);
    }

    #[test]
    fn test_blank_submission_is_rejected() {
        let clock = ManualClock::new();
        let mut controller = basic(&clock);

        assert_eq!(controller.submit(""), Submission::Rejected);
        assert_eq!(controller.submit("   \t\n"), Submission::Rejected);
        assert_eq!(controller.state().messages().len(), 5);
        assert!(!controller.state().is_busy());
        assert_eq!(controller.pending_timers(), 0);
    }

    #[test]
    fn test_basic_flow_drops_reentrant_submission() {
        let clock = ManualClock::new();
        let mut controller = basic(&clock);

        controller.submit("first");
        assert_eq!(controller.submit("second"), Submission::Dropped);

        clock.advance_ms(1200);
        controller.tick();
        assert_eq!(controller.submit("third"), Submission::Dropped);

        clock.advance_ms(2000);
        controller.tick();
        assert_eq!(controller.state().messages().len(), 7);
    }

    #[test]
    fn test_insights_only_after_threshold() {
        let clock = ManualClock::new();
        let mut controller = basic(&clock);

        // 5 prior messages: not above the threshold
        controller.submit("Hi there");
        clock.advance_ms(2500);
        controller.tick();
        assert_eq!(controller.state().insights().len(), 3);
        assert_eq!(controller.state().topics().len(), 3);

        // 7 prior messages
        controller.submit("What features do you have");
        clock.advance_ms(2500);
        controller.tick();

        let state = controller.state();
        assert_eq!(state.messages().len(), 9);
        assert_eq!(state.messages()[8].content, CAPABILITY_REPLY);
        assert_eq!(
            state.insights().last().map(String::as_str),
            Some("User is interested in what related topics")
        );
        assert_eq!(state.topics().last().map(String::as_str), Some("features"));
    }

    #[test]
    fn test_topics_are_not_duplicated() {
        let clock = ManualClock::new();
        let mut controller = basic(&clock);
        // Move past the threshold
        controller.submit("Hi there");
        clock.advance_ms(2500);
        controller.tick();

        for _ in 0..3 {
            controller.submit("Tell me about features");
            clock.advance_ms(2500);
            controller.tick();
        }

        let topics = controller.state().topics();
        assert_eq!(topics.iter().filter(|t| t.as_str() == "about").count(), 1);
        // Insights are not deduplicated
        let repeated = controller
            .state()
            .insights()
            .iter()
            .filter(|i| i.as_str() == "User is interested in tell related topics")
            .count();
        assert_eq!(repeated, 3);
    }

    #[test]
    fn test_shutdown_cancels_pending_reply() {
        let clock = ManualClock::new();
        let mut controller = basic(&clock);

        controller.submit("hello");
        controller.shutdown();
        clock.advance_ms(5000);
        controller.tick();

        assert_eq!(controller.state().messages().len(), 6);
        assert!(!controller.state().is_busy());
    }

    #[test]
    fn test_time_until_next_step() {
        let clock = ManualClock::new();
        let mut controller = basic(&clock);
        assert_eq!(controller.time_until_next_step(), None);

        controller.submit("hello");
        clock.advance_ms(400);
        assert_eq!(
            controller.time_until_next_step(),
            Some(Duration::from_millis(600))
        );
    }

    #[test]
    fn test_basic_flow_has_no_voice() {
        let clock = ManualClock::new();
        let mut controller = basic(&clock);
        assert!(!controller.voice_supported());

        controller.start_listening();
        assert!(!controller.state().is_listening);
    }
}
