//! UI automation tests using egui_kittest and AccessKit
//!
//! These tests drive the full page through its accessibility tree. Time is
//! a ManualClock, so every timer fires exactly when a test advances it.

use echo_insight::config::{AppConfig, FlowVariant};
use echo_insight::conversation::responder::{CAPABILITY_REPLY, GREETING_REPLY};
use echo_insight::conversation::ConversationController;
use echo_insight::speech::{ManualSpeech, RecognizerOptions, SpeechRemote, VoiceInput};
use echo_insight::ui::EchoApp;
use echo_insight::utils::ManualClock;
use egui_kittest::kittest::Queryable;
use egui_kittest::Harness;
use std::sync::Arc;

fn basic_app(config: AppConfig, clock: &ManualClock) -> EchoApp {
    let controller = ConversationController::from_config(&config, Arc::new(clock.clone()));
    EchoApp::with_controller(controller, &config)
}

fn voice_app(clock: &ManualClock) -> (EchoApp, SpeechRemote) {
    let config = AppConfig::default().with_flow(FlowVariant::Voice);
    let (speech, remote) = ManualSpeech::new();
    let voice = VoiceInput::new(Box::new(speech), RecognizerOptions::from(&config.speech));
    let controller = ConversationController::new(&config, Arc::new(clock.clone()), voice);
    (EchoApp::with_controller(controller, &config), remote)
}

fn harness(app: EchoApp) -> Harness<'static, EchoApp> {
    Harness::builder()
        .with_size(egui::Vec2::new(1280.0, 900.0))
        .build_state(|ctx, app: &mut EchoApp| app.show(ctx), app)
}

fn send(harness: &mut Harness<'static, EchoApp>, text: &str) {
    harness.get_by_label("Message input").focus();
    harness.run();
    harness.get_by_label("Message input").type_text(text);
    harness.run();
    harness.get_by_label("Send message").click();
    harness.run();
}

#[test]
fn test_sample_conversation_is_rendered() {
    let clock = ManualClock::new();
    let mut harness = harness(basic_app(AppConfig::default(), &clock));
    harness.run();

    let _ = harness.get_by_label("Assistant response: Hello! I'm Echo Insight. How can I help you today?");
    let _ = harness.get_by_label("User message: I was wondering what can I upload?");
    let _ = harness.get_by_label("Poised");
    let _ = harness.get_by_label("Indicator: idle");
}

#[test]
fn test_empty_conversation_shows_placeholders() {
    let clock = ManualClock::new();
    let config = AppConfig::default().without_sample_data();
    let mut harness = harness(basic_app(config, &clock));
    harness.run();

    let _ = harness.get_by_label("No messages yet. Start a conversation!");
    let _ = harness.get_by_label("No conversation data available yet.");
    let _ = harness.get_by_label("No insights generated yet.");
    assert!(harness.query_by_label("Topics Discussed").is_none());
}

#[test]
fn test_insight_panel_lists_sample_analysis() {
    let clock = ManualClock::new();
    let mut harness = harness(basic_app(AppConfig::default(), &clock));
    harness.run();

    let _ = harness.get_by_label("Conversation Summary");
    let _ = harness.get_by_label("Key Insights");
    let _ = harness.get_by_label("Insight 1: User is seeking clarification about upload functionality");
    let _ = harness.get_by_label("Insight 3: User's questions focus on basic platform features");
    let _ = harness.get_by_label("Topics Discussed");
    let _ = harness.get_by_label("Topic: File Uploads");
}

#[test]
fn test_type_text_into_input() {
    let clock = ManualClock::new();
    let mut harness = harness(basic_app(AppConfig::default(), &clock));
    harness.run();

    harness.get_by_label("Message input").focus();
    harness.run();
    harness.get_by_label("Message input").type_text("Hello, world!");
    harness.run();

    assert_eq!(harness.state().ui_state().input_text, "Hello, world!");
}

#[test]
fn test_basic_flow_round_trip() {
    let clock = ManualClock::new();
    let mut harness = harness(basic_app(AppConfig::default(), &clock));
    harness.run();

    send(&mut harness, "Hello");

    {
        let state = harness.state().controller().state();
        assert_eq!(state.messages().len(), 6);
        assert!(state.is_listening);
    }
    assert!(harness.state().ui_state().input_text.is_empty());
    let _ = harness.get_by_label("User message: Hello");
    let _ = harness.get_by_label("Listening...");
    let _ = harness.get_by_label("Indicator: listening");

    clock.advance_ms(1000);
    harness.run();
    let _ = harness.get_by_label("Processing...");
    let _ = harness.get_by_label("Indicator: processing");

    clock.advance_ms(1500);
    harness.run();
    let _ = harness.get_by_label(&format!("Assistant response: {}", GREETING_REPLY));
    let _ = harness.get_by_label("Poised");
    assert_eq!(harness.state().controller().state().messages().len(), 7);
}

#[test]
fn test_input_available_again_after_reply() {
    let clock = ManualClock::new();
    let mut harness = harness(basic_app(AppConfig::default(), &clock));
    harness.run();

    send(&mut harness, "first");
    assert!(harness.state().controller().is_busy());

    clock.advance_ms(2500);
    harness.run();
    assert!(!harness.state().controller().is_busy());

    send(&mut harness, "second");
    assert_eq!(harness.state().controller().state().messages().len(), 8);
    let _ = harness.get_by_label("User message: second");
}

#[test]
fn test_insight_added_after_threshold() {
    let clock = ManualClock::new();
    let mut harness = harness(basic_app(AppConfig::default(), &clock));
    harness.run();

    send(&mut harness, "Hi there");
    clock.advance_ms(2500);
    harness.run();

    send(&mut harness, "What features do you have");
    clock.advance_ms(2500);
    harness.run();

    let _ = harness.get_by_label(&format!("Assistant response: {}", CAPABILITY_REPLY));
    let _ = harness.get_by_label("Insight 4: User is interested in what related topics");
    let _ = harness.get_by_label("Topic: features");
}

#[test]
fn test_debug_panel_toggle() {
    let clock = ManualClock::new();
    let mut harness = harness(basic_app(AppConfig::default(), &clock));
    harness.run();
    assert!(harness.query_by_label("Debug Panel").is_none());

    harness.get_by_label("Toggle debug panel").click();
    harness.run();

    assert!(harness.state().ui_state().show_debug_panel);
    let _ = harness.get_by_label("Debug Panel");
    let _ = harness.get_by_label("Recent Activity");
}

#[test]
fn test_basic_flow_has_no_voice_controls() {
    let clock = ManualClock::new();
    let mut harness = harness(basic_app(AppConfig::default(), &clock));
    harness.run();

    assert!(harness.query_by_label("Start talking with Maggie").is_none());
}

#[test]
fn test_voice_controls_toggle_listening() {
    let clock = ManualClock::new();
    let (app, remote) = voice_app(&clock);
    let mut harness = harness(app);
    harness.run();

    harness.get_by_label("Start talking with Maggie").click();
    harness.run();

    assert!(remote.is_active());
    assert!(harness.state().controller().state().is_listening);
    let _ = harness.get_by_label("Stop talking with Maggie");
    let _ = harness.get_by_label("Listening...");

    harness.get_by_label("Stop talking with Maggie").click();
    harness.run();

    assert!(!remote.is_active());
    assert!(!harness.state().controller().state().is_listening);
    let _ = harness.get_by_label("Start talking with Maggie");
}

#[test]
fn test_start_and_stop_buttons_always_present() {
    let clock = ManualClock::new();
    let (app, _remote) = voice_app(&clock);
    let mut harness = harness(app);
    harness.run();

    assert!(harness.query_by_label("Start talking with Maggie").is_some());
    assert!(harness.query_by_label("Stop talking with Maggie").is_some());

    harness.get_by_label("Start talking with Maggie").click();
    harness.run();
    assert!(harness.state().controller().state().is_listening);

    assert!(harness.query_by_label("Start talking with Maggie").is_some());
    assert!(harness.query_by_label("Stop talking with Maggie").is_some());

    // Start is disabled while listening
    harness.get_by_label("Start talking with Maggie").click();
    harness.run();
    assert!(harness.state().controller().state().is_listening);
}

#[test]
fn test_spoken_phrase_is_submitted() {
    let clock = ManualClock::new();
    let (app, remote) = voice_app(&clock);
    let mut harness = harness(app);
    harness.run();

    harness.get_by_label("Start talking with Maggie").click();
    harness.run();

    remote.hear_interim("I need");
    harness.run();
    let _ = harness.get_by_label("\u{201c}I need\u{201d}");

    remote.hear_final("I need help");
    harness.run();

    {
        let controller = harness.state().controller();
        let state = controller.state();
        assert!(!state.is_listening);
        assert!(state.is_processing);
        assert!(controller.live_transcript().is_none());
    }
    let _ = harness.get_by_label("User message: I need help");

    clock.advance_ms(1500);
    harness.run();
    assert!(!harness.state().controller().state().is_busy());
    assert_eq!(harness.state().controller().state().messages().len(), 7);
}

#[test]
fn test_voice_flow_without_recognizer() {
    let clock = ManualClock::new();
    let config = AppConfig::default().with_flow(FlowVariant::Voice);
    let controller =
        ConversationController::new(&config, Arc::new(clock.clone()), VoiceInput::unsupported());
    let mut harness = harness(EchoApp::with_controller(controller, &config));
    harness.run();

    let _ = harness.get_by_label("Voice input is not available on this system.");

    // Typed input still works
    send(&mut harness, "help");
    assert!(harness.state().controller().state().is_processing);
    assert!(!harness.state().controller().state().is_listening);
}
