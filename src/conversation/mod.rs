//! Conversation state and the simulated assistant
//!
//! The [`ConversationController`] is the only owner of conversation state.
//! Components read it by reference and report user intent back as events.

pub mod controller;
pub mod responder;
pub mod state;

pub use controller::{ConversationController, Submission};
pub use responder::{derive_insight, derive_topic, respond};
pub use state::ConversationState;
