//! Conversation state owned by the controller

use crate::messages::{Message, Sender};

const SAMPLE_SUMMARY: &str = "The conversation revolves around clarifying upload functionality \
    within the platform. The user appears to be new and is seeking guidance on basic features.";

/// Everything the page renders about the conversation
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    /// Append-only; insertion order is display order
    messages: Vec<Message>,
    pub is_listening: bool,
    pub is_processing: bool,
    pub summary: String,
    insights: Vec<String>,
    topics: Vec<String>,
}

impl ConversationState {
    /// An empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// The canned conversation the demo starts with
    pub fn sample() -> Self {
        let messages = vec![
            Message::new(
                Sender::Assistant,
                "Hello! I'm Echo Insight. How can I help you today?",
            )
            .with_timestamp("Today, 10:05 AM"),
            Message::new(Sender::User, "I was wondering what can I upload?")
                .with_timestamp("Today, 10:06 AM"),
            Message::new(
                Sender::Assistant,
                "Could you clarify which app or platform you are asking about for uploads?",
            )
            .with_timestamp("Today, 10:06 AM"),
            Message::new(Sender::User, "Like, here, it says upload. Upload what?")
                .with_timestamp("Today, 10:07 AM"),
            Message::new(
                Sender::Assistant,
                "You can upload text documents, notes, or any relevant files that you want to \
                 work on within the Echo Insight app. You can chat with our support team using \
                 the chat bubble in Settings for additional help.",
            )
            .with_timestamp("Today, 10:07 AM"),
        ];

        Self {
            messages,
            is_listening: false,
            is_processing: false,
            summary: SAMPLE_SUMMARY.to_string(),
            insights: vec![
                "User is seeking clarification about upload functionality".to_string(),
                "User appears to be new to the platform interface".to_string(),
                "User's questions focus on basic platform features".to_string(),
            ],
            topics: vec![
                "File Uploads".to_string(),
                "Platform Features".to_string(),
                "User Guidance".to_string(),
            ],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn insights(&self) -> &[String] {
        &self.insights
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn push_insight(&mut self, insight: impl Into<String>) {
        self.insights.push(insight.into());
    }

    /// Add a topic unless an identical one exists. Returns whether it was added.
    pub fn add_topic(&mut self, topic: &str) -> bool {
        if self.topics.iter().any(|t| t == topic) {
            return false;
        }
        self.topics.push(topic.to_string());
        true
    }

    /// Either flag set
    pub fn is_busy(&self) -> bool {
        self.is_listening || self.is_processing
    }

    /// Short status line shown under the indicator
    pub fn status_text(&self) -> &'static str {
        if self.is_listening {
            "Listening..."
        } else if self.is_processing {
            "Processing..."
        } else {
            "Poised"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_state() {
        let state = ConversationState::sample();
        assert_eq!(state.messages().len(), 5);
        assert_eq!(state.insights().len(), 3);
        assert_eq!(state.topics().len(), 3);
        assert!(matches!(state.messages()[0].sender, Sender::Assistant));
        assert!(matches!(state.messages()[1].sender, Sender::User));
        assert!(!state.summary.is_empty());
        assert!(!state.is_busy());
    }

    #[test]
    fn test_add_topic_is_case_sensitive_dedup() {
        let mut state = ConversationState::new();
        assert!(state.add_topic("features"));
        assert!(!state.add_topic("features"));
        assert!(state.add_topic("Features"));
        assert_eq!(state.topics(), ["features", "Features"]);
    }

    #[test]
    fn test_status_text() {
        let mut state = ConversationState::new();
        assert_eq!(state.status_text(), "Poised");
        state.is_listening = true;
        assert_eq!(state.status_text(), "Listening...");
        state.is_listening = false;
        state.is_processing = true;
        assert_eq!(state.status_text(), "Processing...");
    }
}
