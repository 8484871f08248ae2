//! Keyword-driven reply selection and insight extraction

/// A reply chosen when any of its keywords appears in the input
struct KeywordRule {
    keywords: &'static [&'static str],
    reply: &'static str,
}

pub const GREETING_REPLY: &str = "Hello! How can I assist you today?";
pub const HELP_REPLY: &str =
    "I'm here to help! What would you like to know about our platform?";
pub const CAPABILITY_REPLY: &str = "Echo Insight can analyze conversations, provide summaries, \
    extract key insights, and help you make better decisions based on your discussions.";
pub const ANALYZING_REPLY: &str = "Thank you for your message. \
    I'm analyzing your input to provide the best possible assistance.";

/// Checked in order; the first rule with a matching keyword wins
const RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["hello", "hi"],
        reply: GREETING_REPLY,
    },
    KeywordRule {
        keywords: &["help"],
        reply: HELP_REPLY,
    },
    KeywordRule {
        keywords: &["feature", "do"],
        reply: CAPABILITY_REPLY,
    },
];

/// Pick the assistant reply for a user message
///
/// Keywords match as case-insensitive substrings, so "this" counts as "hi".
pub fn respond(input: &str) -> &'static str {
    let lowered = input.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k)))
        .map(|rule| rule.reply)
        .unwrap_or(ANALYZING_REPLY)
}

/// "User is interested in {first word} related topics"
pub fn derive_insight(input: &str) -> String {
    let token = input
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();
    format!("User is interested in {} related topics", token)
}

/// First word longer than four characters, kept verbatim
pub fn derive_topic(input: &str) -> Option<&str> {
    input.split_whitespace().find(|word| word.chars().count() > 4)
}
