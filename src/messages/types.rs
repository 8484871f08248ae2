use chrono::{DateTime, Local, TimeZone};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn is_user(&self) -> bool {
        matches!(self, Sender::User)
    }
}

/// A single chat message. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub sender: Sender,
    pub content: String,
    /// Display text, e.g. "Today, 10:05 AM"
    pub timestamp: Option<String>,
}

impl Message {
    pub fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            content: content.into(),
            timestamp: None,
        }
    }

    /// Create a message stamped with the current local time
    pub fn now(sender: Sender, content: impl Into<String>) -> Self {
        Self::new(sender, content).with_timestamp(display_timestamp(&Local::now()))
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// Format a time the way the conversation shows it
pub fn display_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("Today, {}", time.format("%I:%M %p"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_display_timestamp_format() {
        let time = Utc.with_ymd_and_hms(2024, 3, 1, 22, 7, 0).unwrap();
        assert_eq!(display_timestamp(&time), "Today, 10:07 PM");

        let morning = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 0).unwrap();
        assert_eq!(display_timestamp(&morning), "Today, 09:05 AM");
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::new(Sender::User, "same");
        let b = Message::new(Sender::User, "same");
        assert_ne!(a.id, b.id);
        assert!(a.timestamp.is_none());
    }

    #[test]
    fn test_now_sets_timestamp() {
        let message = Message::now(Sender::Assistant, "hi");
        let stamp = message.timestamp.expect("timestamp");
        assert!(stamp.starts_with("Today, "));
        assert!(!message.sender.is_user());
    }
}
