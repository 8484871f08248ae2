//! UI components for the Echo Insight page

pub mod animated_circle;
pub mod conversation_list;
pub mod debug_panel;
pub mod insight_panel;
pub mod message_bubble;
pub mod message_input;
pub mod voice_controls;

pub use animated_circle::{AnimatedCircle, IndicatorAnimation, IndicatorSize};
pub use conversation_list::ConversationList;
pub use debug_panel::DebugPanel;
pub use insight_panel::InsightPanel;
pub use message_bubble::MessageBubble;
pub use message_input::MessageInput;
pub use voice_controls::{VoiceAction, VoiceControls};
