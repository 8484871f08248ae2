pub mod types;

pub use types::{display_timestamp, Message, Sender};
