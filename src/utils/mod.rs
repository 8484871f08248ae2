pub mod activity;
pub mod clock;
pub mod scheduler;

pub use activity::ActivityLog;
pub use clock::{Clock, ManualClock, SystemClock};
pub use scheduler::{Scheduler, TimerId};
