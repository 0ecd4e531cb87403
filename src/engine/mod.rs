pub mod countdown;
pub mod difficulty;
pub mod scoring;

pub use countdown::{CountdownTimer, RunId, TimerEvent, TimerEventKind, TimerState};
