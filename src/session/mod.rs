pub mod event;
pub mod game;
pub mod result;

pub use event::{GameEvent, GameObserver, dispatch};
pub use game::{GameSession, GameStatus};
pub use result::GameSummary;
