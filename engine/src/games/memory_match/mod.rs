mod deck;
mod game_state;
mod session;
mod settings;
mod types;

pub use deck::Deck;
pub use game_state::MemoryMatchGameState;
pub use session::{EventHooks, MemoryMatchSession};
pub use settings::{DifficultyPreset, SessionSettings, TIMER_TICK_INTERVAL_MS};
pub use types::{FlipOutcome, GameEvent, GamePhase, GameSnapshot, PendingResolution};
