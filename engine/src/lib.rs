pub mod config;
pub mod error;
pub mod games;
pub mod logger;
pub mod scheduler;

pub use config::EngineConfig;
pub use error::EngineError;
pub use games::SessionRng;
pub use games::memory_match::{
    DifficultyPreset, EventHooks, GameEvent, GamePhase, GameSnapshot, MemoryMatchSession,
};
pub use scheduler::{ManualScheduler, Scheduler, TaskHandle, TokioScheduler};
