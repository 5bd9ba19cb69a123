mod session_rng;

pub mod memory_match;

pub use session_rng::SessionRng;
