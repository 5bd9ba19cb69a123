use serde::Serialize;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GamePhase {
    Idle,
    Running,
    Locked,
    Won,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PendingResolution {
    pub first: usize,
    pub second: usize,
    pub is_match: bool,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    CardFlipped { index: usize },
    PairMatched { first: usize, second: usize },
    GameWon,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FlipOutcome {
    Rejected,
    Flipped,
    PairCompleted(PendingResolution),
}

#[derive(Clone, Debug, Serialize)]
pub struct GameSnapshot {
    pub difficulty: String,
    pub columns: usize,
    pub rows: usize,
    pub deck: Vec<char>,
    pub flipped: Vec<usize>,
    pub matched: Vec<usize>,
    pub moves: u32,
    pub elapsed_seconds: u64,
    pub running: bool,
    pub locked: bool,
    pub won: bool,
}

impl GameSnapshot {
    pub fn format_elapsed(&self) -> String {
        format!(
            "{}:{:02}",
            self.elapsed_seconds / 60,
            self.elapsed_seconds % 60
        )
    }
}
