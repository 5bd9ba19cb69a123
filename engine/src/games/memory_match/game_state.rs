use super::deck::Deck;
use super::settings::SessionSettings;
use super::types::{FlipOutcome, GameEvent, GamePhase, GameSnapshot, PendingResolution};
use crate::games::session_rng::SessionRng;

pub struct MemoryMatchGameState {
    deck: Deck,
    flipped: Vec<usize>,
    matched: Vec<usize>,
    moves: u32,
    elapsed_seconds: u64,
    phase: GamePhase,
    pending_resolution: Option<PendingResolution>,
    pending_events: Vec<GameEvent>,
}

impl MemoryMatchGameState {
    pub fn new(settings: &SessionSettings, rng: &mut SessionRng) -> Self {
        Self::with_deck(Deck::shuffled(settings, rng))
    }

    fn with_deck(deck: Deck) -> Self {
        Self {
            deck,
            flipped: Vec::new(),
            matched: Vec::new(),
            moves: 0,
            elapsed_seconds: 0,
            phase: GamePhase::Idle,
            pending_resolution: None,
            pending_events: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn from_cards(cards: Vec<char>) -> Self {
        Self::with_deck(Deck::from_cards(cards))
    }

    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        if matches!(self.phase, GamePhase::Locked | GamePhase::Won) {
            return FlipOutcome::Rejected;
        }
        if index >= self.deck.len() {
            return FlipOutcome::Rejected;
        }
        if self.flipped.contains(&index) || self.matched.contains(&index) {
            return FlipOutcome::Rejected;
        }

        if self.phase == GamePhase::Idle {
            self.phase = GamePhase::Running;
        }
        self.flipped.push(index);
        self.pending_events.push(GameEvent::CardFlipped { index });

        if self.flipped.len() < 2 {
            return FlipOutcome::Flipped;
        }

        // a pair-attempt is counted when the second card goes up,
        // before the outcome is known
        self.moves += 1;
        self.phase = GamePhase::Locked;
        let resolution = PendingResolution {
            first: self.flipped[0],
            second: self.flipped[1],
            is_match: self.deck.is_match(self.flipped[0], self.flipped[1]),
        };
        self.pending_resolution = Some(resolution);
        FlipOutcome::PairCompleted(resolution)
    }

    pub fn resolve_pending(&mut self) {
        let Some(resolution) = self.pending_resolution.take() else {
            return;
        };

        self.flipped.clear();
        self.phase = GamePhase::Running;

        if resolution.is_match {
            self.matched.push(resolution.first);
            self.matched.push(resolution.second);
            self.pending_events.push(GameEvent::PairMatched {
                first: resolution.first,
                second: resolution.second,
            });

            if self.matched.len() == self.deck.len() {
                self.phase = GamePhase::Won;
                self.pending_events.push(GameEvent::GameWon);
            }
        }
    }

    pub fn tick_second(&mut self) {
        if self.running() {
            self.elapsed_seconds += 1;
        }
    }

    pub fn running(&self) -> bool {
        matches!(self.phase, GamePhase::Running | GamePhase::Locked)
    }

    pub fn locked(&self) -> bool {
        self.phase == GamePhase::Locked
    }

    pub fn won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn snapshot(&self, settings: &SessionSettings) -> GameSnapshot {
        GameSnapshot {
            difficulty: settings.preset().name.clone(),
            columns: settings.preset().columns,
            rows: settings.preset().rows,
            deck: self.deck.cards().to_vec(),
            flipped: self.flipped.clone(),
            matched: self.matched.clone(),
            moves: self.moves,
            elapsed_seconds: self.elapsed_seconds,
            running: self.running(),
            locked: self.locked(),
            won: self.won(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2x2 board, pairs at (0,2) and (1,3)
    fn tiny_state() -> MemoryMatchGameState {
        MemoryMatchGameState::from_cards(vec!['a', 'b', 'a', 'b'])
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = tiny_state();

        assert_eq!(state.phase(), GamePhase::Idle);
        assert!(!state.running());
        assert_eq!(state.moves(), 0);
        assert_eq!(state.elapsed_seconds(), 0);
    }

    #[test]
    fn test_first_flip_starts_running() {
        let mut state = tiny_state();

        let outcome = state.flip(0);

        assert_eq!(outcome, FlipOutcome::Flipped);
        assert_eq!(state.phase(), GamePhase::Running);
        assert_eq!(state.moves(), 0);
    }

    #[test]
    fn test_second_flip_locks_and_counts_move() {
        let mut state = tiny_state();

        state.flip(0);
        let outcome = state.flip(1);

        assert_eq!(
            outcome,
            FlipOutcome::PairCompleted(PendingResolution {
                first: 0,
                second: 1,
                is_match: false,
            })
        );
        assert_eq!(state.phase(), GamePhase::Locked);
        assert_eq!(state.moves(), 1);
    }

    #[test]
    fn test_flip_out_of_range_is_rejected() {
        let mut state = tiny_state();

        assert_eq!(state.flip(4), FlipOutcome::Rejected);
        assert_eq!(state.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_flip_same_card_twice_is_rejected() {
        let mut state = tiny_state();

        state.flip(0);

        assert_eq!(state.flip(0), FlipOutcome::Rejected);
        assert_eq!(state.moves(), 0);
    }

    #[test]
    fn test_flip_while_locked_is_rejected() {
        let mut state = tiny_state();
        state.flip(0);
        state.flip(1);

        let outcome = state.flip(3);

        assert_eq!(outcome, FlipOutcome::Rejected);
        assert_eq!(state.moves(), 1);
        assert_eq!(state.flipped.len(), 2);
    }

    #[test]
    fn test_mismatch_resolution_flips_back() {
        let mut state = tiny_state();
        state.flip(0);
        state.flip(1);

        state.resolve_pending();

        assert_eq!(state.phase(), GamePhase::Running);
        assert!(!state.locked());
        assert!(state.flipped.is_empty());
        assert_eq!(state.moves(), 1);
    }

    #[test]
    fn test_match_resolution_keeps_cards() {
        let mut state = tiny_state();
        state.flip(0);
        state.flip(2);

        state.resolve_pending();

        let settings =
            SessionSettings::resolve(&crate::config::EngineConfig::default(), "easy").unwrap();
        let snapshot = state.snapshot(&settings);
        assert_eq!(snapshot.matched, vec![0, 2]);
        assert!(snapshot.flipped.is_empty());
        assert!(!snapshot.won);
    }

    #[test]
    fn test_matched_card_cannot_be_flipped_again() {
        let mut state = tiny_state();
        state.flip(0);
        state.flip(2);
        state.resolve_pending();

        assert_eq!(state.flip(0), FlipOutcome::Rejected);
    }

    #[test]
    fn test_last_pair_wins_the_game() {
        let mut state = tiny_state();
        state.flip(0);
        state.flip(2);
        state.resolve_pending();
        state.flip(1);
        state.flip(3);

        state.resolve_pending();

        assert!(state.won());
        assert!(!state.running());
        assert_eq!(state.moves(), 2);
    }

    #[test]
    fn test_no_flips_after_win() {
        let mut state = tiny_state();
        state.flip(0);
        state.flip(2);
        state.resolve_pending();
        state.flip(1);
        state.flip(3);
        state.resolve_pending();

        assert_eq!(state.flip(0), FlipOutcome::Rejected);
        assert_eq!(state.moves(), 2);
    }

    #[test]
    fn test_resolve_without_pending_is_noop() {
        let mut state = tiny_state();
        state.flip(0);

        state.resolve_pending();

        assert_eq!(state.phase(), GamePhase::Running);
        assert_eq!(state.flipped, vec![0]);
    }

    #[test]
    fn test_tick_counts_only_while_running() {
        let mut state = tiny_state();

        state.tick_second();
        assert_eq!(state.elapsed_seconds(), 0);

        state.flip(0);
        state.tick_second();
        assert_eq!(state.elapsed_seconds(), 1);

        state.flip(1);
        // the clock keeps running during the locked resolution window
        state.tick_second();
        assert_eq!(state.elapsed_seconds(), 2);
    }

    #[test]
    fn test_tick_stops_after_win() {
        let mut state = tiny_state();
        state.flip(0);
        state.flip(2);
        state.resolve_pending();
        state.flip(1);
        state.flip(3);
        state.resolve_pending();

        state.tick_second();

        assert_eq!(state.elapsed_seconds(), 0);
    }

    #[test]
    fn test_events_accumulate_and_drain() {
        let mut state = tiny_state();
        state.flip(0);
        state.flip(2);
        state.resolve_pending();

        let events = state.take_events();

        assert_eq!(
            events,
            vec![
                GameEvent::CardFlipped { index: 0 },
                GameEvent::CardFlipped { index: 2 },
                GameEvent::PairMatched { first: 0, second: 2 },
            ]
        );
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_mismatch_emits_no_resolution_event() {
        let mut state = tiny_state();
        state.flip(0);
        state.flip(1);
        state.take_events();

        state.resolve_pending();

        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_win_event_follows_final_match() {
        let mut state = tiny_state();
        state.flip(0);
        state.flip(2);
        state.resolve_pending();
        state.flip(1);
        state.flip(3);
        state.take_events();

        state.resolve_pending();

        assert_eq!(
            state.take_events(),
            vec![
                GameEvent::PairMatched { first: 1, second: 3 },
                GameEvent::GameWon,
            ]
        );
    }
}
