use criterion::{Criterion, criterion_group, criterion_main};
use memory_match_engine::games::SessionRng;
use memory_match_engine::games::memory_match::{Deck, SessionSettings};
use memory_match_engine::{EngineConfig, EventHooks, ManualScheduler, MemoryMatchSession};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

fn bench_deck_shuffle_hard(c: &mut Criterion) {
    let config = EngineConfig::default();
    let settings = SessionSettings::resolve(&config, "hard").unwrap();

    c.bench_function("deck_shuffle_hard_36_cards", |b| {
        let mut rng = SessionRng::new(12345);
        b.iter(|| Deck::shuffled(&settings, &mut rng));
    });
}

fn bench_full_game_easy(c: &mut Criterion) {
    c.bench_function("full_game_easy_8_pairs", |b| {
        b.iter(|| {
            let scheduler = Arc::new(ManualScheduler::new());
            let session = MemoryMatchSession::create(
                EngineConfig::default(),
                scheduler.clone(),
                EventHooks::new(),
                12345,
            )
            .unwrap();

            let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
            for (index, &card) in session.snapshot().deck.iter().enumerate() {
                positions.entry(card).or_default().push(index);
            }
            for pair in positions.values() {
                session.flip(pair[0]);
                session.flip(pair[1]);
                scheduler.advance(Duration::from_millis(350));
            }

            assert!(session.snapshot().won);
        });
    });
}

criterion_group!(benches, bench_deck_shuffle_hard, bench_full_game_easy);
criterion_main!(benches);
