use std::sync::{Arc, Mutex};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::games::session_rng::SessionRng;
use crate::log;
use crate::scheduler::{Scheduler, TaskHandle};

use super::game_state::MemoryMatchGameState;
use super::settings::SessionSettings;
use super::types::{FlipOutcome, GameEvent, GameSnapshot};

type Hook = Box<dyn Fn() + Send + Sync>;

#[derive(Default)]
pub struct EventHooks {
    on_flip: Option<Hook>,
    on_match: Option<Hook>,
    on_win: Option<Hook>,
}

impl EventHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_flip(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_flip = Some(Box::new(hook));
        self
    }

    pub fn on_match(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_match = Some(Box::new(hook));
        self
    }

    pub fn on_win(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_win = Some(Box::new(hook));
        self
    }

    fn dispatch(&self, events: &[GameEvent]) {
        for event in events {
            let hook = match event {
                GameEvent::CardFlipped { .. } => self.on_flip.as_ref(),
                GameEvent::PairMatched { .. } => self.on_match.as_ref(),
                GameEvent::GameWon => self.on_win.as_ref(),
            };
            if let Some(hook) = hook {
                hook();
            }
        }
    }
}

struct SessionCore {
    settings: SessionSettings,
    game: MemoryMatchGameState,
    rng: SessionRng,
    generation: u64,
    ticker: Option<TaskHandle>,
    resolver: Option<TaskHandle>,
}

struct SessionInner {
    config: EngineConfig,
    scheduler: Arc<dyn Scheduler>,
    hooks: EventHooks,
    core: Mutex<SessionCore>,
}

#[derive(Clone)]
pub struct MemoryMatchSession {
    inner: Arc<SessionInner>,
}

impl MemoryMatchSession {
    pub fn create(
        config: EngineConfig,
        scheduler: Arc<dyn Scheduler>,
        hooks: EventHooks,
        seed: u64,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let settings = SessionSettings::resolve(&config, &config.default_difficulty)?;
        let mut rng = SessionRng::new(seed);
        let game = MemoryMatchGameState::new(&settings, &mut rng);

        log!(
            "Created memory match session: difficulty '{}', seed {}",
            settings.preset().name,
            seed
        );

        Ok(Self {
            inner: Arc::new(SessionInner {
                config,
                scheduler,
                hooks,
                core: Mutex::new(SessionCore {
                    settings,
                    game,
                    rng,
                    generation: 0,
                    ticker: None,
                    resolver: None,
                }),
            }),
        })
    }

    pub fn new(config: EngineConfig, scheduler: Arc<dyn Scheduler>) -> Result<Self, EngineError> {
        let seed = SessionRng::from_random().seed();
        Self::create(config, scheduler, EventHooks::new(), seed)
    }

    pub fn flip(&self, index: usize) {
        let events = {
            let mut core = self.inner.core.lock().unwrap();
            let core = &mut *core;

            let outcome = core.game.flip(index);
            if outcome == FlipOutcome::Rejected {
                return;
            }

            if core.ticker.is_none() {
                core.ticker = Some(self.start_ticker(core.generation, core.settings.tick_interval()));
            }

            if let FlipOutcome::PairCompleted(resolution) = outcome {
                let delay = if resolution.is_match {
                    core.settings.match_delay()
                } else {
                    core.settings.mismatch_delay()
                };
                core.resolver = Some(self.schedule_resolution(core.generation, delay));
            }

            core.game.take_events()
        };

        self.inner.hooks.dispatch(&events);
    }

    pub fn reset(&self, difficulty: Option<&str>) -> Result<(), EngineError> {
        let mut core = self.inner.core.lock().unwrap();
        let core = &mut *core;

        let name = match difficulty {
            Some(level) => level.to_string(),
            None => core.settings.preset().name.clone(),
        };
        // resolve before touching anything: an unknown key must leave
        // the current session intact
        let settings = SessionSettings::resolve(&self.inner.config, &name)?;

        core.generation += 1;
        if let Some(ticker) = core.ticker.take() {
            ticker.cancel();
        }
        if let Some(resolver) = core.resolver.take() {
            resolver.cancel();
        }
        core.game = MemoryMatchGameState::new(&settings, &mut core.rng);
        core.settings = settings;

        log!(
            "Reset memory match session: difficulty '{}'",
            core.settings.preset().name
        );
        Ok(())
    }

    pub fn set_difficulty(&self, level: &str) -> Result<(), EngineError> {
        self.reset(Some(level))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let core = self.inner.core.lock().unwrap();
        core.game.snapshot(&core.settings)
    }

    pub fn seed(&self) -> u64 {
        self.inner.core.lock().unwrap().rng.seed()
    }

    fn start_ticker(&self, generation: u64, interval: std::time::Duration) -> TaskHandle {
        let weak = Arc::downgrade(&self.inner);
        self.inner.scheduler.schedule_repeating(
            interval,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let mut core = inner.core.lock().unwrap();
                if core.generation != generation {
                    return;
                }
                core.game.tick_second();
            }),
        )
    }

    fn schedule_resolution(&self, generation: u64, delay: std::time::Duration) -> TaskHandle {
        let weak = Arc::downgrade(&self.inner);
        self.inner.scheduler.schedule_once(
            delay,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let events = {
                    let mut core = inner.core.lock().unwrap();
                    if core.generation != generation {
                        return;
                    }
                    core.game.resolve_pending();
                    core.resolver = None;
                    if core.game.won() {
                        if let Some(ticker) = core.ticker.take() {
                            ticker.cancel();
                        }
                        log!(
                            "Memory match session won: {} moves in {} seconds",
                            core.game.moves(),
                            core.game.elapsed_seconds()
                        );
                    }
                    core.game.take_events()
                };
                inner.hooks.dispatch(&events);
            }),
        )
    }
}
