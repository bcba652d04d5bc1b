use core::fmt;
use core::time::Duration;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Running totals shown next to the board.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub predictions: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub last_seed: Option<Seed>,
}

/// One player's game: the engine, the auto player and whoever listens to them.
///
/// Every command runs to completion before the next one starts, and scheduler ticks are
/// dispatched through the same `&mut self`, so commands and ticks are handled strictly
/// in the order they arrive.
pub struct Session<S: Scheduler> {
    engine: PlayEngine,
    driver: AutoPlayDriver,
    scheduler: S,
    settings: EngineSettings,
    stats: SessionStats,
    entropy: StdRng,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl<S: Scheduler + fmt::Debug> fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("engine", &self.engine)
            .field("driver", &self.driver)
            .field("scheduler", &self.scheduler)
            .field("settings", &self.settings)
            .field("stats", &self.stats)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl<S: Scheduler> Session<S> {
    pub fn new(settings: EngineSettings, scheduler: S) -> Result<Self> {
        Self::with_entropy(settings, scheduler, StdRng::from_os_rng())
    }

    /// Builds a session whose generated seeds come from `entropy`.
    pub fn with_entropy(settings: EngineSettings, scheduler: S, entropy: StdRng) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            engine: PlayEngine::new(),
            driver: AutoPlayDriver::new(settings.auto_interval()),
            scheduler,
            settings,
            stats: SessionStats::default(),
            entropy,
            observers: Vec::new(),
        })
    }

    pub fn subscribe(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn state(&self) -> GameState {
        self.engine.state()
    }

    pub fn engine(&self) -> &PlayEngine {
        &self.engine
    }

    pub fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    pub fn board(&self) -> BoardView {
        BoardView::from_engine(&self.engine)
    }

    pub fn snapshot(&self) -> Option<ProbabilitySnapshot> {
        self.engine.snapshot()
    }

    pub fn config(&self) -> Option<&GameConfig> {
        self.engine.config()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn is_auto_running(&self) -> bool {
        self.driver.is_running()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Commits a configuration. An empty or malformed `seed` is replaced by a generated one.
    pub fn predict(&mut self, seed: &str, mines: CellCount) -> Result<GameConfig> {
        check_mine_count(mines, TOTAL_CELLS)?;
        self.engine.check_can_predict()?;

        let (seed, origin) = Seed::resolve(seed, &mut self.entropy);
        let config = GameConfig::new(seed.clone(), mines)?;

        let from = self.engine.state();
        self.engine.predict(config.clone())?;

        self.stats.predictions += 1;
        self.stats.last_seed = Some(seed.clone());
        self.emit(SessionEvent::Predicted {
            seed,
            origin,
            mines,
        });
        self.emit_transition(from);
        Ok(config)
    }

    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        let from = self.engine.state();
        let outcome = self.engine.reveal(index)?;

        self.emit(SessionEvent::Revealed {
            index,
            outcome,
            auto: false,
        });
        self.after_reveal(from, outcome);
        if outcome.ends_game() {
            self.stop_driver(StopReason::Finished);
        }
        Ok(outcome)
    }

    /// Clears the board and configuration and cancels auto play.
    pub fn reset(&mut self) {
        self.stop_driver(StopReason::Reset);
        let from = self.engine.state();
        self.engine.reset();
        log::debug!("session reset");
        self.emit(SessionEvent::Reset);
        self.emit_transition(from);
    }

    /// Returns `Ok(false)` if auto play was already running.
    pub fn start_auto(&mut self) -> Result<bool> {
        let started = self.driver.start(&self.engine, &mut self.scheduler)?;
        if started {
            self.emit(SessionEvent::AutoStarted);
        }
        Ok(started)
    }

    /// Returns whether auto play was running.
    pub fn stop_auto(&mut self) -> bool {
        self.stop_driver(StopReason::Manual)
    }

    /// Starts auto play if stopped, stops it if running. Returns the new running state.
    pub fn toggle_auto(&mut self) -> Result<bool> {
        if self.driver.is_running() {
            self.stop_auto();
            Ok(false)
        } else {
            self.start_auto()
        }
    }

    /// Dispatches a task fired by the scheduler.
    pub fn tick(&mut self, task: TaskId) -> AutoTick {
        let from = self.engine.state();
        let tick = self
            .driver
            .on_tick(task, &mut self.engine, &mut self.scheduler);

        match tick {
            AutoTick::Stale => {}
            AutoTick::Revealed {
                index,
                outcome,
                stopped,
            } => {
                self.emit(SessionEvent::Revealed {
                    index,
                    outcome,
                    auto: true,
                });
                self.after_reveal(from, outcome);
                if let Some(reason) = stopped {
                    self.emit(SessionEvent::AutoStopped { reason });
                }
            }
            AutoTick::Stopped(reason) => self.emit(SessionEvent::AutoStopped { reason }),
        }
        tick
    }

    /// Dispatches every task that is already due. Returns how many were dispatched.
    pub fn run_due(&mut self) -> usize {
        let mut dispatched = 0;
        while let Some(task) = self.scheduler.poll_due() {
            self.tick(task);
            dispatched += 1;
        }
        dispatched
    }

    fn after_reveal(&mut self, from: GameState, outcome: RevealOutcome) {
        match outcome {
            RevealOutcome::Won => self.stats.games_won += 1,
            RevealOutcome::HitMine => self.stats.games_lost += 1,
            RevealOutcome::Safe => {}
        }
        self.emit_transition(from);
    }

    fn stop_driver(&mut self, reason: StopReason) -> bool {
        let stopped = self.driver.stop(&mut self.scheduler);
        if stopped {
            self.emit(SessionEvent::AutoStopped { reason });
        }
        stopped
    }

    fn emit_transition(&mut self, from: GameState) {
        let to = self.engine.state();
        if from != to {
            self.emit(SessionEvent::StateChanged { from, to });
        }
    }

    fn emit(&mut self, event: SessionEvent) {
        log::trace!("session event: {event:?}");
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}

impl Session<ManualScheduler> {
    /// Session on a simulated clock, with generated seeds drawn from `entropy_seed`.
    pub fn simulated(settings: EngineSettings, entropy_seed: u64) -> Result<Self> {
        Self::with_entropy(
            settings,
            ManualScheduler::new(),
            StdRng::seed_from_u64(entropy_seed),
        )
    }

    /// Moves the simulated clock forward by `by`, firing every task that falls due on the
    /// way in deadline order. Returns how many ticks were dispatched.
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.scheduler.now() + by;
        let mut dispatched = 0;
        while let Some(task) = self.scheduler.pop_until(target) {
            self.tick(task);
            dispatched += 1;
        }
        self.scheduler.set_now(target);
        dispatched
    }
}

impl Session<WallClockScheduler> {
    /// Blocks the current thread, dispatching ticks as they fall due, until nothing is
    /// scheduled any more.
    pub fn run_until_idle(&mut self) -> usize {
        let mut dispatched = 0;
        while let Some(deadline) = self.scheduler.next_deadline() {
            let now = web_time::Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
            dispatched += self.run_due();
        }
        dispatched
    }
}
