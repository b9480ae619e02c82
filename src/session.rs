//! Command surface between a UI and the game engine
//!
//! A [`Session`] owns the engine, the live [`GameState`] and the high-score
//! store. UI callbacks issue commands here instead of touching game fields,
//! and every command that affects timing is handed the [`Scheduler`] to arm
//! or disarm.

use log::{debug, error, info, warn};
use rand::{Rng, rngs::StdRng};

use crate::game::{Command, Direction, GameConfig, GameEngine, GameState, TickOutcome};
use crate::metrics::GameMetrics;
use crate::schedule::Scheduler;
use crate::storage::HighScoreStore;

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    /// High score after this game was counted
    pub high_score: u32,
    pub new_high_score: bool,
    /// The snake filled the whole board
    pub cleared: bool,
}

pub struct Session<S: HighScoreStore, R: Rng = StdRng> {
    engine: GameEngine<R>,
    state: GameState,
    store: S,
    high_score: u32,
    metrics: GameMetrics,
    last_game: Option<GameSummary>,
}

impl<S: HighScoreStore> Session<S, StdRng> {
    pub fn new(config: GameConfig, store: S) -> Self {
        Self::with_engine(GameEngine::new(config), store)
    }
}

impl<S: HighScoreStore, R: Rng> Session<S, R> {
    /// Build a session around `engine`, reading the stored high score once
    pub fn with_engine(mut engine: GameEngine<R>, store: S) -> Self {
        let state = engine.reset();
        let high_score = match store.read_high_score() {
            Ok(score) => score,
            Err(e) => {
                warn!("Could not read high score, starting from 0: {:#}", e);
                0
            }
        };

        Self {
            engine,
            state,
            store,
            high_score,
            metrics: GameMetrics::new(),
            last_game: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut GameMetrics {
        &mut self.metrics
    }

    /// Summary of the game that just ended; cleared on reset
    pub fn last_game(&self) -> Option<GameSummary> {
        self.last_game
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Dispatch a UI command. Returns whether it had any effect.
    pub fn apply(&mut self, command: Command, scheduler: &mut impl Scheduler) -> bool {
        match command {
            Command::Start => self.start(scheduler),
            Command::TogglePause => self.toggle_pause(scheduler),
            Command::Reset => self.reset(scheduler),
            Command::PlayAgain => self.play_again(scheduler),
            Command::Turn(direction) => self.turn(direction),
        }
    }

    pub fn start(&mut self, scheduler: &mut impl Scheduler) -> bool {
        if !self.state.start() {
            return false;
        }
        info!("Game started on a {0}x{0} board", self.state.tile_count);
        self.metrics.on_game_start();
        scheduler.arm(self.state.tick_interval);
        true
    }

    pub fn toggle_pause(&mut self, scheduler: &mut impl Scheduler) -> bool {
        if self.state.pause() {
            info!("Paused at score {}", self.state.score);
            self.metrics.on_pause();
            scheduler.disarm();
            true
        } else if self.state.resume() {
            info!("Resumed");
            self.metrics.on_resume();
            scheduler.arm(self.state.tick_interval);
            true
        } else {
            false
        }
    }

    /// Back to idle from any phase
    pub fn reset(&mut self, scheduler: &mut impl Scheduler) -> bool {
        scheduler.disarm();
        self.engine.reset_state(&mut self.state);
        self.metrics.on_reset();
        self.last_game = None;
        info!("Game reset");
        true
    }

    pub fn play_again(&mut self, scheduler: &mut impl Scheduler) -> bool {
        if !self.state.is_over() {
            return false;
        }
        self.reset(scheduler);
        self.start(scheduler)
    }

    pub fn turn(&mut self, direction: Direction) -> bool {
        self.state.set_pending_direction(direction)
    }

    /// Run one scheduled tick and re-arm the scheduler if play continues
    pub fn tick(&mut self, scheduler: &mut impl Scheduler) -> TickOutcome {
        let outcome = self.engine.tick(&mut self.state);

        if outcome.is_terminal() {
            scheduler.disarm();
            self.finish_game(outcome);
        } else if self.state.is_running() {
            scheduler.arm(self.state.tick_interval);
        }

        outcome
    }

    /// Fit the board to a new tile count; see [`GameEngine::resize`]
    pub fn resize(&mut self, tile_count: usize) -> bool {
        let applied = self.engine.resize(&mut self.state, tile_count);
        if applied {
            debug!("Board resized to {0}x{0}", tile_count);
        } else if let Some(pending) = self.state.pending_resize {
            debug!("Board resize to {0}x{0} queued until reset", pending);
        }
        applied
    }

    fn finish_game(&mut self, outcome: TickOutcome) {
        let score = self.state.score;
        let new_high_score = score > self.high_score;

        if new_high_score {
            self.high_score = score;
            match self.store.write_high_score(score) {
                Ok(()) => info!("New high score: {}", score),
                Err(e) => error!("Failed to save high score {}: {:#}", score, e),
            }
        }

        self.metrics.on_game_over(score);
        self.last_game = Some(GameSummary {
            score,
            high_score: self.high_score,
            new_high_score,
            cleared: outcome == TickOutcome::Cleared,
        });

        info!(
            "Game over ({:?}) with score {} after {} moves",
            outcome, score, self.state.ticks
        );
    }
}
