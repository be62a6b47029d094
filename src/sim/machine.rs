//! Game phase state machine
//!
//! `Splash -> Playing -> ScoreDisplay -> Splash`, nothing else. The machine
//! owns the session, the scheduler and the high score store, and is the only
//! thing the host talks to.

use std::time::Duration;

use super::collision::Verdict;
use super::physics;
use super::pipes;
use super::scheduler::{Scheduler, Task};
use super::state::{GameEvent, GamePhase, GameSession, PlayerBody, Stage};
use super::tick::{FrameInput, simulation_tick};
use crate::highscores::Medal;
use crate::persistence::HighScoreStore;
use crate::tuning::{Tuning, TuningError};

/// Top-level game driver
#[derive(Debug)]
pub struct GameStateMachine<S: HighScoreStore> {
    tuning: Tuning,
    session: GameSession,
    scheduler: Scheduler,
    store: S,
}

impl<S: HighScoreStore> GameStateMachine<S> {
    /// Create a machine with a random seed
    pub fn new(tuning: Tuning, store: S) -> Result<Self, TuningError> {
        Self::with_seed(tuning, store, rand::random())
    }

    /// Create a machine whose pipe layout is fixed by `seed`
    ///
    /// Reads the high score once; a failed read counts as no high score.
    pub fn with_seed(tuning: Tuning, mut store: S, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;

        let high_score = store.load().unwrap_or_else(|e| {
            log::warn!("{}; starting from 0", e);
            0
        });
        let session = GameSession::new(seed, high_score, &tuning);

        let mut machine = Self {
            tuning,
            session,
            scheduler: Scheduler::new(),
            store,
        };
        machine.enter_splash();
        Ok(machine)
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Take every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.session.events)
    }

    /// Tap/click/key
    pub fn activate(&mut self) {
        match self.session.stage {
            Stage::Splash => self.enter_playing(),
            Stage::Playing => self.jump(),
            Stage::ScoreDisplay { .. } => {}
        }
    }

    /// Replay button; honoured once per scoreboard
    pub fn replay(&mut self) {
        if let Stage::ScoreDisplay { replay_armed: true } = self.session.stage {
            self.session.stage = Stage::ScoreDisplay {
                replay_armed: false,
            };
            self.enter_splash();
        }
    }

    /// Apply this frame's signals, then let `dt` of virtual time pass
    pub fn frame(&mut self, input: &FrameInput, dt: Duration) {
        if input.replay {
            self.replay();
        }
        if input.activate {
            self.activate();
        }
        self.advance(dt);
    }

    /// Run every tick that falls due within `dt`
    pub fn advance(&mut self, dt: Duration) {
        let until = self.scheduler.now() + dt;
        while let Some(task) = self.scheduler.pop_due(until) {
            match task {
                Task::Simulation => self.run_simulation_tick(),
                Task::Spawn => pipes::spawn_tick(&mut self.session, &self.tuning),
            }
        }
        self.scheduler.advance_to(until);
    }

    fn run_simulation_tick(&mut self) {
        match simulation_tick(&mut self.session, &self.tuning) {
            Verdict::Alive => {}
            Verdict::Passed(pipe_id) => {
                let score = self.session.scores.record_pass();
                log::debug!("Cleared pipe {}, score {}", pipe_id, score);
                self.session.emit(GameEvent::PlayerScored(score));
            }
            Verdict::Dead => self.enter_score_display(),
        }
    }

    fn jump(&mut self) {
        physics::jump(&mut self.session.player, &self.tuning);
        self.session.emit(GameEvent::PlayerJumped);
    }

    fn enter_splash(&mut self) {
        self.scheduler.cancel_all();

        let session = &mut self.session;
        session.stage = Stage::Splash;
        session.player = PlayerBody::at_rest(&self.tuning);
        session.scores.reset();
        session.medal = Medal::None;
        session.settle_offset = None;
        session.time_ticks = 0;
        for pipe in session.pipes.drain() {
            session.emit(GameEvent::PipeRemoved(pipe));
        }

        log::info!("Splash (high score {})", session.high_score());
        session.emit(GameEvent::PhaseChanged(GamePhase::Splash));
    }

    fn enter_playing(&mut self) {
        self.session.stage = Stage::Playing;
        log::info!("Round started (seed {})", self.session.seed);
        self.session.emit(GameEvent::PhaseChanged(GamePhase::Playing));

        self.scheduler.start(Task::Simulation, self.tuning.sim_period());
        self.scheduler.start(Task::Spawn, self.tuning.spawn_period());
        self.jump();
    }

    fn enter_score_display(&mut self) {
        self.scheduler.cancel_all();

        let session = &mut self.session;
        let settle_offset = session.player.settle_distance(&self.tuning);
        session.settle_offset = Some(settle_offset);
        session.emit(GameEvent::PlayerDied { settle_offset });

        session.stage = Stage::ScoreDisplay { replay_armed: true };
        log::info!(
            "Round over after {} ticks, score {}",
            session.time_ticks,
            session.score()
        );
        session.emit(GameEvent::PhaseChanged(GamePhase::ScoreDisplay));

        if let Some(best) = session.scores.finalize() {
            log::info!("New high score: {}", best);
            session.emit(GameEvent::HighScoreUpdated(best));
            if let Err(e) = self.store.save(best) {
                log::warn!("{}; high score kept for this run only", e);
            }
        }

        let medal = session.scores.medal();
        session.medal = medal;
        if medal.is_awarded() {
            session.emit(GameEvent::MedalAwarded(medal));
        }
    }
}
