//! Floppybird headless runner
//!
//! Plays autopilot rounds on the virtual clock and logs the event stream.
//!
//! Usage: `floppybird [rounds] [seed] [highscore.json] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    if let Err(e) = native::run(std::env::args().skip(1).collect()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `GameStateMachine` directly
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;
    use std::time::Duration;

    use floppybird::persistence::JsonFileStore;
    use floppybird::sim::{GameEvent, GamePhase, GameStateMachine, autopilot};
    use floppybird::{HighScoreStore, MemoryStore, Tuning};

    /// Give up on a round after this much virtual time
    const ROUND_LIMIT: Duration = Duration::from_secs(120);

    pub fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
        let rounds: u32 = match args.first() {
            Some(s) => s.parse()?,
            None => 3,
        };
        let seed: u64 = match args.get(1) {
            Some(s) => s.parse()?,
            None => rand::random(),
        };
        let store: Box<dyn HighScoreStore> = match args.get(2) {
            Some(path) => Box::new(JsonFileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        };
        let tuning = match args.get(3) {
            Some(path) => Tuning::load(Path::new(path))?,
            None => Tuning::default(),
        };

        log::info!("Floppybird (headless) starting, seed {}", seed);
        let mut machine = GameStateMachine::with_seed(tuning, store, seed)?;
        let dt = machine.tuning().sim_period();

        for round in 1..=rounds {
            let started = machine.now();
            loop {
                let input = autopilot::next_input(machine.session(), machine.tuning());
                machine.frame(&input, dt);
                for event in machine.drain_events() {
                    log_event(&event);
                }
                if machine.phase() == GamePhase::ScoreDisplay {
                    break;
                }
                if machine.now() - started > ROUND_LIMIT {
                    log::info!("Round {} still alive after {:?}, stopping", round, ROUND_LIMIT);
                    break;
                }
            }

            let session = machine.session();
            println!(
                "round {}: score {} (best {}, medal {})",
                round,
                session.score(),
                session.high_score(),
                session.medal.as_str()
            );

            if machine.phase() == GamePhase::ScoreDisplay {
                machine.replay();
            } else {
                break;
            }
        }
        Ok(())
    }

    fn log_event(event: &GameEvent) {
        match event {
            GameEvent::PlayerJumped => log::trace!("flap"),
            GameEvent::PipeSpawned(_) | GameEvent::PipeRemoved(_) => {
                log::trace!("{}", serde_json::to_string(event).unwrap_or_default())
            }
            _ => log::debug!("{}", serde_json::to_string(event).unwrap_or_default()),
        }
    }
}
