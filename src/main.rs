//! Corporative Hide & Seek headless runner
//!
//! Plays one seeded session with a scripted input pattern and prints a JSON
//! summary. Useful for balancing tuning files without a renderer.

#[cfg(not(target_arch = "wasm32"))]
mod runner {
    use std::path::PathBuf;

    use clap::Parser;
    use serde::Serialize;

    use hide_seek::sim::{GameEvent, Session, SessionEvent, SessionPhase, Snapshot, TickInput};
    use hide_seek::{Level, Tuning, TuningError};

    /// Sneak around the office while the boss is out looking
    #[derive(Parser)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        /// RNG seed (random when omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Ticks to simulate before giving up (60 per second)
        #[arg(short, long, default_value_t = 3600)]
        ticks: u64,

        /// JSON file overriding game balance
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    }

    /// One-line result printed on stdout
    #[derive(Serialize)]
    struct Summary {
        seed: u64,
        ticks: u64,
        score: u64,
        phase: SessionPhase,
        caught_by: Option<String>,
        final_state: Snapshot,
    }

    /// Walk a loop through the floor: out of the pantry, along the desks,
    /// back again. Crouches on the return legs.
    fn sneak_input(tick: u64) -> TickInput {
        const LEG: u64 = 150;
        let mut input = TickInput::default();
        match (tick / LEG) % 6 {
            0 => input.left = true,
            1 => input.up = true,
            2 => {}
            3 => {
                input.down = true;
                input.crouch = true;
            }
            4 => {
                input.right = true;
                input.crouch = true;
            }
            _ => {}
        }
        input
    }

    fn load_level(path: Option<&PathBuf>) -> Result<Level, TuningError> {
        let tuning = match path {
            Some(path) => Tuning::from_path(path)?,
            None => Tuning::default(),
        };
        Ok(Level::with_tuning(tuning))
    }

    pub fn run() {
        let args = Args::parse();
        hide_seek::logging::init(args.verbose);

        let seed = args.seed.unwrap_or_else(rand::random);
        let session = load_level(args.tuning.as_ref())
            .and_then(|level| Session::new(level, seed));
        let mut session = match session {
            Ok(session) => session,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = session.start() {
            log::error!("{}", e);
            std::process::exit(1);
        }

        let mut ticks = 0;
        while ticks < args.ticks && session.phase() == SessionPhase::Running {
            let report = session.advance(&sneak_input(ticks));
            ticks += u64::from(report.ticks);

            for event in &report.events {
                match event {
                    GameEvent::BossSpoke { phrase } => log::info!("Boss: \"{}\"", phrase),
                    other => log::debug!("{:?}", other),
                }
            }
            if let Some(SessionEvent::Ended { phrase }) = report.transition {
                log::info!("Game over at {}s: \"{}\"", session.score(), phrase);
            }
        }

        let summary = Summary {
            seed,
            ticks,
            score: session.score(),
            phase: session.phase(),
            caught_by: session.final_phrase().map(str::to_owned),
            final_state: session.world().snapshot(),
        };
        match serde_json::to_string(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("Failed to encode summary: {}", e);
                std::process::exit(1);
            }
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    runner::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library only on the web; a host page drives `Session` directly
}
