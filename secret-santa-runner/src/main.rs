use core::fmt::{Debug, Display};

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;
use secret_santa_config::{get_config, Config, ConfigError};
use secret_santa_draw::{Assignment, DrawError, InputError};
use secret_santa_telemetry::{setup_telemetry, TelemetryError};
use tracing::{info, warn};

#[derive(thiserror::Error)]
enum RunnerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("invalid participants: {0}")]
    Input(#[from] InputError<String>),
    #[error(transparent)]
    Draw(#[from] DrawError),
}

impl Debug for RunnerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(self, f)
    }
}

fn run(config: &Config) -> Result<Assignment<String>, RunnerError> {
    let participants = config.participants()?;
    let engine = config.draw.engine();
    info!(
        participants = participants.len(),
        strategy = ?config.draw.strategy,
        seeded = config.draw.seed.is_some(),
        "drawing"
    );
    let assignment = match config.draw.seed {
        Some(seed) => engine.draw_with_rng(&participants, &mut StdRng::seed_from_u64(seed)),
        None => engine.draw(&participants),
    }
    .inspect_err(|error| {
        if error.is_retryable() {
            warn!("the draw may succeed when run again");
        }
    })?;
    Ok(assignment)
}

fn reveal(assignment: &Assignment<String>) -> String {
    assignment
        .iter()
        .map(|pairing| format!("{} -> {}", pairing.giver, pairing.receiver))
        .join("\n")
}

fn main() -> Result<(), RunnerError> {
    let config = get_config()?;
    setup_telemetry(config.log.as_deref())?;

    let assignment = run(&config)?;
    info!(cycles = assignment.cycles().len(), "draw complete");
    println!("{}", reveal(&assignment));
    Ok(())
}
