//! match-runner: plays a ROOT_CAUSE match headlessly and prints a JSON summary.
//!
//! Usage:
//!   match-runner --difficulty sysadmin --seed 7
//!   match-runner --config match.json --ticks 20000 --fps 30
//!
//! Logging goes to stderr and honours `RUST_LOG` (default `rootcause=info`).

use std::path::PathBuf;
use std::process;

use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rootcause_core::commands::PlayerCommand;
use rootcause_core::difficulty::{DifficultyLevel, ParseDifficultyError};
use rootcause_core::enums::GamePhase;
use rootcause_core::events::GameEvent;
use rootcause_core::types::ActorId;
use rootcause_sim::{Autopilot, ConfigError, SimConfig, SimulationEngine};

/// Ten minutes of play at 60 Hz.
const DEFAULT_TICKS: u64 = 36_000;
const DEFAULT_FPS: u32 = 60;

#[derive(Debug, Error)]
enum RunnerError {
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("missing value for `{0}`")]
    MissingValue(String),
    #[error("invalid value `{value}` for `{flag}`")]
    InvalidValue { flag: String, value: String },
    #[error(transparent)]
    Difficulty(#[from] ParseDifficultyError),
    #[error("failed to read {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to encode summary: {0}")]
    Summary(#[from] serde_json::Error),
}

#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    difficulty: Option<DifficultyLevel>,
    seed: Option<u64>,
    ticks: Option<u64>,
    fps: Option<u32>,
    help: bool,
}

#[derive(Debug, Serialize)]
struct MatchSummary {
    seed: u64,
    difficulty: String,
    outcome: GamePhase,
    ticks: u64,
    elapsed_secs: f64,
    score: u64,
    max_combo: u32,
    waves_cleared: usize,
    wave_total: usize,
    enemies_defeated: usize,
    hits_landed: usize,
    damage_taken: u32,
    player_health: u32,
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rootcause=info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run(&args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), RunnerError> {
    let options = parse_args(args)?;
    if options.help {
        print_usage();
        return Ok(());
    }

    let mut config = match &options.config {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|source| RunnerError::ReadConfig {
                path: path.clone(),
                source,
            })?;
            SimConfig::from_json(&json)?
        }
        None => SimConfig::default(),
    };
    if let Some(seed) = options.seed {
        config.seed = seed;
    }
    if let Some(difficulty) = options.difficulty {
        config.difficulty = difficulty;
    }
    config.validate()?;

    let summary = play(
        config,
        options.ticks.unwrap_or(DEFAULT_TICKS),
        options.fps.unwrap_or(DEFAULT_FPS),
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn print_usage() {
    eprintln!(
        "match-runner: headless ROOT_CAUSE match with a scripted player\n\
         \n\
         Options:\n\
         \n\
           --difficulty <name>  script-kiddie | sysadmin | kernel-panic\n\
           --seed <u64>         RNG seed (default: config or 42)\n\
           --ticks <N>          Tick limit (default: {DEFAULT_TICKS})\n\
           --fps <N>            Frame rate driving the tick dt (default: {DEFAULT_FPS})\n\
           --config <path>      JSON SimConfig (seed, difficulty, max_dt, encounter)\n\
         \n\
         The summary is printed to stdout as JSON.\n"
    );
}

fn parse_args(args: &[String]) -> Result<Options, RunnerError> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--help" | "-h" => options.help = true,
            "--difficulty" => options.difficulty = Some(value(flag, iter.next())?.parse()?),
            "--seed" => options.seed = Some(number(flag, iter.next())?),
            "--ticks" => options.ticks = Some(number(flag, iter.next())?),
            "--fps" => {
                let fps: u32 = number(flag, iter.next())?;
                if fps == 0 {
                    return Err(RunnerError::InvalidValue {
                        flag: flag.clone(),
                        value: fps.to_string(),
                    });
                }
                options.fps = Some(fps);
            }
            "--config" => options.config = Some(PathBuf::from(value(flag, iter.next())?)),
            other => return Err(RunnerError::UnknownOption(other.to_string())),
        }
    }
    Ok(options)
}

fn value<'a>(flag: &str, next: Option<&'a String>) -> Result<&'a str, RunnerError> {
    next.map(String::as_str)
        .ok_or_else(|| RunnerError::MissingValue(flag.to_string()))
}

fn number<T: std::str::FromStr>(flag: &str, next: Option<&String>) -> Result<T, RunnerError> {
    let raw = value(flag, next)?;
    raw.parse().map_err(|_| RunnerError::InvalidValue {
        flag: flag.to_string(),
        value: raw.to_string(),
    })
}

/// Drive one match with the autopilot until it ends or the tick limit is hit.
fn play(config: SimConfig, max_ticks: u64, fps: u32) -> MatchSummary {
    let seed = config.seed;
    let difficulty = config.difficulty;
    let dt = 1.0 / f64::from(fps);

    let mut engine = SimulationEngine::new(config);
    engine.queue_command(PlayerCommand::StartMatch { difficulty });

    let pilot = Autopilot::new();
    let mut snapshot = engine.tick(dt, &Default::default());
    let mut ticks = 1;
    let mut waves_cleared = 0;
    let mut enemies_defeated = 0;
    let mut hits_landed = 0;
    let mut damage_taken = 0;

    loop {
        for event in &snapshot.events {
            match event {
                GameEvent::WaveCleared { .. } => waves_cleared += 1,
                GameEvent::EnemyDefeated { .. } => enemies_defeated += 1,
                GameEvent::HitLanded { target, damage, .. } if *target == ActorId::PLAYER => {
                    damage_taken += damage;
                }
                GameEvent::HitLanded { .. } => hits_landed += 1,
                _ => {}
            }
        }
        if snapshot.phase.is_terminal() || ticks >= max_ticks {
            break;
        }
        let input = pilot.next_input(&snapshot);
        snapshot = engine.tick(dt, &input);
        ticks += 1;
    }

    if !snapshot.phase.is_terminal() {
        tracing::warn!(ticks, phase = ?snapshot.phase, "tick limit reached before the match ended");
    }

    MatchSummary {
        seed,
        difficulty: difficulty.to_string(),
        outcome: snapshot.phase,
        ticks,
        elapsed_secs: snapshot.time.elapsed_secs,
        score: snapshot.hud.score,
        max_combo: snapshot.hud.max_combo,
        waves_cleared,
        wave_total: snapshot.hud.wave_total,
        enemies_defeated,
        hits_landed,
        damage_taken,
        player_health: snapshot.hud.health,
    }
}
