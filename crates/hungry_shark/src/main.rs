//! Headless hungry shark simulation
//!
//! Runs the gameplay loop at a fixed 60 Hz with a scripted shark that eats
//! the nearest fish on a fixed cadence, then logs a summary.

use std::path::PathBuf;

use clap::Parser;
use hungry_shark::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shoal_engine::config::ConfigFormat;
use shoal_engine::foundation::logging;
use shoal_engine::foundation::time::Stopwatch;

const DEFAULT_LEVELS: &str = include_str!("../assets/levels.json");
const DEFAULT_SETTINGS: &str = include_str!("../assets/settings.toml");
const FRAME_RATE: u32 = 60;

#[derive(Parser, Debug)]
#[command(name = "hungry_shark", about = "Runs a headless hungry shark simulation")]
struct Args {
    /// Level file (.json, .toml or .ron); the bundled levels when omitted
    #[arg(long, value_name = "FILE")]
    levels: Option<PathBuf>,

    /// Settings file; the bundled settings when omitted
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Level to start on
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,

    /// Seconds between bites
    #[arg(long, default_value_t = 0.5)]
    eat_interval: f32,

    /// Spawner random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Logs game events as they are dispatched
struct EventLogger;

impl EventHandler<GameEvent> for EventLogger {
    fn on_event(&mut self, event: &GameEvent) -> bool {
        match event {
            GameEvent::FishSpawned { .. } | GameEvent::HealthChanged { .. } => log::trace!("{event:?}"),
            GameEvent::FishEaten { category, eaten, target } => {
                log::debug!("Ate {category} ({eaten}/{target})");
            }
            GameEvent::PoolCleared(report) if report.outstanding > 0 => {
                log::warn!("Pool cleared with {} fish still out", report.outstanding);
            }
            _ => log::debug!("{event:?}"),
        }
        false
    }
}

#[derive(Debug, Default)]
struct Summary {
    fish_eaten: u32,
    levels_completed: u32,
    game_over: bool,
    finished: bool,
}

impl Summary {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::FishEaten { .. } => self.fish_eaten += 1,
            GameEvent::LevelCompleted { .. } => self.levels_completed += 1,
            GameEvent::GameOverShown { .. } => self.game_over = true,
            GameEvent::AllLevelsComplete => self.finished = true,
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logging::init_with_level(if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });

    log::info!("Starting Hungry Shark simulation");

    let levels = match &args.levels {
        Some(path) => LevelCatalog::load(path)?,
        None => LevelCatalog::from_json(DEFAULT_LEVELS)?,
    };
    let settings = match &args.settings {
        Some(path) => GameSettings::load_from_file(path)?,
        None => GameSettings::from_str_as(DEFAULT_SETTINGS, ConfigFormat::Toml)?,
    };
    settings.validate()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Spawner seed {seed}");

    let mut game = GameplayController::new(levels, settings, StdRng::seed_from_u64(seed));
    game.register_handler(Box::new(EventLogger));
    game.capture_events(true);
    game.on_level_start(args.level)?;

    let stopwatch = Stopwatch::start_new();
    let mut clock = FrameClock::with_rate(FRAME_RATE);
    let mut shark = Vec3::zeros();
    let mut since_bite = 0.0;
    let mut summary = Summary::default();

    while clock.total_time() < args.seconds {
        let delta_time = clock.tick();
        since_bite += delta_time;

        if since_bite >= args.eat_interval && game.mode() == GameMode::GameStart {
            if let Some((fish, _)) = game.spawner().nearest_fish(game.scene(), shark) {
                if let Some(pose) = game.scene().pose(fish) {
                    shark = pose.position;
                }
                if game.on_fish_eaten(fish) {
                    since_bite = 0.0;
                }
            }
        }

        game.update(delta_time, shark)?;
        for event in game.drain_events() {
            summary.record(&event);
        }
        if summary.finished || summary.game_over {
            break;
        }
    }

    let stats = game.pool().stats();
    log::info!(
        "Simulated {:.1}s in {:.1}ms over {} frames",
        clock.total_time(),
        stopwatch.elapsed_millis(),
        clock.frame_count()
    );
    log::info!(
        "Level {} ({:?}): {} fish eaten, {} levels completed, {} coins",
        game.level(),
        game.mode(),
        summary.fish_eaten,
        summary.levels_completed,
        game.coins()
    );
    log::info!(
        "Pool: {} created, {} acquired, {} released, {} rejected, peak {} in use",
        stats.total_created,
        stats.total_acquired,
        stats.total_released,
        stats.rejected_acquires,
        stats.peak_in_use
    );

    Ok(())
}
