//! Gameplay flow tests
//!
//! Drive a full controller through levels on a fixed 0.25 s step, which
//! sums exactly in floating point so timer boundaries are deterministic.

mod level_progression;

use rand::rngs::StdRng;
use rand::SeedableRng;
use shoal_engine::foundation::math::Vec3;

use crate::game::{GameEvent, GameplayController};
use crate::level::LevelCatalog;
use crate::scene::EntityId;
use crate::settings::GameSettings;

pub(crate) const STEP: f32 = 0.25;

pub(crate) const LEVELS: &str = r#"{
    "levels": [
        {
            "levelNumber": 1,
            "targets": [ { "description": "Eat two fish", "targetType": "Eat", "amount": 2 } ],
            "smallObjects": [
                { "name": "GoldenSmallFish", "size": 1.0, "quantity": 3 },
                { "name": "CoralBeauty", "size": 0.8, "quantity": 2 }
            ],
            "bufferAmount": 1,
            "rewardCoins": { "amount": 25 }
        },
        {
            "levelNumber": 2,
            "targets": [ { "description": "Eat three fish", "targetType": "Eat", "amount": 3, "timeLimit": 5 } ],
            "smallObjects": [ { "name": "Chelmon_Rostratus", "size": 1.0, "quantity": 3 } ],
            "enemies": [ { "bomb": "SeaMine", "size": 1.5, "quantity": 1 } ],
            "bufferAmount": 0,
            "rewardCoins": { "amount": 40 }
        }
    ]
}"#;

pub(crate) fn settings() -> GameSettings {
    let mut settings = GameSettings::default();
    settings.spawn.waypoints = vec![[10.0, 0.0, 0.0], [-10.0, 0.0, 0.0], [0.0, 0.0, 10.0]];
    settings.spawn.min_spawn_spacing = 5.0;
    settings.health.drain_interval = 100.0;
    settings
}

pub(crate) fn controller_with(settings: GameSettings) -> GameplayController<LevelCatalog> {
    let levels = LevelCatalog::from_json(LEVELS).unwrap();
    let mut game = GameplayController::new(levels, settings, StdRng::seed_from_u64(42));
    game.capture_events(true);
    game
}

pub(crate) fn controller() -> GameplayController<LevelCatalog> {
    controller_with(settings())
}

/// Advance in fixed steps with the shark at the origin
pub(crate) fn run_for(game: &mut GameplayController<LevelCatalog>, seconds: f32) {
    let steps = (seconds / STEP).round() as usize;
    for _ in 0..steps {
        game.update(STEP, Vec3::zeros()).unwrap();
    }
}

pub(crate) fn active_handles(game: &GameplayController<LevelCatalog>) -> Vec<EntityId> {
    game.spawner().active_fish().map(|(handle, _)| handle).collect()
}

pub(crate) fn count_events(events: &[GameEvent], pred: impl Fn(&GameEvent) -> bool) -> usize {
    events.iter().filter(|event| pred(event)).count()
}
