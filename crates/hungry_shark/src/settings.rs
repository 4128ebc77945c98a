//! Gameplay settings

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shoal_engine::config::{Config, ConfigError};
use shoal_engine::foundation::math::Vec3;

use crate::catalog::SmallFishType;

/// Tunable gameplay settings, loaded from `settings.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Spawn cadence and placement
    pub spawn: SpawnSettings,

    /// Health drain
    pub health: HealthSettings,

    /// Delays between gameplay steps
    pub timing: TimingSettings,

    /// Prototype asset name per fish type name; missing entries use the
    /// fish type name itself
    pub prototypes: BTreeMap<String, String>,
}

/// Spawn settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSettings {
    /// Seconds between spawn ticks
    pub interval: f32,

    /// A waypoint this close to an active fish is skipped
    pub min_spawn_spacing: f32,

    /// A waypoint this close to the shark is skipped
    pub min_distance_from_shark: f32,

    /// Heading of spawned fish, degrees around +Y
    pub spawn_yaw: f32,

    /// Spawn points
    pub waypoints: Vec<[f32; 3]>,
}

/// Health settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthSettings {
    /// Health after eating and at level start
    pub max_health: u32,

    /// Seconds without eating before health drops
    pub drain_interval: f32,

    /// Health lost per drain
    pub drain_amount: u32,
}

/// Timing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    /// Seconds an eaten fish stays out before returning to the pool
    pub release_delay: f32,

    /// Seconds between finishing a level and starting the next
    pub next_level_delay: f32,

    /// Seconds between game over and the game-over screen
    pub game_over_delay: f32,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        // Eight points on a 30 unit ring, far enough apart for the spacing rule
        let waypoints = (0..8u8)
            .map(|i| {
                let angle = f32::from(i) * std::f32::consts::FRAC_PI_4;
                [30.0 * angle.cos(), 0.0, 30.0 * angle.sin()]
            })
            .collect();
        Self {
            interval: 1.0,
            min_spawn_spacing: 20.0,
            min_distance_from_shark: 2.0,
            spawn_yaw: 90.0,
            waypoints,
        }
    }
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            max_health: 100,
            drain_interval: 3.0,
            drain_amount: 10,
        }
    }
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            release_delay: 0.25,
            next_level_delay: 1.0,
            game_over_delay: 1.0,
        }
    }
}

impl Config for GameSettings {}

impl GameSettings {
    /// Reject settings the game loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("spawn.interval", self.spawn.interval),
            ("health.drain_interval", self.health.drain_interval),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("spawn.min_spawn_spacing", self.spawn.min_spawn_spacing),
            ("spawn.min_distance_from_shark", self.spawn.min_distance_from_shark),
            ("timing.release_delay", self.timing.release_delay),
            ("timing.next_level_delay", self.timing.next_level_delay),
            ("timing.game_over_delay", self.timing.game_over_delay),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must not be negative, got {value}")));
            }
        }

        if self.health.max_health == 0 {
            return Err(ConfigError::Invalid("health.max_health must be positive".to_string()));
        }
        if let Some(unknown) = self.prototypes.keys().find(|name| name.parse::<SmallFishType>().is_err()) {
            return Err(ConfigError::Invalid(format!("prototypes: unknown fish type {unknown:?}")));
        }
        Ok(())
    }

    /// Asset name of the prototype a fish type is instantiated from
    pub fn prototype_name(&self, fish: SmallFishType) -> &str {
        self.prototypes
            .iter()
            .find(|(name, _)| name.parse::<SmallFishType>() == Ok(fish))
            .map_or(fish.name(), |(_, asset)| asset.as_str())
    }

    /// Spawn points as vectors
    pub fn waypoints(&self) -> Vec<Vec3> {
        self.spawn.points()
    }
}

impl SpawnSettings {
    /// Spawn points as vectors
    pub fn points(&self) -> Vec<Vec3> {
        self.waypoints.iter().map(|[x, y, z]| Vec3::new(*x, *y, *z)).collect()
    }
}
