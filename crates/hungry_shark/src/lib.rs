//! # Hungry Shark
//!
//! Arcade gameplay on top of the shoal engine: a shark eats waves of pooled
//! small fish to reach each level's target before its health runs out.
//!
//! ## Modules
//!
//! - [`catalog`]: fish and bomb types and their level-data names
//! - [`level`]: level file schema and per-level pool sizing
//! - [`scene`]: in-memory scene world the pool instantiates into
//! - [`spawner`]: waypoint spawning and fish release
//! - [`game`]: game modes, level flow and game over
//! - [`settings`]: tunable gameplay settings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hungry_shark::prelude::*;
//! use rand::SeedableRng;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let levels = LevelCatalog::load("assets/levels.json")?;
//! let settings = GameSettings::load_or_default("assets/settings.toml")?;
//! let mut game = GameplayController::new(levels, settings, rand::rngs::StdRng::seed_from_u64(1));
//!
//! game.on_level_start(1)?;
//! game.update(1.0 / 60.0, Vec3::zeros())?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod level;
pub mod scene;
pub mod settings;
pub mod spawner;
pub mod game;

#[cfg(test)]
mod tests;

/// Common imports for game code
pub mod prelude {
    pub use crate::{
        catalog::{BombType, SmallFishType},
        game::{GameError, GameEvent, GameMode, GameplayController},
        level::{LevelCatalog, LevelConfigProvider},
        scene::{EntityId, SceneWorld},
        settings::GameSettings,
        spawner::{FishPool, Spawner},
    };
    pub use shoal_engine::prelude::*;
}
